use std::path::Path;

pub async fn run(store: &Path, username: &str) -> Result<(), String> {
    let engine = super::open_engine(store)?;
    let profile = super::find_profile(&engine, username).await?;
    let view = engine.load_game(&profile.id).await.map_err(|e| e.to_string())?;

    super::profile::print_profile(&view.profile);

    if let Some(fate) = &view.fate {
        println!();
        println!("  fate: {}: {}", fate.fate, fate.description);
    }

    if !view.recent_events.is_empty() {
        println!();
        println!("  Recent events:");
        for entry in &view.recent_events {
            println!(
                "    {}  {} / {} ({})",
                entry.timestamp.format("%Y-%m-%d %H:%M"),
                entry.event_id,
                entry.option_id,
                if entry.result.success { "success" } else { "failure" }
            );
        }
    }

    Ok(())
}
