use std::path::Path;

use comfy_table::{ContentArrangement, Table};

pub async fn run(store: &Path, username: &str, limit: Option<usize>) -> Result<(), String> {
    let engine = super::open_engine(store)?;
    let profile = super::find_profile(&engine, username).await?;

    let entries = engine
        .event_history(&profile.id, limit)
        .await
        .map_err(|e| e.to_string())?;

    if entries.is_empty() {
        println!("  No events yet.");
        return Ok(());
    }

    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["When", "Event", "Option", "Outcome"]);
    for entry in &entries {
        table.add_row(vec![
            entry.timestamp.format("%Y-%m-%d %H:%M").to_string(),
            entry.event_id.as_str().to_string(),
            entry.option_id.clone(),
            if entry.result.success { "success".to_string() } else { "failure".to_string() },
        ]);
    }
    println!("{table}");
    println!();
    println!(
        "  {} record{}",
        entries.len(),
        if entries.len() == 1 { "" } else { "s" }
    );

    Ok(())
}
