use std::path::Path;

use comfy_table::{ContentArrangement, Table};

pub async fn run(store: &Path) -> Result<(), String> {
    let engine = super::open_engine(store)?;
    let entries = engine.event_catalog().await.map_err(|e| e.to_string())?;

    if entries.is_empty() {
        println!("  Catalog is empty.");
        return Ok(());
    }

    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Id", "Type", "Minutes", "EP", "Risk", "Requires"]);

    for meta in &entries {
        let requires = match &meta.required_stats {
            Some(stats) if !stats.is_empty() => stats
                .iter()
                .map(|(key, min)| format!("{key} {min}+"))
                .collect::<Vec<_>>()
                .join(", "),
            _ => "—".to_string(),
        };
        table.add_row(vec![
            meta.id.as_str().to_string(),
            meta.kind.clone(),
            meta.time_cost.to_string(),
            meta.ep_reward.to_string(),
            format!("{:.1}", meta.risk),
            requires,
        ]);
    }

    println!("{table}");
    println!();
    println!(
        "  {} archetype{}",
        entries.len(),
        if entries.len() == 1 { "" } else { "s" }
    );

    Ok(())
}
