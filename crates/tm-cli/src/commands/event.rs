use std::path::Path;

use colored::Colorize;
use comfy_table::{ContentArrangement, Table};
use tm_core::EventId;

pub async fn run(
    store: &Path,
    username: &str,
    event: &str,
    locale: Option<&str>,
) -> Result<(), String> {
    let locale = locale.map(super::parse_locale).transpose()?;
    let engine = super::open_engine(store)?;
    let profile = super::find_profile(&engine, username).await?;

    let offered = engine
        .instantiate_event(&profile.id, &EventId::new(event), locale)
        .await
        .map_err(|e| e.to_string())?;

    println!(
        "  {} [{}]",
        offered.metadata.id.as_str().bold(),
        offered.metadata.kind.dimmed()
    );
    println!();
    for line in offered.narrative.lines() {
        println!("  {}", line.trim());
    }
    println!();

    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Option", "", "Chance"]);
    for option in &offered.options {
        table.add_row(vec![
            option.id.clone(),
            option.text.clone(),
            format!("{:.0}%", option.success.probability * 100.0),
        ]);
    }
    println!("{table}");

    println!();
    println!("session: {}", offered.session_id);
    println!("Resolve with: tianming resolve {username} {} <option>", offered.session_id);

    Ok(())
}
