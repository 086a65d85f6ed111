use std::path::Path;

use colored::Colorize;
use comfy_table::{ContentArrangement, Table};
use tm_core::CharacterProfile;

pub async fn run(store: &Path, username: &str) -> Result<(), String> {
    let engine = super::open_engine(store)?;
    let profile = super::find_profile(&engine, username).await?;
    print_profile(&profile);
    Ok(())
}

pub(super) fn print_profile(profile: &CharacterProfile) {
    println!("  {} [{}]", profile.username.bold(), profile.locale.code().dimmed());
    if let Some(fate) = &profile.fate {
        println!("  fate: {fate}");
    }
    println!("  life: {}/{}", profile.life, profile.max_life);
    println!();

    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Stat", "Value", "Grade", "EP"]);
    for stat in profile.stats.iter() {
        table.add_row(vec![
            stat.key.wire_name().to_string(),
            stat.value.to_string(),
            stat.grade.to_string(),
            format!("{}/{}", stat.ep, stat.max_ep),
        ]);
    }
    println!("{table}");

    if !profile.traits.is_empty() {
        println!();
        println!("  traits: {}", profile.traits.join(", "));
    }
    if !profile.achievements.is_empty() {
        println!("  achievements: {}", profile.achievements.join(", "));
    }
}
