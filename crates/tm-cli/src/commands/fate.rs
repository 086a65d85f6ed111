use std::path::Path;

use colored::Colorize;
use tm_core::FateResult;

pub async fn show(store: &Path, username: &str) -> Result<(), String> {
    let engine = super::open_engine(store)?;
    let profile = super::find_profile(&engine, username).await?;

    match engine.fate(&profile.id).await.map_err(|e| e.to_string())? {
        Some(fate) => print_fate(&fate),
        None => {
            println!("  No fate drawn yet.");
            println!("  Draw one with: tianming fate {username} --draw");
        }
    }

    Ok(())
}

pub async fn draw(store: &Path, username: &str, locale: Option<&str>) -> Result<(), String> {
    let locale = locale.map(super::parse_locale).transpose()?;
    let engine = super::open_engine(store)?;
    let profile = super::find_profile(&engine, username).await?;

    let fate = engine
        .generate_fate(&profile.id, locale)
        .await
        .map_err(|e| e.to_string())?;
    print_fate(&fate);

    Ok(())
}

fn print_fate(fate: &FateResult) {
    println!("  {}", fate.fate.bold());
    println!();
    for line in fate.description.lines() {
        println!("  {}", line.trim());
    }
    if !fate.starting_stats.is_empty() {
        println!();
        for (key, value) in &fate.starting_stats {
            println!("  {key}: {value}");
        }
    }
    if !fate.starting_traits.is_empty() {
        println!();
        println!("  traits: {}", fate.starting_traits.join(", "));
    }
}
