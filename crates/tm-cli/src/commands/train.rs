use std::path::Path;

use colored::Colorize;

pub async fn run(
    store: &Path,
    username: &str,
    stat: &str,
    minutes: u32,
    rate: f64,
) -> Result<(), String> {
    let key = super::parse_stat(stat)?;
    let engine = super::open_engine(store)?;
    let profile = super::find_profile(&engine, username).await?;

    let (profile, report) = engine
        .train(&profile.id, key, rate, minutes)
        .await
        .map_err(|e| e.to_string())?;

    println!("Trained {key} for {minutes} minutes: +{} EP", report.gained);
    let after = profile.stat(key);
    if report.grade_ups > 0 {
        println!(
            "  {}",
            format!("{key} advanced to grade {}!", after.grade).green().bold()
        );
    }
    println!(
        "  {key}: value {}, grade {}, {}/{} EP",
        after.value, after.grade, after.ep, after.max_ep
    );

    Ok(())
}
