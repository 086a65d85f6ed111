use std::path::Path;

use tm_core::UserId;

pub async fn run(store: &Path, username: &str, locale: &str) -> Result<(), String> {
    let locale = super::parse_locale(locale)?;
    let engine = super::open_engine(store)?;

    let id = UserId::new(uuid::Uuid::new_v4().to_string());
    let profile = engine
        .create_profile(id, username, locale)
        .await
        .map_err(|e| e.to_string())?;

    println!("Created character '{}'", profile.username);
    println!("  id:     {}", profile.id);
    println!("  locale: {}", profile.locale);
    println!("  life:   {}/{}", profile.life, profile.max_life);
    println!();
    println!("Next:");
    println!("  tianming fate {} --draw", profile.username);
    println!("  tianming event {} cave_exploration", profile.username);

    Ok(())
}
