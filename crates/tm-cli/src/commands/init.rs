use std::path::Path;

use tm_engine::{builtin_archetypes, default_template};

pub async fn run(store: &Path) -> Result<(), String> {
    if store.exists() {
        return Err(format!("store '{}' already exists", store.display()));
    }

    let engine = super::engine_over(store);
    let seeded = engine
        .seed_catalog(&builtin_archetypes())
        .await
        .map_err(|e| e.to_string())?;
    engine
        .save_fate_template(&default_template())
        .await
        .map_err(|e| e.to_string())?;

    println!("Created game store {}", store.display());
    println!("  {seeded} event archetypes seeded");
    println!("  default fate template installed");
    println!();
    println!("Get started:");
    println!("  tianming create <username>            # Create a character");
    println!("  tianming catalog                      # List event archetypes");
    println!("  tianming event <username> <event>     # Offer an event");
    println!("  tianming resolve <username> <session> <option>");

    Ok(())
}
