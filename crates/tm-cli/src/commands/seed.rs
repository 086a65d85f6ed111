use std::fs;
use std::path::Path;

use tm_core::EventMetadata;

pub async fn run(store: &Path, file: &Path) -> Result<(), String> {
    let engine = super::open_engine(store)?;

    let raw = fs::read_to_string(file)
        .map_err(|e| format!("cannot read '{}': {e}", file.display()))?;
    let entries: Vec<EventMetadata> =
        serde_json::from_str(&raw).map_err(|e| format!("invalid archetype file: {e}"))?;

    let seeded = engine.seed_catalog(&entries).await.map_err(|e| e.to_string())?;
    println!("Seeded {seeded} archetype{}", if seeded == 1 { "" } else { "s" });

    Ok(())
}
