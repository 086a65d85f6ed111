pub mod catalog;
pub mod create;
pub mod event;
pub mod fate;
pub mod gain;
pub mod history;
pub mod init;
pub mod load;
pub mod profile;
pub mod resolve;
pub mod seed;
pub mod train;

use std::path::Path;
use std::sync::Arc;

use tm_core::{CharacterProfile, Locale, StatKey};
use tm_engine::{CannedGenerator, Engine, FileStore, GeminiClient, NarrativeGenerator};

/// Open the engine over an existing game store.
pub fn open_engine(store_path: &Path) -> Result<Engine, String> {
    if !store_path.exists() {
        return Err(format!(
            "store '{}' not found (run `tianming init` first)",
            store_path.display()
        ));
    }
    Ok(engine_over(store_path))
}

/// Engine over `store_path`; the file is created on first write.
/// With `GEMINI_API_KEY` set events and fates are generated live,
/// otherwise events degrade to the built-in defaults and fate drawing
/// reports the missing generator.
fn engine_over(store_path: &Path) -> Engine {
    let store = Arc::new(FileStore::new(store_path));
    let generator: Arc<dyn NarrativeGenerator> = match GeminiClient::from_env() {
        Ok(client) => Arc::new(client),
        Err(_) => Arc::new(CannedGenerator::new()),
    };
    Engine::new(store, generator)
}

/// Look a profile up by username, case-insensitive.
async fn find_profile(engine: &Engine, username: &str) -> Result<CharacterProfile, String> {
    engine.find_user(username).await.map_err(|e| e.to_string())
}

fn parse_locale(s: &str) -> Result<Locale, String> {
    Locale::parse(s).ok_or_else(|| format!("unknown locale '{s}' (expected ko, en, or zh)"))
}

fn parse_stat(s: &str) -> Result<StatKey, String> {
    StatKey::parse(s).ok_or_else(|| {
        let names: Vec<&str> = StatKey::all().iter().map(|k| k.wire_name()).collect();
        format!("unknown stat '{s}' (expected one of: {})", names.join(", "))
    })
}
