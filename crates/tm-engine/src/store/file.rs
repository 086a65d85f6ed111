//! JSON-file store for CLI and embedded use.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;

use super::{KeyValueStore, StoreResult};

/// Single-file [`KeyValueStore`] persisting one JSON document.
///
/// Every operation reads the whole document, mutates it, and writes it
/// back under an internal mutex. Suits the CLI's one-process usage; not
/// meant for concurrent processes sharing a file.
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    guard: Mutex<()>,
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct Document {
    #[serde(default)]
    values: BTreeMap<String, String>,
    #[serde(default)]
    lists: BTreeMap<String, Vec<String>>,
}

impl FileStore {
    /// Store persisting to `path`. The file is created on first write.
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self { path: path.as_ref().to_path_buf(), guard: Mutex::new(()) }
    }

    async fn load(&self) -> StoreResult<Document> {
        match tokio::fs::read_to_string(&self.path).await {
            Ok(text) => Ok(serde_json::from_str(&text)?),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(Document::default()),
            Err(err) => Err(err.into()),
        }
    }

    async fn save(&self, doc: &Document) -> StoreResult<()> {
        let text = serde_json::to_string_pretty(doc)?;
        tokio::fs::write(&self.path, text).await?;
        Ok(())
    }
}

#[async_trait::async_trait]
impl KeyValueStore for FileStore {
    async fn get(&self, key: &str) -> StoreResult<Option<String>> {
        let _guard = self.guard.lock().await;
        Ok(self.load().await?.values.get(key).cloned())
    }

    async fn set(&self, key: &str, value: String) -> StoreResult<()> {
        let _guard = self.guard.lock().await;
        let mut doc = self.load().await?;
        doc.values.insert(key.to_string(), value);
        self.save(&doc).await
    }

    async fn delete(&self, key: &str) -> StoreResult<()> {
        let _guard = self.guard.lock().await;
        let mut doc = self.load().await?;
        doc.values.remove(key);
        doc.lists.remove(key);
        self.save(&doc).await
    }

    async fn list_keys(&self, prefix: &str) -> StoreResult<Vec<String>> {
        let _guard = self.guard.lock().await;
        let doc = self.load().await?;
        let mut keys: Vec<String> = doc
            .values
            .keys()
            .chain(doc.lists.keys())
            .filter(|k| k.starts_with(prefix))
            .cloned()
            .collect();
        keys.sort();
        keys.dedup();
        Ok(keys)
    }

    async fn append_to_list(&self, key: &str, value: String) -> StoreResult<()> {
        let _guard = self.guard.lock().await;
        let mut doc = self.load().await?;
        doc.lists.entry(key.to_string()).or_default().push(value);
        self.save(&doc).await
    }

    async fn list(&self, key: &str) -> StoreResult<Vec<String>> {
        let _guard = self.guard.lock().await;
        Ok(self.load().await?.lists.get(key).cloned().unwrap_or_default())
    }
}
