//! The durable key-value storage collaborator.
//!
//! The engine assumes no transactional multi-key operation; cross-key
//! consistency is handled by write ordering and per-user locking. Values
//! are JSON strings; (de)serialization happens at the engine edge. Storage
//! is the sole source of truth: nothing is cached across calls.

use async_trait::async_trait;

/// JSON-file store for CLI and embedded use.
pub mod file;
/// The storage key scheme.
pub mod keys;
/// In-memory store for tests and local runs.
pub mod memory;

pub use file::FileStore;
pub use memory::MemoryStore;

/// Errors from a storage backend.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// Underlying I/O failed.
    #[error("storage i/o: {0}")]
    Io(#[from] std::io::Error),

    /// The persisted document could not be encoded or decoded.
    #[error("storage encoding: {0}")]
    Encoding(#[from] serde_json::Error),
}

/// Result type for storage operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// Minimal key-value interface the engine runs against.
///
/// Plain values and lists live in separate namespaces under the same key
/// space; a `set` never silently clobbers an append-only log.
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    /// Read the value at `key`, if present.
    async fn get(&self, key: &str) -> StoreResult<Option<String>>;

    /// Write `value` at `key`, replacing any previous value.
    async fn set(&self, key: &str, value: String) -> StoreResult<()>;

    /// Remove `key` (both value and list entries). Absent keys are fine.
    async fn delete(&self, key: &str) -> StoreResult<()>;

    /// All keys starting with `prefix`, in no guaranteed order.
    async fn list_keys(&self, prefix: &str) -> StoreResult<Vec<String>>;

    /// Append `value` to the list at `key`, creating it if needed.
    async fn append_to_list(&self, key: &str, value: String) -> StoreResult<()>;

    /// The full list at `key`, oldest first. Absent keys yield an empty list.
    async fn list(&self, key: &str) -> StoreResult<Vec<String>>;
}
