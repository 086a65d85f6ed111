//! The asynchronous Tianming game engine.
//!
//! Wires the pure game math from `tm-mechanics` to durable storage and the
//! narrative generation collaborator: event instantiation, probabilistic
//! option resolution, profile mutation under per-user serialization, fates,
//! and history. Callers hand every operation an already-verified user id;
//! the engine never authenticates.

/// The event archetype catalog.
pub mod catalog;
/// Injectable wall-clock capability.
pub mod clock;
/// Engine configuration.
pub mod config;
/// The façade wiring storage, generation, and the services together.
pub mod engine;
/// Error types and the error-kind taxonomy.
pub mod error;
/// Event instantiation and resolution.
pub mod events;
/// Fate generation and assignment.
pub mod fate;
/// Narrative generation: trait, prompt templating, parsing, clients.
pub mod generate;
/// Append-only event history.
pub mod history;
/// Per-key async locking for read-modify-write serialization.
pub mod locks;
/// Profile creation, lookup, and mutation.
pub mod profiles;
/// Injectable randomness capability.
pub mod random;
/// The key-value storage collaborator and its implementations.
pub mod store;

pub use catalog::{EventCatalog, builtin_archetypes};
pub use clock::{Clock, FixedClock, SystemClock};
pub use config::EngineConfig;
pub use engine::Engine;
pub use error::{EngineError, EngineResult, ErrorKind};
pub use fate::{FateService, default_template};
pub use generate::{CannedGenerator, GeminiClient, GenerateError, NarrativeGenerator};
pub use history::HistoryLog;
pub use locks::KeyedLocks;
pub use profiles::ProfileService;
pub use random::{Randomness, ScriptedRandomness, ThreadRandomness};
pub use store::{FileStore, KeyValueStore, MemoryStore, StoreError, StoreResult};
