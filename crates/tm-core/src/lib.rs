//! Core types for Tianming: stats, character profiles, events, and fates.
//!
//! This crate defines the data model of the cultivation RPG backend. It is
//! independent of storage and generation: every type here is plain data
//! that serializes to the JSON shapes the engine persists.

/// Event archetypes, options, instances, results, and stored sessions.
pub mod event;
/// Fate archetypes: templates, generated results, and the game view.
pub mod fate;
/// Append-only event history records.
pub mod history;
/// Opaque identifiers for users, event archetypes, and sessions.
pub mod ids;
/// Supported display locales.
pub mod locale;
/// Character profiles and their mutation helpers.
pub mod profile;
/// Stat keys, single stats, and the always-complete stat block.
pub mod stat;

/// Re-export event types.
pub use event::{
    Event, EventMetadata, EventOption, EventPenalties, EventResult, EventRewards, FailureBranch,
    SessionState, StoredSession, SuccessBranch,
};
/// Re-export fate types.
pub use fate::{FateResult, FateTemplate, GameView};
/// Re-export the history record.
pub use history::EventHistory;
/// Re-export identifier types.
pub use ids::{EventId, SessionId, UserId};
/// Re-export the locale enum.
pub use locale::Locale;
/// Re-export the profile type.
pub use profile::CharacterProfile;
/// Re-export stat types.
pub use stat::{Stat, StatBlock, StatKey};
