//! Event instantiation and resolution.
//!
//! Instantiation turns a catalog archetype into a concrete offered event
//! and persists it as a session. Resolution replays exactly that session,
//! rolls the chosen option, and applies the outcome. The two halves share
//! nothing but the stored session.

/// The built-in minimal event used when generation fails.
pub mod default_event;
/// Archetype to offered-event instantiation.
pub mod instantiate;
/// The offered-to-resolved state machine.
pub mod resolve;

pub use default_event::default_event;
pub use instantiate::Instantiator;
pub use resolve::Resolver;
