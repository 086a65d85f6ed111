//! Injectable randomness capability.
//!
//! Outcome rolls and session ids come from a [`Randomness`] source rather
//! than ambient RNG calls, so resolution is reproducible in tests.

use std::collections::VecDeque;
use std::sync::Mutex;

use rand::Rng;
use tm_core::SessionId;

/// Source of uniform rolls and fresh session ids.
pub trait Randomness: Send + Sync {
    /// One uniform draw in `[0, 1)`.
    fn probability(&self) -> f64;

    /// A fresh unguessable session id.
    fn session_id(&self) -> SessionId;
}

/// Production randomness: thread-local RNG rolls and random UUID sessions.
#[derive(Debug, Clone, Copy, Default)]
pub struct ThreadRandomness;

impl Randomness for ThreadRandomness {
    fn probability(&self) -> f64 {
        rand::rng().random::<f64>()
    }

    fn session_id(&self) -> SessionId {
        SessionId::new()
    }
}

/// Scripted randomness for tests: rolls come from a fixed queue.
///
/// Once the queue is exhausted every further draw is 0.0, which succeeds
/// against any positive probability. Session ids stay random; callers
/// capture them from returned events.
#[derive(Debug, Default)]
pub struct ScriptedRandomness {
    rolls: Mutex<VecDeque<f64>>,
}

impl ScriptedRandomness {
    /// A script with no queued rolls (every draw is 0.0).
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue up rolls to hand out in order.
    pub fn with_rolls(rolls: impl IntoIterator<Item = f64>) -> Self {
        Self {
            rolls: Mutex::new(rolls.into_iter().collect()),
        }
    }

    /// Append one roll to the script.
    pub fn push_roll(&self, roll: f64) {
        self.rolls
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push_back(roll);
    }
}

impl Randomness for ScriptedRandomness {
    fn probability(&self) -> f64 {
        self.rolls
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .pop_front()
            .unwrap_or(0.0)
    }

    fn session_id(&self) -> SessionId {
        SessionId::new()
    }
}
