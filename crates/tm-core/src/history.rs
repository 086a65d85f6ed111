use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::event::EventResult;
use crate::ids::{EventId, UserId};

/// One append-only audit record of a resolved event.
///
/// Written once per resolution, never mutated, and never read back into
/// resolution logic.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventHistory {
    /// User who resolved the event.
    pub user_id: UserId,
    /// Archetype of the resolved event.
    pub event_id: EventId,
    /// When the resolution happened.
    pub timestamp: DateTime<Utc>,
    /// The option the player chose.
    pub option_id: String,
    /// The outcome that was applied.
    pub result: EventResult,
}
