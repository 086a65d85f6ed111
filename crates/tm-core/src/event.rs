use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::ids::{EventId, SessionId, UserId};
use crate::stat::StatKey;

fn probability_one() -> f64 {
    1.0
}

/// Immutable definition of an event archetype. Created administratively;
/// read-only to the engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventMetadata {
    /// Archetype identifier.
    pub id: EventId,
    /// Free-form category tag: "exploration", "combat", "social", ...
    #[serde(rename = "type")]
    pub kind: String,
    /// In-world time the event consumes, in minutes.
    pub time_cost: u32,
    /// Baseline experience magnitude. Advisory only.
    pub ep_reward: u64,
    /// Danger level in `[0, 1]`. Advisory only.
    pub risk: f64,
    /// Optional flat life change associated with the archetype. Advisory.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub life_delta: Option<i32>,
    /// Minimum stat values required before the event may be offered.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub required_stats: Option<BTreeMap<StatKey, u32>>,
    /// Items required before the event may be offered. Recorded but not
    /// evaluated: there is no inventory system.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub required_items: Option<Vec<String>>,
}

/// Rewards granted when an option resolves successfully.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventRewards {
    /// Experience per stat, applied through the ledger's grade-up loop.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ep: Option<BTreeMap<StatKey, u64>>,
    /// Item grants. Recorded but not interpreted: there is no inventory.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub items: Option<BTreeMap<String, u32>>,
    /// Signed life delta, clamped on application.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub life: Option<i32>,
    /// Traits to add. Set union, re-adding is a no-op.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub traits: Option<Vec<String>>,
    /// Single achievement to award, idempotently.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub achievement: Option<String>,
}

/// Penalties applied when an option resolves as a failure.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventPenalties {
    /// Signed life delta, negative for a loss, clamped on application.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub life: Option<i32>,
    /// Items lost. Recorded but not interpreted.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub items: Option<Vec<String>>,
    /// Traits removed, if present.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub traits: Option<Vec<String>>,
}

/// The favorable branch of an option.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SuccessBranch {
    /// Chance of success in `[0, 1]`. Missing on the wire means 1.0:
    /// guaranteed success.
    #[serde(default = "probability_one")]
    pub probability: f64,
    /// Narrative shown on success.
    pub narrative: String,
    /// Rewards granted on success.
    #[serde(default)]
    pub rewards: EventRewards,
}

/// The unfavorable branch of an option. Absent entirely when failure has no
/// mechanical effect beyond the roll itself.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FailureBranch {
    /// Narrative shown on failure.
    pub narrative: String,
    /// Penalties applied on failure.
    #[serde(default)]
    pub penalties: EventPenalties,
}

/// One player-facing choice within an instantiated event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventOption {
    /// Option identifier, unique within the event.
    pub id: String,
    /// Label shown to the player.
    pub text: String,
    /// What happens on a successful roll.
    pub success: SuccessBranch,
    /// What happens on a failed roll, if anything.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub failure: Option<FailureBranch>,
}

/// An instantiated, resolvable narrative encounter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    /// Archetype this instance was built from.
    pub id: EventId,
    /// Unguessable handle for the single future resolution.
    pub session_id: SessionId,
    /// The archetype definition, echoed for the caller.
    pub metadata: EventMetadata,
    /// Scene-setting narrative shown before the choice.
    pub narrative: String,
    /// Ordered player choices.
    pub options: Vec<EventOption>,
}

/// Outcome of resolving one option. Immutable once produced.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventResult {
    /// Whether the roll succeeded.
    pub success: bool,
    /// Narrative for the outcome branch. Empty if a failed option has no
    /// failure branch.
    pub narrative: String,
    /// Rewards actually granted. Present only on success.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rewards: Option<EventRewards>,
    /// Penalties actually applied. Present only on failure with a branch.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub penalties: Option<EventPenalties>,
}

/// Lifecycle of a stored session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SessionState {
    /// The event has been offered; no option chosen yet.
    Offered,
    /// Terminal: an option was chosen and its result applied.
    Resolved,
}

/// The persisted form of an instantiated event.
///
/// Resolution reads this record back so the player resolves exactly the
/// narrative and options they were offered; nothing is regenerated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredSession {
    /// The session handle.
    pub session_id: SessionId,
    /// Owning user. Resolution by any other user is rejected.
    pub user_id: UserId,
    /// Archetype the instance was built from.
    pub event_id: EventId,
    /// The offered narrative.
    pub narrative: String,
    /// The offered options.
    pub options: Vec<EventOption>,
    /// Offered or resolved.
    pub state: SessionState,
    /// When the event was instantiated.
    pub created_at: DateTime<Utc>,
}

impl StoredSession {
    /// True once the session has reached its terminal state.
    pub fn is_resolved(&self) -> bool {
        self.state == SessionState::Resolved
    }

    /// Find an offered option by id.
    pub fn option(&self, option_id: &str) -> Option<&EventOption> {
        self.options.iter().find(|o| o.id == option_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn option_json_without_probability() -> &'static str {
        r#"{
            "id": "leave",
            "text": "Leave",
            "success": { "narrative": "You walk away.", "rewards": {} }
        }"#
    }

    #[test]
    fn missing_probability_means_guaranteed_success() {
        let opt: EventOption = serde_json::from_str(option_json_without_probability()).unwrap();
        assert_eq!(opt.success.probability, 1.0);
        assert!(opt.failure.is_none());
    }

    #[test]
    fn metadata_kind_uses_type_on_the_wire() {
        let meta = EventMetadata {
            id: EventId::new("cave_exploration"),
            kind: "exploration".into(),
            time_cost: 60,
            ep_reward: 30,
            risk: 0.4,
            life_delta: None,
            required_stats: None,
            required_items: None,
        };
        let json = serde_json::to_value(&meta).unwrap();
        assert_eq!(json["type"], "exploration");
        assert_eq!(json["timeCost"], 60);
        assert!(json.get("kind").is_none());
    }

    #[test]
    fn unknown_stat_key_in_requirements_is_rejected() {
        let json = r#"{
            "id": "trial",
            "type": "trial",
            "timeCost": 10,
            "epReward": 5,
            "risk": 0.1,
            "requiredStats": { "charisma": 3 }
        }"#;
        assert!(serde_json::from_str::<EventMetadata>(json).is_err());
    }

    #[test]
    fn rewards_default_to_nothing() {
        let rewards = EventRewards::default();
        assert!(rewards.ep.is_none());
        assert!(rewards.life.is_none());
        assert!(rewards.traits.is_none());
    }

    #[test]
    fn session_state_wire_forms_are_lowercase() {
        assert_eq!(
            serde_json::to_string(&SessionState::Offered).unwrap(),
            "\"offered\""
        );
        assert_eq!(
            serde_json::to_string(&SessionState::Resolved).unwrap(),
            "\"resolved\""
        );
    }

    #[test]
    fn stored_session_finds_options_by_id() {
        let opt: EventOption = serde_json::from_str(option_json_without_probability()).unwrap();
        let session = StoredSession {
            session_id: SessionId::new(),
            user_id: UserId::new("u1"),
            event_id: EventId::new("cave_exploration"),
            narrative: "A cave.".into(),
            options: vec![opt],
            state: SessionState::Offered,
            created_at: Utc::now(),
        };
        assert!(session.option("leave").is_some());
        assert!(session.option("fight").is_none());
        assert!(!session.is_resolved());
    }

    #[test]
    fn stored_session_round_trips_through_json() {
        let opt: EventOption = serde_json::from_str(option_json_without_probability()).unwrap();
        let session = StoredSession {
            session_id: SessionId::new(),
            user_id: UserId::new("u1"),
            event_id: EventId::new("cave_exploration"),
            narrative: "A cave.".into(),
            options: vec![opt],
            state: SessionState::Resolved,
            created_at: Utc::now(),
        };
        let json = serde_json::to_string(&session).unwrap();
        let back: StoredSession = serde_json::from_str(&json).unwrap();
        assert_eq!(back, session);
    }

    #[test]
    fn penalties_carry_signed_life_deltas() {
        let json = r#"{ "life": -10 }"#;
        let p: EventPenalties = serde_json::from_str(json).unwrap();
        assert_eq!(p.life, Some(-10));
    }
}
