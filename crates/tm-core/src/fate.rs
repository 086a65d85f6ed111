use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::history::EventHistory;
use crate::profile::CharacterProfile;
use crate::stat::StatKey;

/// Administrative prompt template for fate generation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FateTemplate {
    /// Template identifier. The engine's default is `default-fate`.
    pub id: String,
    /// Prompt text with `{{variable}}` placeholders.
    pub prompt_template: String,
    /// Per-locale display strings. Advisory data for front ends.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub default_translations: BTreeMap<String, BTreeMap<String, String>>,
}

/// A generated narrative archetype for a character.
///
/// Carries starting stat values and traits, i.e. profile state. It is never
/// fabricated from fallbacks: generation errors propagate instead.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FateResult {
    /// Name of the archetype.
    pub fate: String,
    /// Flavor description.
    pub description: String,
    /// Starting stat values. Applied as `max(current, starting)`.
    #[serde(default)]
    pub starting_stats: BTreeMap<StatKey, u32>,
    /// Starting traits, set-unioned into the profile.
    #[serde(default)]
    pub starting_traits: Vec<String>,
}

/// Read-only aggregate handed to a game client on load: the profile, the
/// stored fate if any, and the most recent history records.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameView {
    /// The character profile.
    pub profile: CharacterProfile,
    /// The stored fate, if one has been generated.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fate: Option<FateResult>,
    /// Most recent resolutions, newest first.
    pub recent_events: Vec<EventHistory>,
}
