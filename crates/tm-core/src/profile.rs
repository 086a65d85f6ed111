use serde::{Deserialize, Serialize};

use crate::ids::UserId;
use crate::locale::Locale;
use crate::stat::{Stat, StatBlock, StatKey};

/// One character's complete mutable state.
///
/// Created once per user; mutated only through the ledger and the profile
/// service; never deleted by the engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CharacterProfile {
    /// Owning user.
    pub id: UserId,
    /// Display name, unique across users (enforced by the username index).
    pub username: String,
    /// Preferred narrative locale.
    #[serde(default)]
    pub locale: Locale,
    /// All fourteen stats, always complete.
    pub stats: StatBlock,
    /// Acquired traits. Set semantics, insertion order kept for display.
    pub traits: Vec<String>,
    /// Current life. Always within `0..=max_life`.
    pub life: i32,
    /// Life ceiling.
    pub max_life: i32,
    /// Completed reincarnations. Reserved for prestige mechanics.
    pub reincarnations: u32,
    /// Points earned across reincarnations. Reserved for prestige mechanics.
    pub reincarnation_points: u32,
    /// Earned achievements. Set semantics, insertion order kept.
    pub achievements: Vec<String>,
    /// Name of the assigned fate archetype, if one has been generated.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fate: Option<String>,
}

impl CharacterProfile {
    /// A fresh character: every stat at value 1, grade 1, no experience,
    /// full life of 100.
    pub fn new(id: UserId, username: impl Into<String>, locale: Locale) -> Self {
        Self {
            id,
            username: username.into(),
            locale,
            stats: StatBlock::new(),
            traits: Vec::new(),
            life: 100,
            max_life: 100,
            reincarnations: 0,
            reincarnation_points: 0,
            achievements: Vec::new(),
            fate: None,
        }
    }

    /// The stat for `key`.
    pub fn stat(&self, key: StatKey) -> &Stat {
        self.stats.get(key)
    }

    /// Mutable access to the stat for `key`.
    pub fn stat_mut(&mut self, key: StatKey) -> &mut Stat {
        self.stats.get_mut(key)
    }

    /// Apply a signed life delta, clamped to `0..=max_life`.
    pub fn adjust_life(&mut self, delta: i32) {
        self.life = self.life.saturating_add(delta).clamp(0, self.max_life);
    }

    /// Add a trait if not already present. Returns true if it was added.
    pub fn add_trait(&mut self, name: impl Into<String>) -> bool {
        let name = name.into();
        if self.traits.iter().any(|t| *t == name) {
            return false;
        }
        self.traits.push(name);
        true
    }

    /// Remove a trait by name. Returns true if it was present.
    pub fn remove_trait(&mut self, name: &str) -> bool {
        let before = self.traits.len();
        self.traits.retain(|t| t != name);
        self.traits.len() != before
    }

    /// Add an achievement if not already earned. Returns true if added.
    pub fn add_achievement(&mut self, id: impl Into<String>) -> bool {
        let id = id.into();
        if self.achievements.iter().any(|a| *a == id) {
            return false;
        }
        self.achievements.push(id);
        true
    }
}
