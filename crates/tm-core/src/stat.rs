use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Experience required to leave grade 1.
const FIRST_GRADE_EP: u64 = 100;

/// The closed set of trainable stats. Every profile carries all fourteen.
///
/// Wire names are camelCase (`qiGeneration`, `cultSpeed`, ...), matching the
/// persisted JSON.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "camelCase")]
pub enum StatKey {
    /// Offensive power.
    Attack,
    /// Resistance to harm.
    Fortitude,
    /// Chance of striking a vital point.
    Critical,
    /// Skill and finesse.
    Technique,
    /// Rate of qi absorption during cultivation.
    QiGeneration,
    /// Awareness of surroundings and hidden things.
    Perception,
    /// Speed of cultivation progress.
    CultSpeed,
    /// Clarity of mind.
    Clarity,
    /// Pill refining craft.
    PillRefining,
    /// Weapon and tool forging craft.
    Forging,
    /// Alchemy craft.
    Alchemy,
    /// Gem carving craft.
    GemCarving,
    /// Fortune.
    Luck,
    /// Affinity with the five elements.
    FiveElements,
}

impl StatKey {
    /// All stat keys in declaration order.
    pub fn all() -> [StatKey; 14] {
        [
            Self::Attack,
            Self::Fortitude,
            Self::Critical,
            Self::Technique,
            Self::QiGeneration,
            Self::Perception,
            Self::CultSpeed,
            Self::Clarity,
            Self::PillRefining,
            Self::Forging,
            Self::Alchemy,
            Self::GemCarving,
            Self::Luck,
            Self::FiveElements,
        ]
    }

    /// Parse a stat key, case-insensitive, accepting both camelCase and
    /// snake_case spellings. Unknown names yield `None`.
    pub fn parse(s: &str) -> Option<Self> {
        let norm: String = s
            .chars()
            .filter(|c| *c != '_')
            .map(|c| c.to_ascii_lowercase())
            .collect();
        match norm.as_str() {
            "attack" => Some(Self::Attack),
            "fortitude" => Some(Self::Fortitude),
            "critical" => Some(Self::Critical),
            "technique" => Some(Self::Technique),
            "qigeneration" => Some(Self::QiGeneration),
            "perception" => Some(Self::Perception),
            "cultspeed" => Some(Self::CultSpeed),
            "clarity" => Some(Self::Clarity),
            "pillrefining" => Some(Self::PillRefining),
            "forging" => Some(Self::Forging),
            "alchemy" => Some(Self::Alchemy),
            "gemcarving" => Some(Self::GemCarving),
            "luck" => Some(Self::Luck),
            "fiveelements" => Some(Self::FiveElements),
            _ => None,
        }
    }

    /// The wire (camelCase) name of this key.
    pub fn wire_name(self) -> &'static str {
        match self {
            Self::Attack => "attack",
            Self::Fortitude => "fortitude",
            Self::Critical => "critical",
            Self::Technique => "technique",
            Self::QiGeneration => "qiGeneration",
            Self::Perception => "perception",
            Self::CultSpeed => "cultSpeed",
            Self::Clarity => "clarity",
            Self::PillRefining => "pillRefining",
            Self::Forging => "forging",
            Self::Alchemy => "alchemy",
            Self::GemCarving => "gemCarving",
            Self::Luck => "luck",
            Self::FiveElements => "fiveElements",
        }
    }

    fn index(self) -> usize {
        match self {
            Self::Attack => 0,
            Self::Fortitude => 1,
            Self::Critical => 2,
            Self::Technique => 3,
            Self::QiGeneration => 4,
            Self::Perception => 5,
            Self::CultSpeed => 6,
            Self::Clarity => 7,
            Self::PillRefining => 8,
            Self::Forging => 9,
            Self::Alchemy => 10,
            Self::GemCarving => 11,
            Self::Luck => 12,
            Self::FiveElements => 13,
        }
    }
}

impl fmt::Display for StatKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.wire_name())
    }
}

/// One trainable attribute of a character.
///
/// At rest `0 <= ep < max_ep` always holds: experience that would reach
/// `max_ep` has already been converted into a grade-up by the ledger.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Stat {
    /// Which attribute this is.
    pub key: StatKey,
    /// Current level, at least 1. Rises by one per grade-up.
    pub value: u32,
    /// Current grade, at least 1. Drives the experience requirement.
    pub grade: u32,
    /// Accumulated experience toward the next grade.
    pub ep: u64,
    /// Experience required for the next grade. Pure function of `grade`.
    #[serde(rename = "maxEP")]
    pub max_ep: u64,
}

impl Stat {
    /// A fresh stat at value 1, grade 1, no experience.
    pub fn new(key: StatKey) -> Self {
        Self {
            key,
            value: 1,
            grade: 1,
            ep: 0,
            max_ep: FIRST_GRADE_EP,
        }
    }
}

/// A character's full set of stats, with all fourteen keys always present.
///
/// Serialized as a JSON object keyed by wire stat names. Deserializing a
/// partial object fills the missing keys with fresh stats, so the
/// completeness invariant survives loads of older records.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(into = "BTreeMap<StatKey, Stat>", from = "BTreeMap<StatKey, Stat>")]
pub struct StatBlock {
    stats: [Stat; 14],
}

impl StatBlock {
    /// A complete block of fresh stats.
    pub fn new() -> Self {
        Self {
            stats: StatKey::all().map(Stat::new),
        }
    }

    /// The stat for `key`. Total: every key is always present.
    pub fn get(&self, key: StatKey) -> &Stat {
        &self.stats[key.index()]
    }

    /// Mutable access to the stat for `key`.
    pub fn get_mut(&mut self, key: StatKey) -> &mut Stat {
        &mut self.stats[key.index()]
    }

    /// Iterate the stats in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = &Stat> {
        self.stats.iter()
    }
}

impl Default for StatBlock {
    fn default() -> Self {
        Self::new()
    }
}

impl From<BTreeMap<StatKey, Stat>> for StatBlock {
    fn from(map: BTreeMap<StatKey, Stat>) -> Self {
        let mut block = Self::new();
        for (key, mut stat) in map {
            // The map key is authoritative over the embedded key field.
            stat.key = key;
            block.stats[key.index()] = stat;
        }
        block
    }
}

impl From<StatBlock> for BTreeMap<StatKey, Stat> {
    fn from(block: StatBlock) -> Self {
        block.stats.into_iter().map(|s| (s.key, s)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn all_lists_fourteen_distinct_keys() {
        let keys = StatKey::all();
        assert_eq!(keys.len(), 14);
        for (i, a) in keys.iter().enumerate() {
            for b in keys.iter().skip(i + 1) {
                assert_ne!(a, b);
            }
        }
    }

    #[test]
    fn parse_round_trips_every_wire_name() {
        for key in StatKey::all() {
            assert_eq!(StatKey::parse(key.wire_name()), Some(key));
        }
    }

    #[test]
    fn parse_accepts_snake_case_and_mixed_case() {
        assert_eq!(StatKey::parse("qi_generation"), Some(StatKey::QiGeneration));
        assert_eq!(StatKey::parse("CULTSPEED"), Some(StatKey::CultSpeed));
        assert_eq!(StatKey::parse("five_elements"), Some(StatKey::FiveElements));
    }

    #[test]
    fn parse_rejects_unknown_names() {
        assert_eq!(StatKey::parse("charisma"), None);
        assert_eq!(StatKey::parse(""), None);
    }

    #[test]
    fn wire_names_are_camel_case() {
        assert_eq!(
            serde_json::to_string(&StatKey::QiGeneration).unwrap(),
            "\"qiGeneration\""
        );
        assert_eq!(
            serde_json::to_string(&StatKey::FiveElements).unwrap(),
            "\"fiveElements\""
        );
    }

    #[test]
    fn fresh_stat_starts_at_grade_one() {
        let stat = Stat::new(StatKey::Luck);
        assert_eq!(stat.value, 1);
        assert_eq!(stat.grade, 1);
        assert_eq!(stat.ep, 0);
        assert_eq!(stat.max_ep, 100);
    }

    #[test]
    fn stat_serializes_max_ep_with_legacy_name() {
        let json = serde_json::to_value(Stat::new(StatKey::Attack)).unwrap();
        assert!(json.get("maxEP").is_some());
        assert!(json.get("maxEp").is_none());
    }

    #[test]
    fn new_block_is_complete() {
        let block = StatBlock::new();
        assert_eq!(block.iter().count(), 14);
        for key in StatKey::all() {
            assert_eq!(block.get(key).key, key);
        }
    }

    #[test]
    fn get_mut_targets_the_right_stat() {
        let mut block = StatBlock::new();
        block.get_mut(StatKey::Clarity).value = 7;
        assert_eq!(block.get(StatKey::Clarity).value, 7);
        assert_eq!(block.get(StatKey::Luck).value, 1);
    }

    #[test]
    fn partial_json_fills_missing_stats() {
        let json = r#"{"luck":{"key":"luck","value":9,"grade":2,"ep":30,"maxEP":282}}"#;
        let block: StatBlock = serde_json::from_str(json).unwrap();
        assert_eq!(block.get(StatKey::Luck).value, 9);
        assert_eq!(block.get(StatKey::Luck).grade, 2);
        assert_eq!(block.get(StatKey::Attack).value, 1);
        assert_eq!(block.iter().count(), 14);
    }

    #[test]
    fn block_round_trips_through_json() {
        let mut block = StatBlock::new();
        block.get_mut(StatKey::Forging).ep = 55;
        let json = serde_json::to_string(&block).unwrap();
        let back: StatBlock = serde_json::from_str(&json).unwrap();
        assert_eq!(back, block);
    }
}
