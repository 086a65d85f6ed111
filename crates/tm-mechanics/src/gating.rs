//! Stat requirement gating, evaluated before an event may be offered.
//!
//! Gating runs at instantiation only; resolution never re-checks it.

use tm_core::{CharacterProfile, EventMetadata, StatKey};

/// A stat requirement the character does not meet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UnmetRequirement {
    /// The stat that fell short.
    pub key: StatKey,
    /// Minimum value the archetype demands.
    pub required: u32,
    /// The character's current value.
    pub actual: u32,
}

/// Check an archetype's stat requirements against a profile.
///
/// Returns the first unmet requirement in stat order, or `None` when the
/// event may be offered. Item requirements are recorded in the metadata but
/// not evaluated: there is no inventory system.
pub fn first_unmet_requirement(
    profile: &CharacterProfile,
    metadata: &EventMetadata,
) -> Option<UnmetRequirement> {
    let required = metadata.required_stats.as_ref()?;
    for (key, min) in required {
        let actual = profile.stat(*key).value;
        if actual < *min {
            return Some(UnmetRequirement {
                key: *key,
                required: *min,
                actual,
            });
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use tm_core::{EventId, Locale, UserId};

    use super::*;

    fn metadata(required: Option<BTreeMap<StatKey, u32>>) -> EventMetadata {
        EventMetadata {
            id: EventId::new("trial"),
            kind: "trial".into(),
            time_cost: 30,
            ep_reward: 10,
            risk: 0.5,
            life_delta: None,
            required_stats: required,
            required_items: None,
        }
    }

    fn profile() -> CharacterProfile {
        CharacterProfile::new(UserId::new("u1"), "Mu Chen", Locale::Ko)
    }

    #[test]
    fn no_requirements_means_offerable() {
        assert!(first_unmet_requirement(&profile(), &metadata(None)).is_none());
    }

    #[test]
    fn met_requirements_pass() {
        let mut p = profile();
        p.stat_mut(StatKey::Perception).value = 5;
        let meta = metadata(Some(BTreeMap::from([(StatKey::Perception, 5)])));
        assert!(first_unmet_requirement(&p, &meta).is_none());
    }

    #[test]
    fn unmet_requirement_names_the_shortfall() {
        let meta = metadata(Some(BTreeMap::from([(StatKey::Clarity, 3)])));
        let unmet = first_unmet_requirement(&profile(), &meta).unwrap();
        assert_eq!(unmet.key, StatKey::Clarity);
        assert_eq!(unmet.required, 3);
        assert_eq!(unmet.actual, 1);
    }

    #[test]
    fn first_shortfall_in_stat_order_is_reported() {
        let meta = metadata(Some(BTreeMap::from([
            (StatKey::Luck, 9),
            (StatKey::Attack, 9),
        ])));
        let unmet = first_unmet_requirement(&profile(), &meta).unwrap();
        assert_eq!(unmet.key, StatKey::Attack);
    }
}
