//! Probabilistic resolution of a chosen option.
//!
//! The uniform roll is drawn by the caller and injected, so outcomes are
//! reproducible in tests.

use tm_core::{EventOption, EventResult};

/// Decide success from a probability and one uniform roll in `[0, 1)`.
///
/// Boundary-inclusive on the success side: probability 1.0 always succeeds.
/// Probability 0.0 never succeeds, whatever the roll.
pub fn roll_success(probability: f64, roll: f64) -> bool {
    probability > 0.0 && roll <= probability
}

/// Assemble the immutable result for an option once the roll is decided.
///
/// Success takes the success branch's narrative and rewards. Failure takes
/// the failure branch's narrative and penalties, or an empty narrative and
/// no penalties when the option has no failure branch.
pub fn build_result(option: &EventOption, success: bool) -> EventResult {
    if success {
        return EventResult {
            success: true,
            narrative: option.success.narrative.clone(),
            rewards: Some(option.success.rewards.clone()),
            penalties: None,
        };
    }
    match &option.failure {
        Some(branch) => EventResult {
            success: false,
            narrative: branch.narrative.clone(),
            rewards: None,
            penalties: Some(branch.penalties.clone()),
        },
        None => EventResult {
            success: false,
            narrative: String::new(),
            rewards: None,
            penalties: None,
        },
    }
}

#[cfg(test)]
mod tests {
    use tm_core::{EventPenalties, EventRewards, FailureBranch, SuccessBranch};

    use super::*;

    fn option_with_failure() -> EventOption {
        EventOption {
            id: "enter_cave".into(),
            text: "Enter the cave".into(),
            success: SuccessBranch {
                probability: 0.7,
                narrative: "You absorb the energy.".into(),
                rewards: EventRewards {
                    life: Some(5),
                    ..EventRewards::default()
                },
            },
            failure: Some(FailureBranch {
                narrative: "Rocks collapse.".into(),
                penalties: EventPenalties {
                    life: Some(-10),
                    ..EventPenalties::default()
                },
            }),
        }
    }

    #[test]
    fn zero_probability_never_succeeds() {
        for roll in [0.0, 0.000_001, 0.5, 0.999_999] {
            assert!(!roll_success(0.0, roll), "roll {roll}");
        }
    }

    #[test]
    fn full_probability_always_succeeds() {
        for roll in [0.0, 0.25, 0.5, 0.999_999] {
            assert!(roll_success(1.0, roll), "roll {roll}");
        }
    }

    #[test]
    fn comparison_is_inclusive_on_the_success_side() {
        assert!(roll_success(0.5, 0.5));
        assert!(!roll_success(0.5, 0.500_001));
        assert!(roll_success(0.5, 0.499_999));
    }

    #[test]
    fn success_result_carries_the_success_branch() {
        let result = build_result(&option_with_failure(), true);
        assert!(result.success);
        assert_eq!(result.narrative, "You absorb the energy.");
        assert_eq!(result.rewards.unwrap().life, Some(5));
        assert!(result.penalties.is_none());
    }

    #[test]
    fn failure_result_carries_the_failure_branch() {
        let result = build_result(&option_with_failure(), false);
        assert!(!result.success);
        assert_eq!(result.narrative, "Rocks collapse.");
        assert!(result.rewards.is_none());
        assert_eq!(result.penalties.unwrap().life, Some(-10));
    }

    #[test]
    fn failure_without_a_branch_has_no_mechanical_effect() {
        let mut option = option_with_failure();
        option.failure = None;
        let result = build_result(&option, false);
        assert!(!result.success);
        assert!(result.narrative.is_empty());
        assert!(result.rewards.is_none());
        assert!(result.penalties.is_none());
    }
}
