//! Per-stat experience accounting and the grade-up loop.

use tm_core::Stat;

use crate::curve::experience_required;
use crate::error::{LedgerError, LedgerResult};

/// What one experience deposit did to a stat.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GradeReport {
    /// Experience that was added.
    pub gained: u64,
    /// Grade-ups triggered while absorbing it.
    pub grade_ups: u32,
}

/// Experience gained from a timed training session.
///
/// Linear in duration, boosted by the stat's own current value, so stronger
/// stats compound slightly: `base_rate * minutes * (1 + value / 1000)`.
pub fn experience_gain(base_rate: f64, duration_minutes: u32, stat_value: u32) -> f64 {
    base_rate * f64::from(duration_minutes) * (1.0 + f64::from(stat_value) / 1000.0)
}

/// Deposit `amount` experience into a stat.
///
/// While `ep` reaches `max_ep`: subtract `max_ep`, raise `grade` and `value`
/// by one each, and recompute `max_ep` from the new grade. Several grade-ups
/// from one large deposit are normal and each recomputes `max_ep`
/// independently. Post-condition: `0 <= ep < max_ep`.
///
/// Negative amounts are rejected and leave the stat untouched.
pub fn apply_experience(stat: &mut Stat, amount: i64) -> LedgerResult<GradeReport> {
    if amount < 0 {
        return Err(LedgerError::NegativeAmount(amount));
    }
    let gained = amount as u64;
    stat.ep += gained;

    let mut grade_ups = 0;
    while stat.ep >= stat.max_ep {
        stat.ep -= stat.max_ep;
        stat.grade += 1;
        stat.value += 1;
        stat.max_ep = experience_required(stat.grade);
        grade_ups += 1;
    }

    Ok(GradeReport { gained, grade_ups })
}

#[cfg(test)]
mod tests {
    use tm_core::StatKey;

    use super::*;

    fn fresh() -> Stat {
        Stat::new(StatKey::QiGeneration)
    }

    #[test]
    fn exact_max_ep_triggers_one_grade_up() {
        let mut stat = fresh();
        let report = apply_experience(&mut stat, 100).unwrap();
        assert_eq!(report.grade_ups, 1);
        assert_eq!(stat.grade, 2);
        assert_eq!(stat.value, 2);
        assert_eq!(stat.ep, 0);
        assert_eq!(stat.max_ep, 282);
    }

    #[test]
    fn overflow_carries_into_the_next_grade() {
        let mut stat = fresh();
        let report = apply_experience(&mut stat, 250).unwrap();
        assert_eq!(report.grade_ups, 1);
        assert_eq!(stat.grade, 2);
        assert_eq!(stat.ep, 150);
        assert_eq!(stat.max_ep, 282);
    }

    #[test]
    fn one_deposit_can_climb_several_grades() {
        let mut stat = fresh();
        // 100 + 282 + 519 = 901 exactly reaches grade 4.
        let report = apply_experience(&mut stat, 901).unwrap();
        assert_eq!(report.grade_ups, 3);
        assert_eq!(stat.grade, 4);
        assert_eq!(stat.value, 4);
        assert_eq!(stat.ep, 0);
        assert_eq!(stat.max_ep, experience_required(4));
    }

    #[test]
    fn value_and_grade_rise_together() {
        let mut stat = fresh();
        apply_experience(&mut stat, 5_000).unwrap();
        assert_eq!(stat.value - 1, stat.grade - 1);
    }

    #[test]
    fn resting_invariant_holds_for_many_amounts() {
        for amount in [0, 1, 99, 100, 101, 282, 500, 1_000, 9_999, 123_456] {
            let mut stat = fresh();
            let report = apply_experience(&mut stat, amount).unwrap();
            assert!(stat.ep < stat.max_ep, "amount {amount}: ep {}", stat.ep);
            assert_eq!(stat.grade, 1 + report.grade_ups);
            assert_eq!(stat.value, 1 + report.grade_ups);
        }
    }

    #[test]
    fn zero_amount_changes_nothing() {
        let mut stat = fresh();
        let report = apply_experience(&mut stat, 0).unwrap();
        assert_eq!(report.grade_ups, 0);
        assert_eq!(stat, fresh());
    }

    #[test]
    fn negative_amount_is_rejected_and_stat_untouched() {
        let mut stat = fresh();
        stat.ep = 40;
        let err = apply_experience(&mut stat, -5).unwrap_err();
        assert!(matches!(err, LedgerError::NegativeAmount(-5)));
        assert_eq!(stat.ep, 40);
        assert_eq!(stat.grade, 1);
    }

    #[test]
    fn gain_is_linear_in_time() {
        assert_eq!(experience_gain(1.0, 60, 0), 60.0);
        assert_eq!(experience_gain(1.0, 120, 0), 120.0);
    }

    #[test]
    fn gain_compounds_with_stat_value() {
        // 2.0 * 30 * (1 + 100/1000) = 66
        assert_eq!(experience_gain(2.0, 30, 100), 66.0);
        let mut prev = 0.0;
        for value in [0, 10, 100, 500, 1_000] {
            let gain = experience_gain(1.0, 60, value);
            assert!(gain > prev || value == 0);
            prev = gain;
        }
    }
}
