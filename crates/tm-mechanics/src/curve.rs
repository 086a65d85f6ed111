//! The grade progression curve.
//!
//! Experience cost grows superlinearly with grade, so each grade costs
//! disproportionately more than the last.

/// Base experience cost at grade 1.
pub const EP_BASE: f64 = 100.0;

/// Exponent of the progression curve.
pub const GRADE_POWER: f64 = 1.5;

/// Experience required to complete `grade` and reach the next one.
///
/// `floor(EP_BASE * grade^GRADE_POWER)`: 100 at grade 1, 282 at grade 2,
/// 519 at grade 3. Strictly increasing for all grades >= 1.
pub fn experience_required(grade: u32) -> u64 {
    (EP_BASE * f64::from(grade).powf(GRADE_POWER)).floor() as u64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reference_points_match_the_curve() {
        assert_eq!(experience_required(1), 100);
        assert_eq!(experience_required(2), 282);
        assert_eq!(experience_required(3), 519);
        assert_eq!(experience_required(10), 3162);
    }

    #[test]
    fn strictly_increasing_over_a_long_sweep() {
        let mut prev = 0;
        for grade in 1..=500 {
            let cost = experience_required(grade);
            assert!(cost > prev, "grade {grade}: {cost} <= {prev}");
            prev = cost;
        }
    }

    #[test]
    fn cost_is_always_positive_for_valid_grades() {
        for grade in 1..=100 {
            assert!(experience_required(grade) >= 100);
        }
    }
}
