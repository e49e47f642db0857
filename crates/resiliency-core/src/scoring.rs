use tracing::debug;

use crate::feature::Feature;
use crate::types::Grade;

/// Score reported for a resource whose valid features carry no weight at all.
pub const ZERO_WEIGHT_SCORE: f64 = 0.0;

/// Weighted compliance of `features` as a 0..=100 percentage.
///
/// Features whose weight or grade ordinal is unrecognized are left out of both
/// the weighted sum and the weight total. The ratio is rounded half-to-even to
/// one decimal and then to two, so results match reports produced before.
pub fn overall_score(features: &[Feature]) -> f64 {
    let mut weighted_sum = 0.0_f64;
    let mut weight_total = 0.0_f64;

    for feature in features {
        let Some((weight, grade)) = feature.scorable() else {
            debug!(
                feature = feature.name(),
                weight = feature.weight_ordinal(),
                grade = feature.grade_ordinal(),
                "skipping feature with unrecognized weight or grade"
            );
            continue;
        };
        weighted_sum += f64::from(weight.ordinal() * grade.ordinal());
        weight_total += f64::from(weight.ordinal());
    }

    if weight_total == 0.0 {
        debug!(
            features = features.len(),
            "no weighted features, using zero score"
        );
        return ZERO_WEIGHT_SCORE;
    }

    let max_grade = f64::from(Grade::HIGHEST.ordinal());
    let score = round_half_even((weighted_sum * 100.0) / (weight_total * max_grade), 1);
    round_half_even(score, 2)
}

/// Rounds to `decimals` places, resolving exact midpoints towards the even digit.
pub fn round_half_even(value: f64, decimals: i32) -> f64 {
    let factor = 10_f64.powi(decimals);
    (value * factor).round_ties_even() / factor
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Weight;

    fn graded(name: &str, weight: Weight, grade: Grade) -> Feature {
        let mut feature = Feature::new(name, weight);
        feature.set_grade(grade);
        feature
    }

    #[test]
    fn full_compliance_scores_one_hundred() {
        let features = vec![
            graded("a", Weight::Mandatory, Grade::Implemented),
            graded("b", Weight::GoodToHave, Grade::Implemented),
        ];
        assert_eq!(overall_score(&features), 100.0);
    }

    #[test]
    fn missing_mandatory_feature_drags_score_down() {
        let features = vec![
            graded("a", Weight::Mandatory, Grade::NotImplemented),
            graded("b", Weight::GoodToHave, Grade::Implemented),
        ];
        assert_eq!(overall_score(&features), 3.8);
    }

    #[test]
    fn midpoint_rounds_to_even() {
        // 25 * 1 * 100 / (40 * 2) = 31.25
        let features = vec![
            graded("a", Weight::Mandatory, Grade::PartiallyImplemented),
            graded("b", Weight::ImportantAse, Grade::NotImplemented),
        ];
        assert_eq!(overall_score(&features), 31.2);
    }

    #[test]
    fn zero_weight_total_scores_zero() {
        assert_eq!(overall_score(&[]), ZERO_WEIGHT_SCORE);

        let features = vec![graded("a", Weight::NotCalculated, Grade::Implemented)];
        assert_eq!(overall_score(&features), ZERO_WEIGHT_SCORE);
    }

    #[test]
    fn not_calculated_features_do_not_move_the_score() {
        let base = vec![graded("a", Weight::Important, Grade::PartiallyImplemented)];
        let mut extended = base.clone();
        extended.push(graded("b", Weight::NotCalculated, Grade::NotImplemented));
        assert_eq!(overall_score(&base), 50.0);
        assert_eq!(overall_score(&extended), overall_score(&base));
    }

    #[test]
    fn round_half_even_examples() {
        assert_eq!(round_half_even(0.25, 1), 0.2);
        assert_eq!(round_half_even(0.75, 1), 0.8);
        assert_eq!(round_half_even(3.846_153, 1), 3.8);
        assert_eq!(round_half_even(12.5, 0), 12.0);
        assert_eq!(round_half_even(13.5, 0), 14.0);
    }
}
