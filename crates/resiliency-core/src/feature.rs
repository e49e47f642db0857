use serde::{Deserialize, Serialize};

use crate::types::{Grade, Weight};

/// Result of one resiliency check on a resource.
///
/// Weight and grade are kept as raw ordinals: values that arrive from
/// evaluation code outside the recognized sets stay representable and are
/// skipped by scoring instead of being rejected at the edge.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Feature {
    name: String,
    #[serde(rename = "FeatureWeight")]
    weight: i32,
    #[serde(rename = "ImplementationGrade")]
    grade: i32,
    #[serde(default)]
    grade_comments: String,
    #[serde(default)]
    solution_comments: String,
}

impl Feature {
    pub fn new(name: impl Into<String>, weight: Weight) -> Self {
        Self::with_weight_ordinal(name, weight.ordinal())
    }

    /// Builds a feature from an unvalidated weight ordinal.
    pub fn with_weight_ordinal(name: impl Into<String>, weight: i32) -> Self {
        Self {
            name: name.into(),
            weight,
            grade: Grade::LOWEST.ordinal(),
            grade_comments: String::new(),
            solution_comments: String::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    pub fn weight(&self) -> Option<Weight> {
        Weight::from_ordinal(self.weight)
    }

    pub fn weight_ordinal(&self) -> i32 {
        self.weight
    }

    pub fn grade(&self) -> Option<Grade> {
        Grade::from_ordinal(self.grade)
    }

    pub fn grade_ordinal(&self) -> i32 {
        self.grade
    }

    pub fn set_grade(&mut self, grade: Grade) {
        self.grade = grade.ordinal();
    }

    pub fn set_grade_ordinal(&mut self, grade: i32) {
        self.grade = grade;
    }

    pub fn grade_comments(&self) -> &str {
        &self.grade_comments
    }

    /// Comments explaining the grade obtained.
    pub fn set_grade_comments(&mut self, comments: impl Into<String>) {
        self.grade_comments = comments.into();
    }

    pub fn solution_comments(&self) -> &str {
        &self.solution_comments
    }

    /// Remediation text shown alongside a failing grade.
    pub fn set_solution_comments(&mut self, comments: impl Into<String>) {
        self.solution_comments = comments.into();
    }

    /// `(weight, grade)` when both ordinals are recognized.
    pub fn scorable(&self) -> Option<(Weight, Grade)> {
        Some((self.weight()?, self.grade()?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_feature_starts_unevaluated() {
        let feature = Feature::new("Backups", Weight::Mandatory);
        assert_eq!(feature.name(), "Backups");
        assert_eq!(feature.weight(), Some(Weight::Mandatory));
        assert_eq!(feature.grade(), Some(Grade::NotImplemented));
        assert_eq!(feature.grade_ordinal(), 0);
        assert!(feature.grade_comments().is_empty());
        assert!(feature.solution_comments().is_empty());
    }

    #[test]
    fn grade_and_comments_are_mutable() {
        let mut feature = Feature::new("Zone redundancy", Weight::Important);
        feature.set_grade(Grade::PartiallyImplemented);
        feature.set_grade_comments("Only one zone configured.");
        feature.set_solution_comments("Enable zone redundancy on the plan.");

        assert_eq!(feature.grade(), Some(Grade::PartiallyImplemented));
        assert_eq!(feature.grade_comments(), "Only one zone configured.");
        assert_eq!(
            feature.solution_comments(),
            "Enable zone redundancy on the plan."
        );
        assert_eq!(feature.weight(), Some(Weight::Important));
    }

    #[test]
    fn out_of_range_grade_is_not_scorable() {
        let mut feature = Feature::new("Autoscale", Weight::GoodToHave);
        feature.set_grade_ordinal(9);
        assert_eq!(feature.grade(), None);
        assert_eq!(feature.grade_ordinal(), 9);
        assert!(feature.scorable().is_none());

        let feature = Feature::with_weight_ordinal("Health check", 3);
        assert!(feature.weight().is_none());
        assert!(feature.scorable().is_none());
    }
}
