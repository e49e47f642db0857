use resiliency_core::{Feature, Report, Resource, ScoringError};
use serde::Deserialize;

/// Evaluated feature as supplied by detector code. Weight and grade are raw
/// ordinals; unrecognized values are kept and later skipped by scoring.
#[derive(Debug, Clone, Deserialize)]
pub struct FeatureInput {
    pub name: String,
    pub weight: i32,
    #[serde(default)]
    pub grade: Option<i32>,
    #[serde(default)]
    pub grade_comments: Option<String>,
    #[serde(default)]
    pub solution_comments: Option<String>,
}

impl FeatureInput {
    pub fn into_feature(self) -> Feature {
        let mut feature = Feature::with_weight_ordinal(self.name, self.weight);
        if let Some(grade) = self.grade {
            feature.set_grade_ordinal(grade);
        }
        if let Some(comments) = self.grade_comments {
            feature.set_grade_comments(comments);
        }
        if let Some(comments) = self.solution_comments {
            feature.set_solution_comments(comments);
        }
        feature
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct ResourceInput {
    pub name: String,
    #[serde(default)]
    pub features: Option<Vec<FeatureInput>>,
}

impl ResourceInput {
    pub fn into_resource(self) -> Result<Resource, ScoringError> {
        let features = self
            .features
            .ok_or_else(|| ScoringError::missing("features"))?;
        Ok(Resource::with_features(
            self.name,
            features.into_iter().map(FeatureInput::into_feature).collect(),
        ))
    }

    pub fn feature_count(&self) -> usize {
        self.features.as_ref().map_or(0, Vec::len)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct ReportInput {
    #[serde(default)]
    pub customer_name: Option<String>,
    #[serde(default)]
    pub resources: Option<Vec<ResourceInput>>,
}

impl ReportInput {
    /// Builds the report, naming it `default_customer` when the input has no
    /// customer or a blank one. Any other name is kept as given.
    pub fn into_report(self, default_customer: &str) -> Result<Report, ScoringError> {
        let customer_name = self
            .customer_name
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| default_customer.to_string());
        let resources = self
            .resources
            .map(|list| {
                list.into_iter()
                    .map(ResourceInput::into_resource)
                    .collect::<Result<Vec<_>, _>>()
            })
            .transpose()?;
        Report::try_new(customer_name, resources)
    }
}
