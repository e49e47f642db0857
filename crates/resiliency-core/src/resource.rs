use serde::ser::{Serialize, SerializeStruct, Serializer};

use crate::error::ScoringError;
use crate::feature::Feature;
use crate::scoring::overall_score;
use crate::types::Weight;

/// A cloud resource (web app or isolated hosting environment) and the
/// features evaluated on it.
#[derive(Debug, Clone, PartialEq)]
pub struct Resource {
    name: String,
    features: Vec<Feature>,
}

impl Resource {
    /// One ungraded feature per `(name, weight)` pair, in input order.
    pub fn new<I, S>(name: impl Into<String>, weights: I) -> Self
    where
        I: IntoIterator<Item = (S, Weight)>,
        S: Into<String>,
    {
        Self {
            name: name.into(),
            features: weights
                .into_iter()
                .map(|(feature, weight)| Feature::new(feature, weight))
                .collect(),
        }
    }

    pub fn try_new<S>(
        name: impl Into<String>,
        weights: Option<Vec<(S, Weight)>>,
    ) -> Result<Self, ScoringError>
    where
        S: Into<String>,
    {
        let weights = weights.ok_or_else(|| ScoringError::missing("weights"))?;
        Ok(Self::new(name, weights))
    }

    /// Wraps features that were already built, e.g. decoded from a request.
    pub fn with_features(name: impl Into<String>, features: Vec<Feature>) -> Self {
        Self {
            name: name.into(),
            features,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    pub fn features(&self) -> &[Feature] {
        &self.features
    }

    pub fn features_mut(&mut self) -> &mut [Feature] {
        &mut self.features
    }

    /// First feature called `name`.
    pub fn feature_mut(&mut self, name: &str) -> Option<&mut Feature> {
        self.features.iter_mut().find(|f| f.name() == name)
    }

    pub fn replace_features(
        &mut self,
        features: Option<Vec<Feature>>,
    ) -> Result<(), ScoringError> {
        self.features = features.ok_or_else(|| ScoringError::missing("features"))?;
        Ok(())
    }

    /// Recomputed from the current grades on every call.
    pub fn overall_score(&self) -> f64 {
        overall_score(&self.features)
    }
}

impl Serialize for Resource {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("Resource", 2)?;
        state.serialize_field("Name", &self.name)?;
        state.serialize_field("OverallScore", &self.overall_score())?;
        state.end()
    }
}
