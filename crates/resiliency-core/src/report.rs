use serde::Serialize;

use crate::error::ScoringError;
use crate::resource::Resource;

/// Customer-level resiliency report.
///
/// Only the customer name is part of the serialized form; resources are
/// serialized on their own by the report flattener.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct Report {
    /// Name shown on the report cover, usually the company or subscription owner.
    customer_name: String,
    #[serde(skip)]
    resources: Vec<Resource>,
}

impl Report {
    pub fn new(customer_name: impl Into<String>, resources: Vec<Resource>) -> Self {
        Self {
            customer_name: customer_name.into(),
            resources,
        }
    }

    pub fn try_new(
        customer_name: impl Into<String>,
        resources: Option<Vec<Resource>>,
    ) -> Result<Self, ScoringError> {
        let resources = resources.ok_or_else(|| ScoringError::missing("resources"))?;
        Ok(Self::new(customer_name, resources))
    }

    pub fn customer_name(&self) -> &str {
        &self.customer_name
    }

    pub fn set_customer_name(&mut self, customer_name: impl Into<String>) {
        self.customer_name = customer_name.into();
    }

    pub fn resources(&self) -> &[Resource] {
        &self.resources
    }

    pub fn resources_mut(&mut self) -> &mut [Resource] {
        &mut self.resources
    }

    pub fn replace_resources(
        &mut self,
        resources: Option<Vec<Resource>>,
    ) -> Result<(), ScoringError> {
        self.resources = resources.ok_or_else(|| ScoringError::missing("resources"))?;
        Ok(())
    }
}
