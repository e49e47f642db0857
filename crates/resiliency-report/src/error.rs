use resiliency_core::ScoringError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ReportError {
    #[error(transparent)]
    Scoring(#[from] ScoringError),

    #[error("serialization error: {0}")]
    Serde(#[from] serde_json::Error),
}
