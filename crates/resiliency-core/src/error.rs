use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScoringError {
    #[error("invalid argument `{name}`: {message}")]
    InvalidArgument { name: &'static str, message: String },
}

impl ScoringError {
    pub fn missing(name: &'static str) -> Self {
        Self::InvalidArgument {
            name,
            message: format!("{name} cannot be null"),
        }
    }
}
