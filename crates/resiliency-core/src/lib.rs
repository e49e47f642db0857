pub mod error;
pub mod feature;
pub mod report;
pub mod resource;
pub mod scoring;
pub mod types;

pub use error::ScoringError;
pub use feature::*;
pub use report::*;
pub use resource::*;
pub use scoring::*;
pub use types::*;
