pub mod error;
pub mod flatten;
pub mod input;
pub mod response;
pub mod table;

pub use error::ReportError;
pub use flatten::*;
pub use input::*;
pub use response::*;
pub use table::*;
