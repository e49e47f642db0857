pub mod config;
pub mod framing;
pub mod protocol;
pub mod server;

pub use config::{ServerConfig, Transport};
pub use server::ResiliencyServer;
