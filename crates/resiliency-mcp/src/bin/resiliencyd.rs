use std::io;

use resiliency_mcp::{ResiliencyServer, Transport};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

fn main() -> io::Result<()> {
    // stdout carries protocol frames, so logs go to stderr.
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(io::stderr))
        .with(
            EnvFilter::try_from_env("RESILIENCY_LOG")
                .unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let server = ResiliencyServer::new();
    match Transport::from_env()? {
        Transport::Stdio => server.serve_stdio(),
    }
}
