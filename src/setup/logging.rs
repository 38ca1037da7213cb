use tracing_subscriber::{fmt, prelude::*, EnvFilter};

// Diagnostics go to stderr so stdout carries only the guide's progress text
pub fn setup_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();
}
