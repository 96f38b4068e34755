//! Logging initialization.

use tracing::Level;

/// Install the global tracing subscriber. `RUST_LOG` wins over `level`.
/// Logs go to stderr so CLI output on stdout stays clean.
pub fn init(level: Level) -> Result<(), tracing::subscriber::SetGlobalDefaultError> {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(level.as_str().to_ascii_lowercase()));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    Ok(())
}
