//! Tracing setup for applications embedding taxonkit-rs

use tracing_subscriber::EnvFilter;

/// Install a fmt subscriber filtered by TAXONKIT_RS_LOG (or RUST_LOG), default "info".
///
/// Returns false when a global subscriber was already installed.
pub fn init_tracing() -> bool {
    let log_level = std::env::var("TAXONKIT_RS_LOG").unwrap_or_else(|_| "info".to_string());

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&log_level)),
        )
        .with_writer(std::io::stderr)
        .try_init()
        .is_ok()
}
