use tracing_subscriber::EnvFilter;

/// Environment variable holding the log filter, e.g. `FLEETSIM_LOG=debug`.
pub const LOG_ENV: &str = "FLEETSIM_LOG";

/// Initializes the tracing subscriber on stderr.
///
/// Defaults to `warn` so stdout only carries the report summary.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));

    // A subscriber may already be installed when embedded in another binary.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}
