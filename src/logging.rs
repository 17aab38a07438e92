//! Logging setup
//!
//! Installs a `tracing_subscriber` formatter filtered by `RUST_LOG`, falling back to the
//! given level. Only the binary calls this; library code just emits events with bracketed
//! subsystem prefixes (`[GAME]`, `[CLOCK]`, `[SETTLE]`, `[REGISTRY]`, `[CONFIG]`).

use tracing_subscriber::EnvFilter;

/// Install the global subscriber.
///
/// # Errors
///
/// Fails when `level` is not a valid filter directive or a subscriber is already installed.
pub fn init(level: &str) -> anyhow::Result<()> {
    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new(level)?,
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|e| anyhow::anyhow!(e))
}
