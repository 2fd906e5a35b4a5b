//! Diagnostic logging
//!
//! User-facing action lines go to stdout through
//! [`ConsoleReporter`](crate::scaffold::actions::ConsoleReporter); everything
//! here is for troubleshooting and goes to stderr.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Initialize the tracing subscriber
///
/// Log level comes from `RUST_LOG`, defaulting to `warn`.
///
/// # Example
///
/// ```rust,no_run
/// # fn main() -> anyhow::Result<()> {
/// gin_scaffold::observability::init()?;
/// tracing::debug!("templates resolved");
/// # Ok(())
/// # }
/// ```
///
/// # Errors
///
/// Returns an error if a global subscriber is already installed.
pub fn init() -> anyhow::Result<()> {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .try_init()?;

    Ok(())
}
