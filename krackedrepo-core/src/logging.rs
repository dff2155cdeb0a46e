//! Logging initialization shared by the binaries.
//!
//! Diagnostics go to stderr so the report on stdout stays machine-readable.
//! `RUST_LOG` overrides the default level as usual.

use tracing::Level;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Log verbosity for the binaries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    Debug,
    Info,
    Warning,
    Error,
}

impl From<LogLevel> for Level {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Debug => Level::DEBUG,
            LogLevel::Info => Level::INFO,
            LogLevel::Warning => Level::WARN,
            LogLevel::Error => Level::ERROR,
        }
    }
}

/// Initialize logging once per process.
pub fn init(level: LogLevel) -> crate::Result<()> {
    let filter = EnvFilter::builder()
        .with_default_directive(Level::from(level).into())
        .from_env_lossy();

    let fmt_layer = fmt::layer()
        .with_target(false)
        .with_writer(std::io::stderr);

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .try_init()
        .map_err(|e| crate::Error::Config(format!("failed to initialize logging: {e}")))?;

    Ok(())
}
