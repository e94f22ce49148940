//! Diagnostic event output through tracing
//!
//! Events are written to stderr without timestamps or targets so build logs
//! stay readable. `RUST_LOG` takes precedence over the level chosen on the
//! command line.

use crate::cli::EventLevel;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

impl EventLevel {
    /// Returns the tracing level filter for this event level
    pub fn level_filter(&self) -> LevelFilter {
        match self {
            EventLevel::Critical | EventLevel::Error => LevelFilter::ERROR,
            EventLevel::Warning => LevelFilter::WARN,
            EventLevel::Information => LevelFilter::INFO,
            EventLevel::Verbose => LevelFilter::DEBUG,
        }
    }
}

/// Builds the event filter, preferring `RUST_LOG` when it is set
pub fn build_filter(level: EventLevel) -> EnvFilter {
    EnvFilter::builder()
        .with_default_directive(level.level_filter().into())
        .from_env_lossy()
}

/// Installs the global event subscriber.
///
/// Calling this more than once keeps the first subscriber.
pub fn init(level: EventLevel, color: bool) {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(build_filter(level))
        .with_writer(std::io::stderr)
        .with_ansi(color)
        .with_target(false)
        .without_time()
        .try_init();
}
