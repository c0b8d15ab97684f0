//! Tracing/logging setup shared by the binaries.

/// Initialize process-wide logging.
///
/// This is safe to call multiple times; subsequent calls become no-ops.
pub fn init(config: &LoggingConfig) -> bool {
    tracing::init(config)
}

/// Subscriber configuration (filters, formats).
pub mod tracing;

pub use tracing::{LogFormat, LoggingConfig};
