//! Process-wide tracing/logging setup shared by the binaries.

pub mod tracing;

pub use crate::tracing::{LogFormat, TracingOptions};

/// Initialize tracing with JSON output and `RUST_LOG` filtering.
///
/// Safe to call multiple times; subsequent calls are no-ops.
pub fn init() {
    tracing::init(TracingOptions::default());
}
