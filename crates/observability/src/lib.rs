//! Process-wide logging setup shared by the server binary and tests.

pub mod tracing;

pub use crate::tracing::LogFormat;

/// Install the subscriber, honouring `RUST_LOG` and `LOG_FORMAT`.
pub fn init() {
    crate::tracing::init();
}
