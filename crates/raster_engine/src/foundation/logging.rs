//! Logging setup for the engine and its host binaries

pub use log::{debug, error, info, trace, warn};

/// Initialize the logging system from the environment (`RUST_LOG`)
pub fn init() {
    env_logger::init();
}

/// Fallible variant for tests and embedders that may initialize more than once
pub fn try_init() -> Result<(), log::SetLoggerError> {
    env_logger::try_init()
}
