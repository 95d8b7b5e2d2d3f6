//! Logging utilities and structured logging support

pub use log::{debug, info, warn, error, trace};

/// Initialize the logging system from `RUST_LOG`
pub fn init() {
    env_logger::init();
}

/// Initialize the logging system with a default level
///
/// `RUST_LOG` still takes precedence when set. Calling this more than once
/// is harmless, later calls are ignored.
pub fn init_with_level(level: &str) {
    let environment = env_logger::Env::default().default_filter_or(level);
    if env_logger::Builder::from_env(environment).try_init().is_err() {
        log::debug!("Logger already initialized, keeping existing configuration");
    }
}
