use env_logger::Env;
use log::LevelFilter;

use crate::constants::{defaults, envvars};

/// Initialize env_logger from `LOG_LEVEL` (default "info").
///
/// An explicit level, as given by `--loglevel`, takes precedence.
pub fn init_logging(level: Option<LevelFilter>) {
    init_logging_with_default(level, defaults::LOG_LEVEL);
}

/// Like [`init_logging`], with `default` used when `LOG_LEVEL` is unset.
pub fn init_logging_with_default(level: Option<LevelFilter>, default: &str) {
    let mut builder = env_logger::Builder::from_env(logging_env(default));
    if let Some(level) = level {
        builder.filter_level(level);
    }
    builder.init();

    if let Some(level) = level {
        log::info!("Logging set to {}", level.as_str().to_uppercase());
    }
}

fn logging_env(default: &str) -> Env<'_> {
    Env::default().filter_or(envvars::LOG_LEVEL, default)
}
