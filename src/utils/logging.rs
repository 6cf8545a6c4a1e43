//! # Logging
//!
//! Installs a global `tracing-subscriber` fmt subscriber from a [`LoggingConfig`].
//!
//! The library itself only emits `tracing` events; nothing is printed until an
//! application (or a test) calls [`init_logging`].

use crate::config::LoggingConfig;
use crate::error::{constants, PacketError, Result};
use std::sync::atomic::{AtomicBool, Ordering};

static INITIALIZED: AtomicBool = AtomicBool::new(false);

/// Install the global subscriber described by `config`.
///
/// Calling this more than once is harmless: later calls return `Ok(())`
/// without touching the subscriber installed by the first. Does nothing when
/// console output is disabled.
pub fn init_logging(config: &LoggingConfig) -> Result<()> {
    if !config.log_to_console {
        return Ok(());
    }
    if INITIALIZED.swap(true, Ordering::SeqCst) {
        return Ok(());
    }

    let builder = tracing_subscriber::fmt()
        .with_max_level(config.log_level)
        .with_target(true);

    let installed = if config.json_format {
        builder.json().try_init()
    } else {
        builder.try_init()
    };

    installed.map_err(|e| {
        PacketError::ConfigError(format!("{}: {e}", constants::ERR_LOGGING_INIT))
    })?;

    tracing::info!(app = %config.app_name, level = %config.log_level, "Logging initialized");
    Ok(())
}
