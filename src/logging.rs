//! Logging infrastructure for dupelink.
//!
//! This module provides leveled console logging using the `log` facade and
//! the `env_logger` backend. The level comes only from the command line:
//!
//! | Flag | Level |
//! |------|-------|
//! | `/q` | error |
//! | none | info  |
//! | `/v` | debug |
//! | `/d` | trace |
//!
//! Info lines are printed bare, debug lines are indented by two spaces and
//! trace lines by four, so nested detail reads as an outline under the
//! phase it belongs to. Errors and warnings carry a prefix.
//!
//! # Example
//!
//! ```rust,no_run
//! use dupelink::config::Verbosity;
//! use dupelink::logging::init_logging;
//!
//! init_logging(Verbosity::Verbose);
//!
//! log::info!("Parsing directory tree...");
//! log::debug!("Parsing folder /data");
//! ```

use std::io::Write;

use env_logger::Builder;
use log::{Level, LevelFilter};

use crate::config::Verbosity;

/// Initialize the logging subsystem.
///
/// Call once at the start of the application, before any logging calls.
///
/// # Panics
///
/// Panics if called more than once, as `env_logger` can only be
/// initialized once per process.
pub fn init_logging(verbosity: Verbosity) {
    let level = verbosity.level_filter();

    let mut builder = Builder::new();
    builder.filter_level(level);
    configure_format(&mut builder, level);
    builder.init();

    log::trace!("Logging initialized at level: {:?}", level);
}

/// Line prefix for a record of the given level.
fn prefix(level: Level) -> &'static str {
    match level {
        Level::Error => "ERROR: ",
        Level::Warn => "WARN: ",
        Level::Info => "",
        Level::Debug => "  ",
        Level::Trace => "    ",
    }
}

/// Configure the log format based on build type and level.
///
/// Debug builds running at trace level also print a timestamp and the
/// module path.
fn configure_format(builder: &mut Builder, level: LevelFilter) {
    #[cfg(debug_assertions)]
    {
        if level >= LevelFilter::Trace {
            builder.format(|buf, record| {
                let timestamp = buf.timestamp_millis();
                writeln!(
                    buf,
                    "{} [{}] {}{}",
                    timestamp,
                    record.module_path().unwrap_or("unknown"),
                    prefix(record.level()),
                    record.args()
                )
            });
            return;
        }
    }

    #[cfg(not(debug_assertions))]
    let _ = level;

    builder.format(|buf, record| writeln!(buf, "{}{}", prefix(record.level()), record.args()));
}
