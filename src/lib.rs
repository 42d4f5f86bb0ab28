//! dupelink - Duplicate File Hard Linker
//!
//! Scans folders for byte-identical files and replaces the duplicates with
//! hard links to a single copy, reclaiming the space they occupied.
//!
//! The run is strictly sequential: scan every folder, pair up equal files,
//! then optionally list and link the pairs.

pub mod actions;
pub mod cli;
pub mod config;
pub mod duplicates;
pub mod error;
pub mod logging;
pub mod output;
pub mod queue;
pub mod scanner;

use std::io::Write;

use anyhow::{Context, Result};

use crate::actions::Linker;
use crate::config::RunConfig;
use crate::duplicates::DuplicateFinder;
use crate::error::ExitCode;
use crate::scanner::{FileIdentity, Scanner};

/// One-line description logged at startup.
pub const DESCRIPTION: &str = "Duplicate File Hard Linker, links duplicate files to save disk space";

/// Run one scan/pair/link cycle.
///
/// The duplicate listing, when requested, is written to `out`; everything
/// else goes through the logger.
///
/// # Errors
///
/// Fails when a folder cannot be enumerated midway through the scan or the
/// listing cannot be written. Per-pair link failures are logged and do not
/// fail the run.
pub fn run_app<W: Write>(config: &RunConfig, out: &mut W) -> Result<ExitCode> {
    log::info!(
        "{} {} - {}",
        env!("CARGO_PKG_NAME"),
        env!("CARGO_PKG_VERSION"),
        DESCRIPTION
    );

    if !FileIdentity::is_supported() {
        log::warn!("File identity is not available on this platform, no files can be linked");
    }

    let mut scanner = Scanner::new(config.policy);
    let catalog = scanner
        .scan(config.roots.as_slice())
        .context("Scanning folders failed")?;
    log::debug!("Scan statistics: {:?}", scanner.stats());

    let mut finder = DuplicateFinder::new(config.policy);
    let (set, summary) = finder.find(catalog);
    log::debug!("Pairing statistics: {:?}", summary);

    if config.list {
        output::write_duplicate_list(&set, out).context("Writing duplicate list failed")?;
    }

    if config.link {
        let result = Linker::new().link_all(set);
        if !result.all_succeeded() {
            log::warn!("{} pair(s) could not be linked", result.failure_count());
        }
    } else {
        log::info!("Skipping real linking. To really create hard links, use the /l switch.");
    }

    Ok(ExitCode::Success)
}
