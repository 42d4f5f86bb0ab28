//! Command-line interface definitions for dupelink.
//!
//! Flags are single characters given as separate arguments. Both the
//! classic slash form (`/r`) and the dash form (`-r`) are accepted; slash
//! flags are rewritten to their dash equivalent by [`normalize_args`] before
//! clap sees them.
//!
//! # Example
//!
//! ```bash
//! # Report duplicates below two folders, recursively
//! dupelink /r D:\photos E:\backup\photos
//!
//! # Same, but really replace the duplicates with hard links
//! dupelink -r -l ~/photos ~/backup/photos
//!
//! # List every duplicate pair found, including small files
//! dupelink /o /m /r ~/projects
//! ```

use std::ffi::OsString;
use std::path::PathBuf;

use clap::error::ErrorKind;
use clap::{ArgAction, Parser};
use thiserror::Error;

/// Find byte-identical files and replace duplicates with hard links.
///
/// Without /l the tool only reports what it would link. All paths must be
/// on the same volume, since hard links cannot span filesystems.
#[derive(Debug, Parser)]
#[command(name = "dupelink")]
#[command(version, about, long_about = None)]
#[command(disable_help_flag = true)]
#[command(args_override_self = true)]
#[command(after_help = "Flags may also be written as /a, /d, /h ... and /? for this help.")]
pub struct Cli {
    /// Show this help screen
    #[arg(long, action = ArgAction::Help)]
    #[allow(dead_code)]
    help: Option<bool>,

    /// File attributes must match for linking
    #[arg(short = 'a')]
    pub match_attributes: bool,

    /// Debug mode (every directory entry is logged)
    #[arg(short = 'd', overrides_with_all = ["quiet", "verbose"])]
    pub debug: bool,

    /// Process hidden files
    #[arg(short = 'h')]
    pub hidden: bool,

    /// Also follow junctions (symbolic links to directories)
    #[arg(short = 'j')]
    pub junctions: bool,

    /// Create hard links; without this flag duplicates are only reported
    #[arg(short = 'l')]
    pub link: bool,

    /// Also process small files (< 1024 bytes), skipped by default
    #[arg(short = 'm')]
    pub small: bool,

    /// List the duplicate file result to stdout
    #[arg(short = 'o')]
    pub list: bool,

    /// Quiet mode (errors only)
    #[arg(short = 'q', overrides_with_all = ["verbose", "debug"])]
    pub quiet: bool,

    /// Run recursively through the given folders
    #[arg(short = 'r')]
    pub recursive: bool,

    /// Process system files
    #[arg(short = 's')]
    pub system: bool,

    /// Time and date of files must match
    #[arg(short = 't')]
    pub match_timestamps: bool,

    /// Verbose mode
    #[arg(short = 'v', overrides_with_all = ["quiet", "debug"])]
    pub verbose: bool,

    /// Folders to process (must exist)
    #[arg(value_name = "PATH", required = true)]
    pub paths: Vec<PathBuf>,
}

/// Outcome of argument parsing.
#[derive(Debug)]
pub enum Invocation {
    /// Arguments are valid and every root exists.
    Run(Cli),
    /// Help or version output was requested; print it and exit successfully.
    Help(String),
}

/// Errors in the command line.
#[derive(Debug, Error)]
pub enum UsageError {
    /// Unknown flag, missing path or other clap-level rejection.
    #[error("{0}")]
    Arguments(String),

    /// A root directory does not exist (or is not a directory).
    #[error("Specified directory \"{}\" does not exist", .0.display())]
    MissingDirectory(PathBuf),
}

/// Rewrite slash flags into the dash form clap understands.
///
/// Every argument made of `/` and one ASCII character is taken as a flag
/// and rewritten, so an unknown letter is reported by clap as an invalid
/// option rather than looked up as a folder. `/?` and `-?` become `--help`.
/// The first argument (program name) is passed through untouched.
///
/// # Example
///
/// ```
/// use dupelink::cli::normalize_args;
/// use std::ffi::OsString;
///
/// let args = normalize_args(["dupelink", "/r", "/?", "/data"]);
/// assert_eq!(
///     args,
///     vec![
///         OsString::from("dupelink"),
///         OsString::from("-r"),
///         OsString::from("--help"),
///         OsString::from("/data"),
///     ]
/// );
/// ```
pub fn normalize_args<I, T>(args: I) -> Vec<OsString>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString>,
{
    args.into_iter()
        .enumerate()
        .map(|(index, arg)| {
            let arg: OsString = arg.into();
            if index == 0 {
                return arg;
            }
            match arg.to_str() {
                Some("/?") | Some("-?") => OsString::from("--help"),
                Some(s) => match s.as_bytes() {
                    [b'/', letter] if letter.is_ascii() && *letter != b'-' => {
                        OsString::from(format!("-{}", *letter as char))
                    }
                    _ => arg,
                },
                None => arg,
            }
        })
        .collect()
}

/// Parse and validate the command line.
///
/// # Errors
///
/// Returns [`UsageError`] for invalid flags, missing paths, or root paths
/// that are not existing directories.
pub fn parse_args<I, T>(args: I) -> Result<Invocation, UsageError>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString>,
{
    let cli = match Cli::try_parse_from(normalize_args(args)) {
        Ok(cli) => cli,
        Err(err) => {
            return match err.kind() {
                ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => {
                    Ok(Invocation::Help(err.render().to_string()))
                }
                _ => Err(UsageError::Arguments(err.render().to_string())),
            };
        }
    };

    if let Some(missing) = cli.paths.iter().find(|path| !path.is_dir()) {
        return Err(UsageError::MissingDirectory(missing.clone()));
    }

    Ok(Invocation::Run(cli))
}
