#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

//! # Overview
//!
//! `cli` implements the `filestage` command-line front end. It loads the
//! files named on the command line, runs them through an exclude stage and a
//! conditional select stage, and prints the relative paths of the items that
//! match.
//!
//! # Design
//!
//! The crate exposes [`run`] as the entry point. It accepts an argument
//! iterator together with handles for standard output and error so tests can
//! drive it without spawning a process. A [`clap`](https://docs.rs/clap/)
//! command performs the parse; the optional TOML file is read by
//! [`FileConfig`]. The pipeline itself is built by [`build_pipeline`] and run
//! on a current-thread tokio runtime.
//!
//! # Invariants
//!
//! - `run` never panics; failures surface as non-zero exit codes.
//! - Standard output carries only matching paths, one per line, in operand
//!   order. Diagnostics and the summary line go to standard error.
//! - Exit codes: `0` success, `1` usage or configuration error, `2` I/O
//!   error, `3` fatal stage error.
//!
//! # Examples
//!
//! ```
//! use cli::run;
//!
//! let mut stdout = Vec::new();
//! let mut stderr = Vec::new();
//! let exit_code = run(["filestage", "--version"], &mut stdout, &mut stderr);
//!
//! assert_eq!(exit_code, 0);
//! assert!(String::from_utf8(stdout).unwrap().starts_with("filestage "));
//! assert!(stderr.is_empty());
//! ```

mod config;
mod error;
mod gate;

use std::env;
use std::ffi::OsString;
use std::io::Write;
use std::path::{Path, PathBuf};

use clap::{Arg, ArgAction, Command, builder::PathBufValueParser};
use filters::{ExcludeList, ExcludePattern};
use item::{Item, LoadError};
use logging::{LogLevel, init_tracing};

pub use config::FileConfig;
pub use error::{CliError, EXIT_IO, EXIT_STAGE, EXIT_USAGE};
pub use gate::{EXCLUDE_STAGE, EXCLUDED_COUNTER, SELECT_STAGE, Summary, build_pipeline};

/// Maximum exit code representable by a Unix process.
const MAX_EXIT_CODE: i32 = u8::MAX as i32;

/// Program name used in diagnostics.
const PROGRAM: &str = "filestage";

/// Help text describing the supported options.
const HELP_TEXT: &str = concat!(
    "Usage: filestage [OPTIONS] FILE...\n",
    "\n",
    "Loads each FILE, drops those matching an exclude pattern, and prints the\n",
    "relative paths of the files that satisfy the configured condition.\n",
    "\n",
    "Options:\n",
    "  -c, --config FILE       Read settings from the TOML file FILE.\n",
    "      --base DIR          Compute relative paths against DIR (default: .).\n",
    "      --exclude PATTERN   Skip files whose relative path matches PATTERN.\n",
    "  -v, --verbose           Increase log verbosity (repeatable).\n",
    "  -h, --help              Show this help message and exit.\n",
    "  -V, --version           Output version information and exit.\n",
    "\n",
    "PATTERN containing *, ?, [ or { is a glob; anything else matches as a\n",
    "substring. FILESTAGE_LOG overrides the log level with a filter directive.\n",
    "\n",
    "Exit status: 0 success, 1 usage or config error, 2 I/O error,\n",
    "3 fatal stage error.\n",
);

/// Parsed command produced by [`parse_args`].
#[derive(Debug, Default)]
struct ParsedArgs {
    show_help: bool,
    show_version: bool,
    verbose: u8,
    config: Option<PathBuf>,
    base: Option<PathBuf>,
    excludes: Vec<String>,
    operands: Vec<PathBuf>,
}

/// Builds the `clap` command used for parsing.
fn clap_command() -> Command {
    Command::new(PROGRAM)
        .disable_help_flag(true)
        .disable_version_flag(true)
        .arg(
            Arg::new("help")
                .long("help")
                .short('h')
                .help("Show this help message and exit.")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("version")
                .long("version")
                .short('V')
                .help("Output version information and exit.")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("verbose")
                .long("verbose")
                .short('v')
                .help("Increase log verbosity.")
                .action(ArgAction::Count),
        )
        .arg(
            Arg::new("config")
                .long("config")
                .short('c')
                .value_name("FILE")
                .help("Read settings from FILE.")
                .num_args(1)
                .action(ArgAction::Set)
                .value_parser(PathBufValueParser::new()),
        )
        .arg(
            Arg::new("base")
                .long("base")
                .value_name("DIR")
                .help("Compute relative paths against DIR.")
                .num_args(1)
                .action(ArgAction::Set)
                .value_parser(PathBufValueParser::new()),
        )
        .arg(
            Arg::new("exclude")
                .long("exclude")
                .value_name("PATTERN")
                .help("Skip files whose relative path matches PATTERN.")
                .action(ArgAction::Append),
        )
        .arg(
            Arg::new("files")
                .value_name("FILE")
                .action(ArgAction::Append)
                .num_args(0..)
                .value_parser(PathBufValueParser::new()),
        )
}

/// Parses command-line arguments into a [`ParsedArgs`] structure.
fn parse_args<I, S>(arguments: I) -> Result<ParsedArgs, clap::Error>
where
    I: IntoIterator<Item = S>,
    S: Into<OsString>,
{
    let mut args: Vec<OsString> = arguments.into_iter().map(Into::into).collect();

    if args.is_empty() {
        args.push(OsString::from(PROGRAM));
    }

    let mut matches = clap_command().try_get_matches_from(args)?;

    Ok(ParsedArgs {
        show_help: matches.get_flag("help"),
        show_version: matches.get_flag("version"),
        verbose: matches.get_count("verbose"),
        config: matches.remove_one::<PathBuf>("config"),
        base: matches.remove_one::<PathBuf>("base"),
        excludes: matches
            .remove_many::<String>("exclude")
            .map(Iterator::collect)
            .unwrap_or_default(),
        operands: matches
            .remove_many::<PathBuf>("files")
            .map(Iterator::collect)
            .unwrap_or_default(),
    })
}

/// Runs the CLI using the provided argument iterator and output handles.
///
/// Returns the process exit code.
pub fn run<I, S, Out, Err>(arguments: I, stdout: &mut Out, stderr: &mut Err) -> i32
where
    I: IntoIterator<Item = S>,
    S: Into<OsString>,
    Out: Write,
    Err: Write,
{
    let parsed = match parse_args(arguments) {
        Ok(parsed) => parsed,
        Err(error) => {
            let _ = writeln!(stderr, "{PROGRAM}: {}", error.kind());
            let _ = write!(stderr, "{}", error.render());
            return EXIT_USAGE;
        }
    };

    if parsed.show_help {
        return if stdout.write_all(HELP_TEXT.as_bytes()).is_ok() {
            0
        } else {
            EXIT_IO
        };
    }

    if parsed.show_version {
        return if writeln!(stdout, "{PROGRAM} {}", env!("CARGO_PKG_VERSION")).is_ok() {
            0
        } else {
            EXIT_IO
        };
    }

    if parsed.operands.is_empty() {
        let _ = writeln!(stderr, "{PROGRAM}: no input files (see --help)");
        return EXIT_USAGE;
    }

    match execute(parsed, stdout, stderr) {
        Ok(()) => 0,
        Err(error) => {
            let _ = writeln!(stderr, "{PROGRAM}: error: {error}");
            error.exit_code()
        }
    }
}

fn execute<Out, Err>(
    parsed: ParsedArgs,
    stdout: &mut Out,
    stderr: &mut Err,
) -> Result<(), CliError>
where
    Out: Write,
    Err: Write,
{
    let config = match &parsed.config {
        Some(path) => FileConfig::load(path)?,
        None => FileConfig::default(),
    };

    let log_config = config
        .logging
        .clone()
        .at_least(LogLevel::from_verbose_level(parsed.verbose));
    // A subscriber may already be installed when embedded; keep it.
    let _ = init_tracing(&log_config);

    let excludes = merge_excludes(&config.exclude, parsed.excludes)?;
    let base = match parsed.base {
        Some(base) => base,
        None => env::current_dir().map_err(|source| LoadError::Io {
            path: PathBuf::from("."),
            source,
        })?,
    };

    let items = parsed
        .operands
        .iter()
        .map(|operand| Item::load(&base, absolutize(&base, operand)))
        .collect::<Result<Vec<_>, _>>()?;

    let pipeline = build_pipeline(&config.stage, config.condition, excludes)?;
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(CliError::Runtime)?;
    let output = runtime.block_on(pipeline.run(items))?;

    for item in &output.items {
        let _ = writeln!(stdout, "{}", item.relative_path().display());
    }
    let _ = writeln!(stderr, "{PROGRAM}: {}", Summary::from_reports(&output.reports));
    Ok(())
}

fn merge_excludes(configured: &ExcludeList, extra: Vec<String>) -> Result<ExcludeList, CliError> {
    if extra.is_empty() {
        return Ok(configured.clone());
    }
    let patterns = configured
        .patterns()
        .iter()
        .cloned()
        .chain(extra.iter().map(String::as_str).map(ExcludePattern::parse));
    Ok(ExcludeList::new(patterns)?)
}

fn absolutize(base: &Path, operand: &Path) -> PathBuf {
    if operand.is_absolute() {
        operand.to_path_buf()
    } else {
        base.join(operand)
    }
}

/// Converts a numeric exit code into an [`std::process::ExitCode`].
#[must_use]
pub fn exit_code_from(status: i32) -> std::process::ExitCode {
    let clamped = status.clamp(0, MAX_EXIT_CODE);
    std::process::ExitCode::from(u8::try_from(clamped).unwrap_or(u8::MAX))
}
