// src/cli.rs

//! CLI argument parsing using `clap`.

use std::ffi::OsString;
use std::path::PathBuf;

use clap::{Parser, ValueEnum};

/// Command-line arguments for `watchrun`.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "watchrun",
    version,
    about = "Watch a directory for source changes and restart a program.",
    long_about = None
)]
pub struct CliArgs {
    /// File or directory to watch.
    ///
    /// A file watches all matching files in its parent directory; a
    /// directory watches matching files under the directory itself.
    #[arg(value_name = "TARGET")]
    pub target: PathBuf,

    /// Arguments passed through verbatim to the launched program.
    #[arg(
        value_name = "ARGS",
        trailing_var_arg = true,
        allow_hyphen_values = true
    )]
    pub args: Vec<OsString>,

    /// File extension that triggers a restart (leading dot optional).
    #[arg(long, value_name = "EXT", default_value = "rs")]
    pub ext: String,

    /// Program used to run the target, e.g. `python3`; the resolved target
    /// path becomes its first argument.
    ///
    /// Without this, the target is executed directly and must therefore be
    /// an executable file, not a directory.
    #[arg(long, value_name = "PROGRAM")]
    pub exec: Option<PathBuf>,

    /// Logging level (error, warn, info, debug, trace).
    ///
    /// If omitted, `WATCHRUN_LOG` or a default level will be used.
    #[arg(long, value_enum, value_name = "LEVEL")]
    pub log_level: Option<LogLevel>,
}

/// Log level as exposed on the CLI.
#[derive(Debug, Copy, Clone, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// Convenience wrapper around `CliArgs::parse()`.
pub fn parse() -> CliArgs {
    CliArgs::parse()
}
