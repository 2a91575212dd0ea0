// lulla-core/src/config.rs

//! Flags shared by every utility and the settings derived from them.

use clap::{ArgAction, Args};
use std::path::PathBuf;

/// Options accepted by every lulla binary, flattened into each tool's parser.
#[derive(Args, Debug, Clone, Default)]
pub struct CommonArgs {
    /// Suppress progress output. Errors are still printed.
    #[arg(short = 'q', long)]
    pub silent: bool,

    /// Increase diagnostic verbosity.
    ///
    /// Specify multiple times for more verbose output:
    ///  -v:  INFO level
    ///  -vv: DEBUG level
    ///  -vvv: TRACE level (most verbose)
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,

    /// Also write diagnostic logs to this file.
    #[arg(long, value_name = "PATH")]
    pub log_file: Option<PathBuf>,
}

/// Run-wide settings handed to each component when it is constructed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ToolSettings {
    pub silent: bool,
}

impl ToolSettings {
    pub fn silent() -> Self {
        ToolSettings { silent: true }
    }
}

impl From<&CommonArgs> for ToolSettings {
    fn from(args: &CommonArgs) -> Self {
        ToolSettings {
            silent: args.silent,
        }
    }
}

/// Implemented by each tool's argument struct so the shared launcher can reach
/// the common flags.
pub trait WithCommonArgs {
    fn common(&self) -> &CommonArgs;
}

/// Splits a `;`-separated list, dropping empty entries and surrounding blanks.
pub fn split_list(raw: &str) -> Vec<String> {
    raw.split(';')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(str::to_string)
        .collect()
}
