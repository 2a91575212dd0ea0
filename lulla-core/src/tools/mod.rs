// lulla-core/src/tools/mod.rs

//! The individual CI utilities.
//!
//! Each module owns a clap argument struct and a `run` function. `run` checks
//! its inputs before anything is spawned, drives at most one external tool
//! through the [`CommandRunner`] in the [`ToolContext`], and returns a
//! [`LullaError`] carrying the exit code on failure. [`launch`] wires this up
//! for a binary.

pub mod fodyclean;
pub mod netbuild;
pub mod netcopy;
pub mod netrestore;
pub mod nettest;
pub mod plainexist;
pub mod unitytest;

use crate::config::{ToolSettings, WithCommonArgs};
use crate::console::Console;
use crate::errors::{LullaError, Result};
use crate::logging;
use crate::process::{CommandRunner, ProcessRunner};
use clap::Parser;
use tracing::error;

/// What a utility needs from its surroundings while it runs.
pub struct ToolContext<'a> {
    pub console: &'a Console,
    pub runner: &'a dyn CommandRunner,
}

impl<'a> ToolContext<'a> {
    pub fn new(console: &'a Console, runner: &'a dyn CommandRunner) -> Self {
        ToolContext { console, runner }
    }
}

/// Parses arguments, sets up logging, runs the utility and returns the status
/// the process should exit with.
///
/// The status is a full `i32` so that wrapped tools' codes above 255 (common on
/// Windows) survive; pass it to [`std::process::exit`] once this returns and
/// the log writer has been flushed.
pub fn launch<A, F>(banner: &str, run: F) -> i32
where
    A: Parser + WithCommonArgs,
    F: FnOnce(A, &ToolContext<'_>) -> Result<()>,
{
    let args = A::parse();
    let common = args.common().clone();

    let _guard = match logging::init(&common) {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            return 1;
        }
    };

    let console = Console::new(banner, ToolSettings::from(&common));
    console.log(format!("{}.", banner));
    let runner = ProcessRunner::new(&console);
    let ctx = ToolContext::new(&console, &runner);

    let outcome = run(args, &ctx);
    report_outcome(&console, outcome, || A::command().render_help().to_string())
}

/// Logs a failed run the same way for every utility and returns its exit code.
pub fn report_outcome(
    console: &Console,
    outcome: Result<()>,
    usage: impl FnOnce() -> String,
) -> i32 {
    match outcome {
        Ok(()) => 0,
        Err(e) => {
            let code = e.exit_code();
            error!(code, error = %e, "Utility failed");
            console.error(format!(
                "ERROR! Exiting...\nError code: {}\nError message: {}",
                code,
                describe(&e)
            ));
            if e.shows_usage() {
                console.warning(usage());
            }
            code
        }
    }
}

/// The error message followed by its chain of causes.
fn describe(e: &LullaError) -> String {
    let mut message = e.to_string();
    let mut source = std::error::Error::source(e);
    while let Some(cause) = source {
        message.push_str(&format!(": {}", cause));
        source = cause.source();
    }
    message
}

/// Turns a required-but-missing argument into a usage error.
pub(crate) fn require<T>(value: Option<T>, message: &str) -> Result<T> {
    value.ok_or_else(|| LullaError::usage(message))
}
