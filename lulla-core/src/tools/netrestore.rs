// lulla-core/src/tools/netrestore.rs

//! Restores NuGet packages for a solution.

use super::{require, ToolContext};
use crate::config::{CommonArgs, WithCommonArgs};
use crate::errors::{LullaError, Result};
use crate::paths;
use clap::Parser;

/// Restore dependencies in VS solution.
#[derive(Parser, Debug)]
#[command(name = "netrestore", version)]
pub struct NetRestoreArgs {
    /// The path to the solution to restore.
    #[arg(short = 's', long = "slnpath", value_name = "SolutionPath")]
    pub sln_path: Option<String>,

    #[command(flatten)]
    pub common: CommonArgs,
}

impl WithCommonArgs for NetRestoreArgs {
    fn common(&self) -> &CommonArgs {
        &self.common
    }
}

pub fn run(args: NetRestoreArgs, ctx: &ToolContext<'_>) -> Result<()> {
    let console = ctx.console;
    console.warning(format!(
        "Solution path: {}",
        args.sln_path.as_deref().unwrap_or("<none>")
    ));

    let sln_path = require(args.sln_path, "Solution path was not provided for restore.")?;
    if !paths::is_file(&sln_path) {
        return Err(LullaError::usage("Solution path is not a valid file."));
    }

    console.linebreaks(2);
    console.warning("Running nuget restore...");
    let command = vec!["nuget".to_string(), "restore".to_string(), sln_path];
    let result = ctx.runner.run_args(&command)?;
    if !result.success() {
        return Err(LullaError::ToolFailed {
            status: result.status,
            message: "NuGet packages for solution were not restored correctly.".to_string(),
        });
    }

    console.success("NuGet packages for solution were restored successfully.");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tools::testing::{quiet_console, RecordingRunner};
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_restore_runs_nuget() {
        let dir = tempdir().unwrap();
        let sln = dir.path().join("Game.sln");
        fs::write(&sln, "").unwrap();
        let sln = sln.to_string_lossy().into_owned();

        let console = quiet_console();
        let runner = RecordingRunner::default();
        let ctx = ToolContext::new(&console, &runner);
        let args = NetRestoreArgs::try_parse_from(["netrestore", "--slnpath", sln.as_str()]).unwrap();

        run(args, &ctx).unwrap();
        assert_eq!(
            *runner.calls.borrow(),
            vec![vec!["nuget".to_string(), "restore".to_string(), sln]]
        );
    }

    #[test]
    fn test_restore_failure_propagates_status() {
        let dir = tempdir().unwrap();
        let sln = dir.path().join("Game.sln");
        fs::write(&sln, "").unwrap();

        let console = quiet_console();
        let runner = RecordingRunner::with_status(2);
        let ctx = ToolContext::new(&console, &runner);
        let args =
            NetRestoreArgs::try_parse_from(["netrestore", "-s", sln.to_str().unwrap()]).unwrap();

        assert_eq!(run(args, &ctx).unwrap_err().exit_code(), 2);
    }

    #[test]
    fn test_directory_is_not_a_solution() {
        let dir = tempdir().unwrap();
        let console = quiet_console();
        let runner = RecordingRunner::default();
        let ctx = ToolContext::new(&console, &runner);
        let args =
            NetRestoreArgs::try_parse_from(["netrestore", "-s", dir.path().to_str().unwrap()])
                .unwrap();

        let err = run(args, &ctx).unwrap_err();
        assert!(err.shows_usage());
        assert_eq!(runner.call_count(), 0);
    }
}
