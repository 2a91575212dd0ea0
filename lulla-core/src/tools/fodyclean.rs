// lulla-core/src/tools/fodyclean.rs

//! Removes Fody references from every project of a solution.

use super::{require, ToolContext};
use crate::config::{CommonArgs, WithCommonArgs};
use crate::errors::{LullaError, Result};
use crate::fody;
use crate::paths;
use clap::Parser;

/// Clean Fody references from all projects in VS solution directory.
#[derive(Parser, Debug)]
#[command(name = "fodyclean", version)]
pub struct FodyCleanArgs {
    /// The path to the solution whose directory (or that directory itself)
    /// contains all the targeted projects.
    #[arg(short = 's', long = "slnpath", value_name = "SolutionPath")]
    pub sln_path: Option<String>,

    #[command(flatten)]
    pub common: CommonArgs,
}

impl WithCommonArgs for FodyCleanArgs {
    fn common(&self) -> &CommonArgs {
        &self.common
    }
}

pub fn run(args: FodyCleanArgs, ctx: &ToolContext<'_>) -> Result<()> {
    let sln_path = require(args.sln_path, "Solution path is not provided for cleaning.")?;
    let dir = paths::directory_of(&sln_path).ok_or_else(|| {
        LullaError::usage(format!("Solution path {} does not exist.", sln_path))
    })?;

    let console = ctx.console;
    console.linebreaks(2);
    console.warning("Cleaning Fody references...");

    for outcome in fody::clean_directory(&dir)? {
        if outcome.rewritten {
            console.warning(format!(
                "Cleaned {} Fody refs in {}.",
                outcome.removed,
                outcome.path.display()
            ));
        } else {
            console.log(format!("No Fody refs in {}.", outcome.path.display()));
        }
    }

    console.success("All existing Fody references were removed successfully.");
    Ok(())
}
