// lulla-core/src/tools/nettest.rs

//! Runs a .NET Framework test assembly through `dotnet vstest`.

use super::{require, ToolContext};
use crate::config::{CommonArgs, WithCommonArgs};
use crate::errors::{LullaError, Result};
use crate::paths;
use clap::Parser;

pub const DEFAULT_FRAMEWORK: &str = ".NETFramework,Version=v4.7.1";

/// Run tests for VS solution.
#[derive(Parser, Debug)]
#[command(name = "nettest", version)]
pub struct NetTestArgs {
    /// The path to the tests assembly.
    #[arg(short = 't', long = "testspath", value_name = "TestsPath")]
    pub tests_path: Option<String>,

    /// Target framework passed to vstest.
    #[arg(long, value_name = "Framework", default_value = DEFAULT_FRAMEWORK)]
    pub framework: String,

    #[command(flatten)]
    pub common: CommonArgs,
}

impl WithCommonArgs for NetTestArgs {
    fn common(&self) -> &CommonArgs {
        &self.common
    }
}

pub fn vstest_command(tests_path: &str, framework: &str) -> Vec<String> {
    vec![
        "dotnet".to_string(),
        "vstest".to_string(),
        tests_path.to_string(),
        format!("/Framework:{}", framework),
        "/InIsolation".to_string(),
        "/logger:trx".to_string(),
    ]
}

pub fn run(args: NetTestArgs, ctx: &ToolContext<'_>) -> Result<()> {
    let console = ctx.console;
    console.warning(format!(
        "Tests path: {}",
        args.tests_path.as_deref().unwrap_or("<none>")
    ));

    let tests_path = require(args.tests_path, "Tests path was not provided for running tests.")?;
    if !paths::is_file(&tests_path) {
        return Err(LullaError::usage("Tests assembly is not a valid file."));
    }

    console.linebreaks(2);
    console.warning("Running .Net Framework tests...");
    let result = ctx
        .runner
        .run_args(&vstest_command(&tests_path, &args.framework))?;
    if !result.success() {
        return Err(LullaError::ToolFailed {
            status: result.status,
            message: "Tests were not run successfully.".to_string(),
        });
    }

    console.success("Tests were run successfully.");
    Ok(())
}
