// lulla-core/src/tools/netbuild.rs

//! Builds a Visual Studio solution with MSBuild.

use super::{require, ToolContext};
use crate::config::{CommonArgs, WithCommonArgs};
use crate::errors::{LullaError, Result};
use crate::msbuild::{self, HostEnvironment};
use crate::paths;
use clap::{Parser, ValueEnum};
use std::fmt;
use tracing::info;

#[derive(ValueEnum, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Configuration {
    #[value(name = "Release")]
    Release,
    #[default]
    #[value(name = "Debug")]
    Debug,
}

impl fmt::Display for Configuration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Configuration::Release => f.write_str("Release"),
            Configuration::Debug => f.write_str("Debug"),
        }
    }
}

/// Build VS solution along with project tests.
#[derive(Parser, Debug)]
#[command(name = "netbuild", version)]
pub struct NetBuildArgs {
    /// The path to the solution to build.
    #[arg(short = 's', long = "slnpath", value_name = "SolutionPath")]
    pub sln_path: Option<String>,

    /// The configuration name to be used with MSBuild.
    #[arg(short = 'c', long = "config", value_name = "ConfigurationName", value_enum, default_value_t)]
    pub config: Configuration,

    #[command(flatten)]
    pub common: CommonArgs,
}

impl WithCommonArgs for NetBuildArgs {
    fn common(&self) -> &CommonArgs {
        &self.common
    }
}

pub fn run(args: NetBuildArgs, ctx: &ToolContext<'_>, host: &dyn HostEnvironment) -> Result<()> {
    let console = ctx.console;
    console.warning(format!(
        "Solution path: {}\nConfiguration: {}",
        args.sln_path.as_deref().unwrap_or("<none>"),
        args.config
    ));

    let sln_path = require(args.sln_path, "Solution path was not provided for build.")?;
    if !paths::is_file(&sln_path) {
        return Err(LullaError::usage("Solution path is not a valid file."));
    }

    console.linebreaks(2);
    console.warning("Building solution...");
    let msbuild = msbuild::locate_msbuild(host, ctx.runner)?
        .ok_or_else(|| LullaError::validation("MSBuild could not be located."))?;
    info!(msbuild = %msbuild.display(), "Using MSBuild");

    let command = vec![
        msbuild.to_string_lossy().into_owned(),
        sln_path,
        format!("-p:Configuration={}", args.config),
    ];
    let result = ctx.runner.run_args(&command)?;
    if !result.success() {
        return Err(LullaError::ToolFailed {
            status: result.status,
            message: "MSBuild failed to run successfully on solution.".to_string(),
        });
    }

    console.success("Build was successful.");
    Ok(())
}
