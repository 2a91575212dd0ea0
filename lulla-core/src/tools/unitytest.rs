// lulla-core/src/tools/unitytest.rs

//! Runs Unity TestRunner tests in batch mode and reports each test case.

use super::{require, ToolContext};
use crate::config::{CommonArgs, WithCommonArgs};
use crate::console::{Console, Tone};
use crate::errors::{LullaError, Result};
use crate::paths;
use crate::unity::results::parse_results_file;
use crate::unity::{self, ResultsLocation, TestMode};
use clap::Parser;
use std::path::{Path, PathBuf};
use tracing::warn;

/// Run Unity TestRunner tests.
#[derive(Parser, Debug)]
#[command(name = "unitytest", version)]
pub struct UnityTestArgs {
    /// The path to the Unity executable.
    #[arg(short = 'u', long = "unitypath", value_name = "UnityPath")]
    pub unity_path: Option<String>,

    /// The path to the Unity project.
    #[arg(short = 'p', long = "projectpath", value_name = "ProjectPath")]
    pub project_path: Option<String>,

    /// The test platform to run.
    #[arg(short = 'm', long = "testmode", value_enum, value_name = "TestMode", default_value_t = TestMode::EditMode)]
    pub test_mode: TestMode,

    /// Where Unity should write the XML results. Defaults to a
    /// TestResults-*.xml file in the project.
    #[arg(short = 'r', long = "resultspath", value_name = "ResultsPath")]
    pub results_path: Option<String>,

    #[command(flatten)]
    pub common: CommonArgs,
}

impl WithCommonArgs for UnityTestArgs {
    fn common(&self) -> &CommonArgs {
        &self.common
    }
}

pub fn run(args: UnityTestArgs, ctx: &ToolContext<'_>) -> Result<()> {
    let console = ctx.console;
    console.warning(format!(
        "Unity path: {}\nProject path: {}\nTest mode: {}\nResults path: {}",
        args.unity_path.as_deref().unwrap_or("<none>"),
        args.project_path.as_deref().unwrap_or("<none>"),
        args.test_mode,
        args.results_path.as_deref().unwrap_or("<auto>"),
    ));

    let unity_app = PathBuf::from(require(args.unity_path, "Unity path was not provided.")?);
    let project = PathBuf::from(require(args.project_path, "Project path was not provided.")?);
    if !paths::is_file(&unity_app) {
        return Err(LullaError::usage(format!(
            "Unity executable was not found at {}.",
            unity_app.display()
        )));
    }
    if !paths::is_dir(&project) {
        return Err(LullaError::usage(format!(
            "Unity project directory was not found at {}.",
            project.display()
        )));
    }

    let results_path = args.results_path.map(paths::absolute);
    let command = unity::test_command(&unity_app, &project, args.test_mode, results_path.as_deref());
    let location = ResultsLocation::from_option(results_path);

    console.linebreaks(2);
    console.warning("Running Unity TestRunner tests...");
    let result = ctx.runner.run_args(&command)?;

    report_results(console, &location, &project);

    if !result.success() {
        return Err(LullaError::ToolFailed {
            status: result.status,
            message: "Unity TestRunner tests were not run successfully.".to_string(),
        });
    }
    console.success("Unity TestRunner tests were run successfully.");
    Ok(())
}

/// Logs every test case of the resolved results file. A missing or unreadable
/// report never changes the outcome of the run.
fn report_results(console: &Console, location: &ResultsLocation, project: &Path) {
    let Some(path) = location.resolve(project) else {
        console.warning("No test results file was found.");
        return;
    };
    console.log(format!("Reading test results from {}.", path.display()));

    let outcomes = match parse_results_file(&path) {
        Ok(outcomes) => outcomes,
        Err(e) => {
            warn!(path = %path.display(), error = %e, "Could not parse test results");
            console.error(format!("Could not parse test results: {}", e));
            return;
        }
    };

    for outcome in outcomes {
        console.linebreaks(1);
        let tone = if outcome.result.is_passed() {
            Tone::Success
        } else {
            Tone::Error
        };
        console.log(format!("Test case ID: {}", outcome.id));
        console.log(format!("Full name: {}", outcome.full_name));
        console.emit(&format!("Status: {}", outcome.result.as_str()), tone);
    }
}
