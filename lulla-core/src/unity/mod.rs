// lulla-core/src/unity/mod.rs

//! Unity Editor batch-mode test runs.

pub mod results;

use clap::ValueEnum;
use std::fmt;
use std::path::Path;

pub use results::{ResultsLocation, TestCaseOutcome, TestCaseResult};

/// Which Unity test platform to run.
#[derive(ValueEnum, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TestMode {
    #[default]
    #[value(name = "editmode")]
    EditMode,
    #[value(name = "playmode")]
    PlayMode,
}

impl TestMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            TestMode::EditMode => "editmode",
            TestMode::PlayMode => "playmode",
        }
    }
}

impl fmt::Display for TestMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Arguments for `<unity> -batchmode -runTests ...`.
///
/// `results_path` should already be absolute: Unity resolves relative paths
/// against its own install directory.
pub fn test_command(
    unity_app: &Path,
    project: &Path,
    mode: TestMode,
    results_path: Option<&Path>,
) -> Vec<String> {
    let mut args = vec![
        unity_app.to_string_lossy().into_owned(),
        "-batchmode".to_string(),
        "-runTests".to_string(),
        "-projectPath".to_string(),
        project.to_string_lossy().into_owned(),
        "-testPlatform".to_string(),
        mode.as_str().to_string(),
    ];
    if let Some(path) = results_path {
        args.push("-testResults".to_string());
        args.push(path.to_string_lossy().into_owned());
    }
    args
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_command_without_results_path() {
        let args = test_command(Path::new("/opt/Unity"), Path::new("Game"), TestMode::PlayMode, None);
        assert_eq!(
            args,
            vec![
                "/opt/Unity",
                "-batchmode",
                "-runTests",
                "-projectPath",
                "Game",
                "-testPlatform",
                "playmode"
            ]
        );
    }

    #[test]
    fn test_command_with_results_path() {
        let args = test_command(
            Path::new("/opt/Unity"),
            Path::new("Game"),
            TestMode::EditMode,
            Some(Path::new("/tmp/out.xml")),
        );
        assert_eq!(&args[5..], ["-testPlatform", "editmode", "-testResults", "/tmp/out.xml"]);
    }
}
