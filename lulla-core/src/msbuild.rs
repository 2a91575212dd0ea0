// lulla-core/src/msbuild.rs

//! Finding an MSBuild executable to build a solution with.
//!
//! Off Windows `msbuild` is expected on PATH. On Windows the Visual Studio
//! locator `vswhere.exe` is asked for the newest install that ships MSBuild,
//! and the highest versioned `MSBuild.exe` inside it is used.

use crate::errors::Result;
use crate::paths;
use crate::process::{quote_arg, CommandRunner};
use std::env;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Environment variables probed, in order, for the Program Files directory.
pub const PROGRAM_FILES_VARS: [&str; 2] = ["ProgramFiles", "ProgramFiles(x86)"];

const VSWHERE_SUB_PATH: &str = "Microsoft Visual Studio/Installer/vswhere.exe";
const VS_MSBUILD_PATTERN: &str = "MSBuild/*/Bin/MSBuild.exe";
const INSTALLATION_PATH_KEY: &str = "installationPath";

/// Everything the locator needs to know about the machine it runs on.
pub trait HostEnvironment {
    fn is_windows(&self) -> bool;
    fn var(&self, key: &str) -> Option<String>;
    fn is_file(&self, path: &Path) -> bool;
    fn glob(&self, root: &Path, pattern: &str) -> Vec<PathBuf>;
}

/// The real machine.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemEnvironment;

impl HostEnvironment for SystemEnvironment {
    fn is_windows(&self) -> bool {
        cfg!(windows)
    }

    fn var(&self, key: &str) -> Option<String> {
        env::var(key).ok()
    }

    fn is_file(&self, path: &Path) -> bool {
        paths::is_file(path)
    }

    fn glob(&self, root: &Path, pattern: &str) -> Vec<PathBuf> {
        paths::glob(root, pattern).collect()
    }
}

/// `vswhere.exe` under the first Program Files directory that has it.
pub fn locate_vswhere(host: &dyn HostEnvironment) -> Option<PathBuf> {
    PROGRAM_FILES_VARS.iter().find_map(|var| {
        let Some(program_files) = host.var(var) else {
            warn!("No {} variable was found in environment.", var);
            return None;
        };
        let candidate = Path::new(&program_files).join(VSWHERE_SUB_PATH);
        if host.is_file(&candidate) {
            Some(candidate)
        } else {
            warn!("No executable found at {}", candidate.display());
            None
        }
    })
}

/// Picks `installationPath` out of vswhere's `key: value` text output.
/// The last occurrence wins.
pub fn parse_installation_path(vswhere_output: &str) -> Option<String> {
    vswhere_output
        .lines()
        .filter_map(|line| line.split_once(':'))
        .filter(|(key, _)| *key == INSTALLATION_PATH_KEY)
        .map(|(_, value)| value.trim().to_string())
        .last()
}

/// Asks vswhere for the newest Visual Studio with the MSBuild component.
pub fn locate_vs_installation(
    host: &dyn HostEnvironment,
    runner: &dyn CommandRunner,
) -> Result<Option<PathBuf>> {
    let Some(vswhere) = locate_vswhere(host) else {
        return Ok(None);
    };
    let command_line = format!(
        "{} -latest -requires Microsoft.Component.MSBuild",
        quote_arg(&vswhere.to_string_lossy())
    );
    let result = runner.run_line(&command_line)?;
    let installation = parse_installation_path(&result.output).map(PathBuf::from);
    if let Some(path) = &installation {
        info!("VS Installation was found at: {}", path.display());
    }
    Ok(installation)
}

/// Resolves the MSBuild executable, or `None` when nothing usable exists.
pub fn locate_msbuild(
    host: &dyn HostEnvironment,
    runner: &dyn CommandRunner,
) -> Result<Option<PathBuf>> {
    if !host.is_windows() {
        debug!("Not on Windows; MSBuild is usually available on PATH here.");
        return Ok(Some(PathBuf::from("msbuild")));
    }

    debug!("On Windows. Locating MSBuild via vswhere...");
    let Some(installation) = locate_vs_installation(host, runner)? else {
        warn!("VS Installation was not found.");
        return Ok(None);
    };

    let mut locations = host.glob(&installation, VS_MSBUILD_PATTERN);
    locations.sort();
    Ok(locations.into_iter().rev().find(|path| host.is_file(path)))
}
