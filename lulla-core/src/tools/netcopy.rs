// lulla-core/src/tools/netcopy.rs

//! Copies a built assembly and its companion files into target directories.
//! Best used as a post-build event on the VS project.

use super::{require, ToolContext};
use crate::config::{split_list, CommonArgs, WithCommonArgs};
use crate::errors::{LullaError, Result};
use crate::paths;
use clap::Parser;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Copy built assembly to target directories.
#[derive(Parser, Debug)]
#[command(name = "netcopy", version)]
pub struct NetCopyArgs {
    /// The name of the built assembly (without file extension). Also used as
    /// the sub-directory name inside each target.
    #[arg(short = 'a', long = "asname", value_name = "AssemblyName")]
    pub as_name: Option<String>,

    /// The location of the built assembly.
    #[arg(short = 'd', long = "asdir", value_name = "AssemblyLocation")]
    pub as_dir: Option<String>,

    /// Semicolon-separated extensions to copy, e.g. "dll;pdb;xml".
    #[arg(short = 'e', long = "astypes", value_name = "AssemblyExtensions", default_value = "dll")]
    pub as_types: String,

    /// Semicolon-separated target directories, or the path to a text file
    /// listing one directory per line. Missing directories are created.
    #[arg(short = 't', long = "targetdirs", value_name = "TargetDirectories")]
    pub target_dirs: Option<String>,

    /// Copy into an <AssemblyName> sub-directory of each target (the default).
    #[arg(short = 'c', long = "createsubdir", overrides_with = "no_subdir")]
    pub create_subdir: bool,

    /// Copy straight into each target directory.
    #[arg(long = "no-subdir")]
    pub no_subdir: bool,

    #[command(flatten)]
    pub common: CommonArgs,
}

impl NetCopyArgs {
    /// The later of `--createsubdir` / `--no-subdir` wins; neither means yes.
    pub fn subdir_enabled(&self) -> bool {
        self.create_subdir || !self.no_subdir
    }
}

impl WithCommonArgs for NetCopyArgs {
    fn common(&self) -> &CommonArgs {
        &self.common
    }
}

/// A validated copy job.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CopyPlan {
    pub as_name: String,
    pub as_dir: PathBuf,
    pub extensions: Vec<String>,
    pub target_dirs: Vec<PathBuf>,
    pub create_subdir: bool,
}

impl CopyPlan {
    pub fn from_args(args: NetCopyArgs) -> Result<Self> {
        let create_subdir = args.subdir_enabled();
        let as_name = require(args.as_name, "Assembly name was not provided.")?;
        let as_dir = PathBuf::from(require(args.as_dir, "Assembly directory was not provided.")?);

        let extensions = split_list(&args.as_types);
        let Some(primary) = extensions.first() else {
            return Err(LullaError::usage("No assembly extensions were provided."));
        };
        let primary_path = paths::file_path(&as_dir, &as_name, primary);
        debug!("Parsed assembly path: {}", primary_path.display());
        if !paths::is_file(&primary_path) {
            return Err(LullaError::usage(format!(
                "Built assembly does not exist at {}.",
                primary_path.display()
            )));
        }

        let raw_targets = require(args.target_dirs, "Target directories were not provided.")?;
        let target_dirs = parse_target_dirs(&raw_targets)?;
        if target_dirs.is_empty() {
            return Err(LullaError::usage("Target directories list is empty."));
        }

        Ok(CopyPlan {
            as_name,
            as_dir,
            extensions,
            target_dirs,
            create_subdir,
        })
    }

    fn destination(&self, target_dir: &Path) -> PathBuf {
        if self.create_subdir {
            paths::combine(target_dir, &self.as_name)
        } else {
            target_dir.to_path_buf()
        }
    }
}

/// A file path yields its non-blank lines; anything else is split on `;`.
pub fn parse_target_dirs(raw: &str) -> Result<Vec<PathBuf>> {
    if paths::is_file(raw) {
        let content = fs::read_to_string(raw)
            .map_err(|e| LullaError::io(format!("Failed to read target directories file {}", raw), e))?;
        return Ok(content
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(PathBuf::from)
            .collect());
    }
    Ok(split_list(raw).into_iter().map(PathBuf::from).collect())
}

pub fn run(args: NetCopyArgs, ctx: &ToolContext<'_>) -> Result<()> {
    let console = ctx.console;
    console.warning(format!(
        "Assembly name: {}\nAssembly directory: {}\nAssembly extensions: {}\nTarget directories (unparsed): {}",
        args.as_name.as_deref().unwrap_or("<none>"),
        args.as_dir.as_deref().unwrap_or("<none>"),
        args.as_types,
        args.target_dirs.as_deref().unwrap_or("<none>"),
    ));

    let plan = CopyPlan::from_args(args)?;
    console.log(format!(
        "Parsed target directories: {}",
        plan.target_dirs
            .iter()
            .map(|d| d.display().to_string())
            .collect::<Vec<_>>()
            .join(", ")
    ));

    copy_files(&plan, ctx)?;
    console.success("Successfully copied all targeted files.");
    Ok(())
}

/// Runs the plan: for each target and extension, clear out stale copies
/// (including helper files such as Unity `.meta`) and copy the fresh one.
pub fn copy_files(plan: &CopyPlan, ctx: &ToolContext<'_>) -> Result<Vec<PathBuf>> {
    let console = ctx.console;
    let mut copied = Vec::new();

    for target_dir in &plan.target_dirs {
        console.linebreaks(1);
        let destination = plan.destination(target_dir);
        console.log(format!("Covering target directory: {}...", destination.display()));

        if !paths::is_dir(&destination) {
            console.log("Directory does not exist. Creating new directory.");
            fs::create_dir_all(&destination).map_err(|e| {
                LullaError::io(format!("Failed to create {}", destination.display()), e)
            })?;
        }

        for extension in &plan.extensions {
            delete_stale(&destination, &plan.as_name, extension, ctx)?;

            let source = paths::file_path(&plan.as_dir, &plan.as_name, extension);
            if !paths::is_file(&source) {
                return Err(LullaError::validation(format!(
                    "Could not find expected source file at: {}",
                    source.display()
                )));
            }
            let target = paths::file_path(&destination, &plan.as_name, extension);
            console.log(format!("Copying {} to {}...", source.display(), target.display()));
            fs::copy(&source, &target).map_err(|e| {
                LullaError::io(
                    format!("Failed to copy {} to {}", source.display(), target.display()),
                    e,
                )
            })?;
            copied.push(target);
        }
    }
    Ok(copied)
}

fn delete_stale(dir: &Path, name: &str, extension: &str, ctx: &ToolContext<'_>) -> Result<()> {
    let pattern = format!("{}.{}*", glob::Pattern::escape(name), glob::Pattern::escape(extension));
    let mut stale: Vec<PathBuf> = paths::glob(dir, &pattern).filter(|p| p.is_file()).collect();
    stale.sort();
    for path in stale {
        ctx.console.warning(format!("Deleting {}", path.display()));
        fs::remove_file(&path)
            .map_err(|e| LullaError::io(format!("Failed to delete {}", path.display()), e))?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tools::testing::{quiet_console, RecordingRunner};
    use tempfile::tempdir;

    fn args(argv: &[&str]) -> NetCopyArgs {
        NetCopyArgs::try_parse_from(std::iter::once("netcopy").chain(argv.iter().copied())).unwrap()
    }

    fn build_output(root: &Path) -> PathBuf {
        let bin = root.join("bin");
        fs::create_dir_all(&bin).unwrap();
        fs::write(bin.join("Lib.dll"), "new dll").unwrap();
        fs::write(bin.join("Lib.pdb"), "new pdb").unwrap();
        bin
    }

    #[test]
    fn test_copies_into_subdirectories_and_clears_stale_files() {
        let root = tempdir().unwrap();
        let bin = build_output(root.path());
        let first = root.path().join("PluginsA");
        let second = root.path().join("PluginsB");
        fs::create_dir_all(second.join("Lib")).unwrap();
        fs::write(second.join("Lib").join("Lib.dll"), "old dll").unwrap();
        fs::write(second.join("Lib").join("Lib.dll.meta"), "old meta").unwrap();
        fs::write(second.join("Lib").join("Other.dll"), "keep").unwrap();

        let targets = format!("{};{}", first.display(), second.display());
        let console = quiet_console();
        let runner = RecordingRunner::default();
        let ctx = ToolContext::new(&console, &runner);

        run(
            args(&[
                "-a",
                "Lib",
                "-d",
                bin.to_str().unwrap(),
                "-e",
                "dll;pdb",
                "-t",
                targets.as_str(),
            ]),
            &ctx,
        )
        .unwrap();

        for target in [&first, &second] {
            assert_eq!(fs::read_to_string(target.join("Lib/Lib.dll")).unwrap(), "new dll");
            assert_eq!(fs::read_to_string(target.join("Lib/Lib.pdb")).unwrap(), "new pdb");
        }
        assert!(!second.join("Lib/Lib.dll.meta").exists());
        assert!(second.join("Lib/Other.dll").exists());
        assert_eq!(runner.call_count(), 0);
    }

    #[test]
    fn test_targets_from_file_without_subdir() {
        let root = tempdir().unwrap();
        let bin = build_output(root.path());
        let out = root.path().join("out");
        let list = root.path().join("targets.txt");
        fs::write(&list, format!("{}\n\n", out.display())).unwrap();

        let plan = CopyPlan::from_args(args(&[
            "-a",
            "Lib",
            "-d",
            bin.to_str().unwrap(),
            "-t",
            list.to_str().unwrap(),
            "--no-subdir",
        ]))
        .unwrap();
        assert_eq!(plan.target_dirs, vec![out.clone()]);
        assert!(!plan.create_subdir);

        let console = quiet_console();
        let runner = RecordingRunner::default();
        let copied = copy_files(&plan, &ToolContext::new(&console, &runner)).unwrap();
        assert_eq!(copied, vec![out.join("Lib.dll")]);
    }

    #[test]
    fn test_subdir_flags() {
        assert!(args(&[]).subdir_enabled());
        assert!(args(&["-c"]).subdir_enabled());
        assert!(!args(&["--no-subdir"]).subdir_enabled());
        assert!(args(&["--no-subdir", "-c"]).subdir_enabled());
        assert!(!args(&["-c", "--no-subdir"]).subdir_enabled());
    }

    #[test]
    fn test_missing_assembly_is_usage_error() {
        let root = tempdir().unwrap();
        let err = CopyPlan::from_args(args(&[
            "-a",
            "Missing",
            "-d",
            root.path().to_str().unwrap(),
            "-t",
            "out",
        ]))
        .unwrap_err();
        assert!(err.shows_usage());
    }

    #[test]
    fn test_missing_secondary_source_fails() {
        let root = tempdir().unwrap();
        let bin = build_output(root.path());
        let out = root.path().join("out");
        let plan = CopyPlan::from_args(args(&[
            "-a",
            "Lib",
            "-d",
            bin.to_str().unwrap(),
            "-e",
            "dll;xml",
            "-t",
            out.to_str().unwrap(),
        ]))
        .unwrap();

        let console = quiet_console();
        let runner = RecordingRunner::default();
        let err = copy_files(&plan, &ToolContext::new(&console, &runner)).unwrap_err();
        assert!(matches!(err, LullaError::Validation(_)));
        assert_eq!(err.exit_code(), 1);
    }

    #[test]
    fn test_required_arguments() {
        assert!(CopyPlan::from_args(args(&["-d", "bin", "-t", "out"])).unwrap_err().shows_usage());
        assert!(CopyPlan::from_args(args(&["-a", "Lib", "-t", "out"])).unwrap_err().shows_usage());
    }
}
