// lulla-core/src/tools/plainexist.rs

//! A simple check that files or directories exist.

use super::ToolContext;
use crate::config::{split_list, CommonArgs, WithCommonArgs};
use crate::errors::{LullaError, Result};
use crate::paths;
use clap::Parser;

/// A simple check to see if files or directories exist.
#[derive(Parser, Debug)]
#[command(name = "plainexist", version)]
pub struct PlainExistArgs {
    /// Semicolon-separated file paths to check. Use at least one of this or -d.
    #[arg(short = 'f', long = "files", value_name = "FilePaths")]
    pub files: Option<String>,

    /// Semicolon-separated directory paths to check. Use at least one of this or -f.
    #[arg(short = 'd', long = "dirs", value_name = "DirectoryPaths")]
    pub dirs: Option<String>,

    #[command(flatten)]
    pub common: CommonArgs,
}

impl WithCommonArgs for PlainExistArgs {
    fn common(&self) -> &CommonArgs {
        &self.common
    }
}

pub fn run(args: PlainExistArgs, ctx: &ToolContext<'_>) -> Result<()> {
    if args.files.is_none() && args.dirs.is_none() {
        return Err(LullaError::usage(
            "Neither file nor directory paths were provided for check.",
        ));
    }
    let files = args.files.as_deref().map(split_list).unwrap_or_default();
    let dirs = args.dirs.as_deref().map(split_list).unwrap_or_default();

    let console = ctx.console;
    console.warning(format!(
        "Parsed file paths: {:?}\nParsed directory paths: {:?}",
        files, dirs
    ));

    for file in &files {
        if !paths::is_file(file) {
            return Err(LullaError::validation(format!(
                "File was not successfully found at: {}",
                file
            )));
        }
        console.log(format!("File was successfully found at: {}", file));
    }
    for dir in &dirs {
        if !paths::is_dir(dir) {
            return Err(LullaError::validation(format!(
                "Directory was not successfully found at: {}",
                dir
            )));
        }
        console.log(format!("Directory was successfully found at: {}", dir));
    }

    console.success("All files and directories were successfully verified.");
    Ok(())
}
