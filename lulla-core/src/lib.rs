// lulla-core/src/lib.rs

#![doc = include_str!("../../README.md")]

pub mod config;
pub mod console;
pub mod errors;
pub mod fody;
pub mod logging;
pub mod msbuild;
pub mod paths;
pub mod process;
pub mod tools;
pub mod unity;

pub use config::{CommonArgs, ToolSettings, WithCommonArgs};
pub use console::{Console, Tone};
pub use errors::{LullaError, Result};
pub use msbuild::{HostEnvironment, SystemEnvironment};
pub use process::{CommandRunner, ProcessResult, ProcessRunner};
pub use tools::{launch, ToolContext};
