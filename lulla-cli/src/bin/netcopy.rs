// lulla-cli/src/bin/netcopy.rs
use lulla_core::tools::{self, netcopy::{self, NetCopyArgs}};
use std::process;

fn main() {
    process::exit(tools::launch::<NetCopyArgs, _>("NetCopy", netcopy::run));
}
