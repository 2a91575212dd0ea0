// lulla-cli/src/bin/netrestore.rs
use lulla_core::tools::{self, netrestore::{self, NetRestoreArgs}};
use std::process;

fn main() {
    process::exit(tools::launch::<NetRestoreArgs, _>("NetRestore", netrestore::run));
}
