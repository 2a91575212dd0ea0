// lulla-cli/src/bin/nettest.rs
use lulla_core::tools::{self, nettest::{self, NetTestArgs}};
use std::process;

fn main() {
    process::exit(tools::launch::<NetTestArgs, _>("NetTester", nettest::run));
}
