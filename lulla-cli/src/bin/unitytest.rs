// lulla-cli/src/bin/unitytest.rs
use lulla_core::tools::{self, unitytest::{self, UnityTestArgs}};
use std::process;

fn main() {
    process::exit(tools::launch::<UnityTestArgs, _>("UnityTester", unitytest::run));
}
