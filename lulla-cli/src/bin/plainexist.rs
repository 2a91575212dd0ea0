// lulla-cli/src/bin/plainexist.rs
use lulla_core::tools::{self, plainexist::{self, PlainExistArgs}};
use std::process;

fn main() {
    process::exit(tools::launch::<PlainExistArgs, _>("PlainExist", plainexist::run));
}
