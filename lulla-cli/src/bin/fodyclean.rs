// lulla-cli/src/bin/fodyclean.rs
use lulla_core::tools::{self, fodyclean::{self, FodyCleanArgs}};
use std::process;

fn main() {
    process::exit(tools::launch::<FodyCleanArgs, _>("FodyCleaner", fodyclean::run));
}
