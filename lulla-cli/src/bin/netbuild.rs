// lulla-cli/src/bin/netbuild.rs
use lulla_core::msbuild::SystemEnvironment;
use lulla_core::tools::{self, netbuild::{self, NetBuildArgs}};
use std::process;

fn main() {
    process::exit(tools::launch::<NetBuildArgs, _>("NetBuilder", |args, ctx| {
        netbuild::run(args, ctx, &SystemEnvironment)
    }));
}
