use clap::Parser;
use shelfkeep::cli::{Cli, run};

fn main() -> std::process::ExitCode {
    shelfkeep::logging::init();
    run(Cli::parse())
}
