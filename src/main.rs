use clap::Parser;
use realfin::cli::{run, Cli};

fn main() -> std::process::ExitCode {
    run(Cli::parse())
}
