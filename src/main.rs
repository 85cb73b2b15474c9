use clap::Parser;
use sigperf::cli::{run, Cli};

fn main() -> std::process::ExitCode {
    run(Cli::parse())
}
