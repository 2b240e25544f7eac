use anyhow::Context;
use clap::Parser;
use flowdsl::cli::{self, Args};
use flowdsl::logging;
use std::process::ExitCode;

fn main() -> anyhow::Result<ExitCode> {
    let args = Args::parse();
    let _guard = logging::init(&args.command).context("failed to initialize logging")?;

    let all_valid = cli::run(args)?;
    if all_valid {
        Ok(ExitCode::SUCCESS)
    } else {
        Ok(ExitCode::FAILURE)
    }
}
