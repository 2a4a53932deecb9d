use std::io::Write;

use anyhow::Context;
use clap::Parser;
use htmldown::cli::{self, Cli};
use htmldown::logging;

fn main() {
    let args = Cli::parse();

    if let Err(err) = logging::init(args.verbose) {
        eprintln!("warning: {err:#}");
    }

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    let result = cli::run(&args, &mut out)
        .and_then(|()| out.flush().context("failed to flush stdout"));

    if let Err(err) = result {
        tracing::debug!(error = ?err, "run failed");
        eprintln!("Error: {err:#}");
        std::process::exit(1);
    }
}
