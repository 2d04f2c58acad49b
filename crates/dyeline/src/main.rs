use std::io;
use std::process::ExitCode;

use clap::Parser;

use dyeline::cli::{init_logging, run, Cli};

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let mut input = io::stdin().lock();
    let mut out = io::stdout().lock();
    match run(&cli, &mut input, &mut out) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            log::debug!("{:?}", err);
            eprintln!("error: {:#}", err);
            ExitCode::FAILURE
        }
    }
}
