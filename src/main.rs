use std::process::ExitCode;

use clap::Parser;
use clap::error::ErrorKind;
use nuxsec::app;
use nuxsec::cli::Args;

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = match Args::try_parse() {
        Ok(args) => args,
        Err(e) => {
            if let Err(io) = e.print() {
                log::error!("Could not print usage: {io}");
            }
            return ExitCode::from(exit_status(&e));
        }
    };

    match app::run(&args) {
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{e}");
            ExitCode::FAILURE
        }
    }
}

/// `--help` and `--version` arrive as parse errors but are a clean exit.
fn exit_status(err: &clap::Error) -> u8 {
    match err.kind() {
        ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => 0,
        _ => 1,
    }
}
