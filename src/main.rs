//! Entry point for the comment translator.
use std::process::ExitCode;

use anyhow::Error;
use clap::Parser;
use comment_translator::{
    cli::{execute, CliArgs},
    lib::telemetry,
};

fn main() -> ExitCode {
    match bootstrap() {
        Ok(()) => ExitCode::SUCCESS,
        Err(exit) => exit.report(),
    }
}

fn bootstrap() -> Result<(), RunExit> {
    telemetry::init_tracing().map_err(RunExit::from_error)?;
    let args = CliArgs::parse();
    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    execute(args, &mut out).map_err(RunExit::from_error)
}

/// Error message paired with the process exit code.
#[derive(Debug)]
struct RunExit {
    message: String,
    exit_code: ExitCode,
}

impl RunExit {
    fn from_error(err: impl Into<Error>) -> Self {
        let err = err.into();
        Self {
            message: format!("{err:?}"),
            exit_code: ExitCode::FAILURE,
        }
    }

    fn report(self) -> ExitCode {
        eprintln!("{}", self.message);
        self.exit_code
    }
}
