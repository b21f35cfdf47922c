//! tyme - plain-text todo list and time tracker

use std::process::ExitCode;

fn main() -> ExitCode {
    if let Err(e) = tyme::cli::run() {
        eprintln!("ERROR: {:#}", e);
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}
