#![deny(unsafe_code)]

mod cli;
mod scenario;

use std::{env, io, process::ExitCode};

fn main() -> ExitCode {
    cli::init_tracing();
    let mut stdout = io::stdout().lock();
    let mut stderr = io::stderr().lock();
    cli::run_with(env::args_os(), &mut stdout, &mut stderr)
}
