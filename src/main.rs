//Enable more cargo lint tests
#![warn(rust_2018_idioms)]
#![warn(clippy::disallowed_types)]

use std::process::ExitCode;

use log::{error, info, LevelFilter};
use simplelog::{ColorChoice, Config, TermLogger, TerminalMode};

use payload_predictor::tools::{cli::ppopts_init, file_io::run};

fn main() -> ExitCode {
    // Logs go to stderr, stdout may carry payloads. ppopts_init sets the real level.
    if TermLogger::init(
        LevelFilter::Trace,
        Config::default(),
        TerminalMode::Stderr,
        ColorChoice::Auto,
    )
    .is_err()
    {
        eprintln!("Unable to start the terminal logger");
    }

    let options = ppopts_init();

    match run(&options) {
        0 => {
            info!("Done.");
            ExitCode::SUCCESS
        }
        failed => {
            error!("{} input(s) failed", failed);
            ExitCode::FAILURE
        }
    }
}
