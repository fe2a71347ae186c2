use std::process::ExitCode;

use sbtc::ui::output;

fn main() -> ExitCode {
    match sbtc::cli::run() {
        Ok(code) => code,
        Err(err) => {
            output::error(format!("{:#}", err));
            ExitCode::FAILURE
        }
    }
}
