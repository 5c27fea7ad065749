use std::process::ExitCode;

use fshelper::cli;
use fshelper::output as out;

mod app;
mod logging;

fn main() -> ExitCode {
    let args = cli::parse();
    match app::run(args) {
        Ok(code) => code,
        Err(e) => {
            out::print_error(&format!("{e:#}"));
            ExitCode::from(app::exit_code_for(&e))
        }
    }
}
