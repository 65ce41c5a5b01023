use fs_move::output as out;
use std::process::ExitCode;

mod app;
mod logging;

fn main() -> ExitCode {
    let args = fs_move::cli::parse();
    match app::run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            out::print_error(&format!("{e:#}"));
            ExitCode::from(app::exit_code(&e))
        }
    }
}
