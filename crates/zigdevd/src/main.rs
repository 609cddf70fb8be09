use std::process::ExitCode;

fn main() -> ExitCode {
    match zigdevd::run_daemon() {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            eprintln!("zigdevd: {error}");
            ExitCode::FAILURE
        }
    }
}
