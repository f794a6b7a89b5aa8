use std::process::ExitCode;

use clap::Parser;
use weather_report::cli::{run, Cli};

fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) if e.is_load_failure() => {
            eprintln!("❌ Failed to load data: {}", e);
            ExitCode::from(e.exit_code())
        }
        Err(e) => {
            eprintln!("❌ Failed to generate report: {}", e);
            ExitCode::from(e.exit_code())
        }
    }
}
