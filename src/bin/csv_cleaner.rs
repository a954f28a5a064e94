use std::process::ExitCode;

use clap::Parser;
use sensor_csv_tools::cli::{finish, CleanerArgs, Tool};
use sensor_csv_tools::error::ToolError;
use sensor_csv_tools::pipeline::{run_cleaner, CleanOptions};

fn main() -> ExitCode {
    env_logger::init();

    let args = CleanerArgs::parse();
    finish(Tool::CsvCleaner, run(args))
}

fn run(args: CleanerArgs) -> Result<(), ToolError> {
    let interrupt = Tool::CsvCleaner.install_interrupt();
    let opts = CleanOptions::from(args);

    let report = run_cleaner(&opts, &interrupt)?;
    log::info!("{} of {} rows kept", report.rows_kept, report.rows_read);
    println!("Cleaned data saved to {}", opts.output.display());
    Ok(())
}
