use std::process::ExitCode;

use clap::Parser;
use sensor_csv_tools::cli::{finish, FftArgs, Tool};
use sensor_csv_tools::error::ToolError;
use sensor_csv_tools::pipeline::{run_fft, FftOptions};

fn main() -> ExitCode {
    env_logger::init();

    let args = FftArgs::parse();
    finish(Tool::FftProcess, run(args))
}

fn run(args: FftArgs) -> Result<(), ToolError> {
    let interrupt = Tool::FftProcess.install_interrupt();
    let opts = FftOptions::try_from(args)?;

    let report = run_fft(&opts, &interrupt)?;
    log::info!(
        "{} samples -> {} spectrum points",
        report.sample_count,
        report.point_count
    );
    for plot in &report.plots {
        println!("FFT plot saved to {}", plot.display());
    }
    Ok(())
}
