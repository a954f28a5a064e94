use std::path::PathBuf;
use std::process::ExitCode;

use clap::builder::BoolishValueParser;
use clap::Parser;

use crate::data::filter::BandFilter;
use crate::error::{InputError, ToolError};
use crate::interrupt::{InterruptFlag, INTERRUPT_MESSAGE};
use crate::pipeline::{CleanOptions, FftOptions};

// ---------------------------------------------------------------------------
// csv-cleaner
// ---------------------------------------------------------------------------

#[derive(Parser, Debug)]
#[command(name = "csv-cleaner", about = "Clean and sanitize LabVIEW-style CSV data.")]
pub struct CleanerArgs {
    /// Path to the input CSV file (LabVIEW style, no header).
    #[arg(long = "input_file")]
    pub input_file: PathBuf,

    /// Path to save the cleaned CSV file.
    #[arg(long = "output_file")]
    pub output_file: PathBuf,

    /// Index of the time column.
    #[arg(long = "time_col", default_value_t = 0)]
    pub time_col: usize,

    /// Index of the data column.
    #[arg(long = "data_col", default_value_t = 1)]
    pub data_col: usize,

    /// Convert time strings to timestamps; rows with unparsable times are dropped.
    #[arg(long)]
    pub datetime: bool,
}

impl From<CleanerArgs> for CleanOptions {
    fn from(args: CleanerArgs) -> Self {
        CleanOptions {
            input: args.input_file,
            output: args.output_file,
            time_col: args.time_col,
            data_col: args.data_col,
            parse_datetime: args.datetime,
        }
    }
}

// ---------------------------------------------------------------------------
// fft-process
// ---------------------------------------------------------------------------

#[derive(Parser, Debug)]
#[command(name = "fft-process", about = "Perform FFT on a CSV signal and plot the spectrum.")]
pub struct FftArgs {
    /// Path to the input CSV file (one column of signal data).
    #[arg(long = "input_file")]
    pub input_file: PathBuf,

    /// Path to save the FFT plot (e.g. output.png).
    #[arg(long = "output_file")]
    pub output_file: PathBuf,

    /// Path to save a plot of the raw signal (e.g. output_signal.png).
    #[arg(long = "output_signal_file")]
    pub output_signal_file: Option<PathBuf>,

    /// Sampling frequency in Hz.
    #[arg(long, allow_negative_numbers = true)]
    pub fs: f64,

    /// Lowest frequency to keep (Hz).
    #[arg(long, allow_negative_numbers = true)]
    pub fmin: Option<f64>,

    /// Highest frequency to keep (Hz).
    #[arg(long, allow_negative_numbers = true)]
    pub fmax: Option<f64>,

    /// Column index (0-based) of the signal.
    #[arg(long, default_value_t = 0)]
    pub column: usize,

    /// Whether the first row is a header.
    #[arg(long, default_value_t = true, value_parser = BoolishValueParser::new(), action = clap::ArgAction::Set)]
    pub header: bool,
}

impl TryFrom<FftArgs> for FftOptions {
    type Error = InputError;

    fn try_from(args: FftArgs) -> Result<Self, Self::Error> {
        Ok(FftOptions {
            input: args.input_file,
            output: args.output_file,
            signal_output: args.output_signal_file,
            sample_rate: args.fs,
            band: BandFilter::new(args.fmin, args.fmax)?,
            column: args.column,
            has_header: args.header,
        })
    }
}

// ---------------------------------------------------------------------------
// Run closeout
// ---------------------------------------------------------------------------

/// Which tool is finishing; picks the wording of the closing messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tool {
    CsvCleaner,
    FftProcess,
}

impl Tool {
    fn error_prefix(self) -> &'static str {
        match self {
            Tool::CsvCleaner => "Error while cleaning",
            Tool::FftProcess => "Error while processing",
        }
    }

    fn closing_message(self) -> &'static str {
        match self {
            Tool::CsvCleaner => "Exiting CSV Cleaner",
            Tool::FftProcess => "Exiting FFT Process",
        }
    }

    /// Install the Ctrl-C handler, which ends the process with this tool's
    /// closing line.
    pub fn install_interrupt(self) -> InterruptFlag {
        InterruptFlag::install(self.closing_message())
    }
}

/// Report the outcome, print the closing line and pick the exit status.
pub fn finish(tool: Tool, outcome: Result<(), ToolError>) -> ExitCode {
    let status = match outcome {
        Ok(()) => 0,
        Err(ToolError::UserInterrupt) => {
            println!("{INTERRUPT_MESSAGE}");
            ToolError::UserInterrupt.exit_status()
        }
        Err(e) => {
            log::debug!("{e:?}");
            eprintln!("{}: {e}", tool.error_prefix());
            e.exit_status()
        }
    };
    println!("{}", tool.closing_message());
    ExitCode::from(status)
}
