use std::path::PathBuf;

use crate::data::clean::clean_table;
use crate::data::filter::BandFilter;
use crate::data::loader::{read_raw_table, signal_column};
use crate::data::model::SpectrumPoint;
use crate::data::writer::write_cleaned_file;
use crate::error::ToolError;
use crate::interrupt::InterruptFlag;
use crate::plot::{render_line_plot, PlotStyle};
use crate::spectrum::extract_spectrum;

// ---------------------------------------------------------------------------
// Pipeline A: CSV cleaner
// ---------------------------------------------------------------------------

/// Everything one cleaner run needs.
#[derive(Debug, Clone)]
pub struct CleanOptions {
    pub input: PathBuf,
    pub output: PathBuf,
    /// 0-based index of the time column.
    pub time_col: usize,
    /// 0-based index of the data column.
    pub data_col: usize,
    /// Parse the time column as timestamps.
    pub parse_datetime: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CleanReport {
    pub rows_read: usize,
    pub rows_kept: usize,
}

/// Ingest → select/coerce → drop incomplete → emit.
pub fn run_cleaner(opts: &CleanOptions, interrupt: &InterruptFlag) -> Result<CleanReport, ToolError> {
    let table = read_raw_table(&opts.input, false)?;
    interrupt.checkpoint()?;

    let records = clean_table(&table, opts.time_col, opts.data_col, opts.parse_datetime)?;
    interrupt.checkpoint()?;

    write_cleaned_file(&records, &opts.output)?;
    log::info!("wrote {} records to {}", records.len(), opts.output.display());

    Ok(CleanReport {
        rows_read: table.len(),
        rows_kept: records.len(),
    })
}

// ---------------------------------------------------------------------------
// Pipeline B: FFT processor
// ---------------------------------------------------------------------------

/// Everything one FFT run needs.
#[derive(Debug, Clone)]
pub struct FftOptions {
    pub input: PathBuf,
    /// Spectrum plot destination.
    pub output: PathBuf,
    /// Optional raw-signal plot destination.
    pub signal_output: Option<PathBuf>,
    /// Sampling rate in Hz.
    pub sample_rate: f64,
    pub band: BandFilter,
    /// 0-based index of the signal column.
    pub column: usize,
    pub has_header: bool,
}

#[derive(Debug, Clone)]
pub struct FftReport {
    pub sample_count: usize,
    pub point_count: usize,
    pub peak: Option<SpectrumPoint>,
    /// Plots written, in order.
    pub plots: Vec<PathBuf>,
}

/// Ingest → transform → select → band filter → render.
pub fn run_fft(opts: &FftOptions, interrupt: &InterruptFlag) -> Result<FftReport, ToolError> {
    let table = read_raw_table(&opts.input, opts.has_header)?;
    let signal = signal_column(&table, opts.column)?;
    interrupt.checkpoint()?;

    let spectrum = extract_spectrum(&signal, opts.sample_rate, &opts.band)?;
    let peak = spectrum.peak();
    if let Some(p) = peak {
        log::info!(
            "peak at {:.4} Hz (magnitude {:.4}, resolution {:.4} Hz)",
            p.frequency,
            p.magnitude,
            spectrum.bin_width()
        );
    }
    interrupt.checkpoint()?;

    let mut plots = Vec::with_capacity(2);
    render_line_plot(&opts.output, &spectrum.plot_points(), &PlotStyle::spectrum())?;
    plots.push(opts.output.clone());

    if let Some(signal_path) = &opts.signal_output {
        interrupt.checkpoint()?;
        let samples: Vec<(f64, f64)> = signal
            .iter()
            .enumerate()
            .map(|(i, &v)| (i as f64, v))
            .collect();
        render_line_plot(signal_path, &samples, &PlotStyle::signal())?;
        plots.push(signal_path.clone());
    }

    Ok(FftReport {
        sample_count: signal.len(),
        point_count: spectrum.len(),
        peak,
        plots,
    })
}
