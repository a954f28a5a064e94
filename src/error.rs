use std::path::PathBuf;

use thiserror::Error;

// ---------------------------------------------------------------------------
// Top-level failure taxonomy
// ---------------------------------------------------------------------------

/// Every way a tool run can end early.
///
/// The binaries branch on the variant to pick the message and exit status;
/// tests branch on it instead of matching message text.
#[derive(Debug, Error)]
pub enum ToolError {
    /// Ctrl-C was pressed while the run was in progress.
    #[error("interrupted by user")]
    UserInterrupt,

    #[error(transparent)]
    Input(#[from] InputError),

    #[error(transparent)]
    Compute(#[from] ComputeError),

    #[error(transparent)]
    Output(#[from] OutputError),
}

impl ToolError {
    /// Process exit status for this failure.
    pub fn exit_status(&self) -> u8 {
        match self {
            ToolError::UserInterrupt => 130,
            _ => 1,
        }
    }
}

// ---------------------------------------------------------------------------
// Input side: reading and selecting data
// ---------------------------------------------------------------------------

#[derive(Debug, Error)]
pub enum InputError {
    #[error("could not read {}: {source}", path.display())]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    /// A row carries more fields than the first row of the table.
    #[error("expected {expected} fields in line {line}, saw {found}")]
    RaggedRow {
        line: u64,
        expected: usize,
        found: usize,
    },

    #[error("column index {index} is out of bounds for a table with {width} columns")]
    ColumnOutOfRange { index: usize, width: usize },

    #[error("line {line}: '{value}' is not a numeric sample")]
    NonNumericSample { line: u64, value: String },

    #[error("line {line}: missing sample value")]
    MissingSample { line: u64 },

    #[error("sampling rate must be a positive finite number, got {0}")]
    InvalidSampleRate(f64),

    #[error("frequency bound {name} must be a number, got {value}")]
    InvalidBound { name: &'static str, value: f64 },
}

// ---------------------------------------------------------------------------
// Numerical stage
// ---------------------------------------------------------------------------

#[derive(Debug, Error)]
pub enum ComputeError {
    #[error("cannot compute the spectrum of an empty signal")]
    EmptySignal,
}

// ---------------------------------------------------------------------------
// Output side: CSV and plot files
// ---------------------------------------------------------------------------

#[derive(Debug, Error)]
pub enum OutputError {
    #[error("could not write {}: {source}", path.display())]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("could not write {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("could not draw plot {}: {message}", path.display())]
    Plot { path: PathBuf, message: String },

    #[error("unknown line color '{0}'")]
    UnknownColor(String),
}
