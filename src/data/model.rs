use std::fmt;

use chrono::NaiveDateTime;
use serde::Serialize;

use crate::error::InputError;

// ---------------------------------------------------------------------------
// FieldValue – a single untyped cell of the raw table
// ---------------------------------------------------------------------------

/// Tokens read as a missing value, in addition to an empty cell.
pub const NA_TOKENS: &[&str] = &[
    "#N/A", "#N/A N/A", "#NA", "-1.#IND", "-1.#QNAN", "-NaN", "-nan", "1.#IND", "1.#QNAN",
    "<NA>", "N/A", "NA", "NULL", "NaN", "None", "n/a", "nan", "null",
];

/// A dynamically-typed cell, guessed from its text the way spreadsheet
/// exports are usually read. Numeric cells keep their source text so a
/// passthrough writes back `007` or `1e3` exactly as read.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Integer(i64, String),
    Float(f64, String),
    Text(String),
    /// Empty cell, an NA token, or a float that parsed to NaN.
    Missing,
}

impl FieldValue {
    /// Classify raw CSV text.
    pub fn parse(raw: &str) -> Self {
        if raw.is_empty() || NA_TOKENS.contains(&raw) {
            return FieldValue::Missing;
        }
        let trimmed = raw.trim();
        if let Ok(i) = trimmed.parse::<i64>() {
            return FieldValue::Integer(i, raw.to_string());
        }
        match trimmed.parse::<f64>() {
            Ok(f) if f.is_nan() => FieldValue::Missing,
            Ok(f) => FieldValue::Float(f, raw.to_string()),
            Err(_) => FieldValue::Text(raw.to_string()),
        }
    }

    pub fn is_missing(&self) -> bool {
        matches!(self, FieldValue::Missing)
    }

    /// Numeric view of the cell. Text is parsed leniently (surrounding
    /// whitespace ignored); anything else yields `None`.
    pub fn as_f64(&self) -> Option<f64> {
        let v = match self {
            FieldValue::Integer(i, _) => *i as f64,
            FieldValue::Float(f, _) => *f,
            FieldValue::Text(s) => s.trim().parse::<f64>().ok()?,
            FieldValue::Missing => return None,
        };
        (!v.is_nan()).then_some(v)
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Integer(_, raw) | FieldValue::Float(_, raw) | FieldValue::Text(raw) => {
                f.write_str(raw)
            }
            FieldValue::Missing => Ok(()),
        }
    }
}

/// Render a float so whole numbers keep a trailing `.0` (`5.0`, not `5`).
pub fn format_float(v: f64) -> String {
    if v.is_finite() && v.fract() == 0.0 && v.abs() < 1e16 {
        format!("{v:.1}")
    } else {
        format!("{v}")
    }
}

// ---------------------------------------------------------------------------
// RawTable – rows as read from disk
// ---------------------------------------------------------------------------

/// One row of the raw table together with the line it came from.
#[derive(Debug, Clone)]
pub struct RawRow {
    pub line: u64,
    pub fields: Vec<FieldValue>,
}

/// The parsed file before any column is interpreted.
///
/// Width is taken from the header when there is one, otherwise from the first
/// row. Shorter rows are padded with [`FieldValue::Missing`] on load.
#[derive(Debug, Clone, Default)]
pub struct RawTable {
    pub header: Option<Vec<String>>,
    pub rows: Vec<RawRow>,
    pub width: usize,
}

impl RawTable {
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Validate a 0-based column index against the table width.
    pub fn check_column(&self, index: usize) -> Result<(), InputError> {
        if index < self.width {
            Ok(())
        } else {
            Err(InputError::ColumnOutOfRange {
                index,
                width: self.width,
            })
        }
    }
}

// ---------------------------------------------------------------------------
// CleanedRecord – one surviving (time, value) pair
// ---------------------------------------------------------------------------

/// The time half of a cleaned record.
#[derive(Debug, Clone, PartialEq)]
pub enum TimeValue {
    /// The raw cell, passed through untouched.
    Field(FieldValue),
    /// A parsed timestamp (UTC when the source carried an offset).
    Timestamp(NaiveDateTime),
}

#[derive(Debug, Clone, PartialEq)]
pub struct CleanedRecord {
    pub time: TimeValue,
    pub value: f64,
}

// ---------------------------------------------------------------------------
// Spectrum – the one-sided amplitude spectrum of a signal
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SpectrumPoint {
    /// Hz, never negative.
    pub frequency: f64,
    /// |X_k| * 2 / n, never negative.
    pub magnitude: f64,
}

/// Spectrum points in ascending frequency order plus the parameters that
/// produced them.
#[derive(Debug, Clone)]
pub struct Spectrum {
    pub points: Vec<SpectrumPoint>,
    /// Sampling rate in Hz.
    pub sample_rate: f64,
    /// Length of the transformed signal.
    pub sample_count: usize,
}

impl Spectrum {
    /// Frequency resolution (Hz per bin).
    pub fn bin_width(&self) -> f64 {
        self.sample_rate / self.sample_count as f64
    }

    /// The point with the largest magnitude.
    pub fn peak(&self) -> Option<SpectrumPoint> {
        self.points
            .iter()
            .copied()
            .max_by(|a, b| a.magnitude.total_cmp(&b.magnitude))
    }

    /// `(frequency, magnitude)` pairs for plotting.
    pub fn plot_points(&self) -> Vec<(f64, f64)> {
        self.points
            .iter()
            .map(|p| (p.frequency, p.magnitude))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}
