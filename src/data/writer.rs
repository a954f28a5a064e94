use std::io::Write;
use std::path::Path;

use chrono::{NaiveDateTime, Timelike};
use serde::Serialize;

use crate::error::OutputError;

use super::model::{format_float, CleanedRecord, TimeValue};

pub const CLEANED_HEADER: [&str; 2] = ["time", "value"];

#[derive(Serialize)]
struct OutputRow {
    time: String,
    value: String,
}

/// How precisely a column of timestamps is printed. Chosen once for the whole
/// column so every row shares one layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum TimestampLayout {
    DateOnly,
    Seconds,
    Micros,
    Nanos,
}

impl TimestampLayout {
    fn for_column(records: &[CleanedRecord]) -> Self {
        let stamps = records.iter().filter_map(|r| match &r.time {
            TimeValue::Timestamp(ts) => Some(ts),
            TimeValue::Field(_) => None,
        });

        let mut layout = TimestampLayout::DateOnly;
        for ts in stamps {
            let nanos = ts.nanosecond();
            let here = if nanos % 1_000 != 0 {
                TimestampLayout::Nanos
            } else if nanos != 0 {
                TimestampLayout::Micros
            } else if ts.num_seconds_from_midnight() != 0 {
                TimestampLayout::Seconds
            } else {
                TimestampLayout::DateOnly
            };
            layout = layout.max(here);
        }
        layout
    }

    fn format(self, ts: &NaiveDateTime) -> String {
        let pattern = match self {
            TimestampLayout::DateOnly => "%Y-%m-%d",
            TimestampLayout::Seconds => "%Y-%m-%d %H:%M:%S",
            TimestampLayout::Micros => "%Y-%m-%d %H:%M:%S%.6f",
            TimestampLayout::Nanos => "%Y-%m-%d %H:%M:%S%.9f",
        };
        ts.format(pattern).to_string()
    }
}

/// Serialize cleaned records as `time,value` CSV. The header is always
/// written, so an empty record list yields a header-only file.
pub fn write_cleaned<W: Write>(records: &[CleanedRecord], out: W) -> csv::Result<()> {
    let mut writer = csv::WriterBuilder::new().has_headers(false).from_writer(out);
    writer.write_record(CLEANED_HEADER)?;

    let layout = TimestampLayout::for_column(records);
    for record in records {
        let time = match &record.time {
            TimeValue::Field(field) => field.to_string(),
            TimeValue::Timestamp(ts) => layout.format(ts),
        };
        writer.serialize(OutputRow {
            time,
            value: format_float(record.value),
        })?;
    }
    writer.flush()?;
    Ok(())
}

/// Write cleaned records to `path`, creating or truncating it.
pub fn write_cleaned_file(records: &[CleanedRecord], path: &Path) -> Result<(), OutputError> {
    let file = std::fs::File::create(path).map_err(|source| OutputError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    write_cleaned(records, std::io::BufWriter::new(file)).map_err(|source| OutputError::Csv {
        path: path.to_path_buf(),
        source,
    })
}
