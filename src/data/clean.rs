use chrono::{DateTime, Local, NaiveDate, NaiveDateTime, NaiveTime};

use crate::error::InputError;

use super::model::{CleanedRecord, FieldValue, RawTable, TimeValue};

// ---------------------------------------------------------------------------
// Timestamp grammar
// ---------------------------------------------------------------------------

const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M",
    "%Y/%m/%d %H:%M:%S%.f",
    "%Y/%m/%d %H:%M",
    "%m/%d/%Y %H:%M:%S%.f",
    "%m/%d/%Y %H:%M",
    "%m/%d/%Y %I:%M:%S%.f %p",
    "%m/%d/%Y %I:%M %p",
    "%d.%m.%Y %H:%M:%S%.f",
    "%d.%m.%Y %H:%M",
];

const OFFSET_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S%.f%:z",
    "%Y-%m-%d %H:%M:%S%.f%z",
    "%Y-%m-%dT%H:%M:%S%.f%z",
];

const DATE_FORMATS: &[&str] = &[
    "%Y-%m-%d",
    "%Y/%m/%d",
    "%m/%d/%Y",
    "%d.%m.%Y",
    "%B %d, %Y",
    "%b %d, %Y",
    "%d %B %Y",
    "%d %b %Y",
];

const TIME_FORMATS: &[&str] = &["%H:%M:%S%.f", "%H:%M", "%I:%M:%S%.f %p", "%I:%M %p"];

/// Parse a date/time string permissively.
///
/// Accepts ISO 8601 / RFC 3339 (offsets are folded to UTC), `/`- and
/// `.`-separated dates, US month-first dates with 24h or AM/PM clocks, bare
/// dates (midnight) and bare clock times (anchored to today's local date).
pub fn parse_timestamp(text: &str) -> Option<NaiveDateTime> {
    let s = text.trim();
    if s.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.naive_utc());
    }
    for fmt in OFFSET_FORMATS {
        if let Ok(dt) = DateTime::parse_from_str(s, fmt) {
            return Some(dt.naive_utc());
        }
    }
    for fmt in DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(dt);
        }
    }
    for fmt in DATE_FORMATS {
        if let Ok(d) = NaiveDate::parse_from_str(s, fmt) {
            return d.and_hms_opt(0, 0, 0);
        }
    }
    for fmt in TIME_FORMATS {
        if let Ok(t) = NaiveTime::parse_from_str(s, fmt) {
            return Some(Local::now().date_naive().and_time(t));
        }
    }
    None
}

/// Numeric cells under timestamp parsing are nanoseconds since the Unix epoch.
/// Integers convert exactly; floats are truncated.
fn epoch_nanos(v: f64) -> Option<NaiveDateTime> {
    if !v.is_finite() || v.abs() >= i64::MAX as f64 {
        return None;
    }
    Some(DateTime::from_timestamp_nanos(v.trunc() as i64).naive_utc())
}

// ---------------------------------------------------------------------------
// Coercion
// ---------------------------------------------------------------------------

/// Coerce a data cell to a float. Anything unparsable is `None`.
pub fn coerce_value(field: &FieldValue) -> Option<f64> {
    field.as_f64()
}

/// Coerce a time cell. With `parse_datetime` off the cell passes through and
/// is only `None` when it is itself missing.
pub fn coerce_time(field: &FieldValue, parse_datetime: bool) -> Option<TimeValue> {
    if field.is_missing() {
        return None;
    }
    if !parse_datetime {
        return Some(TimeValue::Field(field.clone()));
    }
    let parsed = match field {
        FieldValue::Text(s) => parse_timestamp(s),
        FieldValue::Integer(i, _) => Some(DateTime::from_timestamp_nanos(*i).naive_utc()),
        FieldValue::Float(f, _) => epoch_nanos(*f),
        FieldValue::Missing => None,
    };
    parsed.map(TimeValue::Timestamp)
}

// ---------------------------------------------------------------------------
// Clean: select → coerce → drop incomplete rows
// ---------------------------------------------------------------------------

/// Turn a raw table into `(time, value)` records.
///
/// A row survives only when both its time and data cells are present after
/// coercion. An empty table yields no records and skips the column checks.
pub fn clean_table(
    table: &RawTable,
    time_col: usize,
    data_col: usize,
    parse_datetime: bool,
) -> Result<Vec<CleanedRecord>, InputError> {
    if table.is_empty() {
        return Ok(Vec::new());
    }
    table.check_column(time_col)?;
    table.check_column(data_col)?;

    let records: Vec<CleanedRecord> = table
        .rows
        .iter()
        .filter_map(|row| {
            let time = coerce_time(&row.fields[time_col], parse_datetime);
            let value = coerce_value(&row.fields[data_col]);
            match (time, value) {
                (Some(time), Some(value)) => Some(CleanedRecord { time, value }),
                (time, value) => {
                    log::trace!(
                        "dropping line {}: time {}, value {}",
                        row.line,
                        if time.is_some() { "ok" } else { "missing" },
                        if value.is_some() { "ok" } else { "missing" },
                    );
                    None
                }
            }
        })
        .collect();

    log::info!(
        "kept {} of {} rows ({} dropped)",
        records.len(),
        table.len(),
        table.len() - records.len()
    );
    Ok(records)
}
