use std::path::Path;

use crate::error::InputError;

use super::model::{FieldValue, RawRow, RawTable};

// ---------------------------------------------------------------------------
// Raw table
// ---------------------------------------------------------------------------

/// Read a whole CSV file into memory as untyped fields.
///
/// * `has_header` – treat the first record as column names.
///
/// The table width comes from the header (or the first row when there is no
/// header). Short rows are padded with missing fields; a row wider than the
/// table is rejected.
pub fn read_raw_table(path: &Path, has_header: bool) -> Result<RawTable, InputError> {
    let csv_err = |source: csv::Error| InputError::Csv {
        path: path.to_path_buf(),
        source,
    };

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(has_header)
        .flexible(true)
        .from_path(path)
        .map_err(csv_err)?;

    let mut table = RawTable::default();
    if has_header {
        let headers = reader.headers().map_err(csv_err)?;
        table.width = headers.len();
        table.header = Some(headers.iter().map(|h| h.to_string()).collect());
    }

    for result in reader.records() {
        let record = result.map_err(csv_err)?;
        let line = record.position().map(|p| p.line()).unwrap_or(0);

        if table.header.is_none() && table.rows.is_empty() {
            table.width = record.len();
        }
        if record.len() > table.width {
            return Err(InputError::RaggedRow {
                line,
                expected: table.width,
                found: record.len(),
            });
        }

        let mut fields: Vec<FieldValue> = record.iter().map(FieldValue::parse).collect();
        fields.resize(table.width, FieldValue::Missing);
        table.rows.push(RawRow { line, fields });
    }

    log::debug!(
        "read {} rows x {} columns from {}",
        table.len(),
        table.width,
        path.display()
    );
    Ok(table)
}

// ---------------------------------------------------------------------------
// Signal column
// ---------------------------------------------------------------------------

/// Pull one column out of a table as a numeric signal.
///
/// Every cell must be numeric; a gap or a text cell is an input error rather
/// than a NaN that would silently poison the transform.
pub fn signal_column(table: &RawTable, column: usize) -> Result<Vec<f64>, InputError> {
    table.check_column(column)?;

    table
        .rows
        .iter()
        .map(|row| {
            let field = &row.fields[column];
            match field {
                FieldValue::Missing => Err(InputError::MissingSample { line: row.line }),
                other => other.as_f64().ok_or_else(|| InputError::NonNumericSample {
                    line: row.line,
                    value: other.to_string(),
                }),
            }
        })
        .collect()
}

/// Load the signal column of a CSV file.
pub fn load_signal(path: &Path, has_header: bool, column: usize) -> Result<Vec<f64>, InputError> {
    let table = read_raw_table(path, has_header)?;
    signal_column(&table, column)
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    fn csv_file(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn headerless_width_comes_from_first_row() {
        let file = csv_file("1,2.5,x\n4,5\n");
        let table = read_raw_table(file.path(), false).unwrap();

        assert_eq!(table.width, 3);
        assert_eq!(table.len(), 2);
        assert_eq!(table.rows[1].fields[2], FieldValue::Missing);
        assert_eq!(table.rows[1].line, 2);
    }

    #[test]
    fn wide_row_is_rejected() {
        let file = csv_file("1,2\n3,4,5\n");
        let err = read_raw_table(file.path(), false).unwrap_err();
        assert!(matches!(
            err,
            InputError::RaggedRow { line: 2, expected: 2, found: 3 }
        ));
    }

    #[test]
    fn empty_file_is_an_empty_table() {
        let file = csv_file("");
        let table = read_raw_table(file.path(), false).unwrap();
        assert!(table.is_empty());
        assert_eq!(table.width, 0);
    }

    #[test]
    fn missing_file_is_an_input_error() {
        let err = read_raw_table(Path::new("/definitely/not/here.csv"), false).unwrap_err();
        assert!(matches!(err, InputError::Csv { .. }));
    }

    #[test]
    fn signal_column_with_header() {
        let file = csv_file("a,b\n1,10\n2,20.5\n3,-1\n");
        let signal = load_signal(file.path(), true, 1).unwrap();
        assert_eq!(signal, vec![10.0, 20.5, -1.0]);
    }

    #[test]
    fn signal_column_rejects_text() {
        let file = csv_file("a\n1\nabc\n");
        let err = load_signal(file.path(), true, 0).unwrap_err();
        assert!(matches!(err, InputError::NonNumericSample { line: 3, .. }));
    }

    #[test]
    fn signal_column_out_of_range() {
        let file = csv_file("a\n1\n");
        let err = load_signal(file.path(), true, 3).unwrap_err();
        assert!(matches!(
            err,
            InputError::ColumnOutOfRange { index: 3, width: 1 }
        ));
    }
}
