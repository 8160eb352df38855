use crate::error::{ProcessingError, Result};
use crate::models::EnergyReading;
use crate::readers::column_resolver::{normalize_header, resolve_columns};
use crate::utils::timestamp::{parse_kwh, parse_timestamp};
use encoding_rs::{UTF_8, WINDOWS_1252};
use std::borrow::Cow;
use std::fs;
use std::path::Path;
use tracing::{debug, error, info};

/// Row accounting for one file
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LoadStats {
    pub rows_read: usize,
    pub rows_kept: usize,
    /// Rows whose timestamp or value did not coerce
    pub rows_dropped: usize,
    /// Rows with more fields than the header
    pub rows_malformed: usize,
}

#[derive(Debug, Clone)]
pub struct LoadedFile {
    pub readings: Vec<EnergyReading>,
    pub stats: LoadStats,
}

pub struct EnergyReader {
    delimiter: u8,
}

impl EnergyReader {
    pub fn new() -> Self {
        Self { delimiter: b',' }
    }

    pub fn with_delimiter(delimiter: u8) -> Self {
        Self { delimiter }
    }

    /// Read one CSV export into readings tagged with `source`.
    ///
    /// File-level failures (unreadable, no header, unresolvable columns) are
    /// logged here and returned; cell-level failures only drop the row.
    pub fn read_file(&self, path: &Path, source: &str) -> Result<LoadedFile> {
        let result = fs::read(path)
            .map_err(ProcessingError::from)
            .and_then(|bytes| self.parse_contents(&decode_contents(&bytes), path, source));

        if let Err(ref e) = result {
            error!("Error reading {}: {}", path.display(), e);
        }
        result
    }

    fn parse_contents(&self, contents: &str, path: &Path, source: &str) -> Result<LoadedFile> {
        let mut reader = csv::ReaderBuilder::new()
            .delimiter(self.delimiter)
            .has_headers(true)
            .flexible(true)
            .from_reader(contents.as_bytes());

        let headers: Vec<String> = reader.headers()?.iter().map(normalize_header).collect();
        if headers.iter().all(String::is_empty) {
            return Err(ProcessingError::EmptyFile(path.to_path_buf()));
        }
        debug!("Columns in {}: {:?}", path.display(), headers);

        let resolution = resolve_columns(&headers);
        let Some((ts_col, kwh_col)) = resolution.required() else {
            return Err(ProcessingError::MissingColumns { columns: headers });
        };
        info!(
            "Resolved columns in {}: timestamp='{}', kwh='{}'",
            path.display(),
            ts_col.name,
            kwh_col.name
        );

        let mut readings = Vec::new();
        let mut stats = LoadStats::default();

        for record_result in reader.records() {
            stats.rows_read += 1;

            let record = match record_result {
                Ok(record) if record.len() <= headers.len() => record,
                _ => {
                    stats.rows_malformed += 1;
                    continue;
                }
            };

            let timestamp = record.get(ts_col.index).and_then(parse_timestamp);
            let kwh = record.get(kwh_col.index).and_then(parse_kwh);

            match (timestamp, kwh) {
                (Some(timestamp), Some(kwh)) => {
                    readings.push(EnergyReading::new(timestamp, kwh, source));
                }
                _ => stats.rows_dropped += 1,
            }
        }

        stats.rows_kept = readings.len();
        debug!(
            "{}: {} rows read, {} kept, {} dropped, {} malformed",
            path.display(),
            stats.rows_read,
            stats.rows_kept,
            stats.rows_dropped,
            stats.rows_malformed
        );

        Ok(LoadedFile { readings, stats })
    }
}

impl Default for EnergyReader {
    fn default() -> Self {
        Self::new()
    }
}

/// Decode file bytes as UTF-8 (BOM stripped), falling back to Windows-1252
/// for exports that are not valid UTF-8.
fn decode_contents(bytes: &[u8]) -> Cow<'_, str> {
    let (text, _, had_errors) = UTF_8.decode(bytes);
    if !had_errors {
        return text;
    }
    let (text, _, _) = WINDOWS_1252.decode(bytes);
    text
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write_csv(contents: &[u8]) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(contents).unwrap();
        file
    }

    #[test]
    fn test_read_valid_file() -> Result<()> {
        let file = write_csv(b" Timestamp , kWh ,meter\n2024-01-01 00:00,1.5,m1\n2024-01-01 01:00,2.5,m1\n");

        let loaded = EnergyReader::new().read_file(file.path(), "Library")?;

        assert_eq!(loaded.readings.len(), 2);
        assert_eq!(loaded.readings[0].kwh, 1.5);
        assert_eq!(loaded.readings[1].source, "Library");
        assert_eq!(
            loaded.readings[1].timestamp.to_string(),
            "2024-01-01 01:00:00"
        );
        assert_eq!(loaded.stats.rows_kept, 2);
        Ok(())
    }

    #[test]
    fn test_unparseable_rows_are_dropped() -> Result<()> {
        let file = write_csv(
            b"date,value\n2024-01-01,10\nnot-a-date,5\n2024-01-03,n/a\n2024-01-04,\n2024-01-05,7\n",
        );

        let loaded = EnergyReader::new().read_file(file.path(), "A")?;

        let values: Vec<f64> = loaded.readings.iter().map(|r| r.kwh).collect();
        assert_eq!(values, vec![10.0, 7.0]);
        assert_eq!(loaded.stats.rows_read, 5);
        assert_eq!(loaded.stats.rows_dropped, 3);
        Ok(())
    }

    #[test]
    fn test_out_of_range_dates_are_dropped() -> Result<()> {
        let file = write_csv(b"date,kwh\n2024-01-01,1\n+262142-12-31,2\n1066-10-14,3\n");

        let loaded = EnergyReader::new().read_file(file.path(), "A")?;

        assert_eq!(loaded.readings.len(), 1);
        assert_eq!(loaded.readings[0].kwh, 1.0);
        assert_eq!(loaded.stats.rows_dropped, 2);
        Ok(())
    }

    #[test]
    fn test_structurally_bad_rows_are_skipped() -> Result<()> {
        let file = write_csv(b"time,energy\n2024-01-01 10:00,1,extra\n2024-01-01 11:00,2\n2024-01-01 12:00\n\n");

        let loaded = EnergyReader::new().read_file(file.path(), "A")?;

        assert_eq!(loaded.readings.len(), 1);
        assert_eq!(loaded.readings[0].kwh, 2.0);
        assert_eq!(loaded.stats.rows_malformed, 1);
        // Short row is padded with a missing value and dropped
        assert_eq!(loaded.stats.rows_dropped, 1);
        Ok(())
    }

    #[test]
    fn test_missing_columns_is_an_error() {
        let file = write_csv(b"when,reading\n2024-01-01,3\n");

        let result = EnergyReader::new().read_file(file.path(), "A");

        match result {
            Err(e @ ProcessingError::MissingColumns { .. }) => {
                // The caller's log line already names the file
                assert_eq!(
                    e.to_string(),
                    "Missing timestamp/kwh column. Columns: [\"when\", \"reading\"]"
                );
                assert!(!e.to_string().contains(&file.path().display().to_string()));
            }
            other => panic!("expected MissingColumns, got {:?}", other),
        }
    }

    #[test]
    fn test_empty_file_is_an_error() {
        let file = write_csv(b"");
        assert!(matches!(
            EnergyReader::new().read_file(file.path(), "A"),
            Err(ProcessingError::EmptyFile(_))
        ));
    }

    #[test]
    fn test_missing_file_is_an_error() {
        let result = EnergyReader::new().read_file(Path::new("/nonexistent/A_jan.csv"), "A");
        assert!(matches!(result, Err(ProcessingError::Io(_))));
    }

    #[test]
    fn test_bom_and_latin1_contents() -> Result<()> {
        let with_bom = write_csv(b"\xEF\xBB\xBFDate,Value\n2024-01-01,4\n");
        let loaded = EnergyReader::new().read_file(with_bom.path(), "A")?;
        assert_eq!(loaded.readings.len(), 1);

        // "Bâtiment" in Windows-1252 as an ignored extra column
        let latin1 = write_csv(b"Date,Value,B\xE2timent\n2024-01-01,4,x\n");
        let loaded = EnergyReader::new().read_file(latin1.path(), "A")?;
        assert_eq!(loaded.readings.len(), 1);
        Ok(())
    }

    #[test]
    fn test_custom_delimiter() -> Result<()> {
        let file = write_csv(b"timestamp;kwh\n2024-01-01 00:00;3.25\n");
        let loaded = EnergyReader::with_delimiter(b';').read_file(file.path(), "A")?;
        assert_eq!(loaded.readings[0].kwh, 3.25);
        Ok(())
    }
}
