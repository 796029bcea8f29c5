//! Sales dataset loading.
//!
//! Reads a delimited file into an immutable [`SalesTable`]. The temporal
//! column is parsed into a [`NaiveDateTime`]; every other required column
//! is either a monetary/numeric measure or a category label.

use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::Serialize;

use crate::error::{Error, Result};

/// Date-only formats accepted in the temporal column (mapped to midnight).
const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%m/%d/%Y"];

/// Date-time formats accepted in the temporal column.
const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%m/%d/%Y %H:%M:%S",
    "%m/%d/%Y %H:%M",
];

/// One sales transaction.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SalesRecord {
    pub timestamp: NaiveDateTime,
    pub total: f64,
    pub gross_income: f64,
    pub rating: f64,
    pub product_line: String,
    pub city: String,
    pub customer_type: String,
    pub payment: String,
}

/// Header names of the required columns.
///
/// Matching is case-insensitive and treats spaces, `_` and `-` as the same
/// character, so `Customer type` also resolves `Customer_type`.
#[derive(Debug, Clone)]
pub struct ColumnNames {
    pub date: String,
    pub total: String,
    pub gross_income: String,
    pub rating: String,
    pub product_line: String,
    pub city: String,
    pub customer_type: String,
    pub payment: String,
}

impl Default for ColumnNames {
    fn default() -> Self {
        Self {
            date: "Date".to_string(),
            total: "Total".to_string(),
            gross_income: "gross income".to_string(),
            rating: "Rating".to_string(),
            product_line: "Product line".to_string(),
            city: "City".to_string(),
            customer_type: "Customer type".to_string(),
            payment: "Payment".to_string(),
        }
    }
}

/// What to do with a row whose temporal field cannot be parsed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DatePolicy {
    /// Abort the whole load with [`Error::InvalidDate`].
    #[default]
    Strict,
    /// Skip the row and report how many were skipped.
    DropInvalid,
}

/// Options for [`SalesTable::load`].
#[derive(Debug, Clone, Default)]
pub struct LoadOptions {
    pub columns: ColumnNames,
    pub date_policy: DatePolicy,
}

/// Column positions resolved against a header row.
struct ColumnIndex {
    date: usize,
    total: usize,
    gross_income: usize,
    rating: usize,
    product_line: usize,
    city: usize,
    customer_type: usize,
    payment: usize,
}

impl ColumnIndex {
    fn resolve(headers: &csv::StringRecord, names: &ColumnNames) -> Result<Self> {
        let normalized: Vec<String> = headers.iter().map(normalize_header).collect();
        let find = |name: &str| -> Result<usize> {
            let wanted = normalize_header(name);
            normalized
                .iter()
                .position(|h| *h == wanted)
                .ok_or_else(|| Error::MissingColumn {
                    column: name.to_string(),
                })
        };

        Ok(Self {
            date: find(&names.date)?,
            total: find(&names.total)?,
            gross_income: find(&names.gross_income)?,
            rating: find(&names.rating)?,
            product_line: find(&names.product_line)?,
            city: find(&names.city)?,
            customer_type: find(&names.customer_type)?,
            payment: find(&names.payment)?,
        })
    }
}

fn normalize_header(name: &str) -> String {
    name.trim()
        .trim_start_matches('\u{feff}')
        .chars()
        .map(|c| match c {
            ' ' | '-' => '_',
            c => c.to_ascii_lowercase(),
        })
        .collect()
}

/// Parse a temporal value in any of the accepted formats.
pub fn parse_timestamp(value: &str) -> Option<NaiveDateTime> {
    let value = value.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.naive_local());
    }
    DATETIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(value, fmt).ok())
        .or_else(|| {
            DATE_FORMATS
                .iter()
                .find_map(|fmt| NaiveDate::parse_from_str(value, fmt).ok())
                .and_then(|date| date.and_hms_opt(0, 0, 0))
        })
}

/// In-memory sales table, immutable after load.
#[derive(Debug, Clone, Default)]
pub struct SalesTable {
    source: Option<PathBuf>,
    rows: Vec<SalesRecord>,
    dropped: usize,
}

impl SalesTable {
    /// Load a table from a CSV file.
    ///
    /// # Errors
    /// Returns a data-load error if the file is missing or unreadable, a
    /// required column is absent, or a row cannot be decoded. Unparseable
    /// dates fail the load unless [`DatePolicy::DropInvalid`] is set.
    pub fn load(path: impl AsRef<Path>, options: &LoadOptions) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|e| Error::DatasetRead {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;

        let mut table = Self::from_reader(file, options).map_err(|e| match e {
            Error::MalformedRow { line: 0, message } => Error::DatasetRead {
                path: path.to_path_buf(),
                message,
            },
            other => other,
        })?;
        table.source = Some(path.to_path_buf());

        tracing::info!("Loaded {} rows from {}", table.len(), path.display());
        Ok(table)
    }

    /// Load a table from any CSV reader.
    pub fn from_reader<R: Read>(reader: R, options: &LoadOptions) -> Result<Self> {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .trim(csv::Trim::All)
            .from_reader(reader);

        let headers = reader.headers().map_err(csv_error)?.clone();
        let index = ColumnIndex::resolve(&headers, &options.columns)?;

        let mut rows = Vec::new();
        let mut dropped = 0usize;

        for result in reader.records() {
            let record = result.map_err(csv_error)?;
            let line = record.position().map(|p| p.line()).unwrap_or(0);

            let raw_date = field(&record, index.date, line)?;
            let Some(timestamp) = parse_timestamp(raw_date) else {
                match options.date_policy {
                    DatePolicy::Strict => {
                        return Err(Error::InvalidDate {
                            line,
                            value: raw_date.to_string(),
                        });
                    }
                    DatePolicy::DropInvalid => {
                        tracing::debug!("Dropping line {}: unparseable date '{}'", line, raw_date);
                        dropped += 1;
                        continue;
                    }
                }
            };

            let columns = &options.columns;
            rows.push(SalesRecord {
                timestamp,
                total: number(&record, index.total, line, &columns.total)?,
                gross_income: number(&record, index.gross_income, line, &columns.gross_income)?,
                rating: number(&record, index.rating, line, &columns.rating)?,
                product_line: field(&record, index.product_line, line)?.to_string(),
                city: field(&record, index.city, line)?.to_string(),
                customer_type: field(&record, index.customer_type, line)?.to_string(),
                payment: field(&record, index.payment, line)?.to_string(),
            });
        }

        if dropped > 0 {
            tracing::warn!("Dropped {} rows with unparseable dates", dropped);
        }

        Ok(Self {
            source: None,
            rows,
            dropped,
        })
    }

    /// Build a table directly from records.
    pub fn from_records(rows: Vec<SalesRecord>) -> Self {
        Self {
            source: None,
            rows,
            dropped: 0,
        }
    }

    pub fn rows(&self) -> &[SalesRecord] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// File the table was loaded from, if any.
    pub fn source(&self) -> Option<&Path> {
        self.source.as_deref()
    }

    /// Rows skipped under [`DatePolicy::DropInvalid`].
    pub fn dropped_rows(&self) -> usize {
        self.dropped
    }
}

fn field(record: &csv::StringRecord, idx: usize, line: u64) -> Result<&str> {
    record.get(idx).ok_or_else(|| Error::MalformedRow {
        line,
        message: format!("expected at least {} fields, found {}", idx + 1, record.len()),
    })
}

fn number(record: &csv::StringRecord, idx: usize, line: u64, column: &str) -> Result<f64> {
    let raw = field(record, idx, line)?;
    raw.parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(|| Error::InvalidNumber {
            line,
            column: column.to_string(),
            value: raw.to_string(),
        })
}

fn csv_error(err: csv::Error) -> Error {
    let line = err.position().map(|p| p.line()).unwrap_or(0);
    Error::MalformedRow {
        line,
        message: err.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    const HEADER: &str = "Invoice ID,City,Customer_type,Product line,Total,Date,Payment,gross income,Rating\n";

    fn load_str(body: &str, options: &LoadOptions) -> Result<SalesTable> {
        let csv = format!("{HEADER}{body}");
        SalesTable::from_reader(csv.as_bytes(), options)
    }

    #[test]
    fn test_load_rows() {
        let table = load_str(
            "750-67-8428,Yangon,Member,Health and beauty,548.97,1/5/2019,Ewallet,26.14,9.1\n\
             226-31-3081,Naypyitaw,Normal,Electronic accessories,80.22,2019-03-08,Cash,3.82,9.6\n",
            &LoadOptions::default(),
        )
        .unwrap();

        assert_eq!(table.len(), 2);
        let first = &table.rows()[0];
        assert_eq!(first.city, "Yangon");
        assert_eq!(first.customer_type, "Member");
        assert_eq!(first.total, 548.97);
        assert_eq!(first.timestamp.date(), NaiveDate::from_ymd_opt(2019, 1, 5).unwrap());
        assert_eq!(
            table.rows()[1].timestamp.date(),
            NaiveDate::from_ymd_opt(2019, 3, 8).unwrap()
        );
    }

    #[test]
    fn test_missing_column() {
        let csv = "Date,Total,Rating\n2019-01-01,1,2\n";
        let err = SalesTable::from_reader(csv.as_bytes(), &LoadOptions::default()).unwrap_err();
        assert!(matches!(err, Error::MissingColumn { ref column } if column == "gross income"));
        assert_eq!(err.kind(), ErrorKind::DataLoad);
    }

    #[test]
    fn test_invalid_date_is_fatal_by_default() {
        let err = load_str(
            "1,Yangon,Member,Food,10,2019-01-01,Cash,0.5,7\n\
             2,Yangon,Member,Food,20,not-a-date,Cash,1.0,8\n",
            &LoadOptions::default(),
        )
        .unwrap_err();
        match err {
            Error::InvalidDate { line, value } => {
                assert_eq!(line, 3);
                assert_eq!(value, "not-a-date");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_invalid_date_dropped_when_requested() {
        let options = LoadOptions {
            date_policy: DatePolicy::DropInvalid,
            ..Default::default()
        };
        let table = load_str(
            "1,Yangon,Member,Food,10,2019-01-01,Cash,0.5,7\n\
             2,Yangon,Member,Food,20,13/45/2019,Cash,1.0,8\n",
            &options,
        )
        .unwrap();
        assert_eq!(table.len(), 1);
        assert_eq!(table.dropped_rows(), 1);
    }

    #[test]
    fn test_invalid_number() {
        let err = load_str(
            "1,Yangon,Member,Food,ten,2019-01-01,Cash,0.5,7\n",
            &LoadOptions::default(),
        )
        .unwrap_err();
        assert!(matches!(err, Error::InvalidNumber { ref column, .. } if column == "Total"));
    }

    #[test]
    fn test_short_row_is_malformed() {
        let err = load_str("1,Yangon,Member\n", &LoadOptions::default()).unwrap_err();
        assert!(matches!(err, Error::MalformedRow { .. }));
    }

    #[test]
    fn test_missing_file() {
        let err = SalesTable::load("/definitely/not/here.csv", &LoadOptions::default()).unwrap_err();
        assert!(matches!(err, Error::DatasetRead { .. }));
    }

    #[test]
    fn test_header_only_is_empty_table() {
        let table = load_str("", &LoadOptions::default()).unwrap();
        assert!(table.is_empty());
    }

    #[test]
    fn test_parse_timestamp_formats() {
        let midnight = NaiveDate::from_ymd_opt(2019, 2, 14)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap();
        assert_eq!(parse_timestamp("2019-02-14"), Some(midnight));
        assert_eq!(parse_timestamp("2/14/2019"), Some(midnight));
        assert_eq!(
            parse_timestamp("2019-02-14 13:08:00").map(|t| t.date()),
            Some(midnight.date())
        );
        assert!(parse_timestamp("2019-02-14T13:08:00+02:00").is_some());
        assert_eq!(parse_timestamp("Feb 14"), None);
    }

    #[test]
    fn test_header_normalization() {
        assert_eq!(normalize_header("Customer type"), "customer_type");
        assert_eq!(normalize_header("\u{feff}Customer_Type"), "customer_type");
        assert_eq!(normalize_header(" gross-income "), "gross_income");
    }
}
