//! Benchmark series and their CSV representation.
//!
//! A series file is comma-delimited with a header row: the first column is
//! the sender-thread count, the second is the measured throughput in
//! messages per millisecond.  The second header cell names the series and
//! becomes its legend label.  Repeated runs at the same thread count are
//! separate rows.

use std::path::Path;

use csv::{ReaderBuilder, WriterBuilder};
use log::debug;

use crate::error::Error;

/// A single measured point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Record {
    pub threads: u32,
    pub throughput: f64,
}

/// A named, ordered sequence of measurements; one curve on a chart.
#[derive(Debug, Clone, PartialEq)]
pub struct Series {
    pub label: String,
    pub records: Vec<Record>,
}

impl Series {
    pub fn new<S: Into<String>>(label: S) -> Self {
        Series {
            label: label.into(),
            records: Vec::new(),
        }
    }

    pub fn push(&mut self, threads: u32, throughput: f64) {
        self.records.push(Record {
            threads,
            throughput,
        });
    }

    /// Read a series from a CSV file, taking the legend label from the
    /// second header column.  Malformed rows are errors, not skipped.
    pub fn from_csv<P: AsRef<Path>>(path: P) -> Result<Series, Error> {
        let path = path.as_ref();
        let mut rdr = ReaderBuilder::new().has_headers(true).from_path(path)?;
        let label = match rdr.headers()?.get(1) {
            Some(label) if !label.is_empty() => label.to_string(),
            _ => {
                return Err(Error::BadHeader {
                    path: path.to_path_buf(),
                })
            }
        };
        let mut records = Vec::new();
        for row in rdr.deserialize() {
            let (threads, throughput): (u32, f64) = row?;
            records.push(Record {
                threads,
                throughput,
            });
        }
        if records.is_empty() {
            return Err(Error::EmptySeries {
                path: path.to_path_buf(),
            });
        }
        debug!(
            "{}: {} records from {}",
            label,
            records.len(),
            path.display()
        );
        Ok(Series { label, records })
    }

    /// Write the series in the format `from_csv` expects.
    pub fn write_csv<P: AsRef<Path>>(&self, path: P) -> Result<(), Error> {
        let mut wtr = WriterBuilder::new().from_path(path.as_ref())?;
        wtr.write_record(&["threads", self.label.as_str()])?;
        for r in &self.records {
            wtr.serialize((r.threads, r.throughput))?;
        }
        wtr.flush()?;
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn max_threads(&self) -> u32 {
        self.records.iter().map(|r| r.threads).max().unwrap_or(0)
    }

    pub fn max_throughput(&self) -> f64 {
        self.records.iter().map(|r| r.throughput).fold(0.0, f64::max)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use std::fs;

    #[test]
    fn round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("alt_unbounded.csv");

        let mut series = Series::new("alt");
        series.push(1, 100.0);
        series.push(1, 110.5);
        series.push(2, 180.25);
        series.write_csv(&path).unwrap();

        let read = Series::from_csv(&path).unwrap();
        assert_eq!(read, series);
    }

    #[test]
    fn label_comes_from_header() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("series.csv");
        fs::write(&path, "threads,std\n1,42.0\n4,99.5\n").unwrap();

        let series = Series::from_csv(&path).unwrap();
        assert_eq!(series.label, "std");
        assert_eq!(series.len(), 2);
        assert_eq!(series.records[0], Record { threads: 1, throughput: 42.0 });
        assert_eq!(series.max_threads(), 4);
        assert_eq!(series.max_throughput(), 99.5);
    }

    #[test]
    fn missing_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        assert!(Series::from_csv(dir.path().join("nope.csv")).is_err());
    }

    #[test]
    fn malformed_row_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("series.csv");
        fs::write(&path, "threads,alt\n1,not-a-number\n").unwrap();
        match Series::from_csv(&path) {
            Err(Error::Csv(_)) => {}
            other => panic!("expected a csv error, got {:?}", other),
        }
    }

    #[test]
    fn short_header_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("series.csv");
        fs::write(&path, "threads\n1\n").unwrap();
        match Series::from_csv(&path) {
            Err(Error::BadHeader { .. }) => {}
            other => panic!("expected a header error, got {:?}", other),
        }
    }

    #[test]
    fn header_only_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("series.csv");
        fs::write(&path, "threads,alt\n").unwrap();
        match Series::from_csv(&path) {
            Err(Error::EmptySeries { .. }) => {}
            other => panic!("expected an empty-series error, got {:?}", other),
        }
    }
}
