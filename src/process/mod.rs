// src/process/mod.rs

pub mod classify;
pub mod group;
pub mod types;

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use anyhow::{Context, Result};
use csv::ReaderBuilder;
use tracing::debug;

use self::classify::classify_records;
use self::group::{organize, WeekBuckets};
use self::types::RawRecord;

/// Parse a headered directory export into raw records.
///
/// Each row is zipped against the header names; short rows simply lack the
/// trailing columns, extra fields are ignored.
pub fn load_records<R: Read>(reader: R) -> Result<Vec<RawRecord>> {
    let mut rdr = ReaderBuilder::new()
        .flexible(true) // exported rows don't always carry every column
        .from_reader(reader);
    let headers: Vec<String> = rdr
        .headers()
        .context("reading CSV header row")?
        .iter()
        .map(str::to_string)
        .collect();

    let mut records = Vec::new();
    for (idx, result) in rdr.records().enumerate() {
        let row = result.with_context(|| format!("CSV parse error at record {}", idx))?;
        let mut record = RawRecord::new();
        for (column, value) in headers.iter().zip(row.iter()) {
            record.insert(column.as_str(), value);
        }
        records.push(record);
    }
    debug!(rows = records.len(), "parsed directory export");
    Ok(records)
}

/// Open and parse an export file on disk.
#[tracing::instrument(level = "info", skip(path), fields(path = %path.as_ref().display()))]
pub fn load_records_from_path<P: AsRef<Path>>(path: P) -> Result<Vec<RawRecord>> {
    let file = File::open(&path)
        .with_context(|| format!("opening export file {:?}", path.as_ref()))?;
    load_records(BufReader::new(file))
}

/// Run the whole pipeline over one export: classify every row, then group
/// the classified stops into calendar-ordered weekday buckets.
pub fn weekday_buckets(records: &[RawRecord]) -> WeekBuckets {
    organize(classify_records(records))
}
