// ABOUTME: CSV output for staff records.
// ABOUTME: Writes the header row plus one row per record to any writer or to a file that is overwritten each run.

use std::fs::File;
use std::io::Write;
use std::path::Path;

use crate::error::ScrapeError;
use crate::record::{StaffRecord, CSV_HEADERS};

/// Default output file name.
pub const DEFAULT_OUTPUT: &str = "staff_directory.csv";

fn csv_error(path: &str, e: impl Into<anyhow::Error>) -> ScrapeError {
    ScrapeError::output(path, "WriteCsv", Some(e.into()))
}

/// Write the header row and `records` as CSV to `writer`.
pub fn write_records<'a, W, I>(writer: W, records: I) -> Result<usize, ScrapeError>
where
    W: Write,
    I: IntoIterator<Item = &'a StaffRecord>,
{
    let mut wtr = csv::WriterBuilder::new().has_headers(false).from_writer(writer);
    wtr.write_record(CSV_HEADERS).map_err(|e| csv_error("", e))?;

    let mut rows = 0;
    for record in records {
        wtr.serialize(record).map_err(|e| csv_error("", e))?;
        rows += 1;
    }
    wtr.flush().map_err(|e| csv_error("", e))?;
    Ok(rows)
}

/// Write `records` to `path`, truncating any existing file.
pub fn write_csv_file<'a, I>(path: &Path, records: I) -> Result<usize, ScrapeError>
where
    I: IntoIterator<Item = &'a StaffRecord>,
{
    let display = path.display().to_string();
    let file = File::create(path).map_err(|e| csv_error(&display, e))?;
    write_records(file, records).map_err(|mut e| {
        e.url = display;
        e
    })
}

/// Render `records` as a CSV string.
pub fn to_csv_string<'a, I>(records: I) -> Result<String, ScrapeError>
where
    I: IntoIterator<Item = &'a StaffRecord>,
{
    let mut buf: Vec<u8> = Vec::new();
    write_records(&mut buf, records)?;
    String::from_utf8(buf).map_err(|e| csv_error("", e))
}
