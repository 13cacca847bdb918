//! CSV serialization of page records

use crate::output::OutputResult;
use crate::record::PageRecord;
use std::fs::File;
use std::io::{Read, Write};
use std::path::Path;

/// Writes records as CSV with a header row
///
/// The header is written even when `records` is empty.
pub fn write_csv<W: Write>(records: &[PageRecord], writer: W) -> OutputResult<()> {
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(writer);

    writer.write_record(PageRecord::COLUMNS)?;
    for record in records {
        writer.serialize(record)?;
    }
    writer.flush()?;

    Ok(())
}

/// Writes records to a CSV file, replacing any existing file
pub fn write_csv_file(records: &[PageRecord], path: &Path) -> OutputResult<()> {
    let file = File::create(path)?;
    write_csv(records, file)
}

/// Reads records back from CSV produced by [`write_csv`]
pub fn read_csv<R: Read>(reader: R) -> OutputResult<Vec<PageRecord>> {
    let mut reader = csv::Reader::from_reader(reader);
    let mut records = Vec::new();
    for row in reader.deserialize() {
        let record: PageRecord = row?;
        records.push(record);
    }
    Ok(records)
}
