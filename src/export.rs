use chrono::Utc;

use crate::error::Error;
use crate::table::{format_number, DATA_TABLE_HEADER};
use crate::types::Record;

/// Export artifacts are named after the current UTC date, the same scheme
/// the dashboard used for its download links.
pub fn default_artifact_name(extension: &str) -> String {
    format!("aquesa_data_{}.{}", Utc::now().format("%Y-%m-%d"), extension)
}

fn ensure_not_empty(records: &[Record]) -> Result<(), Error> {
    if records.is_empty() {
        return Error::new_validation_error("No data to export");
    }
    Ok(())
}

/// Writes the full result set (not just the current page) as CSV with a
/// fixed header row and every field double-quoted. Absent fields become
/// empty strings. Returns the path written.
pub fn export_csv(records: &[Record], output_file: Option<String>) -> Result<String, Error> {
    ensure_not_empty(records)?;
    let path = output_file.unwrap_or_else(|| default_artifact_name("csv"));

    let mut w = csv::WriterBuilder::new()
        .quote_style(csv::QuoteStyle::Always)
        .from_path(&path)?;

    // Header
    for name in DATA_TABLE_HEADER {
        w.write_field(name)?;
    }
    w.write_record(None::<&[u8]>)?;

    for record in records {
        w.write_field(record.device_id().unwrap_or_default())?;
        w.write_field(record.device_time().unwrap_or_default())?;
        w.write_field(record.etm().map(format_number).unwrap_or_default())?;
        w.write_field(record.csm().map(format_number).unwrap_or_default())?;
        w.write_field(record.battery_voltage().map(format_number).unwrap_or_default())?;
        w.write_field(record.battery_power().map(|on| if on { "On" } else { "Off" }).unwrap_or_default())?;
        w.write_record(None::<&[u8]>)?;
    }
    w.flush()?;

    Ok(path)
}

/// Writes the full result set as pretty-printed JSON, preserving fields
/// this client does not interpret. Returns the path written.
pub fn export_json(records: &[Record], output_file: Option<String>) -> Result<String, Error> {
    ensure_not_empty(records)?;
    let path = output_file.unwrap_or_else(|| default_artifact_name("json"));

    let file = std::fs::OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .open(&path)?;
    serde_json::to_writer_pretty(file, records)?;

    Ok(path)
}

/// Writes the full result set as a single-sheet workbook with the same
/// columns as the CSV export. Returns the path written.
pub fn export_xlsx(records: &[Record], output_file: Option<String>) -> Result<String, Error> {
    ensure_not_empty(records)?;
    let path = output_file.unwrap_or_else(|| default_artifact_name("xlsx"));

    let mut workbook = rust_xlsxwriter::Workbook::new();
    let worksheet = workbook.add_worksheet();

    for (col_id, name) in DATA_TABLE_HEADER.iter().enumerate() {
        worksheet.write(0, col_id as u16, *name)?;
    }
    for (row_id, record) in records.iter().enumerate() {
        let row_id = row_id as u32 + 1;
        worksheet.write(row_id, 0, record.device_id().unwrap_or_default())?;
        worksheet.write(row_id, 1, record.device_time().unwrap_or_default())?;
        match record.etm() {
            Some(v) => worksheet.write(row_id, 2, v)?,
            None => worksheet.write(row_id, 2, "")?,
        };
        match record.csm() {
            Some(v) => worksheet.write(row_id, 3, v)?,
            None => worksheet.write(row_id, 3, "")?,
        };
        match record.battery_voltage() {
            Some(v) => worksheet.write(row_id, 4, v)?,
            None => worksheet.write(row_id, 4, "")?,
        };
        worksheet.write(row_id, 5, record.battery_power().map(|on| if on { "On" } else { "Off" }).unwrap_or_default())?;
    }
    workbook.save(&path)?;

    Ok(path)
}
