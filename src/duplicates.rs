use std::io::Write;

use colored::Colorize;
use tracing::info;

use crate::api::ApiClient;
use crate::error::Error;
use crate::table;
use crate::types::DuplicatesResponse;
use crate::validate;

pub fn run(client: &ApiClient, device_id: &str, start: Option<&str>, end: Option<&str>) -> Result<(), Error> {
    let (start, end) = validate::resolve_date_range(start, end)?;
    info!(device_id, %start, %end, "searching for duplicate records");
    let response = client.find_duplicates(device_id, &start, &end)?;

    let stdout = std::io::stdout();
    render(&response, &mut stdout.lock())
}

pub fn render<W: Write>(response: &DuplicatesResponse, output: &mut W) -> Result<(), Error> {
    if response.duplicates.is_empty() {
        writeln!(output, "{}", "No duplicates found.".green())?;
        return Ok(());
    }

    writeln!(output, "{}", format!("{} duplicate record(s) found:", response.count).bold())?;
    let rows = response
        .duplicates
        .iter()
        .map(|duplicate| {
            vec![
                duplicate.deviceid.as_deref().unwrap_or(table::NOT_AVAILABLE).to_owned(),
                duplicate.devicetime.as_deref().unwrap_or(table::NOT_AVAILABLE).to_owned(),
                duplicate.count.map(|n| n.to_string()).unwrap_or_else(|| "-".to_owned()),
            ]
        })
        .collect::<Vec<_>>();
    table::render(output, &["Device ID", "Device Time", "Count"], &rows)?;
    Ok(())
}
