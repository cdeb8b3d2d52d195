use std::io::Write;

use colored::Colorize;
use tracing::info;

use crate::api::ApiClient;
use crate::error::Error;
use crate::table;
use crate::types::MissingResponse;
use crate::validate;

pub fn run(client: &ApiClient, device_id: &str, start: Option<&str>, end: Option<&str>) -> Result<(), Error> {
    let (start, end) = validate::resolve_date_range(start, end)?;
    info!(device_id, %start, %end, "checking for missing intervals");
    let response = client.missing_intervals(device_id, &start, &end)?;

    let stdout = std::io::stdout();
    render(&response, &mut stdout.lock())
}

pub fn render<W: Write>(response: &MissingResponse, output: &mut W) -> Result<(), Error> {
    // The backend answers with `message` instead of intervals when the range
    // holds no records at all.
    if let Some(message) = &response.message {
        writeln!(output, "{}", message.yellow())?;
        return Ok(());
    }

    let intervals = response.missing_intervals.as_deref().unwrap_or_default();
    if intervals.is_empty() {
        writeln!(output, "{}", "No missing intervals found.".green())?;
        return Ok(());
    }

    writeln!(output, "{}", format!("{} missing intervals:", response.count).bold())?;
    let rows = intervals
        .iter()
        .map(|interval| {
            vec![
                interval.missing_interval_start.clone(),
                interval.missing_interval_end.clone(),
            ]
        })
        .collect::<Vec<_>>();
    table::render(output, &["Start", "End"], &rows)?;
    Ok(())
}
