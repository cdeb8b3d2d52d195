use std::path::Path;

use chrono::Utc;
use colored::Colorize;
use tracing::info;

use crate::api::ApiClient;
use crate::error::Error;
use crate::table::format_number;
use crate::types::Record;
use crate::validate;

/// Fetches the requested range, asks the backend to render the hourly
/// consumption chart, and stores the PNG next to its source CSV.
pub fn run(
    client: &ApiClient,
    device_id: &str,
    start: Option<&str>,
    end: Option<&str>,
    output_file: Option<String>,
) -> Result<(), Error> {
    let (start, end) = validate::resolve_date_range(start, end)?;
    info!(device_id, %start, %end, "fetching records for chart");
    let data = client.get_data(device_id, &start, &end)?;

    if data.records.is_empty() {
        println!("{}", "No records found for the specified criteria.".yellow());
        return Ok(());
    }
    println!(
        "{} records found from {} to {}",
        data.count, data.start_time, data.end_time
    );

    let png = client.render_chart(&data.records, &start, &end)?;
    let chart_path = output_file.unwrap_or_else(|| format!("aquesa_chart_{}.png", Utc::now().format("%Y-%m-%d")));
    std::fs::write(&chart_path, png)?;
    println!("{}", format!("Chart saved to {chart_path}").green());

    let csv_path = Path::new(&chart_path).with_extension("csv");
    write_consumption_csv(&data.records, &csv_path)?;
    println!("{}", format!("Consumption data saved to {}", csv_path.display()).green());
    Ok(())
}

/// The per-record consumption series the chart is drawn from. A record
/// without a consumption reading counts as 0, the same default the chart
/// uses.
pub fn write_consumption_csv(records: &[Record], path: &Path) -> Result<(), Error> {
    let mut w = csv::Writer::from_path(path)?;
    w.write_record(["devicetime", "csm"])?;
    for record in records {
        w.write_field(record.device_time().unwrap_or_default())?;
        w.write_field(format_number(record.csm().unwrap_or(0.0)))?;
        w.write_record(None::<&[u8]>)?;
    }
    w.flush()?;
    Ok(())
}
