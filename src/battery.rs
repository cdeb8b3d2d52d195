use std::io::Write;

use colored::{ColoredString, Colorize};
use tracing::info;

use crate::api::ApiClient;
use crate::error::Error;
use crate::table;
use crate::types::BatteryStatus;

const GAUGE_WIDTH: usize = 30;

pub fn run(client: &ApiClient, device_id: &str) -> Result<(), Error> {
    if device_id.trim().is_empty() {
        return Error::new_validation_error("Please enter a device ID");
    }

    info!(device_id, "fetching battery status");
    let status = client.battery_status(device_id)?;

    let stdout = std::io::stdout();
    render(&status, &mut stdout.lock())
}

/// Maps the backend-formatted voltage ("3.75V", "N/A") onto a 0-100 charge
/// estimate, with 3.0 V as empty and 4.2 V as full. Unparsable or zero
/// voltages read as 0.
pub fn battery_percentage(voltage: &str) -> u8 {
    let numeric: String = voltage
        .trim()
        .chars()
        .take_while(|c| c.is_ascii_digit() || *c == '.' || *c == '-')
        .collect();
    let voltage: f64 = numeric.parse().unwrap_or(0.0);
    if voltage <= 0.0 {
        return 0;
    }
    ((voltage - 3.0) / (4.2 - 3.0) * 100.0).clamp(0.0, 100.0).round() as u8
}

fn status_colored(status: &str) -> ColoredString {
    match status {
        "Good" => status.green(),
        "Low" => status.yellow(),
        "Critical" => status.red(),
        _ => status.normal(),
    }
}

pub fn render<W: Write>(status: &BatteryStatus, output: &mut W) -> Result<(), Error> {
    writeln!(output, "{}", "Battery Information".bold())?;
    writeln!(output, "  Device ID:      {}", status.device_id)?;
    writeln!(output, "  Battery Status: {}", status_colored(&status.battery_status))?;
    writeln!(output, "  Voltage:        {}", status.voltage)?;
    writeln!(
        output,
        "  Battery On:     {}",
        if status.power_on { "Yes".green() } else { "No".red() }
    )?;
    writeln!(
        output,
        "  Last Update:    {}",
        status
            .last_update
            .as_deref()
            .map(table::format_timestamp)
            .unwrap_or_else(|| table::NOT_AVAILABLE.to_owned())
    )?;

    let percentage = battery_percentage(&status.voltage) as usize;
    let filled = percentage * GAUGE_WIDTH / 100;
    writeln!(
        output,
        "  [{}{}] {}%",
        "#".repeat(filled),
        "-".repeat(GAUGE_WIDTH - filled),
        percentage,
    )?;
    writeln!(output, "  3.0V (Critical)   3.4V (Low)   3.7V+ (Good)")?;
    Ok(())
}
