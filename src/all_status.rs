use std::io::Write;
use std::time::Instant;

use colored::Colorize;
use tracing::info;

use crate::api::ApiClient;
use crate::error::Error;
use crate::table;
use crate::types::DeviceSummary;

pub fn run(client: &ApiClient) -> Result<(), Error> {
    let started = Instant::now();
    info!("fetching status for all devices");
    let mut devices = client.all_device_status()?;
    sort_devices(&mut devices);

    let stdout = std::io::stdout();
    render(&devices, started.elapsed().as_secs_f64(), &mut stdout.lock())
}

/// Clears the backend status cache, then immediately re-fetches so the
/// operator sees fresh data (the original page did the same).
pub fn clear_cache(client: &ApiClient) -> Result<(), Error> {
    let response = client.clear_device_status_cache()?;
    println!("{}", response.message.green());
    run(client)
}

/// Active devices first; the backend order is kept within each group.
pub fn sort_devices(devices: &mut [DeviceSummary]) {
    devices.sort_by_key(|device| device.status != "Active");
}

/// `X.Xh` under a day, `X.Xd` from there on. The backend already rounds
/// hours to one decimal.
pub fn format_hours_since(hours: f64) -> String {
    if hours < 24.0 {
        format!("{hours}h")
    } else {
        format!("{}d", (hours / 24.0 * 10.0).round() / 10.0)
    }
}

pub fn render<W: Write>(devices: &[DeviceSummary], elapsed_secs: f64, output: &mut W) -> Result<(), Error> {
    if devices.is_empty() {
        writeln!(output, "{}", "No devices found in database".yellow())?;
        return Ok(());
    }

    let rows = devices
        .iter()
        .map(|device| {
            vec![
                device.device_id.clone(),
                device.status.clone(),
                device.latest_time.as_deref().unwrap_or("Unknown").to_owned(),
                format_hours_since(device.hours_since_last),
                device.record_count.map(table::thousands).unwrap_or_else(|| "0".to_owned()),
                device.inactive_duration.as_deref().unwrap_or("-").to_owned(),
            ]
        })
        .collect::<Vec<_>>();
    table::render(
        output,
        &["Device ID", "Status", "Last Seen", "Hours Since", "Records", "Inactive Duration"],
        &rows,
    )?;

    let active = devices.iter().filter(|device| device.status == "Active").count();
    let inactive = devices.len() - active;
    writeln!(
        output,
        "{} active, {} inactive, {} total",
        active.to_string().green(),
        inactive.to_string().yellow(),
        devices.len(),
    )?;
    writeln!(output, "Loaded in {elapsed_secs:.2}s")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::{format_hours_since, render, sort_devices};
    use crate::types::DeviceSummary;

    fn devices() -> Vec<DeviceSummary> {
        serde_json::from_value(serde_json::json!([
            { "device_id": "d1", "status": "Inactive", "latest_time": "2024-01-01 00:00:00",
              "hours_since_last": 30.5, "record_count": 1200, "inactive_duration": "1.3 days" },
            { "device_id": "d2", "status": "Active", "latest_time": "2024-01-02 00:00:00",
              "hours_since_last": 0.2, "record_count": 1234567, "inactive_duration": "-" },
            { "device_id": "d3", "status": "Inactive", "latest_time": null,
              "hours_since_last": 2.0, "record_count": null, "inactive_duration": "2.0 hours" }
        ]))
        .unwrap()
    }

    #[test]
    fn test_sort_devices_puts_active_first() {
        let mut devices = devices();
        sort_devices(&mut devices);
        assert_eq!(devices[0].device_id, "d2");
        // Stable sort keeps the backend order within each group.
        assert_eq!(devices[1].device_id, "d1");
        assert_eq!(devices[2].device_id, "d3");
    }

    #[test]
    fn test_format_hours_since() {
        assert_eq!(format_hours_since(0.2), "0.2h");
        assert_eq!(format_hours_since(23.9), "23.9h");
        assert_eq!(format_hours_since(24.0), "1d");
        assert_eq!(format_hours_since(30.0), "1.3d");
        assert_eq!(format_hours_since(120.0), "5d");
    }

    #[test]
    fn test_render_summary_and_fallbacks() {
        colored::control::set_override(false);
        let mut output = vec![];
        render(&devices(), 0.42, &mut output).unwrap();
        let text = String::from_utf8(output).unwrap();
        assert!(text.contains("1 active, 2 inactive, 3 total"));
        assert!(text.contains("Loaded in 0.42s"));
        assert!(text.contains("1,234,567"));
        assert!(text.contains("Unknown")); // missing latest_time
    }

    #[test]
    fn test_render_empty_list() {
        colored::control::set_override(false);
        let mut output = vec![];
        render(&[], 0.01, &mut output).unwrap();
        assert!(String::from_utf8(output).unwrap().contains("No devices found in database"));
    }
}
