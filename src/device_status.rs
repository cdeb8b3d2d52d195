use std::io::Write;

use colored::Colorize;
use tracing::info;

use crate::api::ApiClient;
use crate::error::Error;
use crate::table;
use crate::types::DeviceStatus;

pub fn run(client: &ApiClient, device_id: &str) -> Result<(), Error> {
    if device_id.trim().is_empty() {
        return Error::new_validation_error("Please enter a device ID");
    }

    info!(device_id, "checking device status");
    let stdout = std::io::stdout();
    match client.device_status(device_id) {
        Ok(status) => render(&status, &mut stdout.lock()),
        Err(err) if err.is_not_found() => render_not_found(device_id, &mut stdout.lock()),
        Err(err) => Err(err),
    }
}

pub fn render<W: Write>(status: &DeviceStatus, output: &mut W) -> Result<(), Error> {
    let state = status.status.to_uppercase();
    let state = if status.status == "active" { state.green() } else { state.yellow() };

    writeln!(output, "{}", "Device Status Found".bold())?;
    writeln!(output, "  Device ID: {}", status.device_id)?;
    writeln!(output, "  Status:    {}", state)?;
    writeln!(output, "  Last Seen: {}", table::format_timestamp(&status.last_seen))?;
    if let Some(inactive_since) = &status.inactive_since {
        writeln!(output, "  Inactive Since: {}", table::format_timestamp(inactive_since))?;
    }
    Ok(())
}

/// An unknown device is an answer, not a failure; the original page rendered
/// the same checklist.
fn render_not_found<W: Write>(device_id: &str, output: &mut W) -> Result<(), Error> {
    writeln!(output, "{}", "Device Not Found".red().bold())?;
    writeln!(output, "  Device ID: {device_id}")?;
    writeln!(output, "This device was not found in the database. Please check:")?;
    writeln!(output, "  - The device ID is correct")?;
    writeln!(output, "  - The device has sent data to the system")?;
    writeln!(output, "  - Try the all-status command for available devices")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::render;
    use crate::types::DeviceStatus;

    #[test]
    fn test_render_active_device() {
        colored::control::set_override(false);
        let status: DeviceStatus = serde_json::from_value(serde_json::json!({
            "device_id": "d1",
            "status": "active",
            "last_seen": "2024-01-01T12:00:00"
        }))
        .unwrap();
        let mut output = vec![];
        render(&status, &mut output).unwrap();
        let text = String::from_utf8(output).unwrap();
        assert!(text.contains("ACTIVE"));
        assert!(text.contains("Last Seen: 2024-01-01 12:00:00"));
        assert!(!text.contains("Inactive Since"));
    }

    #[test]
    fn test_render_inactive_device_includes_inactive_since() {
        colored::control::set_override(false);
        let status: DeviceStatus = serde_json::from_value(serde_json::json!({
            "device_id": "d1",
            "status": "inactive",
            "last_seen": "2024-01-01T12:00:00",
            "inactive_since": "2024-01-01T12:00:00"
        }))
        .unwrap();
        let mut output = vec![];
        render(&status, &mut output).unwrap();
        let text = String::from_utf8(output).unwrap();
        assert!(text.contains("INACTIVE"));
        assert!(text.contains("Inactive Since: 2024-01-01 12:00:00"));
    }
}
