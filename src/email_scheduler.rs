use std::io::Write;

use colored::Colorize;
use tracing::info;

use crate::api::ApiClient;
use crate::error::Error;
use crate::table;
use crate::types::{SchedulerStatus, TestEmailResponse};

pub fn status(client: &ApiClient) -> Result<(), Error> {
    info!("fetching email scheduler status");
    let status = client.email_scheduler_status()?;

    let stdout = std::io::stdout();
    render_status(&status, &mut stdout.lock())
}

pub fn send_test_email(client: &ApiClient, device_id: Option<&str>) -> Result<(), Error> {
    info!(device_id, "triggering test email");
    let response = client.send_test_email(device_id)?;

    let stdout = std::io::stdout();
    render_test_email(&response, &mut stdout.lock())
}

pub fn render_status<W: Write>(status: &SchedulerStatus, output: &mut W) -> Result<(), Error> {
    writeln!(output, "{}", "Scheduler Status".bold())?;
    writeln!(
        output,
        "  Status:        {}",
        if status.scheduler_running { "Running".green() } else { "Stopped".red() }
    )?;
    writeln!(output, "  Schedule Time: {} daily", status.schedule_time)?;
    writeln!(
        output,
        "  Next Run:      {}",
        status
            .next_scheduled_run
            .as_deref()
            .map(table::format_timestamp)
            .unwrap_or_else(|| "Not scheduled".to_owned())
    )?;
    writeln!(output, "{}", "Device Configuration".bold())?;
    writeln!(output, "  Configured Devices: {}", status.configured_devices)?;
    for device in &status.device_list {
        writeln!(output, "  - {device}")?;
    }
    Ok(())
}

pub fn render_test_email<W: Write>(response: &TestEmailResponse, output: &mut W) -> Result<(), Error> {
    writeln!(output, "{}", response.message.green())?;
    if let Some(devices_processed) = response.devices_processed {
        writeln!(output, "  Devices Processed: {devices_processed}")?;
    }
    if let Some(device_id) = &response.device_id {
        writeln!(output, "  Device ID: {device_id}")?;
    }
    Ok(())
}
