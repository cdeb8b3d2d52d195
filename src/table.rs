use std::io::Write;

use chrono::NaiveDateTime;
use colored::Colorize;

use crate::pager::PageControl;
use crate::types::Record;

pub const NOT_AVAILABLE: &str = "N/A";

pub const DATA_TABLE_HEADER: [&str; 6] = ["Device ID", "Device Time", "ETM", "CSM", "Battery Voltage", "Battery Power"];

/// Formats one record as the six data-table cells. Absent fields render as
/// "N/A"; a legitimate zero renders as "0".
pub fn format_row(record: &Record) -> [String; 6] {
    [
        record.device_id().unwrap_or(NOT_AVAILABLE).to_owned(),
        record
            .device_time()
            .map(format_timestamp)
            .unwrap_or_else(|| NOT_AVAILABLE.to_owned()),
        record
            .etm()
            .map(format_number)
            .unwrap_or_else(|| NOT_AVAILABLE.to_owned()),
        record
            .csm()
            .map(format_number)
            .unwrap_or_else(|| NOT_AVAILABLE.to_owned()),
        record
            .battery_voltage()
            .map(|v| format!("{}V", format_number(v)))
            .unwrap_or_else(|| NOT_AVAILABLE.to_owned()),
        record
            .battery_power()
            .map(|on| if on { "On" } else { "Off" }.to_owned())
            .unwrap_or_else(|| NOT_AVAILABLE.to_owned()),
    ]
}

/// Re-formats a backend timestamp for display. Unparsable input is shown
/// verbatim rather than dropped.
pub fn format_timestamp(raw: &str) -> String {
    for format in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S"] {
        if let Ok(parsed) = NaiveDateTime::parse_from_str(raw, format) {
            return parsed.format("%Y-%m-%d %H:%M:%S").to_string();
        }
    }
    raw.to_owned()
}

pub fn format_number(value: f64) -> String {
    format!("{value}")
}

/// 1,234,567 style digit grouping for record counts.
pub fn thousands(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

/// Writes a plain left-aligned text table. Cells are kept uncolored so the
/// column widths stay correct.
pub fn render<W: Write>(w: &mut W, headers: &[&str], rows: &[Vec<String>]) -> std::io::Result<()> {
    let mut widths: Vec<usize> = headers.iter().map(|h| h.len()).collect();
    for row in rows {
        for (i, cell) in row.iter().enumerate() {
            widths[i] = widths[i].max(cell.len());
        }
    }

    let last = headers.len() - 1;
    for (i, header) in headers.iter().enumerate() {
        if i == last {
            writeln!(w, "{header}")?;
        } else {
            write!(w, "{:<width$}  ", header, width = widths[i])?;
        }
    }
    for (i, width) in widths.iter().enumerate() {
        if i == last {
            writeln!(w, "{}", "-".repeat(*width))?;
        } else {
            write!(w, "{}  ", "-".repeat(*width))?;
        }
    }
    for row in rows {
        for (i, cell) in row.iter().enumerate() {
            if i == last {
                writeln!(w, "{cell}")?;
            } else {
                write!(w, "{:<width$}  ", cell, width = widths[i])?;
            }
        }
    }
    Ok(())
}

/// Renders the pagination control bar on one line. Disabled controls are
/// dimmed, the current page is bracketed.
pub fn render_controls(controls: &[PageControl]) -> String {
    controls
        .iter()
        .map(|control| match control {
            PageControl::Previous { enabled: true } => "« Previous".to_owned(),
            PageControl::Previous { enabled: false } => "« Previous".dimmed().to_string(),
            PageControl::Page { number, active: true } => format!("[{number}]"),
            PageControl::Page { number, active: false } => number.to_string(),
            PageControl::Ellipsis => "...".to_owned(),
            PageControl::Next { enabled: true } => "Next »".to_owned(),
            PageControl::Next { enabled: false } => "Next »".dimmed().to_string(),
        })
        .collect::<Vec<_>>()
        .join("  ")
}
