use clap::{Parser, Subcommand};
use colored::Colorize;
use tracing_subscriber::EnvFilter;

mod all_status;
mod api;
mod battery;
mod chart;
mod data_table;
mod device_status;
mod duplicates;
mod email_scheduler;
mod error;
mod export;
#[cfg(test)]
mod export_test;
mod missing;
mod pager;
#[cfg(test)]
mod pager_test;
mod table;
mod types;
mod validate;
#[cfg(test)]
mod validate_test;

#[derive(Parser)]
#[command(name = "aquesa", version, about = "Command-line console for the Aquesa device telemetry API")]
struct Args {
    /// Base URL of the telemetry backend
    #[arg(long, global = true, env = "AQUESA_BASE_URL", default_value = "http://127.0.0.1:8000")]
    base_url: String,

    /// HTTP timeout in seconds
    #[arg(long, global = true, env = "AQUESA_TIMEOUT_SECS", default_value_t = 30)]
    timeout_secs: u64,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Query records for a device and browse them page by page
    Data {
        #[arg(long)]
        device_id: String,
        /// Start of the range as YYYY-MM-DD HH:mm (default: 24 hours ago)
        #[arg(long)]
        start: Option<String>,
        /// End of the range as YYYY-MM-DD HH:mm (default: now)
        #[arg(long)]
        end: Option<String>,
        /// Records per page
        #[arg(long, default_value_t = 100, value_parser = clap::value_parser!(u64).range(1..))]
        page_size: u64,
    },
    /// Render the hourly consumption chart for a device
    Chart {
        #[arg(long)]
        device_id: String,
        /// Start of the range as YYYY-MM-DD HH:mm (default: 24 hours ago)
        #[arg(long)]
        start: Option<String>,
        /// End of the range as YYYY-MM-DD HH:mm (default: now)
        #[arg(long)]
        end: Option<String>,
        /// Where to store the PNG
        #[arg(long)]
        output: Option<String>,
    },
    /// Find records sharing the same device id and timestamp
    Duplicates {
        #[arg(long)]
        device_id: String,
        #[arg(long)]
        start: Option<String>,
        #[arg(long)]
        end: Option<String>,
    },
    /// Find 5-minute intervals without any record
    MissingIntervals {
        #[arg(long)]
        device_id: String,
        #[arg(long)]
        start: Option<String>,
        #[arg(long)]
        end: Option<String>,
    },
    /// Check whether a single device is active
    DeviceStatus {
        #[arg(long)]
        device_id: String,
    },
    /// List the status of every device
    AllStatus {},
    /// Clear the backend status cache and re-fetch
    ClearStatusCache {},
    /// Show the battery status of a device
    Battery {
        #[arg(long)]
        device_id: String,
    },
    /// Show the daily report scheduler status
    SchedulerStatus {},
    /// Trigger a test report email, for one device or all configured ones
    SendTestEmail {
        #[arg(long)]
        device_id: Option<String>,
    },
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    if let Err(err) = run(args) {
        eprintln!("{}", err.to_string().red());
        std::process::exit(1);
    }
}

fn run(args: Args) -> Result<(), error::Error> {
    let client = api::ApiClient::new(&args.base_url, args.timeout_secs)?;
    match args.command {
        Commands::Data {
            device_id,
            start,
            end,
            page_size,
        } => data_table::run(&client, &device_id, start.as_deref(), end.as_deref(), page_size as usize),
        Commands::Chart {
            device_id,
            start,
            end,
            output,
        } => chart::run(&client, &device_id, start.as_deref(), end.as_deref(), output),
        Commands::Duplicates { device_id, start, end } => {
            duplicates::run(&client, &device_id, start.as_deref(), end.as_deref())
        }
        Commands::MissingIntervals { device_id, start, end } => {
            missing::run(&client, &device_id, start.as_deref(), end.as_deref())
        }
        Commands::DeviceStatus { device_id } => device_status::run(&client, &device_id),
        Commands::AllStatus {} => all_status::run(&client),
        Commands::ClearStatusCache {} => all_status::clear_cache(&client),
        Commands::Battery { device_id } => battery::run(&client, &device_id),
        Commands::SchedulerStatus {} => email_scheduler::status(&client),
        Commands::SendTestEmail { device_id } => email_scheduler::send_test_email(&client, device_id.as_deref()),
    }
}
