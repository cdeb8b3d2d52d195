use std::io::{BufRead, Write};

use colored::Colorize;
use tracing::info;

use crate::api::ApiClient;
use crate::error::Error;
use crate::export;
use crate::pager::ResultPager;
use crate::table;
use crate::types::DataResponse;
use crate::validate;

/// One line of operator input in the pager session.
#[derive(Debug, Clone, PartialEq)]
pub enum PagerCommand {
    Next,
    Previous,
    Goto(i64),
    PageSize(usize),
    ExportCsv(Option<String>),
    ExportJson(Option<String>),
    ExportXlsx(Option<String>),
    Help,
    Quit,
}

/// Parses one input line. Blank lines are ignored.
pub fn parse_command(line: &str) -> Result<Option<PagerCommand>, Error> {
    let mut words = line.split_whitespace();
    let Some(head) = words.next() else {
        return Ok(None);
    };
    let arg = words.next().map(|v| v.to_owned());

    let command = match head {
        "n" | "next" => PagerCommand::Next,
        "p" | "prev" | "previous" => PagerCommand::Previous,
        "page" | "g" | "goto" => match arg.as_deref().map(str::parse) {
            Some(Ok(page)) => PagerCommand::Goto(page),
            _ => return Error::new_validation_error("Usage: page <number>"),
        },
        "size" => match arg.as_deref().map(str::parse::<usize>) {
            Some(Ok(size)) if size > 0 => PagerCommand::PageSize(size),
            _ => return Error::new_validation_error("Usage: size <positive number>"),
        },
        "csv" => PagerCommand::ExportCsv(arg),
        "json" => PagerCommand::ExportJson(arg),
        "xlsx" => PagerCommand::ExportXlsx(arg),
        "h" | "help" | "?" => PagerCommand::Help,
        "q" | "quit" | "exit" => PagerCommand::Quit,
        other => {
            if let Ok(page) = other.parse() {
                PagerCommand::Goto(page)
            } else {
                return Error::new_validation_error(format!("Unknown command {other:?}, type \"help\""));
            }
        }
    };
    Ok(Some(command))
}

/// Fetches the requested range and hands the result set to the interactive
/// session on stdin/stdout.
pub fn run(
    client: &ApiClient,
    device_id: &str,
    start: Option<&str>,
    end: Option<&str>,
    page_size: usize,
) -> Result<(), Error> {
    let (start, end) = validate::resolve_date_range(start, end)?;
    info!(device_id, %start, %end, "fetching records");
    let data = client.get_data(device_id, &start, &end)?;

    let stdin = std::io::stdin();
    let stdout = std::io::stdout();
    session(data, page_size, &mut stdin.lock(), &mut stdout.lock())
}

/// Drives the pager until the operator quits or input ends. Each command is
/// handled to completion before the next line is read; a failed command
/// prints its error and the session stays interactive.
pub fn session<R: BufRead, W: Write>(
    data: DataResponse,
    page_size: usize,
    input: &mut R,
    output: &mut W,
) -> Result<(), Error> {
    let mut pager = ResultPager::new(page_size);
    let count = data.count as usize;
    pager.load(data.records, count);

    if pager.is_empty() {
        writeln!(output, "{}", "No records found for the specified criteria.".yellow())?;
        return Ok(());
    }

    writeln!(output, "{}", format!("Successfully loaded {} records", pager.total_count()).green())?;
    paint(&pager, output)?;

    loop {
        write!(output, "> ")?;
        output.flush()?;

        let mut line = String::new();
        if input.read_line(&mut line)? == 0 {
            return Ok(());
        }
        let command = match parse_command(&line) {
            Ok(Some(command)) => command,
            Ok(None) => continue,
            Err(err) => {
                writeln!(output, "{}", err.to_string().red())?;
                continue;
            }
        };

        match command {
            PagerCommand::Next => {
                if pager.go_to_page(pager.current_page() as i64 + 1) {
                    paint(&pager, output)?;
                }
            }
            PagerCommand::Previous => {
                if pager.go_to_page(pager.current_page() as i64 - 1) {
                    paint(&pager, output)?;
                }
            }
            PagerCommand::Goto(page) => {
                if pager.go_to_page(page) {
                    paint(&pager, output)?;
                }
            }
            PagerCommand::PageSize(size) => {
                pager.set_page_size(size);
                paint(&pager, output)?;
            }
            PagerCommand::ExportCsv(path) => report_export(export::export_csv(pager.records(), path), output)?,
            PagerCommand::ExportJson(path) => report_export(export::export_json(pager.records(), path), output)?,
            PagerCommand::ExportXlsx(path) => report_export(export::export_xlsx(pager.records(), path), output)?,
            PagerCommand::Help => help(output)?,
            PagerCommand::Quit => return Ok(()),
        }
    }
}

/// Repaints the table body and the control bar only; the loaded-records
/// headline above them is printed once per fetch.
fn paint<W: Write>(pager: &ResultPager, output: &mut W) -> Result<(), Error> {
    let rows = pager
        .page_slice()
        .iter()
        .map(|record| table::format_row(record).to_vec())
        .collect::<Vec<_>>();
    table::render(output, &table::DATA_TABLE_HEADER, &rows)?;

    let (from, to) = pager.page_range();
    writeln!(
        output,
        "Showing {}-{} of {} records (page {} of {})",
        from,
        to,
        pager.total_count(),
        pager.current_page(),
        pager.total_pages(),
    )?;
    writeln!(output, "{}", table::render_controls(&pager.controls()))?;
    Ok(())
}

fn report_export<W: Write>(result: Result<String, Error>, output: &mut W) -> Result<(), Error> {
    match result {
        Ok(path) => writeln!(output, "{}", format!("Exported {path}").green())?,
        Err(err) => writeln!(output, "{}", err.to_string().yellow())?,
    }
    Ok(())
}

fn help<W: Write>(output: &mut W) -> Result<(), Error> {
    writeln!(
        output,
        "Commands:\n  \
         next, prev, page <n>  navigate\n  \
         size <n>              records per page\n  \
         csv/json/xlsx [PATH]  export the full result set\n  \
         quit                  leave the session"
    )?;
    Ok(())
}
