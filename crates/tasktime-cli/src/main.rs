mod logger;

use std::io::Read;
use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::{DateTime, Local, TimeZone, Utc};
use chrono_tz::Tz;
use clap::{Parser, Subcommand, ValueEnum};
use tasktime::{
    coerce, duration, format_clock_time_in, parse_timezone, summarize, weekday_in, weekday_name,
    weekday_semantic_at, ExportModel, TimeEntrySummary,
};

#[derive(Parser, Debug)]
#[command(name = "tasktime", version, about = "Elapsed-time and date formatting for tracked time")]
struct Cli {
    /// Log debug output to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Elapsed time between two timestamps (zero if END is missing)
    Duration {
        start: String,
        end: Option<String>,
        #[arg(long, value_enum, default_value_t = Notation::Clock)]
        format: Notation,
    },
    /// Day of the week a timestamp falls on
    Weekday {
        date: String,
        /// Say Yesterday/Today/Tomorrow when the date is next to today
        #[arg(long)]
        relative: bool,
        /// IANA time zone (defaults to the system zone)
        #[arg(long)]
        tz: Option<String>,
        /// Reference "now" for --relative (defaults to the current time)
        #[arg(long)]
        now: Option<String>,
    },
    /// Time of day of a timestamp as HH:MM:SS
    Clock {
        date: String,
        /// IANA time zone (defaults to the system zone)
        #[arg(long)]
        tz: Option<String>,
    },
    /// Per-task totals from an export file ({"tasks": [...], "timeEntries": [...]})
    Summary {
        /// Export file; reads stdin when omitted
        file: Option<PathBuf>,
        /// Print a plain-text table instead of JSON
        #[arg(long)]
        text: bool,
    },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum Notation {
    Clock,
    Human,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    logger::init_cli_logger(cli.verbose);
    tracing::debug!(?cli, "parsed arguments");

    let output = run(cli.command)?;
    println!("{output}");
    Ok(())
}

fn run(command: Command) -> Result<String> {
    match command {
        Command::Duration { start, end, format } => {
            let elapsed = duration(start.as_str(), end.as_deref());
            Ok(match format {
                Notation::Clock => elapsed.clock(),
                Notation::Human => elapsed.human(),
            })
        }
        Command::Weekday {
            date,
            relative,
            tz,
            now,
        } => {
            let now = now.as_deref().map_or_else(Utc::now, coerce);
            Ok(match zone(tz.as_deref())? {
                Some(tz) => weekday_label(&date, relative, now, &tz),
                None => weekday_label(&date, relative, now, &Local),
            })
        }
        Command::Clock { date, tz } => Ok(match zone(tz.as_deref())? {
            Some(tz) => format_clock_time_in(date.as_str(), &tz),
            None => format_clock_time_in(date.as_str(), &Local),
        }),
        Command::Summary { file, text } => {
            let input = read_input(file.as_ref())?;
            let export: ExportModel =
                serde_json::from_str(&input).context("failed to parse export JSON")?;
            let summary = summarize(&export.time_entries, &export.tasks)?;
            if text {
                Ok(render_text(&summary))
            } else {
                serde_json::to_string_pretty(&summary).context("failed to serialize summary")
            }
        }
    }
}

fn zone(name: Option<&str>) -> Result<Option<Tz>> {
    Ok(name.map(parse_timezone).transpose()?)
}

fn weekday_label<Z: TimeZone>(date: &str, relative: bool, now: DateTime<Utc>, tz: &Z) -> String {
    if relative {
        weekday_semantic_at(date, now, tz).to_string()
    } else {
        weekday_name(weekday_in(date, tz)).to_string()
    }
}

fn read_input(file: Option<&PathBuf>) -> Result<String> {
    match file {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display())),
        None => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .context("failed to read stdin")?;
            Ok(buf)
        }
    }
}

fn render_text(summary: &TimeEntrySummary) -> String {
    let width = summary
        .lines
        .iter()
        .map(|line| line.name.chars().count())
        .max()
        .unwrap_or(0)
        .max("Total".len());

    let mut out: Vec<String> = summary
        .lines
        .iter()
        .map(|line| format!("{:<width$}  {}", line.name, line.duration))
        .collect();
    out.push(format!("{:<width$}  {}", "Total", summary.total));
    out.join("\n")
}
