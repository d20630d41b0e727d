//! `slotgrid` CLI — lay out availability JSON into positioned calendar slots.
//!
//! ## Usage
//!
//! ```sh
//! # Lay out one day (JSON to stdout)
//! slotgrid layout -i availability.json --from 2026-03-16
//!
//! # A whole week in New York, 08:00-18:00, written to a file
//! slotgrid layout -i availability.json --from 2026-03-16 --to 2026-03-22 \
//!     --tz America/New_York --start-hour 8 --end-hour 18 -o week.json
//!
//! # Start from a config file, then override single settings
//! slotgrid layout -i availability.json --from 2026-03-16 --config grid.json --no-ooo-merge
//!
//! # Per-day slot counts
//! slotgrid summary -i availability.json --from 2026-03-16 --to 2026-03-22
//! ```
//!
//! Set `RUST_LOG=slot_engine=debug` (or pass `--verbose`) to see dropped
//! intervals and the inferred step for each day on stderr.

use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};
use slot_engine::{AvailabilityMap, DayLayout, DurationPolicy, GridConfig};
use std::io::{self, Read};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "slotgrid",
    version,
    about = "Calendar slot layout for weekly views"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Log layout decisions to stderr (overridden by RUST_LOG)
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Lay out each day and print the positioned slots as JSON
    Layout {
        #[command(flatten)]
        grid: GridArgs,
        /// Output file (writes to stdout if omitted)
        #[arg(short, long)]
        output: Option<String>,
    },
    /// Print per-day counts of available, unavailable, and out-of-office slots
    Summary {
        #[command(flatten)]
        grid: GridArgs,
    },
}

#[derive(Args)]
struct GridArgs {
    /// Availability JSON file keyed by YYYY-MM-DD (reads from stdin if omitted)
    #[arg(short, long)]
    input: Option<String>,
    /// First day to lay out (YYYY-MM-DD)
    #[arg(long)]
    from: NaiveDate,
    /// Last day to lay out, inclusive (defaults to --from)
    #[arg(long)]
    to: Option<NaiveDate>,
    /// Grid config JSON file; flags below override its values
    #[arg(long)]
    config: Option<String>,
    /// First visible hour
    #[arg(long)]
    start_hour: Option<u32>,
    /// End of the visible range (exclusive, up to 24)
    #[arg(long)]
    end_hour: Option<u32>,
    /// IANA display timezone (e.g. "Europe/London")
    #[arg(long)]
    tz: Option<String>,
    /// Step for days without intervals, in minutes
    #[arg(long)]
    slot_minutes: Option<u32>,
    /// Always step by this many minutes instead of inferring from the data
    #[arg(long)]
    fixed_minutes: Option<u32>,
    /// Lay out fully away days row by row instead of one merged block
    #[arg(long)]
    no_ooo_merge: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Commands::Layout { grid, output } => {
            let days = run_layout(&grid)?;
            let json = serde_json::to_string_pretty(&days)?;
            write_output(output.as_deref(), &json)?;
        }
        Commands::Summary { grid } => {
            let days = run_layout(&grid)?;
            for day in &days {
                let summary = slot_engine::summarize(day);
                println!(
                    "{}  available: {:>3}  unavailable: {:>3}  out-of-office: {:>1}",
                    day.date, summary.available, summary.unavailable, summary.out_of_office
                );
            }
        }
    }

    Ok(())
}

fn init_logging(verbose: bool) {
    let fallback = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn run_layout(args: &GridArgs) -> Result<Vec<DayLayout>> {
    let config = build_config(args)?;
    let json = read_input(args.input.as_deref())?;
    let map: AvailabilityMap =
        serde_json::from_str(&json).context("Failed to parse availability JSON")?;

    let last = args.to.unwrap_or(args.from);
    let days = config
        .layout_range(&map, args.from, last)
        .context("Failed to lay out availability")?;
    info!(
        from = %args.from,
        to = %last,
        timezone = %config.timezone,
        days = days.len(),
        "laid out availability"
    );
    Ok(days)
}

/// Load the config file (or defaults) and apply flag overrides on top.
fn build_config(args: &GridArgs) -> Result<GridConfig> {
    let mut config = match args.config.as_deref() {
        Some(path) => {
            let raw = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read config file: {}", path))?;
            GridConfig::from_json_str(&raw)
                .with_context(|| format!("Invalid config file: {}", path))?
        }
        None => GridConfig::default(),
    };

    if let Some(hour) = args.start_hour {
        config.start_hour = hour;
    }
    if let Some(hour) = args.end_hour {
        config.end_hour = hour;
    }
    if let Some(tz) = &args.tz {
        config.timezone = tz.clone();
    }
    if let Some(minutes) = args.slot_minutes {
        config.layout.default_slot_minutes = minutes;
    }
    if let Some(minutes) = args.fixed_minutes {
        config.layout.duration_policy = DurationPolicy::Fixed { minutes };
    }
    if args.no_ooo_merge {
        config.layout.enable_out_of_office_merging = false;
    }

    config.validate().context("Invalid grid settings")?;
    Ok(config)
}

fn read_input(path: Option<&str>) -> Result<String> {
    match path {
        Some(path) => {
            std::fs::read_to_string(path).with_context(|| format!("Failed to read file: {}", path))
        }
        None => {
            let mut buf = String::new();
            io::stdin()
                .read_to_string(&mut buf)
                .context("Failed to read from stdin")?;
            Ok(buf)
        }
    }
}

/// Write `content` plus a trailing newline, so a file and stdout get the same bytes.
fn write_output(path: Option<&str>, content: &str) -> Result<()> {
    let line = format!("{}\n", content);
    match path {
        Some(path) => {
            std::fs::write(path, line).with_context(|| format!("Failed to write file: {}", path))?;
        }
        None => {
            print!("{}", line);
        }
    }
    Ok(())
}
