#![allow(clippy::collapsible_if)]

// Core modules
pub mod analysis;
pub mod chart;
pub mod chat;
pub mod config;
pub mod data;
pub mod domain;
pub mod engine;
pub mod error;
pub mod models;
pub mod utils;

// Re-export commonly used types
pub use chart::{ChartPayload, DisplayOptions};
pub use data::{PrepareConfig, PreparedTable, prepare_csv};
pub use domain::{Candle, Direction};
pub use engine::{DashboardEvent, DashboardSession, DashboardView};
pub use error::DashError;
pub use models::{Row, Table};

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::NaiveDate;

// CLI argument parsing
use clap::{Args, Parser, Subcommand};

#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Write the chart renderer payload as JSON
    Chart {
        #[command(flatten)]
        input: InputArgs,
        #[arg(long, default_value_t = false)]
        no_moving_average: bool,
        #[arg(long, default_value_t = false)]
        no_bands: bool,
        #[arg(long, default_value_t = false)]
        no_markers: bool,
        /// Write to this file instead of stdout
        #[arg(long)]
        out: Option<PathBuf>,
    },
    /// Print the summary report
    Report {
        #[command(flatten)]
        input: InputArgs,
    },
    /// Print per-column summary statistics as JSON
    Describe {
        #[command(flatten)]
        input: InputArgs,
    },
    /// Ask questions about the data (placeholder answers)
    Ask {
        #[command(flatten)]
        input: InputArgs,
        #[arg(required = true, num_args = 1..)]
        questions: Vec<String>,
    },
}

#[derive(Args, Debug, Clone)]
pub struct InputArgs {
    /// Daily price CSV with Date, Open, High, Low, Close, Support, Resistance, Direction
    pub csv: PathBuf,
    /// First date to show (inclusive)
    #[arg(long, value_parser = parse_date_arg, requires = "end")]
    pub start: Option<NaiveDate>,
    /// Last date to show (inclusive)
    #[arg(long, value_parser = parse_date_arg, requires = "start")]
    pub end: Option<NaiveDate>,
    /// Abort on the first malformed row instead of skipping it
    #[arg(long, default_value_t = false)]
    pub strict: bool,
    /// Cache prepared tables on disk (bare flag uses the default directory)
    #[arg(long, num_args = 0..=1, default_missing_value = config::CACHE_DIR)]
    pub cache_dir: Option<PathBuf>,
}

fn parse_date_arg(text: &str) -> std::result::Result<NaiveDate, String> {
    utils::time_utils::parse_date(text).ok_or_else(|| format!("unrecognised date '{}'", text))
}

/// Loads the CSV into a fresh session and applies the date range, if any.
fn open_session(input: &InputArgs) -> Result<DashboardSession> {
    let bytes =
        fs::read(&input.csv).with_context(|| format!("Failed to read {}", input.csv.display()))?;

    let mut session = DashboardSession::default().with_prepare_config(PrepareConfig {
        skip_invalid: !input.strict,
        ..Default::default()
    });
    if let Some(dir) = &input.cache_dir {
        session = session.with_cache_dir(dir);
    }

    session
        .handle(DashboardEvent::Upload(bytes))
        .with_context(|| format!("Failed to load {}", input.csv.display()))?;

    if let Some(prepared) = session.prepared() {
        for rejection in &prepared.rejected {
            log::warn!("Skipped line {}: {}", rejection.line, rejection.error);
        }
    }

    if let (Some(start), Some(end)) = (input.start, input.end) {
        session.handle(DashboardEvent::SetDateRange(Some((start, end))))?;
    }
    Ok(session)
}

/// Runs one CLI command. Output goes to stdout, diagnostics to the log.
pub fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Command::Chart {
            input,
            no_moving_average,
            no_bands,
            no_markers,
            out,
        } => {
            let mut session = open_session(&input)?;
            let view = session.handle(DashboardEvent::SetOptions(DisplayOptions {
                show_moving_average: !no_moving_average,
                show_bands: !no_bands,
                show_markers: !no_markers,
            }))?;

            let json = serde_json::to_string_pretty(&view.payload)
                .context("Failed to serialize chart payload")?;
            match out {
                Some(path) => {
                    fs::write(&path, json)
                        .with_context(|| format!("Failed to write {}", path.display()))?;
                    log::info!(
                        "Wrote {} candles to {}",
                        view.payload.candles.len(),
                        path.display()
                    );
                }
                None => println!("{}", json),
            }
        }
        Command::Report { input } => {
            let session = open_session(&input)?;
            let view = session.current_view()?;
            println!("Rows shown: {}", view.visible_rows);
            if view.rejected_rows > 0 {
                println!("Rows rejected: {}", view.rejected_rows);
            }
            print!("{}", view.report);
        }
        Command::Describe { input } => {
            let session = open_session(&input)?;
            let summary = analysis::describe(&session.visible_table()?);
            let json = serde_json::to_string_pretty(&summary)
                .context("Failed to serialize summary statistics")?;
            println!("{}", json);
        }
        Command::Ask { input, questions } => {
            let mut session = open_session(&input)?;
            for question in questions {
                session.handle(DashboardEvent::Ask(question))?;
            }
            for exchange in session.history().entries() {
                println!("Q: {}", exchange.question);
                println!("A: {}", exchange.answer);
            }
        }
    }
    Ok(())
}
