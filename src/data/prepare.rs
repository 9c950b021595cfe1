use std::io::Read;

use csv::{ReaderBuilder, StringRecord, Trim};
use serde::{Deserialize, Serialize};

#[cfg(debug_assertions)]
use crate::config::debug::{PRINT_DIRECTION_COERCION, PRINT_PREPARE_SUMMARY, PRINT_ROW_REJECTIONS};
use crate::config::MOVING_AVERAGE_WINDOW;
use crate::data::levels::parse_levels;
use crate::domain::{Candle, Direction};
use crate::error::{DashError, Result};
use crate::models::{Row, Table};
use crate::utils::maths_utils::{get_min_max, pct_change, trailing_mean};
use crate::utils::time_utils::parse_date;

/// Header names every input file must carry.
pub const REQUIRED_COLUMNS: [&str; 8] = [
    "Date",
    "Open",
    "High",
    "Low",
    "Close",
    "Support",
    "Resistance",
    "Direction",
];

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PrepareConfig {
    /// Reject malformed rows and carry on (`true`), or abort on the first one.
    pub skip_invalid: bool,
    pub moving_average_window: usize,
}

impl Default for PrepareConfig {
    fn default() -> Self {
        Self {
            skip_invalid: true,
            moving_average_window: MOVING_AVERAGE_WINDOW,
        }
    }
}

/// A row that was left out of the table, with the 1-based input line it came from.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct RowRejection {
    pub line: u64,
    pub error: DashError,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct PreparedTable {
    pub table: Table,
    pub rejected: Vec<RowRejection>,
}

struct ColumnIndex {
    date: usize,
    open: usize,
    high: usize,
    low: usize,
    close: usize,
    support: usize,
    resistance: usize,
    direction: usize,
}

impl ColumnIndex {
    fn locate(headers: &StringRecord) -> Result<Self> {
        let position = |name: &str| headers.iter().position(|h| h == name);

        let missing: Vec<&str> = REQUIRED_COLUMNS
            .iter()
            .copied()
            .filter(|name| position(name).is_none())
            .collect();
        if !missing.is_empty() {
            return Err(DashError::Format(format!(
                "missing required column(s): {}",
                missing.join(", ")
            )));
        }

        // All present, checked above
        let idx = |name: &str| position(name).unwrap_or_default();
        Ok(Self {
            date: idx("Date"),
            open: idx("Open"),
            high: idx("High"),
            low: idx("Low"),
            close: idx("Close"),
            support: idx("Support"),
            resistance: idx("Resistance"),
            direction: idx("Direction"),
        })
    }

    fn parse_row(&self, record: &StringRecord) -> Result<ParsedRow> {
        let cell = |i: usize| record.get(i).unwrap_or("");

        let date = parse_date(cell(self.date))
            .ok_or_else(|| DashError::Format(format!("unparseable date '{}'", cell(self.date))))?;

        let candle = Candle::new(
            parse_price("Open", cell(self.open))?,
            parse_price("High", cell(self.high))?,
            parse_price("Low", cell(self.low))?,
            parse_price("Close", cell(self.close))?,
        );
        candle.check_consistency().map_err(DashError::Validation)?;

        let support = Zone::parse("Support", cell(self.support))?;
        let resistance = Zone::parse("Resistance", cell(self.resistance))?;

        let direction_cell = cell(self.direction);
        #[cfg(debug_assertions)]
        if PRINT_DIRECTION_COERCION
            && !direction_cell.trim().is_empty()
            && !Direction::is_recognised(direction_cell)
        {
            log::debug!("Direction '{}' on {} treated as NONE", direction_cell, date);
        }

        Ok(ParsedRow {
            date,
            candle,
            support,
            resistance,
            direction: Direction::from_cell(direction_cell),
        })
    }
}

struct Zone {
    levels: Vec<f64>,
    min: f64,
    max: f64,
}

impl Zone {
    fn parse(column: &str, cell: &str) -> Result<Self> {
        let levels = parse_levels(cell)?;
        let (min, max) = get_min_max(&levels)
            .ok_or_else(|| DashError::Validation(format!("{} set is empty", column)))?;
        Ok(Self { levels, min, max })
    }
}

struct ParsedRow {
    date: chrono::NaiveDate,
    candle: Candle,
    support: Zone,
    resistance: Zone,
    direction: Direction,
}

impl ParsedRow {
    fn into_row(self, daily_return: Option<f64>, moving_average_20: Option<f64>) -> Row {
        Row {
            date: self.date,
            open: self.candle.open_price,
            high: self.candle.high_price,
            low: self.candle.low_price,
            close: self.candle.close_price,
            support_min: self.support.min,
            support_max: self.support.max,
            support: self.support.levels,
            resistance_min: self.resistance.min,
            resistance_max: self.resistance.max,
            resistance: self.resistance.levels,
            direction: self.direction,
            daily_return,
            moving_average_20,
        }
    }
}

fn parse_price(column: &str, cell: &str) -> Result<f64> {
    cell.trim()
        .parse::<f64>()
        .map_err(|_| DashError::Format(format!("{} value '{}' is not a number", column, cell)))
}

fn reject(
    rejected: &mut Vec<RowRejection>,
    line: u64,
    error: DashError,
    config: &PrepareConfig,
) -> Result<()> {
    if !config.skip_invalid {
        return Err(error.at_line(line));
    }
    #[cfg(debug_assertions)]
    if PRINT_ROW_REJECTIONS {
        log::debug!("Rejecting line {}: {}", line, error);
    }
    rejected.push(RowRejection { line, error });
    Ok(())
}

/// Reads a daily price CSV and produces the normalized, date-sorted table with
/// its derived columns.
///
/// A missing required column aborts the load. Row-level problems (bad date,
/// bad price, malformed level list, empty level set, inconsistent OHLC,
/// duplicate date) reject the row, or abort when `skip_invalid` is off.
/// Derived columns are computed over the kept rows only.
pub fn prepare_csv<R: Read>(input: R, config: &PrepareConfig) -> Result<PreparedTable> {
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .trim(Trim::All)
        .from_reader(input);

    let headers = reader
        .headers()
        .map_err(|e| DashError::Format(format!("unreadable header: {}", e)))?
        .clone();
    let columns = ColumnIndex::locate(&headers)?;

    let mut parsed: Vec<(u64, ParsedRow)> = Vec::new();
    let mut rejected: Vec<RowRejection> = Vec::new();

    for (i, record) in reader.records().enumerate() {
        // Header is line 1
        let fallback_line = i as u64 + 2;
        let line = match &record {
            Ok(rec) => rec.position().map_or(fallback_line, |p| p.line()),
            Err(e) => e.position().map_or(fallback_line, |p| p.line()),
        };

        let outcome = record
            .map_err(|e| DashError::Format(format!("unreadable record: {}", e)))
            .and_then(|rec| columns.parse_row(&rec));

        match outcome {
            Ok(row) => parsed.push((line, row)),
            Err(error) => reject(&mut rejected, line, error, config)?,
        }
    }

    // Stable sort: among equal dates the earliest line wins
    parsed.sort_by_key(|(_, row)| row.date);

    let mut kept: Vec<ParsedRow> = Vec::with_capacity(parsed.len());
    for (line, row) in parsed {
        if kept.last().is_some_and(|prev| prev.date == row.date) {
            let error = DashError::Validation(format!("duplicate date {}", row.date));
            reject(&mut rejected, line, error, config)?;
            continue;
        }
        kept.push(row);
    }
    rejected.sort_by_key(|r| r.line);

    let closes: Vec<f64> = kept.iter().map(|r| r.candle.close_price).collect();
    let daily_returns = pct_change(&closes);
    let moving_averages = trailing_mean(&closes, config.moving_average_window);

    let rows: Vec<Row> = kept
        .into_iter()
        .zip(daily_returns)
        .zip(moving_averages)
        .map(|((row, daily_return), moving_average)| row.into_row(daily_return, moving_average))
        .collect();

    if !rejected.is_empty() {
        log::warn!("Rejected {} malformed row(s)", rejected.len());
    }

    let table = Table::from_sorted_rows(rows);

    #[cfg(debug_assertions)]
    if PRINT_PREPARE_SUMMARY {
        log::info!(
            "Prepared {} rows from {} to {}",
            table.len(),
            table.first_date().map(|d| d.to_string()).unwrap_or_default(),
            table.last_date().map(|d| d.to_string()).unwrap_or_default()
        );
    }

    Ok(PreparedTable { table, rejected })
}
