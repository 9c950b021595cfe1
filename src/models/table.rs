use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::domain::{Candle, Direction};
use crate::error::{DashError, Result};

// ============================================================================
// Row: one trading day with its derived analytic columns
// ============================================================================

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Row {
    pub date: NaiveDate,

    // Prices
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,

    // Zones (never empty)
    pub support: Vec<f64>,
    pub resistance: Vec<f64>,
    pub support_min: f64,
    pub support_max: f64,
    pub resistance_min: f64,
    pub resistance_max: f64,

    pub direction: Direction,

    // Derived. `None` where the value is undefined (not zero)
    pub daily_return: Option<f64>,
    pub moving_average_20: Option<f64>,
}

impl Row {
    pub fn candle(&self) -> Candle {
        Candle::new(self.open, self.high, self.low, self.close)
    }
}

// ============================================================================
// Table: date-ordered rows, no duplicate dates
// ============================================================================

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct Table {
    rows: Vec<Row>,
}

impl Table {
    /// Wraps rows that are already sorted by date with no duplicates.
    pub(crate) fn from_sorted_rows(rows: Vec<Row>) -> Self {
        debug_assert!(rows.windows(2).all(|w| w[0].date < w[1].date));
        Self { rows }
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Row> {
        self.rows.iter()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn first_date(&self) -> Option<NaiveDate> {
        self.rows.first().map(|r| r.date)
    }

    pub fn last_date(&self) -> Option<NaiveDate> {
        self.rows.last().map(|r| r.date)
    }

    /// Half-open index range `[start, end)` of rows whose date lies in
    /// `[start_date, end_date]`. Rows are sorted so this is two binary searches.
    pub fn indices_by_date_range(&self, start_date: NaiveDate, end_date: NaiveDate) -> (usize, usize) {
        let start = self.rows.partition_point(|r| r.date < start_date);
        let end = self.rows.partition_point(|r| r.date <= end_date);
        (start, end.max(start))
    }

    /// Inclusive calendar-date filter. Derived columns keep the values they
    /// were given on the full table.
    pub fn filter_date_range(&self, start_date: NaiveDate, end_date: NaiveDate) -> Result<Table> {
        if start_date > end_date {
            return Err(DashError::Validation(format!(
                "date range start {} is after end {}",
                start_date, end_date
            )));
        }
        let (start, end) = self.indices_by_date_range(start_date, end_date);
        Ok(Table {
            rows: self.rows[start..end].to_vec(),
        })
    }
}

impl<'a> IntoIterator for &'a Table {
    type Item = &'a Row;
    type IntoIter = std::slice::Iter<'a, Row>;

    fn into_iter(self) -> Self::IntoIter {
        self.rows.iter()
    }
}
