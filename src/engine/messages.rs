use chrono::NaiveDate;

use crate::analysis::SummaryReport;
use crate::chart::{ChartPayload, DisplayOptions};
use crate::chat::ChatExchange;

/// One user interaction. Every event triggers a full rerun of the pipeline.
#[derive(Debug, Clone)]
pub enum DashboardEvent {
    /// Raw bytes of an uploaded CSV
    Upload(Vec<u8>),
    SetOptions(DisplayOptions),
    /// Inclusive `(start, end)`; `None` shows everything
    SetDateRange(Option<(NaiveDate, NaiveDate)>),
    Ask(String),
}

/// What the front end renders after an event.
#[derive(Debug, Clone)]
pub struct DashboardView {
    pub payload: ChartPayload,
    pub report: SummaryReport,
    /// Rows visible after the date filter
    pub visible_rows: usize,
    /// Rows dropped while preparing the upload
    pub rejected_rows: usize,
    /// Set only in response to `Ask`
    pub answer: Option<ChatExchange>,
}
