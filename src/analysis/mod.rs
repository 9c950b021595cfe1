// Summary analytics over a prepared table
pub mod describe;
pub mod report;

pub use describe::{ColumnSummary, TableSummary, describe};
pub use report::{SummaryReport, build_report};
