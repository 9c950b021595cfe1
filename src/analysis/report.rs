use std::fmt;

use serde::Serialize;

use crate::config::ANALYSIS;
use crate::domain::CandleType;
use crate::models::Table;
use crate::utils::maths_utils::mean_defined;

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct SummaryReport {
    pub bullish_days: usize,
    pub bearish_days: usize,
    /// Mean of the defined daily returns (percent)
    pub avg_daily_return: Option<f64>,
    pub template_questions: Vec<String>,
}

pub fn build_report(table: &Table) -> SummaryReport {
    let count_type = |wanted: CandleType| {
        table
            .iter()
            .filter(|row| row.candle().get_type() == wanted)
            .count()
    };

    SummaryReport {
        bullish_days: count_type(CandleType::Bullish),
        bearish_days: count_type(CandleType::Bearish),
        avg_daily_return: mean_defined(table.iter().map(|row| row.daily_return)),
        template_questions: ANALYSIS
            .report
            .template_questions
            .iter()
            .map(|q| q.to_string())
            .collect(),
    }
}

impl fmt::Display for SummaryReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Bullish days: {}", self.bullish_days)?;
        writeln!(f, "Bearish days: {}", self.bearish_days)?;
        match self.avg_daily_return {
            Some(avg) => writeln!(f, "Avg daily return (%): {:.2}", avg)?,
            None => writeln!(f, "Avg daily return (%): n/a")?,
        }
        writeln!(f)?;
        writeln!(f, "Template questions for chat:")?;
        for question in &self.template_questions {
            writeln!(f, "  - {}", question)?;
        }
        Ok(())
    }
}
