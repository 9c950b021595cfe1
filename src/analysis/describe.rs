//! Per-column descriptive statistics, the tabular context handed to chat.

use std::collections::BTreeMap;

use serde::Serialize;
use statrs::statistics::Statistics;

use crate::models::{Row, Table};
use crate::utils::maths_utils::{get_min_max, linear_quantile};

#[derive(Serialize, Debug, Clone, Default, PartialEq)]
pub struct ColumnSummary {
    pub count: usize,
    pub mean: Option<f64>,
    /// Sample standard deviation
    pub std: Option<f64>,
    pub min: Option<f64>,
    #[serde(rename = "25%")]
    pub q25: Option<f64>,
    #[serde(rename = "50%")]
    pub median: Option<f64>,
    #[serde(rename = "75%")]
    pub q75: Option<f64>,
    pub max: Option<f64>,
}

#[derive(Serialize, Debug, Clone, Default, PartialEq)]
pub struct TableSummary {
    pub rows: usize,
    pub columns: BTreeMap<String, ColumnSummary>,
}

type Extractor = fn(&Row) -> Option<f64>;

const NUMERIC_COLUMNS: [(&str, Extractor); 10] = [
    ("open", |r| Some(r.open)),
    ("high", |r| Some(r.high)),
    ("low", |r| Some(r.low)),
    ("close", |r| Some(r.close)),
    ("support_min", |r| Some(r.support_min)),
    ("support_max", |r| Some(r.support_max)),
    ("resistance_min", |r| Some(r.resistance_min)),
    ("resistance_max", |r| Some(r.resistance_max)),
    ("daily_return", |r| r.daily_return),
    ("moving_average_20", |r| r.moving_average_20),
];

fn summarize(mut values: Vec<f64>) -> ColumnSummary {
    let Some((min, max)) = get_min_max(&values) else {
        return ColumnSummary::default();
    };
    let count = values.len();
    let mean = Statistics::mean(values.iter());
    let std = (count > 1).then(|| Statistics::std_dev(values.iter()));

    values.sort_by(f64::total_cmp);
    ColumnSummary {
        count,
        mean: Some(mean),
        std,
        min: Some(min),
        q25: linear_quantile(&values, 0.25),
        median: linear_quantile(&values, 0.5),
        q75: linear_quantile(&values, 0.75),
        max: Some(max),
    }
}

/// Undefined values are skipped, so `count` can differ per column.
pub fn describe(table: &Table) -> TableSummary {
    let columns = NUMERIC_COLUMNS
        .iter()
        .map(|(name, extract)| {
            let values: Vec<f64> = table.iter().filter_map(extract).collect();
            (name.to_string(), summarize(values))
        })
        .collect();

    TableSummary {
        rows: table.len(),
        columns,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::table::tests::{day, sample_row};

    fn approx_eq(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn summarizes_close_column() {
        let rows: Vec<_> = (0..3).map(|d| sample_row(day(d), 1.0 + d as f64)).collect();
        let summary = describe(&Table::from_sorted_rows(rows));
        assert_eq!(summary.rows, 3);

        let close = &summary.columns["close"];
        assert_eq!(close.count, 3);
        assert!(approx_eq(close.mean.unwrap(), 2.0));
        assert!(approx_eq(close.std.unwrap(), 1.0));
        assert_eq!(close.min, Some(1.0));
        assert!(approx_eq(close.median.unwrap(), 2.0));
        assert_eq!(close.max, Some(3.0));
    }

    #[test]
    fn quartiles_interpolate_linearly() {
        let rows: Vec<_> = (0..4).map(|d| sample_row(day(d), 1.0 + d as f64)).collect();
        let close = &describe(&Table::from_sorted_rows(rows)).columns["close"];
        assert!(approx_eq(close.q25.unwrap(), 1.75));
        assert!(approx_eq(close.median.unwrap(), 2.5));
        assert!(approx_eq(close.q75.unwrap(), 3.25));
    }

    #[test]
    fn undefined_values_are_skipped() {
        let mut rows: Vec<_> = (0..3).map(|d| sample_row(day(d), 10.0)).collect();
        rows[1].daily_return = Some(0.0);
        rows[2].daily_return = Some(4.0);
        let summary = describe(&Table::from_sorted_rows(rows));

        let returns = &summary.columns["daily_return"];
        assert_eq!(returns.count, 2);
        assert!(approx_eq(returns.mean.unwrap(), 2.0));

        let averages = &summary.columns["moving_average_20"];
        assert_eq!(averages, &ColumnSummary::default());
    }

    #[test]
    fn single_value_has_no_std() {
        let summary = describe(&Table::from_sorted_rows(vec![sample_row(day(0), 5.0)]));
        assert_eq!(summary.columns["close"].std, None);
        assert_eq!(summary.columns["close"].mean, Some(5.0));
    }

    #[test]
    fn serializes_quartile_keys() {
        let summary = describe(&Table::from_sorted_rows(vec![sample_row(day(0), 5.0)]));
        let json = serde_json::to_value(&summary).unwrap();
        assert_eq!(json["columns"]["close"]["50%"], 5.0);
        assert!(json["columns"]["close"].get("q25").is_none());
    }
}
