use anyhow::{Context, Result};
use chrono::{Datelike, NaiveDate, Weekday};
use price_dash::config::{DEMO_CSV_PATH, DEMO_DAYS};
use price_dash::data::{PrepareConfig, prepare_csv};
use std::path::PathBuf;

fn main() -> Result<()> {
    build_demo_csv()
}

/// Deterministic price path: a slow drift plus two overlapping cycles.
fn demo_close(i: usize) -> f64 {
    let t = i as f64;
    200.0 + 0.15 * t + 12.0 * (t / 9.0).sin() + 4.0 * (t / 2.5).cos()
}

fn build_demo_csv() -> Result<()> {
    let output_path = PathBuf::from(DEMO_CSV_PATH);
    if let Some(parent) = output_path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
    }

    let mut writer = csv::Writer::from_path(&output_path)
        .with_context(|| format!("Failed to create {:?}", output_path))?;
    writer.write_record([
        "Date",
        "Open",
        "High",
        "Low",
        "Close",
        "Support",
        "Resistance",
        "Direction",
    ])?;

    let mut date = NaiveDate::from_ymd_opt(2023, 1, 2).context("invalid start date")?;
    let mut written = 0;
    while written < DEMO_DAYS {
        if matches!(date.weekday(), Weekday::Sat | Weekday::Sun) {
            date = date.succ_opt().context("date overflow")?;
            continue;
        }

        let open = if written == 0 { demo_close(0) - 1.0 } else { demo_close(written - 1) };
        let close = demo_close(written);
        let high = open.max(close) + 1.5;
        let low = open.min(close) - 1.5;
        let support = format!("[{:.2}, {:.2}]", close * 0.94, close * 0.96);
        let resistance = format!("[{:.2}, {:.2}]", close * 1.04, close * 1.06);
        let direction = if close > open + 2.0 {
            "LONG"
        } else if close < open - 2.0 {
            "SHORT"
        } else {
            "NONE"
        };

        writer.write_record([
            date.format("%Y-%m-%d").to_string(),
            format!("{:.2}", open),
            format!("{:.2}", high),
            format!("{:.2}", low),
            format!("{:.2}", close),
            support,
            resistance,
            direction.to_string(),
        ])?;

        written += 1;
        date = date.succ_opt().context("date overflow")?;
    }
    writer.flush()?;

    // Sanity check: the file we just wrote must load cleanly
    let bytes = std::fs::read(&output_path)?;
    let prepared = prepare_csv(bytes.as_slice(), &PrepareConfig::default())?;

    println!(
        "✅ Demo CSV written to {:?} with {} rows ({} rejected).",
        output_path,
        prepared.table.len(),
        prepared.rejected.len()
    );
    Ok(())
}
