use chrono::NaiveDate;
use clap::Parser;
use price_dash::chart::{self, BandKind, MarkerPosition};
use price_dash::{Cli, DashError, DisplayOptions, PrepareConfig, prepare_csv, run};
use tempfile::tempdir;

fn daily_csv(days: usize) -> String {
    let mut text = String::from("Date,Open,High,Low,Close,Support,Resistance,Direction\n");
    let mut date = NaiveDate::from_ymd_opt(2023, 1, 2).unwrap();
    let directions = ["LONG", "SHORT", "NONE", "", "hold"];
    for i in 0..days {
        let close = 100.0 + (i % 7) as f64;
        let open = close - 0.5;
        text.push_str(&format!(
            "{},{},{},{},{},\"[95, 97.5]\",\"[120,125]\",{}\n",
            date.format("%Y-%m-%d"),
            open,
            close + 1.0,
            open - 1.0,
            close,
            directions[i % directions.len()]
        ));
        date = date.succ_opt().unwrap();
    }
    text
}

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

#[test]
fn prepare_filter_build_end_to_end() {
    let csv = daily_csv(30);
    let prepared = prepare_csv(csv.as_bytes(), &PrepareConfig::default()).unwrap();
    assert_eq!(prepared.table.len(), 30);
    assert!(prepared.rejected.is_empty());

    let table = prepared.table;
    assert!(table.rows().windows(2).all(|w| w[0].date < w[1].date));
    assert_eq!(table.rows()[18].moving_average_20, None);
    assert!(table.rows()[19].moving_average_20.is_some());

    let window = table
        .filter_date_range(date(2023, 1, 20), date(2023, 1, 31))
        .unwrap();
    let payload = chart::build(&window, &DisplayOptions::default());

    assert_eq!(payload.candles.len(), window.len());
    assert_eq!(payload.candles[0].time, "2023-01-20");
    // Row 19 (2023-01-21) is the first with a full window
    let line = payload.moving_average.as_ref().unwrap();
    assert_eq!(line[0].time, "2023-01-21");
    assert_eq!(line.len(), window.len() - 1);

    let support = payload.band(BandKind::Support).unwrap();
    assert!(support.data.iter().all(|p| p.low == 95.0 && p.high == 97.5));
    let resistance = payload.band(BandKind::Resistance).unwrap();
    assert!(resistance.data.iter().all(|p| p.low == 120.0 && p.high == 125.0));

    // "hold" and "" fall back to the neutral marker
    let markers = payload.markers.as_ref().unwrap();
    let neutral = markers
        .iter()
        .filter(|m| m.position == MarkerPosition::InBar)
        .count();
    assert!(neutral > 0);
    assert_eq!(markers.len(), window.len());
}

#[test]
fn empty_range_builds_empty_payload() {
    let csv = daily_csv(5);
    let table = prepare_csv(csv.as_bytes(), &PrepareConfig::default())
        .unwrap()
        .table;
    let empty = table
        .filter_date_range(date(2030, 1, 1), date(2030, 12, 31))
        .unwrap();
    assert!(empty.is_empty());

    let payload = chart::build(&empty, &DisplayOptions::default());
    assert!(payload.candles.is_empty());
    assert!(payload.bands.iter().all(|b| b.data.is_empty()));
}

#[test]
fn inverted_range_is_rejected() {
    let csv = daily_csv(5);
    let table = prepare_csv(csv.as_bytes(), &PrepareConfig::default())
        .unwrap()
        .table;
    let err = table
        .filter_date_range(date(2023, 1, 5), date(2023, 1, 2))
        .unwrap_err();
    assert!(matches!(err, DashError::Validation(_)));
}

#[test]
fn cli_chart_writes_payload_file() {
    let dir = tempdir().unwrap();
    let csv_path = dir.path().join("prices.csv");
    let out_path = dir.path().join("payload.json");
    std::fs::write(&csv_path, daily_csv(25)).unwrap();

    let cli = Cli::parse_from([
        "price-dash",
        "chart",
        csv_path.to_str().unwrap(),
        "--start",
        "2023-01-10",
        "--end",
        "2023-01-14",
        "--no-markers",
        "--out",
        out_path.to_str().unwrap(),
    ]);
    run(cli).unwrap();

    let json: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&out_path).unwrap()).unwrap();
    assert_eq!(json["candles"].as_array().unwrap().len(), 5);
    assert_eq!(json["candles"][0]["time"], "2023-01-10");
    assert!(json.get("markers").is_none());
    assert_eq!(json["bands"].as_array().unwrap().len(), 2);
}

#[test]
fn cli_strict_mode_fails_on_bad_row() {
    let dir = tempdir().unwrap();
    let csv_path = dir.path().join("prices.csv");
    let mut csv = daily_csv(3);
    csv.push_str("2023-02-01,100,101,99,100,\"100,105\",[120],LONG\n");
    std::fs::write(&csv_path, csv).unwrap();

    let lenient = Cli::parse_from(["price-dash", "report", csv_path.to_str().unwrap()]);
    assert!(run(lenient).is_ok());

    let strict = Cli::parse_from([
        "price-dash",
        "report",
        "--strict",
        csv_path.to_str().unwrap(),
    ]);
    let err = run(strict).unwrap_err();
    let root = err.downcast_ref::<DashError>().unwrap();
    assert!(matches!(root, DashError::Parse(_)));
}
