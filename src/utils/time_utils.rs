use chrono::{Local, NaiveDate, NaiveDateTime};

pub struct TimeUtils;

impl TimeUtils {
    pub const MS_IN_S: i64 = 1000;
    /// Calendar date format the chart renderer expects (ISO 8601)
    pub const STANDARD_TIME_FORMAT: &str = "%Y-%m-%d";

    /// Tried in order. Ambiguous numeric dates read month-first; day-first only
    /// matches when the month-first reading is impossible (e.g. "14/03/2023").
    const DATE_FORMATS: [&str; 6] = [
        "%Y-%m-%d", "%Y/%m/%d", "%m/%d/%Y", "%m-%d-%Y", "%d/%m/%Y", "%d-%m-%Y",
    ];
    const DATETIME_FORMATS: [&str; 4] = [
        "%Y-%m-%d %H:%M:%S",
        "%Y-%m-%d %H:%M:%S%.f",
        "%Y-%m-%dT%H:%M:%S",
        "%Y-%m-%dT%H:%M:%S%.f",
    ];
}

/// Parse a calendar date, accepting a handful of common layouts.
/// Time of day (if present) is dropped.
pub fn parse_date(text: &str) -> Option<NaiveDate> {
    let text = text.trim();
    TimeUtils::DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(text, fmt).ok())
        .or_else(|| {
            TimeUtils::DATETIME_FORMATS
                .iter()
                .find_map(|fmt| NaiveDateTime::parse_from_str(text, fmt).ok())
                .map(|dt| dt.date())
        })
}

pub fn format_date(date: NaiveDate) -> String {
    date.format(TimeUtils::STANDARD_TIME_FORMAT).to_string()
}

pub fn local_now_as_timestamp_ms() -> i64 {
    let now_local = Local::now();
    now_local.timestamp_millis()
}

pub fn how_many_seconds_ago(past_timestamp_ms: i64) -> i64 {
    // How many seconds ago was the event described by `past_timestamp_ms` ?
    let now_timestamp_ms = local_now_as_timestamp_ms();
    (now_timestamp_ms - past_timestamp_ms) / TimeUtils::MS_IN_S
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_common_layouts() {
        let expected = NaiveDate::from_ymd_opt(2023, 3, 14).unwrap();
        assert_eq!(parse_date("2023-03-14"), Some(expected));
        assert_eq!(parse_date(" 2023/03/14 "), Some(expected));
        assert_eq!(parse_date("14/03/2023"), Some(expected));
        assert_eq!(parse_date("2023-03-14 15:30:00"), Some(expected));
        assert_eq!(parse_date("2023-03-14T09:00:00"), Some(expected));
        assert_eq!(parse_date("yesterday"), None);
        assert_eq!(parse_date(""), None);
    }

    #[test]
    fn ambiguous_numeric_dates_are_month_first() {
        let march_4 = NaiveDate::from_ymd_opt(2023, 3, 4).unwrap();
        assert_eq!(parse_date("03/04/2023"), Some(march_4));
        assert_eq!(parse_date("03-04-2023"), Some(march_4));
        assert_eq!(
            parse_date("25-12-2023"),
            NaiveDate::from_ymd_opt(2023, 12, 25)
        );
    }

    #[test]
    fn formats_iso_calendar_date() {
        let date = NaiveDate::from_ymd_opt(2024, 1, 5).unwrap();
        assert_eq!(format_date(date), "2024-01-05");
    }
}
