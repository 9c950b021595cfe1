// Chart payload construction
pub mod layers;
pub mod payload;

use serde::{Deserialize, Serialize};

use crate::models::Table;
use crate::utils::time_utils::format_date;

use layers::{BandLayer, CandleLayer, ChartLayer, LayerContext, MarkerLayer, MovingAverageLayer};

pub use payload::{
    BandKind, BandPoint, BandSeries, CandleRecord, ChartLayout, ChartPayload, LinePoint, Marker,
    MarkerPosition, MarkerShape,
};

/// Display toggles. Candles are always drawn.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct DisplayOptions {
    pub show_moving_average: bool,
    pub show_bands: bool,
    pub show_markers: bool,
}

impl Default for DisplayOptions {
    fn default() -> Self {
        Self {
            show_moving_average: true,
            show_bands: true,
            show_markers: true,
        }
    }
}

/// Builds the renderer payload for `table`. Pure; series follow the table's
/// date order and an empty table yields empty series.
pub fn build(table: &Table, options: &DisplayOptions) -> ChartPayload {
    let times: Vec<String> = table.iter().map(|row| format_date(row.date)).collect();
    let ctx = LayerContext {
        table,
        options,
        times: &times,
    };

    let layers: [&dyn ChartLayer; 4] = [&CandleLayer, &MovingAverageLayer, &BandLayer, &MarkerLayer];

    let mut payload = ChartPayload::default();
    for layer in layers {
        layer.apply(&mut payload, &ctx);
    }
    payload
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{PrepareConfig, prepare_csv};
    use crate::domain::Direction;
    use crate::models::table::tests::{day, sample_row};
    use strum::IntoEnumIterator;

    fn table_from_rows(rows: Vec<crate::models::Row>) -> Table {
        Table::from_sorted_rows(rows)
    }

    fn three_day_table() -> Table {
        let mut rows: Vec<_> = (0..3).map(|d| sample_row(day(d), 100.0 + d as f64)).collect();
        rows[0].direction = Direction::Long;
        rows[1].direction = Direction::Short;
        rows[2].moving_average_20 = Some(101.0);
        table_from_rows(rows)
    }

    #[test]
    fn candles_always_present() {
        let options = DisplayOptions {
            show_moving_average: false,
            show_bands: false,
            show_markers: false,
        };
        let payload = build(&three_day_table(), &options);
        assert_eq!(payload.candles.len(), 3);
        assert_eq!(payload.candles[0].time, "2024-01-01");
        assert_eq!(payload.candles[2].close, 102.0);
        assert!(payload.moving_average.is_none());
        assert!(payload.bands.is_empty());
        assert!(payload.markers.is_none());
    }

    #[test]
    fn moving_average_skips_undefined_rows() {
        let payload = build(&three_day_table(), &DisplayOptions::default());
        let line = payload.moving_average.unwrap();
        assert_eq!(line.len(), 1);
        assert_eq!(line[0].time, "2024-01-03");
        assert_eq!(line[0].value, 101.0);
    }

    #[test]
    fn bands_carry_zone_bounds() {
        let payload = build(&three_day_table(), &DisplayOptions::default());
        assert_eq!(payload.bands.len(), 2);

        let support = payload.band(BandKind::Support).unwrap();
        assert_eq!(support.data[0].low, 95.0);
        assert_eq!(support.data[0].high, 97.0);
        assert_eq!(support.style.top_color, "rgba(0,255,0,0.3)");

        let resistance = payload.band(BandKind::Resistance).unwrap();
        assert_eq!(resistance.data[1].low, 104.0);
        assert_eq!(resistance.data[1].high, 106.0);
        assert_eq!(resistance.style.line_color, "rgba(255,0,0,1)");
    }

    #[test]
    fn marker_appearance_per_direction() {
        for direction in Direction::iter() {
            let (position, color, shape) = MarkerLayer::appearance(direction);
            let expected = match direction {
                Direction::Long => (MarkerPosition::BelowBar, "green", MarkerShape::ArrowUp),
                Direction::Short => (MarkerPosition::AboveBar, "red", MarkerShape::ArrowDown),
                Direction::Neutral => (MarkerPosition::InBar, "yellow", MarkerShape::Circle),
            };
            assert_eq!((position, color, shape), expected);
        }

        let markers = build(&three_day_table(), &DisplayOptions::default())
            .markers
            .unwrap();
        assert_eq!(markers.len(), 3);
        assert_eq!(markers[0].shape, MarkerShape::ArrowUp);
        assert_eq!(markers[1].color, "red");
        assert_eq!(markers[2].position, MarkerPosition::InBar);
    }

    #[test]
    fn empty_table_gives_empty_series() {
        let payload = build(&Table::default(), &DisplayOptions::default());
        assert!(payload.candles.is_empty());
        assert_eq!(payload.moving_average, Some(Vec::new()));
        assert_eq!(payload.bands.len(), 2);
        assert!(payload.bands.iter().all(|b| b.data.is_empty()));
        assert_eq!(payload.markers, Some(Vec::new()));
    }

    #[test]
    fn serializes_renderer_field_names() {
        let csv = "Date,Open,High,Low,Close,Support,Resistance,Direction\n\
            2024-02-01,100,101,99,100,\"[95,97]\",\"[110,112]\",LONG\n\
            2024-02-02,100,103,99,102,\"[95,97]\",\"[110,112]\",SHORT\n";
        let table = prepare_csv(csv.as_bytes(), &PrepareConfig::default())
            .unwrap()
            .table;
        let json = serde_json::to_value(build(&table, &DisplayOptions::default())).unwrap();

        assert_eq!(json["candles"][1]["time"], "2024-02-02");
        assert_eq!(json["candles"][1]["open"], 100.0);
        assert_eq!(json["markers"][0]["position"], "belowBar");
        assert_eq!(json["markers"][0]["shape"], "arrowUp");
        assert_eq!(json["markers"][1]["position"], "aboveBar");
        assert_eq!(json["markers"][1]["shape"], "arrowDown");
        assert_eq!(json["bands"][0]["kind"], "support");
        assert_eq!(json["bands"][0]["style"]["topColor"], "rgba(0,255,0,0.3)");
        assert_eq!(json["bands"][1]["data"][0]["low"], 110.0);
        assert_eq!(json["layout"]["backgroundColor"], "#212121");
        // Fewer than 20 rows: line present but empty
        assert_eq!(json["movingAverage"], serde_json::json!([]));
    }
}
