//! Records handed verbatim to the chart renderer.
//!
//! Field names and enum spellings here are the renderer's wire contract.

use serde::{Deserialize, Serialize};

use crate::config::plot::{BandColors, CHART_CONFIG};

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct CandleRecord {
    pub time: String,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct LinePoint {
    pub time: String,
    pub value: f64,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct BandPoint {
    pub time: String,
    pub low: f64,
    pub high: f64,
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum MarkerPosition {
    BelowBar,
    AboveBar,
    InBar,
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum MarkerShape {
    ArrowUp,
    ArrowDown,
    Circle,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Marker {
    pub time: String,
    pub position: MarkerPosition,
    pub color: String,
    pub shape: MarkerShape,
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum BandKind {
    Support,
    Resistance,
}

/// Area-series options, in the renderer's own key spelling.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AreaStyle {
    pub top_color: String,
    pub bottom_color: String,
    pub line_color: String,
}

impl From<&BandColors> for AreaStyle {
    fn from(colors: &BandColors) -> Self {
        Self {
            top_color: colors.top_color.to_string(),
            bottom_color: colors.bottom_color.to_string(),
            line_color: colors.line_color.to_string(),
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct BandSeries {
    pub kind: BandKind,
    pub style: AreaStyle,
    pub data: Vec<BandPoint>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ChartLayout {
    pub height: u32,
    pub width: u32,
    pub background_color: String,
    pub text_color: String,
}

impl Default for ChartLayout {
    fn default() -> Self {
        Self {
            height: CHART_CONFIG.height,
            width: CHART_CONFIG.width,
            background_color: CHART_CONFIG.background_color.to_string(),
            text_color: CHART_CONFIG.text_color.to_string(),
        }
    }
}

/// Everything the renderer needs for one chart: one candle series,
/// zero-or-one line, zero-or-two bands, zero-or-one marker overlay.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ChartPayload {
    pub layout: ChartLayout,
    pub candles: Vec<CandleRecord>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub moving_average: Option<Vec<LinePoint>>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub bands: Vec<BandSeries>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub markers: Option<Vec<Marker>>,
}

impl ChartPayload {
    pub fn band(&self, kind: BandKind) -> Option<&BandSeries> {
        self.bands.iter().find(|b| b.kind == kind)
    }
}
