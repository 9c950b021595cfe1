//! Chart renderer configuration

/// Fill colours for one band (area) series, as CSS colour strings
pub struct BandColors {
    pub top_color: &'static str,
    pub bottom_color: &'static str,
    pub line_color: &'static str,
}

/// Marker colours keyed by trade direction
pub struct MarkerColors {
    pub long: &'static str,
    pub short: &'static str,
    pub neutral: &'static str,
}

pub struct ChartConfig {
    /// Chart canvas size in pixels
    pub height: u32,
    pub width: u32,
    pub background_color: &'static str,
    pub text_color: &'static str,
    pub support_band: BandColors,
    pub resistance_band: BandColors,
    pub markers: MarkerColors,
}

pub const CHART_CONFIG: ChartConfig = ChartConfig {
    height: 600,
    width: 900,
    background_color: "#212121",
    text_color: "#e0e0e0",
    support_band: BandColors {
        top_color: "rgba(0,255,0,0.3)",
        bottom_color: "rgba(0,255,0,0.1)",
        line_color: "rgba(0,255,0,1)",
    },
    resistance_band: BandColors {
        top_color: "rgba(255,0,0,0.3)",
        bottom_color: "rgba(255,0,0,0.1)",
        line_color: "rgba(255,0,0,1)",
    },
    markers: MarkerColors {
        long: "green",
        short: "red",
        neutral: "yellow",
    },
};
