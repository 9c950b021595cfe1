//! Configuration module for the price dashboard.

pub mod analysis;
pub mod debug;
pub mod persistence;
pub mod plot;

// Re-export commonly used items
pub use analysis::{ANALYSIS, AnalysisConfig, MOVING_AVERAGE_WINDOW};
pub use persistence::{
    CACHE_DIR, CACHE_FILENAME_PREFIX, CACHE_VERSION, DEMO_CSV_PATH, DEMO_DAYS, cache_filename,
};
pub use plot::{CHART_CONFIG, ChartConfig};
