//! File persistence and serialization configuration

/// Default directory for the prepared-table cache
pub const CACHE_DIR: &str = "prepared_cache";

/// Base filename for cache files (without fingerprint or extension)
pub const CACHE_FILENAME_PREFIX: &str = "prepared";

/// Current version of the prepared-table serialization format.
/// Bump whenever `PreparedTable` (or anything it contains) changes shape.
pub const CACHE_VERSION: f64 = 1.0;

/// Generate fingerprint-specific cache filename
/// Example: "prepared_00ff12ab34cd56ef_v1.bin"
pub fn cache_filename(fingerprint: u64) -> String {
    format!(
        "{}_{:016x}_v{}.bin",
        CACHE_FILENAME_PREFIX, fingerprint, CACHE_VERSION
    )
}

// Demo data
/// Where `make_demo_csv` writes its sample file
pub const DEMO_CSV_PATH: &str = "demo_data/prices.csv";

/// Trading days in the sample file
pub const DEMO_DAYS: usize = 120;
