// Data loading, preparation and caching
pub mod cache_file;
pub mod levels;
pub mod prepare;

// Re-export commonly used types
pub use cache_file::{cache_key, fingerprint, load_cached_table, write_cached_table};
pub use levels::parse_levels;
pub use prepare::{PrepareConfig, PreparedTable, REQUIRED_COLUMNS, RowRejection, prepare_csv};
