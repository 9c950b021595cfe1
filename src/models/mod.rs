// Domain models for the dashboard
// These modules contain pure business logic independent of any front end

pub mod table;

// Re-export key types for convenience
pub use table::{Row, Table};
