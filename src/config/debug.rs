//! Debugging feature flags.
//!
//! Toggle individual diagnostics here; keep them `false` by default so release
//! builds remain quiet. Every flag is further gated by `cfg(debug_assertions)`
//! at the call site.

/// Emit a one-line summary (rows kept / rejected, date span) after each load.
pub const PRINT_PREPARE_SUMMARY: bool = true;

/// Emit every rejected row with its line number and reason.
pub const PRINT_ROW_REJECTIONS: bool = false;

/// Emit unknown Direction values as they are coerced to NONE.
pub const PRINT_DIRECTION_COERCION: bool = false;

/// Emit session memo hits/misses and event handling.
pub const PRINT_SESSION_EVENTS: bool = false;

/// Emit detailed disk cache read/write logs.
pub const PRINT_SERDE: bool = false;
