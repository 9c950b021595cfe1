use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors surfaced by the preparation pipeline and the dashboard session.
///
/// `Format`, `Parse` and `Validation` are terminal for the current
/// recomputation. At row level they reject the offending row; a `Format`
/// error on the header aborts the whole load.
#[derive(Error, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum DashError {
    /// Missing or malformed required column (or an unreadable cell in one)
    #[error("format error: {0}")]
    Format(String),

    /// Malformed Support/Resistance list literal
    #[error("parse error: {0}")]
    Parse(String),

    /// Well-formed input that breaks a data invariant
    #[error("validation error: {0}")]
    Validation(String),

    /// No file has been loaded into the session yet
    #[error("no data available")]
    NoData,

    /// The chat collaborator failed to produce an answer
    #[error("chat backend failed: {0}")]
    Chat(String),
}

impl DashError {
    /// Prefixes the message with the input line it came from.
    pub fn at_line(self, line: u64) -> Self {
        match self {
            DashError::Format(msg) => DashError::Format(format!("line {}: {}", line, msg)),
            DashError::Parse(msg) => DashError::Parse(format!("line {}: {}", line, msg)),
            DashError::Validation(msg) => DashError::Validation(format!("line {}: {}", line, msg)),
            other => other,
        }
    }
}

pub type Result<T> = std::result::Result<T, DashError>;
