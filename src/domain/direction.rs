use serde::{Deserialize, Serialize};

/// Trade direction label attached to each trading day.
#[derive(
    Copy,
    Clone,
    Debug,
    Default,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum_macros::Display,
    strum_macros::EnumString,
    strum_macros::EnumIter,
)]
#[serde(rename_all = "UPPERCASE")]
#[strum(serialize_all = "UPPERCASE", ascii_case_insensitive)]
pub enum Direction {
    Long,
    Short,
    #[default]
    #[serde(rename = "NONE")]
    #[strum(serialize = "NONE")]
    Neutral,
}

impl Direction {
    /// Reads a Direction cell. Empty or unrecognised labels fall back to `Neutral`.
    pub fn from_cell(cell: &str) -> Self {
        cell.trim().parse().unwrap_or_default()
    }

    /// `true` if `cell` holds one of the recognised labels
    pub fn is_recognised(cell: &str) -> bool {
        cell.trim().parse::<Direction>().is_ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_labels_case_insensitively() {
        assert_eq!(Direction::from_cell("LONG"), Direction::Long);
        assert_eq!(Direction::from_cell(" short "), Direction::Short);
        assert_eq!(Direction::from_cell("None"), Direction::Neutral);
    }

    #[test]
    fn unknown_or_empty_becomes_neutral() {
        assert_eq!(Direction::from_cell(""), Direction::Neutral);
        assert_eq!(Direction::from_cell("HOLD"), Direction::Neutral);
        assert!(!Direction::is_recognised("HOLD"));
    }

    #[test]
    fn displays_upper_case_labels() {
        assert_eq!(Direction::Long.to_string(), "LONG");
        assert_eq!(Direction::Neutral.to_string(), "NONE");
    }
}
