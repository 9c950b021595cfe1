//! Strict parser for the Support/Resistance cells.
//!
//! Accepts `[n, n, ...]` (optional trailing comma) or a bare number, where each
//! `n` is a plain decimal literal. Anything else is a parse error: no nesting,
//! no expressions, no `nan`/`inf`. Size is capped by `ANALYSIS.levels`.

use crate::config::ANALYSIS;
use crate::error::{DashError, Result};

pub fn parse_levels(cell: &str) -> Result<Vec<f64>> {
    let limits = &ANALYSIS.levels;
    let text = cell.trim();

    if text.len() > limits.max_cell_len {
        return Err(DashError::Parse(format!(
            "level list is {} bytes long (limit {})",
            text.len(),
            limits.max_cell_len
        )));
    }

    // A cell that is already a single number is a one-element set
    if let Some(value) = parse_number(text) {
        return Ok(vec![value]);
    }

    let inner = text
        .strip_prefix('[')
        .and_then(|s| s.strip_suffix(']'))
        .ok_or_else(|| {
            DashError::Parse(format!("expected a bracketed list of numbers, got '{}'", text))
        })?
        .trim();

    if inner.is_empty() {
        return Ok(Vec::new());
    }
    let inner = inner.strip_suffix(',').unwrap_or(inner);

    let mut levels = Vec::new();
    for token in inner.split(',') {
        if levels.len() == limits.max_levels_per_cell {
            return Err(DashError::Parse(format!(
                "more than {} levels in '{}'",
                limits.max_levels_per_cell, text
            )));
        }
        let token = token.trim();
        let value = parse_number(token).ok_or_else(|| {
            DashError::Parse(format!("'{}' is not a number (in '{}')", token, text))
        })?;
        levels.push(value);
    }
    Ok(levels)
}

fn parse_number(token: &str) -> Option<f64> {
    let plain = !token.is_empty()
        && token
            .bytes()
            .all(|b| b.is_ascii_digit() || matches!(b, b'+' | b'-' | b'.' | b'e' | b'E'));
    if !plain {
        return None;
    }
    token.parse::<f64>().ok().filter(|v| v.is_finite())
}
