//! Handicap line parsing
//!
//! Two kinds of lines are attached to quotes:
//! - totals, `"O 170.5"` / `"U 50.5"`: settle against an actual total
//! - spreads, `"-1.5"` / `"+2.5"`: added to a team's set differential

use crate::error::FormatError;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TotalDirection {
    Over,
    Under,
}

impl fmt::Display for TotalDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TotalDirection::Over => write!(f, "Over"),
            TotalDirection::Under => write!(f, "Under"),
        }
    }
}

/// Over/under threshold parsed from a total line
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TotalLine {
    pub direction: TotalDirection,
    pub threshold: f64,
}

impl TotalLine {
    /// Parse `"O <threshold>"` or `"U <threshold>"`
    pub fn parse(line: &str) -> Result<Self, FormatError> {
        let (direction, rest) = if let Some(rest) = line.strip_prefix("O ") {
            (TotalDirection::Over, rest)
        } else if let Some(rest) = line.strip_prefix("U ") {
            (TotalDirection::Under, rest)
        } else {
            return Err(FormatError::InvalidLine(line.to_string()));
        };

        let threshold: f64 = rest
            .trim()
            .parse()
            .map_err(|_| FormatError::InvalidLine(line.to_string()))?;

        Ok(Self {
            direction,
            threshold,
        })
    }

    /// Build the canonical line string for a direction and threshold text
    pub fn format(direction: TotalDirection, threshold: &str) -> String {
        match direction {
            TotalDirection::Over => format!("O {}", threshold.trim()),
            TotalDirection::Under => format!("U {}", threshold.trim()),
        }
    }

    /// Strict comparison: Over wins above the line, Under below it
    pub fn is_won_by(&self, actual: f64) -> bool {
        match self.direction {
            TotalDirection::Over => actual > self.threshold,
            TotalDirection::Under => actual < self.threshold,
        }
    }
}

impl fmt::Display for TotalLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {:.1}", self.direction, self.threshold)
    }
}

pub fn is_total_line(line: &str) -> bool {
    line.starts_with("O ") || line.starts_with("U ")
}

pub fn is_spread(line: &str) -> bool {
    line.contains('-') || line.contains('+')
}

/// Parse a point spread: the number after `-` is negated, the number after `+` kept
pub fn parse_spread(line: &str) -> Result<f64, FormatError> {
    let (sign, marker) = if line.contains('-') {
        (-1.0, '-')
    } else if line.contains('+') {
        (1.0, '+')
    } else {
        return Err(FormatError::InvalidLine(line.to_string()));
    };

    let value: f64 = line
        .split(marker)
        .nth(1)
        .map(str::trim)
        .and_then(|v| v.parse().ok())
        .ok_or_else(|| FormatError::InvalidLine(line.to_string()))?;

    Ok(sign * value)
}
