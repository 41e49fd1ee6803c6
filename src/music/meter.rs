// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Time signatures and measure lengths.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Durations are expressed in quarter-note units
pub type Beats = f64;

/// Supported time signatures
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TimeSignature {
    #[serde(rename = "4/4")]
    FourFour,
    #[serde(rename = "3/4")]
    ThreeFour,
    #[serde(rename = "6/8")]
    SixEight,
}

impl TimeSignature {
    /// Parse from the usual "n/d" notation
    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim() {
            "4/4" => Some(TimeSignature::FourFour),
            "3/4" => Some(TimeSignature::ThreeFour),
            "6/8" => Some(TimeSignature::SixEight),
            _ => None,
        }
    }

    /// Length of one measure in quarter notes
    pub fn beats_per_measure(self) -> Beats {
        match self {
            TimeSignature::FourFour => 4.0,
            // Six eighths occupy three quarter notes
            TimeSignature::ThreeFour | TimeSignature::SixEight => 3.0,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            TimeSignature::FourFour => "4/4",
            TimeSignature::ThreeFour => "3/4",
            TimeSignature::SixEight => "6/8",
        }
    }
}

impl fmt::Display for TimeSignature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_time_signature_parse() {
        assert_eq!(TimeSignature::from_str("4/4"), Some(TimeSignature::FourFour));
        assert_eq!(TimeSignature::from_str(" 6/8"), Some(TimeSignature::SixEight));
        assert_eq!(TimeSignature::from_str("5/4"), None);
    }

    #[test]
    fn test_beats_per_measure() {
        assert_eq!(TimeSignature::FourFour.beats_per_measure(), 4.0);
        assert_eq!(TimeSignature::ThreeFour.beats_per_measure(), 3.0);
        assert_eq!(TimeSignature::SixEight.beats_per_measure(), 3.0);
    }
}
