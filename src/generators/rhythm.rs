// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Per-measure rhythm cells.
//!
//! Each time signature has a pool of cells for the `random` style and a
//! single fixed cell for each named style.

use std::fmt;

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::pick;
use crate::music::{Beats, TimeSignature};

/// Rhythm style requested for the melody
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RhythmStyle {
    Random,
    Whole,
    Half,
    Quarter,
    Eighth,
}

impl RhythmStyle {
    /// Parse style from string
    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "random" => Some(RhythmStyle::Random),
            "whole" => Some(RhythmStyle::Whole),
            "half" => Some(RhythmStyle::Half),
            "quarter" => Some(RhythmStyle::Quarter),
            "eighth" => Some(RhythmStyle::Eighth),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            RhythmStyle::Random => "random",
            RhythmStyle::Whole => "whole",
            RhythmStyle::Half => "half",
            RhythmStyle::Quarter => "quarter",
            RhythmStyle::Eighth => "eighth",
        }
    }
}

impl fmt::Display for RhythmStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Durations of the notes in one measure, in quarter notes
pub type RhythmCell = &'static [Beats];

static COMMON_RANDOM: &[RhythmCell] = &[
    &[4.0],
    &[2.0, 2.0],
    &[1.0, 1.0, 1.0, 1.0],
    &[2.0, 1.0, 1.0],
    &[1.0, 2.0, 1.0],
    &[0.5, 0.5, 0.5, 0.5, 0.5, 0.5, 0.5, 0.5],
    &[1.0, 0.5, 0.5, 2.0],
    &[0.5, 0.5, 1.0, 2.0],
    &[2.0, 0.5, 0.5, 1.0],
    &[1.0, 1.0, 0.5, 0.5, 1.0],
];
static COMMON_WHOLE: &[RhythmCell] = &[&[4.0]];
static COMMON_HALF: &[RhythmCell] = &[&[2.0, 2.0]];
static COMMON_QUARTER: &[RhythmCell] = &[&[1.0, 1.0, 1.0, 1.0]];
static COMMON_EIGHTH: &[RhythmCell] = &[&[0.5, 0.5, 0.5, 0.5, 0.5, 0.5, 0.5, 0.5]];

// 3/4 and 6/8 share the same three-beat cells
static TRIPLE_RANDOM: &[RhythmCell] = &[
    &[3.0],
    &[1.5, 1.5],
    &[1.0, 2.0],
    &[2.0, 1.0],
    &[1.0, 1.0, 1.0],
    &[0.5, 0.5, 2.0],
    &[2.0, 0.5, 0.5],
    &[0.5, 1.0, 1.5],
    &[0.5, 0.5, 1.0, 1.0],
    &[0.5, 0.5, 0.5, 0.5, 0.5, 0.5],
];
static TRIPLE_WHOLE: &[RhythmCell] = &[&[3.0]];
static TRIPLE_HALF: &[RhythmCell] = &[&[1.5, 1.5]];
static TRIPLE_QUARTER: &[RhythmCell] = &[&[1.0, 1.0, 1.0]];
static TRIPLE_EIGHTH: &[RhythmCell] = &[&[0.5, 0.5, 0.5, 0.5, 0.5, 0.5]];

/// Candidate cells for a time signature and style
pub fn cells(time_signature: TimeSignature, style: RhythmStyle) -> &'static [RhythmCell] {
    match time_signature {
        TimeSignature::FourFour => match style {
            RhythmStyle::Random => COMMON_RANDOM,
            RhythmStyle::Whole => COMMON_WHOLE,
            RhythmStyle::Half => COMMON_HALF,
            RhythmStyle::Quarter => COMMON_QUARTER,
            RhythmStyle::Eighth => COMMON_EIGHTH,
        },
        TimeSignature::ThreeFour | TimeSignature::SixEight => match style {
            RhythmStyle::Random => TRIPLE_RANDOM,
            RhythmStyle::Whole => TRIPLE_WHOLE,
            RhythmStyle::Half => TRIPLE_HALF,
            RhythmStyle::Quarter => TRIPLE_QUARTER,
            RhythmStyle::Eighth => TRIPLE_EIGHTH,
        },
    }
}

/// Uniformly choose a cell for one measure
pub fn choose_cell<R: Rng + ?Sized>(
    rng: &mut R,
    time_signature: TimeSignature,
    style: RhythmStyle,
) -> RhythmCell {
    *pick(rng, cells(time_signature, style))
}
