// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Roman-numeral progression generator.
//!
//! Tiles one of a handful of four-chord patterns across the requested
//! length and, from three measures up, closes it with a cadence pattern.

use std::fmt;
use std::ops::Index;

use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::pick;
use crate::error::{CompositionError, Result};
use crate::music::Mode;

/// Body patterns in major keys
static MAJOR_PATTERNS: &[&[&str]] = &[
    &["I", "IV", "V", "I"],
    &["I", "vi", "IV", "V"],
    &["I", "IV", "I", "V"],
    &["I", "IV", "V", "I"],
];

/// Closing patterns in major keys
static MAJOR_CADENCES: &[&[&str]] = &[
    &["IV", "ii", "V7", "I"],
    &["vi", "ii", "V7", "I"],
    &["ii", "V7", "I"],
    &["IV", "V", "I"],
    &["IV", "I"],
    &["V", "vi"], // Deceptive
];

/// Body patterns in minor keys
static MINOR_PATTERNS: &[&[&str]] = &[
    &["i", "iv", "V", "i"],
    &["i", "VI", "iv", "V"],
    &["i", "iv", "i", "V"],
    &["i", "iv", "V", "i"],
];

/// Closing patterns in minor keys
static MINOR_CADENCES: &[&[&str]] = &[
    &["iv", "ii°", "V7", "i"],
    &["VI", "ii°", "V7", "i"],
    &["ii°", "V7", "i"],
    &["iv", "V", "i"],
    &["iv", "i"],
    &["V", "VI"], // Deceptive
];

/// Shortest progression that receives a cadence
pub const MIN_CADENCE_LENGTH: usize = 3;

/// Body patterns for a mode
pub fn basic_patterns(mode: Mode) -> &'static [&'static [&'static str]] {
    match mode {
        Mode::Major => MAJOR_PATTERNS,
        Mode::Minor => MINOR_PATTERNS,
    }
}

/// Cadence patterns for a mode
pub fn cadence_patterns(mode: Mode) -> &'static [&'static [&'static str]] {
    match mode {
        Mode::Major => MAJOR_CADENCES,
        Mode::Minor => MINOR_CADENCES,
    }
}

/// An ordered sequence of roman-numeral symbols, one per measure
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Progression {
    symbols: Vec<String>,
}

impl Progression {
    pub fn new(symbols: Vec<String>) -> Self {
        Self { symbols }
    }

    pub fn symbols(&self) -> &[String] {
        &self.symbols
    }

    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.symbols.iter().map(String::as_str)
    }

    /// Append another progression (used for sectional forms)
    pub fn extend(&mut self, other: Progression) {
        self.symbols.extend(other.symbols);
    }

    /// The last `n` symbols (fewer if the progression is shorter)
    pub fn tail(&self, n: usize) -> &[String] {
        &self.symbols[self.symbols.len().saturating_sub(n)..]
    }
}

impl Index<usize> for Progression {
    type Output = str;

    fn index(&self, index: usize) -> &str {
        &self.symbols[index]
    }
}

impl From<Vec<&str>> for Progression {
    fn from(symbols: Vec<&str>) -> Self {
        Self::new(symbols.into_iter().map(str::to_string).collect())
    }
}

impl fmt::Display for Progression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbols.join(" - "))
    }
}

/// Generate a progression of exactly `length` measures
pub fn generate<R: Rng + ?Sized>(mode: Mode, length: usize, rng: &mut R) -> Result<Progression> {
    if length == 0 {
        return Err(CompositionError::validation(
            "length",
            "0",
            "at least one measure",
        ));
    }

    let pattern = pick(rng, basic_patterns(mode));
    let mut symbols: Vec<String> = pattern
        .iter()
        .cycle()
        .take(length)
        .map(|s| s.to_string())
        .collect();
    debug!(?pattern, length, "Tiled progression pattern");

    if length >= MIN_CADENCE_LENGTH {
        let cadence = pick(rng, cadence_patterns(mode));
        let k = cadence.len().min(length);
        let start = length - k;
        for (slot, symbol) in symbols[start..].iter_mut().zip(&cadence[cadence.len() - k..]) {
            *slot = symbol.to_string();
        }
        debug!(?cadence, "Applied cadence");
    }

    Ok(Progression::new(symbols))
}
