// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Sectional forms.
//!
//! A form splits the requested length into labelled sections; each
//! section gets its own independently generated progression and the
//! results are joined in order.

use std::fmt;

use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{CompositionError, Result};
use crate::generators::progression::{self, Progression};
use crate::music::Mode;

/// Overall form of the piece
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Structure {
    /// One section spanning the whole length
    A,
    /// Statement, repeat, contrast, return
    #[serde(rename = "AABA")]
    Aaba,
    /// Statement and contrast
    #[serde(rename = "AB")]
    Ab,
}

/// A labelled span of measures
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Section {
    pub label: char,
    pub length: usize,
}

impl Section {
    fn new(label: char, length: usize) -> Self {
        Self { label, length }
    }
}

impl Structure {
    /// Parse structure from string
    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_uppercase().as_str() {
            "A" => Some(Structure::A),
            "AABA" => Some(Structure::Aaba),
            "AB" => Some(Structure::Ab),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Structure::A => "A",
            Structure::Aaba => "AABA",
            Structure::Ab => "AB",
        }
    }

    /// Split `length` measures into sections
    ///
    /// Section lengths always add up to `length`; short pieces can
    /// produce zero-length sections.
    pub fn sections(self, length: usize) -> Vec<Section> {
        match self {
            Structure::A => vec![Section::new('A', length)],
            Structure::Aaba => {
                let a = length / 4;
                let b = length - 3 * a;
                vec![
                    Section::new('A', a),
                    Section::new('A', a),
                    Section::new('B', b),
                    Section::new('A', a),
                ]
            }
            Structure::Ab => {
                let a = length / 2;
                vec![Section::new('A', a), Section::new('B', length - a)]
            }
        }
    }
}

impl fmt::Display for Structure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Generate a progression of `length` measures in the given form
pub fn compose_progression<R: Rng + ?Sized>(
    structure: Structure,
    mode: Mode,
    length: usize,
    rng: &mut R,
) -> Result<Progression> {
    if length == 0 {
        return Err(CompositionError::validation(
            "length",
            "0",
            "at least one measure",
        ));
    }

    let mut result = Progression::default();
    for section in structure.sections(length) {
        if section.length == 0 {
            continue;
        }
        let part = progression::generate(mode, section.length, rng)?;
        debug!(label = %section.label, %part, "Generated section");
        result.extend(part);
    }
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn lengths(structure: Structure, length: usize) -> Vec<usize> {
        structure.sections(length).iter().map(|s| s.length).collect()
    }

    #[test]
    fn test_aaba_sections() {
        assert_eq!(lengths(Structure::Aaba, 8), vec![2, 2, 2, 2]);
        assert_eq!(lengths(Structure::Aaba, 10), vec![2, 2, 4, 2]);
        assert_eq!(lengths(Structure::Aaba, 3), vec![0, 0, 3, 0]);
        let labels: String = Structure::Aaba.sections(8).iter().map(|s| s.label).collect();
        assert_eq!(labels, "AABA");
    }

    #[test]
    fn test_ab_sections() {
        assert_eq!(lengths(Structure::Ab, 8), vec![4, 4]);
        assert_eq!(lengths(Structure::Ab, 7), vec![3, 4]);
        assert_eq!(lengths(Structure::Ab, 1), vec![0, 1]);
    }

    #[test]
    fn test_compose_total_length() {
        let mut rng = StdRng::seed_from_u64(41);
        for structure in [Structure::A, Structure::Aaba, Structure::Ab] {
            for length in 1..=20 {
                let progression = compose_progression(structure, Mode::Major, length, &mut rng).unwrap();
                assert_eq!(progression.len(), length, "{} with {} measures", structure, length);
            }
        }
    }

    #[test]
    fn test_compose_rejects_empty() {
        let mut rng = StdRng::seed_from_u64(42);
        assert!(compose_progression(Structure::Ab, Mode::Minor, 0, &mut rng).is_err());
    }

    #[test]
    fn test_structure_from_str() {
        assert_eq!(Structure::from_str("aaba"), Some(Structure::Aaba));
        assert_eq!(Structure::from_str(" AB "), Some(Structure::Ab));
        assert_eq!(Structure::from_str("ABAC"), None);
    }
}
