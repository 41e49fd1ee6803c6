// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Harmonic realizer.
//!
//! Turns a roman-numeral symbol into a voiced chord: the dominant is always
//! played as a seventh chord, the inversion is random and every pitch is
//! kept between octaves 3 and 5.

use rand::Rng;
use serde::Serialize;
use tracing::debug;

use crate::error::Result;
use crate::music::{resolve, Key, Note, Pitch};

/// Lowest octave of a voiced chord
pub const BASE_OCTAVE: i8 = 3;
/// Highest octave of a voiced chord
pub const TOP_OCTAVE: i8 = 5;

/// Symbol that is always realized with an added seventh
const DOMINANT: &str = "V";

/// A chord with concrete pitches
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VoicedChord {
    /// Symbol the chord was realized from
    pub symbol: String,
    pub root: Note,
    /// Pitches in voicing order (lowest member first)
    pub pitches: Vec<Pitch>,
    /// 0 = root position, 1 = first inversion, 2 = second inversion
    pub inversion: usize,
}

impl VoicedChord {
    /// Chord member by role in root position (0 = root, 1 = third, 2 = fifth...)
    pub fn member(&self, index: usize) -> Option<Pitch> {
        let len = self.pitches.len();
        if index >= len {
            return None;
        }
        Some(self.pitches[(index + len - self.inversion % len) % len])
    }

    /// The root with its voiced octave
    pub fn root_pitch(&self) -> Pitch {
        self.pitches
            .iter()
            .copied()
            .find(|p| p.note == self.root)
            .unwrap_or(Pitch::new(self.root, BASE_OCTAVE))
    }

    /// The chord third, or the root for chords without one
    pub fn third(&self) -> Pitch {
        self.member(1).unwrap_or_else(|| self.root_pitch())
    }

    /// The chord fifth, or the root for chords without one
    pub fn fifth(&self) -> Pitch {
        self.member(2).unwrap_or_else(|| self.root_pitch())
    }

    /// Distinct pitch classes of the chord
    pub fn notes(&self) -> Vec<Note> {
        let mut notes = Vec::with_capacity(self.pitches.len());
        for pitch in &self.pitches {
            if !notes.contains(&pitch.note) {
                notes.push(pitch.note);
            }
        }
        notes
    }
}

/// Realize `symbol` in `key` as a voiced chord
pub fn realize<R: Rng + ?Sized>(symbol: &str, key: &Key, rng: &mut R) -> Result<VoicedChord> {
    let lookup = if symbol == DOMINANT {
        format!("{}7", DOMINANT)
    } else {
        symbol.to_string()
    };
    let resolved = resolve(&lookup, key)?;

    let inversion = if resolved.pitch_classes().len() > 2 {
        rng.gen_range(0..3)
    } else {
        0
    };

    let pitches = spread(invert(&resolved.pitches, inversion));
    debug!(symbol, inversion, ?pitches, "Realized chord");

    Ok(VoicedChord {
        symbol: symbol.to_string(),
        root: resolved.root,
        pitches,
        inversion,
    })
}

/// Rotate the first `inversion` members to the top
fn invert(pitches: &[Pitch], inversion: usize) -> Vec<Pitch> {
    let mut result = pitches.to_vec();
    if !result.is_empty() {
        let len = result.len();
        result.rotate_left(inversion % len);
    }
    result
}

/// Place each member relative to the base octave and keep it in register
fn spread(pitches: Vec<Pitch>) -> Vec<Pitch> {
    let size = pitches.len();
    pitches
        .into_iter()
        .enumerate()
        .map(|(i, pitch)| {
            let target = BASE_OCTAVE + (i / size) as i8;
            pitch
                .transpose(12 * (target - pitch.octave) as i16)
                .clamp_octave(BASE_OCTAVE, TOP_OCTAVE)
        })
        .collect()
}
