// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Roman-numeral chord symbols.
//!
//! Parses tokens such as `I`, `ii`, `V7`, `vii°` or `IVsus4` and resolves
//! them against a key into the chord's pitches. Upper case numerals are
//! major, lower case minor; `°`/`o` marks diminished, `ø` half-diminished
//! and `+` augmented. Triad qualities come from the symbol, sevenths and
//! ninths are taken from the key's diatonic collection.

use serde::Serialize;

use super::scale::{Key, Mode, Note, Pitch};
use crate::error::{CompositionError, Result};

/// Octave the chord root is placed in when resolving a symbol
pub const RESOLVE_OCTAVE: i8 = 4;

/// Triad quality
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Quality {
    Major,
    Minor,
    Diminished,
    HalfDiminished,
    Augmented,
}

impl Quality {
    /// Semitones above the root for third and fifth
    fn triad(self) -> [u8; 3] {
        match self {
            Quality::Major => [0, 4, 7],
            Quality::Minor => [0, 3, 7],
            Quality::Diminished | Quality::HalfDiminished => [0, 3, 6],
            Quality::Augmented => [0, 4, 8],
        }
    }
}

/// Chord extension above the triad
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Extension {
    Triad,
    Seventh,
    Ninth,
}

/// Suspended third
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Suspension {
    Second,
    Fourth,
}

/// A parsed roman-numeral symbol
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RomanNumeral {
    /// Scale degree (1-7)
    pub degree: usize,
    pub quality: Quality,
    pub extension: Extension,
    pub suspension: Option<Suspension>,
    upper_case: bool,
}

impl RomanNumeral {
    /// Parse a symbol, returning None for anything outside the grammar
    pub fn parse(symbol: &str) -> Option<Self> {
        let numeral_len = symbol
            .chars()
            .take_while(|c| matches!(c, 'I' | 'V' | 'i' | 'v'))
            .count();
        let (numeral, mut rest) = symbol.split_at(numeral_len);
        if numeral.is_empty() {
            return None;
        }

        let upper_case = numeral.chars().all(|c| c.is_ascii_uppercase());
        if !upper_case && !numeral.chars().all(|c| c.is_ascii_lowercase()) {
            return None;
        }

        let degree = match numeral.to_ascii_uppercase().as_str() {
            "I" => 1,
            "II" => 2,
            "III" => 3,
            "IV" => 4,
            "V" => 5,
            "VI" => 6,
            "VII" => 7,
            _ => return None,
        };

        let mut quality = if upper_case { Quality::Major } else { Quality::Minor };
        if let Some(r) = rest.strip_prefix('°').or_else(|| rest.strip_prefix('o')) {
            quality = Quality::Diminished;
            rest = r;
        } else if let Some(r) = rest.strip_prefix('ø') {
            quality = Quality::HalfDiminished;
            rest = r;
        } else if let Some(r) = rest.strip_prefix('+') {
            quality = Quality::Augmented;
            rest = r;
        }

        let mut extension = Extension::Triad;
        if let Some(r) = rest.strip_prefix('7') {
            extension = Extension::Seventh;
            rest = r;
        } else if let Some(r) = rest.strip_prefix('9') {
            extension = Extension::Ninth;
            rest = r;
        }
        if quality == Quality::HalfDiminished && extension == Extension::Triad {
            extension = Extension::Seventh;
        }

        let suspension = match rest {
            "" => None,
            "sus" | "sus4" => Some(Suspension::Fourth),
            "sus2" => Some(Suspension::Second),
            _ => return None,
        };

        Some(Self {
            degree,
            quality,
            extension,
            suspension,
            upper_case,
        })
    }

    /// Root pitch class of this numeral in `key`
    pub fn root_in(&self, key: &Key) -> Note {
        let root = diatonic(key, self.degree, 0);
        // The diminished leading-tone chord in minor is built on the raised seventh
        let leading_tone = key.mode() == Mode::Minor
            && self.degree == 7
            && !self.upper_case
            && matches!(self.quality, Quality::Diminished | Quality::HalfDiminished);
        if leading_tone {
            root.transpose(1)
        } else {
            root
        }
    }

    /// Semitone offsets above the root, ascending
    fn intervals_in(&self, key: &Key, root: Note) -> Vec<u8> {
        let mut intervals = self.quality.triad().to_vec();

        match self.suspension {
            Some(Suspension::Fourth) => intervals[1] = root.interval_to(diatonic(key, self.degree, 3)),
            Some(Suspension::Second) => intervals[1] = root.interval_to(diatonic(key, self.degree, 1)),
            None => {}
        }

        let seventh = if self.quality == Quality::HalfDiminished {
            10
        } else {
            root.interval_to(diatonic(key, self.degree, 6))
        };
        match self.extension {
            Extension::Triad => {}
            Extension::Seventh => intervals.push(seventh),
            Extension::Ninth => {
                intervals.push(seventh);
                intervals.push(12 + root.interval_to(diatonic(key, self.degree, 1)));
            }
        }

        intervals
    }
}

/// Note `steps` diatonic steps above `degree`, wrapping around the octave
fn diatonic(key: &Key, degree: usize, steps: usize) -> Note {
    let scale = key.scale();
    scale[(degree - 1 + steps) % scale.len()]
}

/// Chord members of a resolved symbol, root first
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolvedChord {
    pub root: Note,
    /// Ascending from the root in [`RESOLVE_OCTAVE`]
    pub pitches: Vec<Pitch>,
}

impl ResolvedChord {
    /// Distinct pitch classes in member order
    pub fn pitch_classes(&self) -> Vec<Note> {
        let mut notes: Vec<Note> = Vec::with_capacity(self.pitches.len());
        for pitch in &self.pitches {
            if !notes.contains(&pitch.note) {
                notes.push(pitch.note);
            }
        }
        notes
    }
}

/// Resolve a roman-numeral symbol in `key`
pub fn resolve(symbol: &str, key: &Key) -> Result<ResolvedChord> {
    let numeral = RomanNumeral::parse(symbol).ok_or_else(|| CompositionError::Resolution {
        symbol: symbol.to_string(),
        key: key.label(),
    })?;

    let root = numeral.root_in(key);
    let root_pitch = Pitch::new(root, RESOLVE_OCTAVE);
    let pitches = numeral
        .intervals_in(key, root)
        .into_iter()
        .map(|interval| root_pitch.transpose(interval as i16))
        .collect();

    Ok(ResolvedChord { root, pitches })
}
