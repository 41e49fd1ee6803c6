// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Rule-based harmonic analysis of a progression.
//!
//! Works on the roman-numeral symbols and their resolved pitches only;
//! no voicing or octave placement is involved. Every detector appends to
//! its own list without deduplication.

use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;

use crate::error::Result;
use crate::generators::Progression;
use crate::music::{resolve, Key, Mode, Note, ResolvedChord};

/// Reference cycle for fifth-related motion in major keys
static MAJOR_CIRCLE: &[&str] = &["I", "IV", "vii°", "iii", "vi", "ii", "V", "I"];
/// Reference cycle for fifth-related motion in minor keys
static MINOR_CIRCLE: &[&str] = &["i", "iv", "VII", "III", "VI", "ii°", "V", "i"];

/// Substrings that mark a chord as carrying tension
static TENSION_MARKERS: &[&str] = &["7", "9", "sus"];

/// Kind of closing gesture
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CadenceKind {
    Authentic,
    Plagal,
}

impl CadenceKind {
    pub fn label(self) -> &'static str {
        match self {
            CadenceKind::Authentic => "Authentic Cadence",
            CadenceKind::Plagal => "Plagal Cadence",
        }
    }
}

/// A detected cadence
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Cadence {
    pub kind: CadenceKind,
    /// 0-based measure of the first chord of the pair
    pub measure: usize,
    pub from: String,
    pub to: String,
}

impl fmt::Display for Cadence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} ({}-{}) at measure {}",
            self.kind.label(),
            self.from,
            self.to,
            self.measure + 1
        )
    }
}

/// Motion between two symbols
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Transition {
    /// 0-based measure of the first symbol
    pub measure: usize,
    pub from: String,
    pub to: String,
}

/// A chord carrying a seventh, ninth or suspension
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Tension {
    pub measure: usize,
    pub symbol: String,
}

/// Kind of voice-leading observation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum VoiceLeadingKind {
    CommonTone,
    HalfStep,
}

/// One voice-leading observation between consecutive chords
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VoiceLeading {
    pub kind: VoiceLeadingKind,
    pub measure: usize,
    pub from: String,
    pub to: String,
}

impl fmt::Display for VoiceLeading {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let what = match self.kind {
            VoiceLeadingKind::CommonTone => "Common tone",
            VoiceLeadingKind::HalfStep => "Half-step motion",
        };
        write!(f, "{} between {} and {}", what, self.from, self.to)
    }
}

/// Report produced by [`analyze`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HarmonicAnalysis {
    /// e.g. "C major"
    pub key: String,
    pub cadences: Vec<Cadence>,
    pub circle_of_fifths: Vec<Transition>,
    /// Scale degree (1-based) to number of chord tones on it
    pub scale_usage: BTreeMap<usize, usize>,
    pub tensions: Vec<Tension>,
    pub voice_leading: Vec<VoiceLeading>,
}

/// Analyze `progression` in `key`
pub fn analyze(progression: &Progression, key: &Key) -> Result<HarmonicAnalysis> {
    let chords: Vec<ResolvedChord> = progression
        .iter()
        .map(|symbol| resolve(symbol, key))
        .collect::<Result<_>>()?;

    Ok(HarmonicAnalysis {
        key: key.label(),
        cadences: detect_cadences(progression, key.mode()),
        circle_of_fifths: detect_circle_of_fifths(progression, key.mode()),
        scale_usage: scale_usage(&chords, key),
        tensions: detect_tensions(progression),
        voice_leading: detect_voice_leading(progression, &chords),
    })
}

/// Exact match of the final two symbols
fn detect_cadences(progression: &Progression, mode: Mode) -> Vec<Cadence> {
    let mut cadences = Vec::new();
    if progression.len() < 2 {
        return cadences;
    }

    let (authentic, plagal) = match mode {
        Mode::Major => (["V", "I"], ["IV", "I"]),
        Mode::Minor => (["V", "i"], ["iv", "i"]),
    };
    let last_two = progression.tail(2);
    let kind = if last_two == authentic {
        Some(CadenceKind::Authentic)
    } else if last_two == plagal {
        Some(CadenceKind::Plagal)
    } else {
        None
    };

    if let Some(kind) = kind {
        cadences.push(Cadence {
            kind,
            measure: progression.len() - 2,
            from: last_two[0].clone(),
            to: last_two[1].clone(),
        });
    }
    cadences
}

/// Consecutive symbols one step apart in the reference cycle
fn detect_circle_of_fifths(progression: &Progression, mode: Mode) -> Vec<Transition> {
    let circle = match mode {
        Mode::Major => MAJOR_CIRCLE,
        Mode::Minor => MINOR_CIRCLE,
    };
    let position = |symbol: &str| circle.iter().position(|&s| s == symbol);

    progression
        .symbols()
        .windows(2)
        .enumerate()
        .filter_map(|(measure, pair)| {
            let from = position(&pair[0])?;
            let to = position(&pair[1])?;
            (to == (from + 1) % circle.len()).then(|| Transition {
                measure,
                from: pair[0].clone(),
                to: pair[1].clone(),
            })
        })
        .collect()
}

fn scale_usage(chords: &[ResolvedChord], key: &Key) -> BTreeMap<usize, usize> {
    let mut usage = BTreeMap::new();
    for chord in chords {
        for pitch in &chord.pitches {
            if let Some(degree) = key.degree_of(pitch.note) {
                *usage.entry(degree).or_insert(0) += 1;
            }
        }
    }
    usage
}

fn detect_tensions(progression: &Progression) -> Vec<Tension> {
    progression
        .iter()
        .enumerate()
        .filter(|(_, symbol)| TENSION_MARKERS.iter().any(|m| symbol.contains(m)))
        .map(|(measure, symbol)| Tension {
            measure,
            symbol: symbol.to_string(),
        })
        .collect()
}

fn detect_voice_leading(progression: &Progression, chords: &[ResolvedChord]) -> Vec<VoiceLeading> {
    let mut observations = Vec::new();
    let symbols = progression.symbols();

    for (measure, pair) in chords.windows(2).enumerate() {
        let (current, next) = (&pair[0], &pair[1]);
        let observation = |kind| VoiceLeading {
            kind,
            measure,
            from: symbols[measure].clone(),
            to: symbols[measure + 1].clone(),
        };

        let next_notes: Vec<Note> = next.pitch_classes();
        if current.pitch_classes().iter().any(|n| next_notes.contains(n)) {
            observations.push(observation(VoiceLeadingKind::CommonTone));
        }

        for a in &current.pitches {
            for b in &next.pitches {
                if (a.midi() - b.midi()).abs() == 1 {
                    observations.push(observation(VoiceLeadingKind::HalfStep));
                }
            }
        }
    }

    observations
}

impl fmt::Display for HarmonicAnalysis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "=== Harmonic Analysis ===")?;
        writeln!(f, "Key: {}", self.key)?;

        writeln!(f)?;
        writeln!(f, "Cadences:")?;
        if self.cadences.is_empty() {
            writeln!(f, "- No clear cadence pattern")?;
        }
        for cadence in &self.cadences {
            writeln!(f, "- {}", cadence)?;
        }

        writeln!(f)?;
        writeln!(f, "Harmonic progressions:")?;
        if self.circle_of_fifths.is_empty() {
            writeln!(f, "- No notable progression pattern")?;
        }
        for t in &self.circle_of_fifths {
            writeln!(f, "- Circle of Fifths: {} -> {} (measure {})", t.from, t.to, t.measure + 1)?;
        }

        writeln!(f)?;
        writeln!(f, "Scale usage:")?;
        for (degree, count) in &self.scale_usage {
            writeln!(f, "- Degree {}: used {} times", degree, count)?;
        }

        writeln!(f)?;
        writeln!(f, "Tensions:")?;
        if self.tensions.is_empty() {
            writeln!(f, "- No tensions used")?;
        }
        for tension in &self.tensions {
            writeln!(f, "- {} contains tension", tension.symbol)?;
        }

        writeln!(f)?;
        writeln!(f, "Voice leading:")?;
        if self.voice_leading.is_empty() {
            writeln!(f, "- No notable voice leading")?;
        }
        for observation in &self.voice_leading {
            writeln!(f, "- {}", observation)?;
        }
        Ok(())
    }
}
