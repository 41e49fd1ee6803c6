// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Constrained melody generator.
//!
//! Writes one melodic line over a progression. Each measure gets a random
//! rhythm cell; the first note of a measure leans on the chord, inner notes
//! move by step through the scale, and the last three measures settle onto
//! chord tones and the tonic. Slurs and ties are added afterwards over the
//! whole line.

use std::fmt;

use rand::Rng;
use serde::Serialize;
use tracing::debug;

use super::chord::realize;
use super::pick;
use super::progression::Progression;
use super::rhythm::{choose_cell, RhythmStyle};
use crate::error::Result;
use crate::music::{Beats, Key, Pitch, TimeSignature};
use crate::score::{Clef, Measure, Part, Slur, Timed};

/// Lowest melody octave
pub const LOW_OCTAVE: i8 = 4;
/// Highest melody octave
pub const HIGH_OCTAVE: i8 = 6;

/// Number of closing measures with stricter pitch rules
pub const CADENCE_ZONE: usize = 3;

/// Largest step (in semitones) for inner notes
pub const MAX_STEP: i16 = 2;

/// Notes per slur
pub const SLUR_LENGTH: usize = 4;

/// Tie attached to a note
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TieState {
    #[default]
    None,
    Start,
    Continue,
    Stop,
}

/// A single melody note
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NoteEvent {
    pub pitch: Pitch,
    pub duration: Beats,
    pub tie: TieState,
    /// Index of the slur this note belongs to
    pub slur: Option<usize>,
}

impl NoteEvent {
    pub fn new(pitch: Pitch, duration: Beats) -> Self {
        Self {
            pitch,
            duration,
            tie: TieState::None,
            slur: None,
        }
    }
}

impl Timed for NoteEvent {
    fn duration(&self) -> Beats {
        self.duration
    }
}

impl fmt::Display for NoteEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.pitch, self.duration)?;
        match self.tie {
            TieState::None => Ok(()),
            TieState::Start => write!(f, " ~"),
            TieState::Continue => write!(f, " ~~"),
            TieState::Stop => write!(f, " ~|"),
        }
    }
}

/// Settings for a melody run
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MelodyOptions {
    pub time_signature: TimeSignature,
    pub rhythm: RhythmStyle,
    pub slurs: bool,
    pub ties: bool,
}

impl Default for MelodyOptions {
    fn default() -> Self {
        Self {
            time_signature: TimeSignature::FourFour,
            rhythm: RhythmStyle::Random,
            slurs: true,
            ties: true,
        }
    }
}

/// Generate a melody part over `progression`
pub fn generate<R: Rng + ?Sized>(
    progression: &Progression,
    key: &Key,
    options: &MelodyOptions,
    rng: &mut R,
) -> Result<Part<NoteEvent>> {
    let total = progression.len();
    let tonic = key.tonic_pitch(LOW_OCTAVE);
    let scale = key.scale_pitches(LOW_OCTAVE);

    let mut previous: Option<Pitch> = None;
    let mut all_notes: Vec<NoteEvent> = Vec::new();
    let mut measure_sizes: Vec<usize> = Vec::with_capacity(total);

    for (i, symbol) in progression.iter().enumerate() {
        // Realized independently of the chord part, so voicings may differ
        let chord = realize(symbol, key, rng)?;
        let cell = choose_cell(rng, options.time_signature, options.rhythm);
        let cadence_zone = i + CADENCE_ZONE >= total;
        debug!(measure = i + 1, symbol, ?cell, cadence_zone, "Melody measure");

        for (j, &duration) in cell.iter().enumerate() {
            let pitch = if j == 0 {
                if cadence_zone {
                    tonic
                } else {
                    *pick(rng, &[chord.root_pitch(), chord.third(), chord.fifth(), tonic])
                }
            } else if i == total - 1 && j == cell.len() - 1 {
                tonic
            } else if cadence_zone {
                *pick(rng, &[chord.third(), chord.fifth(), tonic])
            } else {
                step_from(previous, &scale, rng)
            };

            let pitch = pitch.clamp_octave(LOW_OCTAVE, HIGH_OCTAVE);
            all_notes.push(NoteEvent::new(pitch, duration));
            previous = Some(pitch);
        }
        measure_sizes.push(cell.len());
    }

    let slurs = if options.slurs {
        apply_slurs(&mut all_notes)
    } else {
        Vec::new()
    };
    if options.ties {
        apply_ties(&mut all_notes);
    }

    let mut part = Part::new("Melody", Clef::Treble, key.clone(), options.time_signature);
    let mut notes = all_notes.into_iter();
    for (i, &size) in measure_sizes.iter().enumerate() {
        let events: Vec<NoteEvent> = notes.by_ref().take(size).collect();
        part.push_measure(Measure::with_events(i + 1, events));
    }
    part.slurs = slurs;
    part.finish();

    Ok(part)
}

/// Choose a scale pitch near the previous note
///
/// Falls back to the whole scale when nothing lies within [`MAX_STEP`]
/// semitones, or when there is no previous note.
fn step_from<R: Rng + ?Sized>(previous: Option<Pitch>, scale: &[Pitch], rng: &mut R) -> Pitch {
    if let Some(prev) = previous {
        let candidates: Vec<Pitch> = scale
            .iter()
            .copied()
            .filter(|p| (p.midi() - prev.midi()).abs() <= MAX_STEP)
            .collect();
        if !candidates.is_empty() {
            return *pick(rng, &candidates);
        }
    }
    *pick(rng, scale)
}

/// Group the line into complete runs of [`SLUR_LENGTH`] notes
///
/// A trailing run shorter than that gets no slur.
pub fn apply_slurs(notes: &mut [NoteEvent]) -> Vec<Slur> {
    let mut slurs = Vec::with_capacity(notes.len() / SLUR_LENGTH);
    for (index, run) in notes.chunks_exact_mut(SLUR_LENGTH).enumerate() {
        for note in run.iter_mut() {
            note.slur = Some(index);
        }
        let start = index * SLUR_LENGTH;
        slurs.push(Slur {
            start,
            end: start + SLUR_LENGTH - 1,
        });
    }
    slurs
}

/// Tie every pair of adjacent notes sharing the same pitch and octave
pub fn apply_ties(notes: &mut [NoteEvent]) {
    for i in 1..notes.len() {
        if notes[i - 1].pitch == notes[i].pitch {
            notes[i - 1].tie = match notes[i - 1].tie {
                TieState::None => TieState::Start,
                _ => TieState::Continue,
            };
            notes[i].tie = TieState::Stop;
        }
    }
}
