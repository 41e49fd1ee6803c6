// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Notation assembly.
//!
//! Lays generated chords and notes out into numbered measures, checks each
//! measure's duration against the time signature and marks the closing
//! barline. The resulting parts are what a notation codec would serialize.

pub mod assembly;

use std::fmt;

use serde::Serialize;
use tracing::warn;

use crate::generators::{NoteEvent, VoicedChord};
use crate::music::{Beats, Key, TimeSignature};

pub use assembly::{assemble_chord_part, assemble_score};

/// Allowed difference between a measure's duration sum and its beat count
pub const DURATION_TOLERANCE: Beats = 0.01;

/// Anything that occupies time inside a measure
pub trait Timed {
    /// Length in quarter notes
    fn duration(&self) -> Beats;
}

/// Right-hand barline of a measure
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Barline {
    Regular,
    Final,
}

/// Clef a part is written in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Clef {
    Treble,
    Bass,
}

/// A measure whose event durations do not add up to the time signature
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DurationMismatch {
    /// 1-based measure number
    pub measure: usize,
    pub expected: Beats,
    pub actual: Beats,
}

impl fmt::Display for DurationMismatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "measure {}: note durations sum to {} but the time signature needs {}",
            self.measure, self.actual, self.expected
        )
    }
}

/// One measure of a part
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Measure<E> {
    /// 1-based measure number
    pub number: usize,
    pub events: Vec<E>,
    pub right_barline: Barline,
}

impl<E: Timed> Measure<E> {
    pub fn with_events(number: usize, events: Vec<E>) -> Self {
        Self {
            number,
            events,
            right_barline: Barline::Regular,
        }
    }

    /// Sum of event durations
    pub fn total_duration(&self) -> Beats {
        self.events.iter().map(Timed::duration).sum()
    }

    /// Compare the duration sum against `expected`
    pub fn check_duration(&self, expected: Beats) -> Option<DurationMismatch> {
        let actual = self.total_duration();
        if (actual - expected).abs() > DURATION_TOLERANCE {
            Some(DurationMismatch {
                measure: self.number,
                expected,
                actual,
            })
        } else {
            None
        }
    }
}

/// Phrase mark over a run of consecutive melody notes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Slur {
    /// Index of the first note in the flattened part
    pub start: usize,
    /// Index of the last note (inclusive)
    pub end: usize,
}

impl Slur {
    /// Number of notes under the slur
    pub fn note_count(&self) -> usize {
        self.end - self.start + 1
    }
}

/// A chord held for a whole measure
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChordEvent {
    pub chord: VoicedChord,
    pub duration: Beats,
}

impl Timed for ChordEvent {
    fn duration(&self) -> Beats {
        self.duration
    }
}

impl fmt::Display for ChordEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let pitches: Vec<String> = self.chord.pitches.iter().map(ToString::to_string).collect();
        write!(f, "{} [{}] {}", self.chord.symbol, pitches.join(" "), self.duration)
    }
}

/// A single staff of the score
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Part<E> {
    pub id: String,
    pub clef: Clef,
    pub key: Key,
    pub time_signature: TimeSignature,
    pub measures: Vec<Measure<E>>,
    pub slurs: Vec<Slur>,
    /// Measures that failed the duration check
    pub warnings: Vec<DurationMismatch>,
}

impl<E: Timed> Part<E> {
    pub fn new(id: &str, clef: Clef, key: Key, time_signature: TimeSignature) -> Self {
        Self {
            id: id.to_string(),
            clef,
            key,
            time_signature,
            measures: Vec::new(),
            slurs: Vec::new(),
            warnings: Vec::new(),
        }
    }

    /// Append a measure, recording a warning when its durations are off
    ///
    /// A mismatch never rejects the measure and never rescales it.
    pub fn push_measure(&mut self, measure: Measure<E>) {
        if let Some(mismatch) = measure.check_duration(self.time_signature.beats_per_measure()) {
            warn!(part = %self.id, "{}", mismatch);
            self.warnings.push(mismatch);
        }
        self.measures.push(measure);
    }

    /// Close the part with a final barline
    pub fn finish(&mut self) {
        if let Some(last) = self.measures.last_mut() {
            last.right_barline = Barline::Final;
        }
    }

    /// All events in order, across measures
    pub fn events(&self) -> impl Iterator<Item = &E> {
        self.measures.iter().flat_map(|m| m.events.iter())
    }

    pub fn event_count(&self) -> usize {
        self.measures.iter().map(|m| m.events.len()).sum()
    }
}

impl<E: Timed + fmt::Display> fmt::Display for Part<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "[{}] {} {}", self.id, self.key, self.time_signature)?;
        for measure in &self.measures {
            let events: Vec<String> = measure.events.iter().map(ToString::to_string).collect();
            let bar = match measure.right_barline {
                Barline::Regular => "|",
                Barline::Final => "||",
            };
            writeln!(f, "{:>3}: {} {}", measure.number, events.join(", "), bar)?;
        }
        Ok(())
    }
}

/// The assembled composition
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Score {
    pub title: String,
    pub melody: Option<Part<NoteEvent>>,
    pub chords: Option<Part<ChordEvent>>,
}

impl Score {
    /// Number of parts present
    pub fn part_count(&self) -> usize {
        self.melody.is_some() as usize + self.chords.is_some() as usize
    }

    /// Every duration warning across parts
    pub fn warnings(&self) -> Vec<&DurationMismatch> {
        let melody = self.melody.iter().flat_map(|p| p.warnings.iter());
        let chords = self.chords.iter().flat_map(|p| p.warnings.iter());
        melody.chain(chords).collect()
    }
}
