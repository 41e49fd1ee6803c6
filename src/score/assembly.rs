// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Building parts and scores from generated material.

use rand::Rng;
use tracing::debug;

use super::{ChordEvent, Clef, Measure, Part, Score};
use crate::error::Result;
use crate::generators::{realize, NoteEvent, Progression};
use crate::music::{Key, TimeSignature};

/// One voiced chord per measure, each lasting the whole measure
pub fn assemble_chord_part<R: Rng + ?Sized>(
    progression: &Progression,
    key: &Key,
    time_signature: TimeSignature,
    rng: &mut R,
) -> Result<Part<ChordEvent>> {
    let mut part = Part::new("Chords", Clef::Bass, key.clone(), time_signature);
    let duration = time_signature.beats_per_measure();

    for (i, symbol) in progression.iter().enumerate() {
        let chord = realize(symbol, key, rng)?;
        part.push_measure(Measure::with_events(i + 1, vec![ChordEvent { chord, duration }]));
    }
    part.finish();

    debug!(measures = part.measures.len(), "Assembled chord part");
    Ok(part)
}

/// Title shown on the score, e.g. "C Major Chord Progression"
pub fn title_for(key: &Key) -> String {
    format!("{} {} Chord Progression", key.tonic_name(), key.mode().name())
}

/// Put the parts together: melody on top, chords below
pub fn assemble_score(
    key: &Key,
    melody: Option<Part<NoteEvent>>,
    chords: Option<Part<ChordEvent>>,
) -> Score {
    Score {
        title: title_for(key),
        melody,
        chords,
    }
}
