// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! End-to-end composition run.

use rand::rngs::StdRng;
use serde::Serialize;
use tracing::info;

use super::form::{compose_progression, Structure};
use crate::analysis::{analyze, HarmonicAnalysis};
use crate::error::Result;
use crate::generators::{melody, rng_from_seed, MelodyOptions, Progression, RhythmStyle};
use crate::music::{Key, Mode, Note, TimeSignature};
use crate::score::{assemble_chord_part, assemble_score, Score};

/// Validated inputs for a composition run
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CompositionParams {
    pub key: Key,
    pub time_signature: TimeSignature,
    /// Number of measures, at least one
    pub length: usize,
    pub structure: Structure,
    pub rhythm: RhythmStyle,
    pub melody: bool,
    pub slurs: bool,
    pub ties: bool,
    /// Leave out the chord part when a melody is present
    pub melody_only: bool,
    pub seed: Option<u64>,
}

impl Default for CompositionParams {
    fn default() -> Self {
        Self {
            key: Key::new(Note::C, Mode::Major),
            time_signature: TimeSignature::FourFour,
            length: 8,
            structure: Structure::A,
            rhythm: RhythmStyle::Random,
            melody: true,
            slurs: true,
            ties: true,
            melody_only: false,
            seed: None,
        }
    }
}

impl CompositionParams {
    fn melody_options(&self) -> MelodyOptions {
        MelodyOptions {
            time_signature: self.time_signature,
            rhythm: self.rhythm,
            slurs: self.slurs,
            ties: self.ties,
        }
    }
}

/// Everything a run produces
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Composition {
    pub progression: Progression,
    pub score: Score,
    pub analysis: HarmonicAnalysis,
}

/// Runs the generators in order over one random source
pub struct Composer {
    params: CompositionParams,
    rng: StdRng,
}

impl Composer {
    /// Create a composer seeded from `params.seed`
    pub fn new(params: CompositionParams) -> Self {
        let rng = rng_from_seed(params.seed);
        Self { params, rng }
    }

    /// Generate the progression, the parts and the analysis
    pub fn compose(&mut self) -> Result<Composition> {
        let params = &self.params;
        info!(
            key = %params.key,
            time = %params.time_signature,
            length = params.length,
            structure = %params.structure,
            "Composing"
        );

        let progression = compose_progression(
            params.structure,
            params.key.mode(),
            params.length,
            &mut self.rng,
        )?;
        info!(%progression, "Progression ready");

        let (melody_part, chord_part) = if params.melody {
            let melody_part = melody::generate(
                &progression,
                &params.key,
                &params.melody_options(),
                &mut self.rng,
            )?;
            let chord_part = if params.melody_only {
                None
            } else {
                Some(assemble_chord_part(
                    &progression,
                    &params.key,
                    params.time_signature,
                    &mut self.rng,
                )?)
            };
            (Some(melody_part), chord_part)
        } else {
            let chord_part =
                assemble_chord_part(&progression, &params.key, params.time_signature, &mut self.rng)?;
            (None, Some(chord_part))
        };

        let score = assemble_score(&params.key, melody_part, chord_part);
        let analysis = analyze(&progression, &params.key)?;
        info!(
            parts = score.part_count(),
            warnings = score.warnings().len(),
            cadences = analysis.cadences.len(),
            "Composition complete"
        );

        Ok(Composition {
            progression,
            score,
            analysis,
        })
    }
}

/// Compose once with the given parameters
pub fn compose(params: CompositionParams) -> Result<Composition> {
    Composer::new(params).compose()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::score::Clef;

    fn seeded(seed: u64) -> CompositionParams {
        CompositionParams {
            seed: Some(seed),
            ..Default::default()
        }
    }

    #[test]
    fn test_default_run_has_both_parts() {
        let composition = compose(seeded(1)).unwrap();
        assert_eq!(composition.progression.len(), 8);
        assert_eq!(composition.score.title, "C Major Chord Progression");
        assert_eq!(composition.score.part_count(), 2);

        let melody = composition.score.melody.as_ref().unwrap();
        let chords = composition.score.chords.as_ref().unwrap();
        assert_eq!(melody.clef, Clef::Treble);
        assert_eq!(chords.clef, Clef::Bass);
        assert_eq!(melody.measures.len(), 8);
        assert_eq!(chords.measures.len(), 8);
        assert_eq!(composition.analysis.key, "C major");
    }

    #[test]
    fn test_melody_only() {
        let params = CompositionParams {
            melody_only: true,
            ..seeded(2)
        };
        let composition = compose(params).unwrap();
        assert!(composition.score.melody.is_some());
        assert!(composition.score.chords.is_none());
    }

    #[test]
    fn test_no_melody_ignores_melody_only() {
        let params = CompositionParams {
            melody: false,
            melody_only: true,
            ..seeded(3)
        };
        let composition = compose(params).unwrap();
        assert!(composition.score.melody.is_none());
        assert!(composition.score.chords.is_some());
    }

    #[test]
    fn test_same_seed_same_composition() {
        let params = CompositionParams {
            key: Key::new(Note::A, Mode::Minor),
            time_signature: TimeSignature::ThreeFour,
            length: 12,
            structure: Structure::Aaba,
            ..seeded(99)
        };
        let first = compose(params.clone()).unwrap();
        let second = compose(params).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_zero_length_is_rejected() {
        let params = CompositionParams {
            length: 0,
            ..seeded(4)
        };
        let err = compose(params).unwrap_err();
        assert!(err.is_validation());
    }
}
