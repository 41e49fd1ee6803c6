// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Integration tests for Cadenza
//!
//! These tests drive the public API end to end and check the properties
//! every generated composition must hold.

use std::collections::HashSet;

use cadenza::analysis::CadenceKind;
use cadenza::arrangement::compose_progression;
use cadenza::generators::melody::{self, MelodyOptions, TieState};
use cadenza::generators::progression::{self, cadence_patterns};
use cadenza::generators::{chord, rng_from_seed};
use cadenza::score::{Barline, Timed};
use cadenza::{
    analyze, compose, CompositionConfig, CompositionParams, Key, Mode, Note, Progression,
    RhythmStyle, Structure, TimeSignature,
};
use rand::rngs::StdRng;
use rand::SeedableRng;

const TIME_SIGNATURES: [TimeSignature; 3] = [
    TimeSignature::FourFour,
    TimeSignature::ThreeFour,
    TimeSignature::SixEight,
];

/// Progression length always matches the request
#[test]
fn test_progression_length() {
    let mut rng = StdRng::seed_from_u64(1);
    for mode in [Mode::Major, Mode::Minor] {
        for length in 1..=32 {
            let result = progression::generate(mode, length, &mut rng).unwrap();
            assert_eq!(result.len(), length);
        }
    }
}

/// Pieces of three or more measures close on a cadence pattern tail
#[test]
fn test_progression_ends_with_cadence() {
    let mut rng = StdRng::seed_from_u64(2);
    for mode in [Mode::Major, Mode::Minor] {
        for length in 3..=16 {
            let result = progression::generate(mode, length, &mut rng).unwrap();
            let matches = cadence_patterns(mode).iter().any(|cadence| {
                let k = cadence.len().min(length);
                result.tail(k) == &cadence[cadence.len() - k..]
            });
            assert!(matches, "{} does not end on a cadence", result);
        }
    }
}

/// Scenario: four measures in C major are entirely a cadence pattern
#[test]
fn test_four_measure_major_is_cadence() {
    for seed in 0..20 {
        let mut rng = StdRng::seed_from_u64(seed);
        let result = progression::generate(Mode::Major, 4, &mut rng).unwrap();
        let matches = cadence_patterns(Mode::Major)
            .iter()
            .any(|cadence| result.tail(cadence.len()) == *cadence);
        assert!(matches, "{}", result);
    }
}

/// Scenario: V in C major always sounds as a dominant seventh
#[test]
fn test_dominant_realized_as_seventh() {
    let key = Key::new(Note::C, Mode::Major);
    let expected: HashSet<Note> = [Note::G, Note::B, Note::D, Note::F].into_iter().collect();
    for seed in 0..20 {
        let mut rng = StdRng::seed_from_u64(seed);
        let voiced = chord::realize("V", &key, &mut rng).unwrap();
        let notes: HashSet<Note> = voiced.pitches.iter().map(|p| p.note).collect();
        assert_eq!(notes, expected);
    }
}

/// Voiced chords stay in octaves 3 to 5
#[test]
fn test_chord_octave_range() {
    let mut rng = StdRng::seed_from_u64(3);
    for tonic in Note::ALL {
        for mode in [Mode::Major, Mode::Minor] {
            let key = Key::new(tonic, mode);
            let progression = progression::generate(mode, 16, &mut rng).unwrap();
            for symbol in progression.iter() {
                let voiced = chord::realize(symbol, &key, &mut rng).unwrap();
                assert!(voiced.inversion <= 2);
                for pitch in &voiced.pitches {
                    assert!((3..=5).contains(&pitch.octave), "{} in {}", pitch, key);
                }
            }
        }
    }
}

/// Scenario: a V-I pair is one authentic cadence at measure 0
#[test]
fn test_authentic_cadence_analysis() {
    let key = Key::new(Note::C, Mode::Major);
    let analysis = analyze(&Progression::from(vec!["V", "I"]), &key).unwrap();
    assert_eq!(analysis.cadences.len(), 1);
    assert_eq!(analysis.cadences[0].kind, CadenceKind::Authentic);
    assert_eq!(analysis.cadences[0].kind.label(), "Authentic Cadence");
    assert_eq!(analysis.cadences[0].measure, 0);
}

/// Scenario: AABA over eight measures is four two-measure sections
#[test]
fn test_aaba_form() {
    let lengths: Vec<usize> = Structure::Aaba.sections(8).iter().map(|s| s.length).collect();
    assert_eq!(lengths, vec![2, 2, 2, 2]);

    let mut rng = StdRng::seed_from_u64(4);
    let result = compose_progression(Structure::Aaba, Mode::Major, 8, &mut rng).unwrap();
    assert_eq!(result.len(), 8);
}

/// Scenario: with slurs and ties off no note carries either
#[test]
fn test_melody_without_slurs_or_ties() {
    let key = Key::new(Note::D, Mode::Major);
    let options = MelodyOptions {
        slurs: false,
        ties: false,
        rhythm: RhythmStyle::Eighth,
        ..Default::default()
    };
    let mut rng = StdRng::seed_from_u64(5);
    let progression = progression::generate(Mode::Major, 8, &mut rng).unwrap();
    let part = melody::generate(&progression, &key, &options, &mut rng).unwrap();

    assert!(part.slurs.is_empty());
    for note in part.events() {
        assert_eq!(note.tie, TieState::None);
        assert_eq!(note.slur, None);
    }
}

/// Melody notes stay in octaves 4 to 6 and the piece ends on the tonic
#[test]
fn test_melody_range_and_final_tonic() {
    let mut rng = StdRng::seed_from_u64(6);
    for tonic in [Note::C, Note::Fs, Note::As, Note::E] {
        for mode in [Mode::Major, Mode::Minor] {
            for time_signature in TIME_SIGNATURES {
                let key = Key::new(tonic, mode);
                let options = MelodyOptions {
                    time_signature,
                    ..Default::default()
                };
                let progression = progression::generate(mode, 6, &mut rng).unwrap();
                let part = melody::generate(&progression, &key, &options, &mut rng).unwrap();

                for note in part.events() {
                    assert!((4..=6).contains(&note.pitch.octave), "{} in {}", note.pitch, key);
                }
                let last = part.events().last().unwrap();
                assert_eq!(last.pitch.note, tonic);
            }
        }
    }
}

/// Every measure fills its time signature, or the part says why not
#[test]
fn test_measure_durations() {
    let mut rng = StdRng::seed_from_u64(7);
    let key = Key::new(Note::G, Mode::Minor);
    for time_signature in TIME_SIGNATURES {
        for rhythm in [
            RhythmStyle::Random,
            RhythmStyle::Whole,
            RhythmStyle::Half,
            RhythmStyle::Quarter,
            RhythmStyle::Eighth,
        ] {
            let options = MelodyOptions {
                time_signature,
                rhythm,
                ..Default::default()
            };
            let progression = progression::generate(Mode::Minor, 8, &mut rng).unwrap();
            let part = melody::generate(&progression, &key, &options, &mut rng).unwrap();

            for measure in &part.measures {
                let total: f64 = measure.events.iter().map(Timed::duration).sum();
                let off = (total - time_signature.beats_per_measure()).abs() > 0.01;
                let warned = part.warnings.iter().any(|w| w.measure == measure.number);
                assert_eq!(off, warned);
            }
            assert_eq!(part.measures.last().unwrap().right_barline, Barline::Final);
        }
    }
}

/// Ties only join equal neighbouring pitches and slurs cover runs of four
#[test]
fn test_tie_and_slur_invariants() {
    let key = Key::new(Note::A, Mode::Minor);
    for seed in 0..10 {
        let mut rng = StdRng::seed_from_u64(seed);
        let options = MelodyOptions {
            rhythm: RhythmStyle::Eighth,
            ..Default::default()
        };
        let progression = progression::generate(Mode::Minor, 8, &mut rng).unwrap();
        let part = melody::generate(&progression, &key, &options, &mut rng).unwrap();
        let notes: Vec<_> = part.events().collect();

        for (i, note) in notes.iter().enumerate() {
            let same_as_next = notes.get(i + 1).map_or(false, |n| n.pitch == note.pitch);
            let same_as_prev = i > 0 && notes[i - 1].pitch == note.pitch;
            match note.tie {
                TieState::Start => assert!(same_as_next && !same_as_prev),
                TieState::Continue => assert!(same_as_next && same_as_prev),
                TieState::Stop => assert!(same_as_prev && !same_as_next),
                TieState::None => assert!(!same_as_next && !same_as_prev),
            }
        }

        assert_eq!(part.slurs.len(), notes.len() / 4);
        for slur in &part.slurs {
            assert_eq!(slur.note_count(), 4);
        }
    }
}

/// Config file to finished composition
#[test]
fn test_config_to_composition() {
    let yaml = r#"
tonic: "eb"
mode: Major
time_signature: "3/4"
length: 10
structure: ab
rhythm: quarter
seed: 2024
"#;
    let params = CompositionConfig::from_yaml(yaml).unwrap().validate().unwrap();
    let composition = compose(params).unwrap();

    assert_eq!(composition.score.title, "Eb Major Chord Progression");
    assert_eq!(composition.progression.len(), 10);
    assert_eq!(composition.analysis.key, "Eb major");
    let melody = composition.score.melody.as_ref().unwrap();
    for measure in &melody.measures {
        assert_eq!(measure.events.len(), 3);
    }
    assert!(composition.score.warnings().is_empty());
}

/// Invalid settings are rejected before anything is generated
#[test]
fn test_invalid_config_rejected() {
    let config = CompositionConfig {
        time_signature: "7/8".to_string(),
        ..Default::default()
    };
    let err = config.validate().unwrap_err();
    assert!(err.is_validation());
}

/// A seed fixes the whole composition
#[test]
fn test_seed_reproducibility() {
    let params = CompositionParams {
        key: Key::new(Note::B, Mode::Minor),
        time_signature: TimeSignature::SixEight,
        length: 16,
        structure: Structure::Aaba,
        seed: Some(77),
        ..Default::default()
    };
    let first = compose(params.clone()).unwrap();
    let second = compose(params).unwrap();
    assert_eq!(first, second);

    let mut a = rng_from_seed(Some(5));
    let mut b = rng_from_seed(Some(5));
    assert_eq!(
        progression::generate(Mode::Major, 12, &mut a).unwrap(),
        progression::generate(Mode::Major, 12, &mut b).unwrap()
    );
}
