// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Generative engines for procedural composition.
//!
//! This module provides the progression generator, the chord realizer and
//! the melody generator. Every generator draws its choices from a caller
//! supplied random source so results can be reproduced from a seed.

pub mod chord;
pub mod melody;
pub mod progression;
pub mod rhythm;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

pub use chord::{realize, VoicedChord};
pub use melody::{MelodyOptions, NoteEvent, TieState};
pub use progression::Progression;
pub use rhythm::{RhythmCell, RhythmStyle};

/// Create the random source for a generation run
///
/// A fixed seed reproduces a composition exactly; otherwise the
/// generator is seeded from system entropy.
pub fn rng_from_seed(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    }
}

/// Uniformly choose one element of a non-empty table
pub(crate) fn pick<'a, T, R: Rng + ?Sized>(rng: &mut R, items: &'a [T]) -> &'a T {
    &items[rng.gen_range(0..items.len())]
}
