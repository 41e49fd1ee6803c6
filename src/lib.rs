// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Cadenza - procedural composition engine.
//!
//! Generates a roman-numeral chord progression in a given key and form,
//! voices each chord, writes a melody over it and analyzes the harmony.

pub mod analysis;
pub mod arrangement;
pub mod config;
pub mod error;
pub mod generators;
pub mod music;
pub mod score;

pub use analysis::{analyze, HarmonicAnalysis};
pub use arrangement::{compose, Composer, Composition, CompositionParams, Structure};
pub use config::CompositionConfig;
pub use error::{CompositionError, Result};
pub use generators::{Progression, RhythmStyle};
pub use music::{Key, Mode, Note, Pitch, TimeSignature};
pub use score::Score;
