// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Music theory primitives for the composition engine.
//!
//! This module provides pitch classes, keys, time signatures and the
//! roman-numeral resolver the generators and the analyzer build on.

pub mod meter;
pub mod roman;
pub mod scale;

pub use meter::{Beats, TimeSignature};
pub use roman::{resolve, ResolvedChord, RomanNumeral};
pub use scale::{Key, Mode, Note, Pitch};
