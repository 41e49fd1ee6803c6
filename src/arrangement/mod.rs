// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Form and arrangement.
//!
//! This module provides:
//! - Forms: splitting a piece into A/B sections
//! - Composer: running progression, melody, chord and analysis passes

pub mod composer;
pub mod form;

pub use composer::{compose, Composer, Composition, CompositionParams};
pub use form::{compose_progression, Section, Structure};
