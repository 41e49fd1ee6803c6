// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Configuration for a composition run.
//!
//! A [`CompositionConfig`] holds the raw user-facing settings as strings
//! and numbers, loaded from YAML or TOML. [`CompositionConfig::validate`]
//! normalizes them and turns them into typed [`CompositionParams`].

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::arrangement::{CompositionParams, Structure};
use crate::error::CompositionError;
use crate::generators::RhythmStyle;
use crate::music::{Key, Mode, Note, TimeSignature};

/// Raw composition settings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct CompositionConfig {
    /// Tonic pitch class (e.g., "C", "F#", "Bb")
    pub tonic: String,
    /// "major" or "minor"
    pub mode: String,
    /// "4/4", "3/4" or "6/8"
    pub time_signature: String,
    /// Number of measures
    pub length: i64,
    /// "A", "AABA" or "AB"
    pub structure: String,
    /// "random", "whole", "half", "quarter" or "eighth"
    pub rhythm: String,
    pub melody: bool,
    pub slurs: bool,
    pub ties: bool,
    pub melody_only: bool,
    /// Fixed seed for reproducible output
    pub seed: Option<u64>,
}

impl Default for CompositionConfig {
    fn default() -> Self {
        Self {
            tonic: "C".to_string(),
            mode: "major".to_string(),
            time_signature: "4/4".to_string(),
            length: 8,
            structure: "A".to_string(),
            rhythm: "random".to_string(),
            melody: true,
            slurs: true,
            ties: true,
            melody_only: false,
            seed: None,
        }
    }
}

impl CompositionConfig {
    /// Load a configuration file, choosing the format by extension
    ///
    /// `.toml` files are read as TOML, everything else as YAML.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {:?}", path))?;

        let is_toml = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.eq_ignore_ascii_case("toml"))
            .unwrap_or(false);

        let parsed = if is_toml {
            Self::from_toml(&contents)
        } else {
            Self::from_yaml(&contents)
        };
        parsed.with_context(|| format!("Invalid config file: {:?}", path))
    }

    /// Parse a configuration from YAML string
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        serde_yaml::from_str(yaml).context("Failed to parse YAML configuration")
    }

    /// Parse a configuration from TOML string
    pub fn from_toml(source: &str) -> Result<Self> {
        toml::from_str(source).context("Failed to parse TOML configuration")
    }

    /// Serialize to YAML string
    pub fn to_yaml(&self) -> Result<String> {
        serde_yaml::to_string(self).context("Failed to serialize configuration to YAML")
    }

    /// Normalize and check every setting
    pub fn validate(&self) -> crate::error::Result<CompositionParams> {
        let tonic = Note::from_str(&self.tonic).ok_or_else(|| {
            CompositionError::validation("tonic", self.tonic.trim(), "one of the 12 pitch classes")
        })?;
        let mode = Mode::from_str(&self.mode).ok_or_else(|| {
            CompositionError::validation("mode", self.mode.trim().to_lowercase(), "major or minor")
        })?;
        let time_signature = TimeSignature::from_str(&self.time_signature).ok_or_else(|| {
            CompositionError::validation("time signature", self.time_signature.trim(), "4/4, 3/4 or 6/8")
        })?;
        let structure = Structure::from_str(&self.structure).ok_or_else(|| {
            CompositionError::validation("structure", self.structure.trim().to_uppercase(), "A, AABA or AB")
        })?;
        let rhythm = RhythmStyle::from_str(&self.rhythm).ok_or_else(|| {
            CompositionError::validation(
                "rhythm",
                self.rhythm.trim().to_lowercase(),
                "random, whole, half, quarter or eighth",
            )
        })?;
        if self.length < 1 {
            return Err(CompositionError::validation(
                "length",
                self.length.to_string(),
                "at least one measure",
            ));
        }

        Ok(CompositionParams {
            key: Key::spelled(tonic, mode, &self.tonic),
            time_signature,
            length: self.length as usize,
            structure,
            rhythm,
            melody: self.melody,
            slurs: self.slurs,
            ties: self.ties,
            melody_only: self.melody_only,
            seed: self.seed,
        })
    }
}
