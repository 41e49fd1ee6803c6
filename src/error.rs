// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Error types for the composition engine.

use thiserror::Error;

/// Errors raised by the composition engine
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CompositionError {
    /// A user-supplied parameter is outside the supported set
    #[error("invalid {field} {value:?}: expected {expected}")]
    Validation {
        field: &'static str,
        value: String,
        expected: &'static str,
    },

    /// A roman-numeral symbol has no meaning in the given key
    #[error("cannot resolve roman numeral {symbol:?} in {key}")]
    Resolution { symbol: String, key: String },
}

impl CompositionError {
    /// Shorthand for building a validation error
    pub fn validation(field: &'static str, value: impl Into<String>, expected: &'static str) -> Self {
        CompositionError::Validation {
            field,
            value: value.into(),
            expected,
        }
    }

    /// Whether the caller can recover by supplying different parameters
    pub fn is_validation(&self) -> bool {
        matches!(self, CompositionError::Validation { .. })
    }
}

/// Result alias used throughout the engine
pub type Result<T> = std::result::Result<T, CompositionError>;
