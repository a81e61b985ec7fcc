use serde::{Deserialize, Serialize};

use crate::algorithms::paa::WindowBoundary;
use crate::core::breakpoints::MAX_ALPHABET_SIZE;
use crate::core::error::{ConfigError, InputError, Result};

/// Configuration for symbolic encoding.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EncoderConfig {
    /// Number of letters (segments) per word.
    pub word_size: usize,
    /// Number of symbols in the alphabet.
    pub alphabet_size: usize,
    /// Standard deviations below this are treated as a constant series.
    pub epsilon: f64,
    /// Right-edge policy for the final aggregation window.
    pub boundary: WindowBoundary,
}

impl EncoderConfig {
    pub fn new(word_size: usize, alphabet_size: usize) -> Self {
        Self {
            word_size,
            alphabet_size,
            ..Self::default()
        }
    }

    pub fn with_epsilon(mut self, epsilon: f64) -> Self {
        self.epsilon = epsilon;
        self
    }

    pub fn with_boundary(mut self, boundary: WindowBoundary) -> Self {
        self.boundary = boundary;
        self
    }

    /// Check the parameters that do not depend on a breakpoint table.
    pub fn validate(&self) -> Result<()> {
        if self.word_size == 0 {
            return Err(InputError::InvalidWordSize(self.word_size).into());
        }
        if !(2..=MAX_ALPHABET_SIZE).contains(&self.alphabet_size) {
            return Err(ConfigError::InvalidAlphabetSize(self.alphabet_size).into());
        }
        if !(self.epsilon.is_finite() && self.epsilon > 0.0) {
            return Err(ConfigError::InvalidEpsilon(self.epsilon).into());
        }
        Ok(())
    }
}

impl Default for EncoderConfig {
    fn default() -> Self {
        Self {
            word_size: 8,
            alphabet_size: 7,
            epsilon: 1e-6,
            boundary: WindowBoundary::HalfOpen,
        }
    }
}
