//! Error types for encoding, breakpoint lookup and letter distances.

use thiserror::Error;

/// Crate-wide result alias.
pub type Result<T> = std::result::Result<T, SaxError>;

/// Configuration errors: missing or malformed breakpoint data, bad parameters.
///
/// Fatal to the operation that triggered them and never retried.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    /// No breakpoint entry exists for the requested alphabet size.
    #[error("no breakpoint entry for alphabet size {alphabet_size}")]
    MissingBreakpoints { alphabet_size: usize },

    /// A position or cut-point table does not match the alphabet size.
    #[error("table length mismatch: expected {expected}, actual {actual}")]
    LengthMismatch { expected: usize, actual: usize },

    /// A breakpoint entry is not an ascending sequence of finite values.
    #[error("invalid breakpoint entry for alphabet size {alphabet_size}: {reason}")]
    InvalidEntry { alphabet_size: usize, reason: String },

    /// Alphabet size outside the renderable range (`2..=26` letters).
    #[error("alphabet size {0} is not supported")]
    InvalidAlphabetSize(usize),

    /// Epsilon must be positive and finite.
    #[error("epsilon must be positive and finite, got {0}")]
    InvalidEpsilon(f64),
}

impl ConfigError {
    pub fn missing(alphabet_size: usize) -> Self {
        Self::MissingBreakpoints { alphabet_size }
    }

    pub fn length_mismatch(expected: usize, actual: usize) -> Self {
        Self::LengthMismatch { expected, actual }
    }

    pub fn invalid_entry(alphabet_size: usize, reason: impl Into<String>) -> Self {
        Self::InvalidEntry {
            alphabet_size,
            reason: reason.into(),
        }
    }
}

/// Input validation errors raised by the encoding pipeline.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum InputError {
    /// The series has no points.
    #[error("series is empty")]
    EmptySeries,

    /// Every value in the series is missing (NaN).
    #[error("series has no observed values")]
    NoObservations,

    /// First and last timestamps coincide, so the window step would be 0.
    #[error("series spans zero duration (t_min == t_max == {0})")]
    ZeroDuration(f64),

    /// Word size must be at least 1.
    #[error("word size must be >= 1, got {0}")]
    InvalidWordSize(usize),

    /// Clamping duration must be positive and finite.
    #[error("duration must be positive and finite, got {0}")]
    InvalidDuration(f64),

    /// Timestamps must be finite and non-decreasing.
    #[error("timestamp at index {index} is not finite or goes backwards ({timestamp})")]
    InvalidTimestamp { index: usize, timestamp: f64 },

    /// Time and value columns differ in length.
    #[error("column length mismatch: {times} timestamps, {values} values")]
    ColumnMismatch { times: usize, values: usize },

    /// An aggregation window contained no observations.
    #[error("aggregation window {0} contains no observations")]
    EmptyWindow(usize),

    /// A NaN aggregate was handed to the symbol mapper.
    #[error("cannot map an undefined (NaN) aggregate to a letter")]
    UndefinedAggregate,

    /// Two words of different lengths were compared.
    #[error("word length mismatch: {left} vs {right}")]
    LengthMismatch { left: usize, right: usize },

    /// A letter index is outside the distance table's alphabet.
    #[error("letter index {index} is outside an alphabet of size {alphabet_size}")]
    LetterOutOfRange { index: usize, alphabet_size: usize },

    /// A character is not a lowercase ASCII letter.
    #[error("'{0}' is not a valid letter")]
    InvalidLetter(char),
}

/// Top-level error, one variant per taxonomy family.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SaxError {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("input error: {0}")]
    Input(#[from] InputError),
}

impl SaxError {
    pub fn is_config(&self) -> bool {
        matches!(self, Self::Config(_))
    }

    pub fn is_input(&self) -> bool {
        matches!(self, Self::Input(_))
    }
}
