pub mod algorithms;
pub mod core;
pub mod metrics;

use std::sync::Arc;

use serde::{Deserialize, Serialize};

pub use crate::algorithms::normalize::{IdentityNormalizer, Normalizer, ZNormalizer};
pub use crate::algorithms::paa::{
    split_segments, Aggregator, PiecewiseAggregator, Segment, TimeSpan, WindowBoundary,
};
pub use crate::algorithms::symbol::{segments_to_word, symbol_index};
pub use crate::core::breakpoints::{BreakpointTable, CutPoints, LetterPositions};
pub use crate::core::config::EncoderConfig;
pub use crate::core::error::{ConfigError, InputError, Result, SaxError};
pub use crate::core::series::{RawArraySeries, Series, TimeIndexedSeries};
pub use crate::core::word::{Letter, Word};
pub use crate::metrics::letter_distance::{string_distance, LetterDistanceTable};

/// Result of encoding one series: the word and the windows it was read from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Encoding {
    pub word: Word,
    /// One segment per letter, in word order.
    pub segments: Vec<Segment>,
}

/// Symbolic encoder with graded letter distances (MSAX).
///
/// Composes a [`Normalizer`], an [`Aggregator`] and the symbol mapper. The
/// cut points and the letter distance table are resolved once at construction.
///
/// # Examples
///
/// ```
/// use msax_rs::{Encoder, EncoderConfig, TimeIndexedSeries};
///
/// let series = TimeIndexedSeries::new(
///     (0..40).map(|i| (i as f64 * 0.5, (i as f64 * 0.3).sin())).collect(),
/// )
/// .unwrap();
/// let encoder = Encoder::new(EncoderConfig::new(4, 5)).unwrap();
/// let encoding = encoder.encode(&series).unwrap();
/// assert_eq!(encoding.word.len(), 4);
/// assert_eq!(encoding.segments.len(), 4);
/// ```
pub struct Encoder {
    config: EncoderConfig,
    table: Arc<BreakpointTable>,
    cuts: CutPoints,
    distances: Arc<LetterDistanceTable>,
    normalizer: Box<dyn Normalizer>,
    aggregator: Box<dyn Aggregator>,
}

impl Encoder {
    /// Create an encoder backed by the standard Gaussian breakpoint table.
    pub fn new(config: EncoderConfig) -> Result<Self> {
        Self::with_table(config, BreakpointTable::standard())
    }

    /// Create an encoder backed by a caller-supplied breakpoint table.
    ///
    /// The table needs entries for both `alphabet_size` (cut points) and
    /// `alphabet_size + 1` (letter positions).
    pub fn with_table(config: EncoderConfig, table: Arc<BreakpointTable>) -> Result<Self> {
        config.validate()?;
        let cuts = table.cut_points(config.alphabet_size)?.clone();
        let distances = table.distance_table(config.alphabet_size)?;
        log::debug!(
            "encoder ready: word_size={}, alphabet_size={}, boundary={:?}",
            config.word_size,
            config.alphabet_size,
            config.boundary
        );

        Ok(Self {
            config,
            table,
            cuts,
            distances,
            normalizer: Box::new(ZNormalizer::new(config.epsilon)),
            aggregator: Box::new(PiecewiseAggregator::new(config.boundary)),
        })
    }

    /// Replace the normalization strategy.
    pub fn with_normalizer(mut self, normalizer: impl Normalizer + 'static) -> Self {
        self.normalizer = Box::new(normalizer);
        self
    }

    /// Replace the aggregation strategy.
    pub fn with_aggregator(mut self, aggregator: impl Aggregator + 'static) -> Self {
        self.aggregator = Box::new(aggregator);
        self
    }

    pub fn config(&self) -> &EncoderConfig {
        &self.config
    }

    pub fn breakpoints(&self) -> &Arc<BreakpointTable> {
        &self.table
    }

    /// Normalize and aggregate without mapping to letters.
    ///
    /// Empty windows show up as NaN aggregates instead of an error.
    pub fn segments<S: Series>(&self, series: &S) -> Result<Vec<Segment>> {
        let normalized = series.normalize(self.normalizer.as_ref())?;
        normalized.to_segments(self.config.word_size, self.aggregator.as_ref())
    }

    /// Encode a series into a word of `word_size` letters.
    ///
    /// Fails with `InputError::EmptyWindow` if any window holds no observations.
    pub fn encode<S: Series>(&self, series: &S) -> Result<Encoding> {
        let segments = self.segments(series)?;
        let word = segments_to_word(&segments, &self.cuts)?;
        log::trace!("encoded {} points as {word}", series.len());
        Ok(Encoding { word, segments })
    }

    /// Encode independent series; order of results matches the input.
    ///
    /// With the `parallel` feature the series are encoded on the rayon pool.
    pub fn encode_batch<S: Series>(&self, batch: &[S]) -> Vec<Result<Encoding>> {
        #[cfg(feature = "parallel")]
        {
            use rayon::prelude::*;
            batch.par_iter().map(|series| self.encode(series)).collect()
        }
        #[cfg(not(feature = "parallel"))]
        {
            batch.iter().map(|series| self.encode(series)).collect()
        }
    }

    /// The graded letter distance table for this encoder's alphabet.
    pub fn distance_table(&self) -> Arc<LetterDistanceTable> {
        Arc::clone(&self.distances)
    }

    /// Sum of letter distances between two words of equal length.
    pub fn word_distance(&self, a: &Word, b: &Word) -> Result<f64> {
        string_distance(a, b, &self.distances)
    }
}

impl std::fmt::Debug for Encoder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Encoder")
            .field("config", &self.config)
            .field("cuts", &self.cuts)
            .finish_non_exhaustive()
    }
}
