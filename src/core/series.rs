//! Series representations accepted by the encoder.
//!
//! Both variants expose the same capability (`normalize` and `to_segments`)
//! so the encoder is written once against [`Series`]. They differ only in
//! their time axis:
//!
//! - [`TimeIndexedSeries`]: explicit timestamps; windows span `[t_min, t_max]`
//!   and a point exactly at `t_max` is dropped under the half-open policy.
//! - [`RawArraySeries`]: the sample index is the timestamp and the span is
//!   `[0, n)`, so every sample lands in a window.
//!
//! A NaN value marks a missing observation. Missing observations keep their
//! timestamp (they still shape the span) but never contribute to statistics
//! or aggregates.

use crate::algorithms::normalize::Normalizer;
use crate::algorithms::paa::{first_unordered, Aggregator, Segment, TimeSpan};
use crate::core::error::{InputError, Result};

/// Capability shared by every series representation.
pub trait Series: Sized + Send + Sync {
    /// Number of points, missing observations included.
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The value column.
    fn values(&self) -> &[f64];

    /// A copy of this series with the same time axis and new values.
    fn with_values(&self, values: Vec<f64>) -> Self;

    /// Rescale the value column, leaving the time axis untouched.
    fn normalize(&self, normalizer: &dyn Normalizer) -> Result<Self> {
        let values = normalizer.normalize(self.values())?;
        debug_assert_eq!(values.len(), self.len());
        Ok(self.with_values(values))
    }

    /// Reduce to exactly `word_size` segments over this series' time axis.
    fn to_segments(&self, word_size: usize, aggregator: &dyn Aggregator) -> Result<Vec<Segment>>;
}

/// A series with explicit, non-decreasing timestamps.
#[derive(Debug, Clone, PartialEq)]
pub struct TimeIndexedSeries {
    times: Vec<f64>,
    values: Vec<f64>,
}

impl TimeIndexedSeries {
    /// Build from `(timestamp, value)` pairs.
    pub fn new(points: Vec<(f64, f64)>) -> Result<Self> {
        let (times, values): (Vec<f64>, Vec<f64>) = points.into_iter().unzip();
        Self::from_columns(times, values)
    }

    /// Build from separate time and value columns.
    ///
    /// Timestamps must be finite and non-decreasing.
    pub fn from_columns(times: Vec<f64>, values: Vec<f64>) -> Result<Self> {
        if times.len() != values.len() {
            return Err(InputError::ColumnMismatch {
                times: times.len(),
                values: values.len(),
            }
            .into());
        }
        if let Some(index) = first_unordered(&times) {
            return Err(InputError::InvalidTimestamp {
                index,
                timestamp: times[index],
            }
            .into());
        }
        Ok(Self { times, values })
    }

    pub fn times(&self) -> &[f64] {
        &self.times
    }

    /// Iterate over `(timestamp, value)` pairs.
    pub fn points(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.times.iter().copied().zip(self.values.iter().copied())
    }

    /// `[t_min, t_max]`, or `None` for an empty series.
    pub fn span(&self) -> Option<TimeSpan> {
        match (self.times.first(), self.times.last()) {
            (Some(&start), Some(&stop)) => Some(TimeSpan::new(start, stop)),
            _ => None,
        }
    }

    /// Force the series to cover exactly `duration` from its first timestamp.
    ///
    /// If the series reaches `t_min + duration`, points after it are dropped.
    /// Otherwise a single missing-value point is appended at `t_min + duration`
    /// so the segmentation span ends there.
    pub fn with_duration(&self, duration: f64) -> Result<Self> {
        if !(duration.is_finite() && duration > 0.0) {
            return Err(InputError::InvalidDuration(duration).into());
        }
        let span = self.span().ok_or(InputError::EmptySeries)?;
        let t_end = span.start + duration;

        let mut times = self.times.clone();
        let mut values = self.values.clone();
        if span.stop >= t_end {
            let keep = times.partition_point(|&t| t <= t_end);
            times.truncate(keep);
            values.truncate(keep);
        } else {
            times.push(t_end);
            values.push(f64::NAN);
        }
        Ok(Self { times, values })
    }
}

impl Series for TimeIndexedSeries {
    fn len(&self) -> usize {
        self.times.len()
    }

    fn values(&self) -> &[f64] {
        &self.values
    }

    fn with_values(&self, values: Vec<f64>) -> Self {
        Self {
            times: self.times.clone(),
            values,
        }
    }

    fn to_segments(&self, word_size: usize, aggregator: &dyn Aggregator) -> Result<Vec<Segment>> {
        let span = self.span().ok_or(InputError::EmptySeries)?;
        aggregator.aggregate(&self.times, &self.values, span, word_size)
    }
}

/// A plain array of evenly sampled values; the index is the time axis.
#[derive(Debug, Clone, PartialEq)]
pub struct RawArraySeries {
    values: Vec<f64>,
}

impl RawArraySeries {
    pub fn new(values: Vec<f64>) -> Self {
        Self { values }
    }
}

impl From<Vec<f64>> for RawArraySeries {
    fn from(values: Vec<f64>) -> Self {
        Self::new(values)
    }
}

impl Series for RawArraySeries {
    fn len(&self) -> usize {
        self.values.len()
    }

    fn values(&self) -> &[f64] {
        &self.values
    }

    fn with_values(&self, values: Vec<f64>) -> Self {
        Self { values }
    }

    fn to_segments(&self, word_size: usize, aggregator: &dyn Aggregator) -> Result<Vec<Segment>> {
        if self.values.is_empty() {
            return Err(InputError::EmptySeries.into());
        }
        let n = self.values.len();
        let times: Vec<f64> = (0..n).map(|i| i as f64).collect();
        aggregator.aggregate(&times, &self.values, TimeSpan::new(0.0, n as f64), word_size)
    }
}
