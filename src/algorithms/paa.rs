use serde::{Deserialize, Serialize};

use crate::core::error::{InputError, Result};

/// How the right edge of the final window is treated.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WindowBoundary {
    /// Every window is `[start, stop)`, including the last one. A point sitting
    /// exactly on the series' last timestamp lands in no window.
    #[default]
    HalfOpen,
    /// Windows are `[start, stop)` except the last, which is `[start, t_max]`.
    ClosedFinal,
}

/// Time range `[start, stop]` covered by a series.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimeSpan {
    pub start: f64,
    pub stop: f64,
}

impl TimeSpan {
    pub fn new(start: f64, stop: f64) -> Self {
        Self { start, stop }
    }

    pub fn duration(&self) -> f64 {
        self.stop - self.start
    }
}

/// One aggregation window and the mean of the values that fell into it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Segment {
    pub start: f64,
    pub stop: f64,
    /// NaN when the window holds no observations.
    pub aggregate: f64,
}

impl Segment {
    pub fn is_empty(&self) -> bool {
        self.aggregate.is_nan()
    }
}

/// Split a segment list into the aggregate column and the `(start, stop)` pairs.
pub fn split_segments(segments: &[Segment]) -> (Vec<f64>, Vec<(f64, f64)>) {
    segments
        .iter()
        .map(|s| (s.aggregate, (s.start, s.stop)))
        .unzip()
}

/// Strategy for reducing a time-indexed column to a fixed number of windows.
pub trait Aggregator: Send + Sync {
    /// Aggregate `values` (paired with `times`) over `span` into exactly
    /// `word_size` contiguous segments.
    ///
    /// `times` must be non-decreasing; [`TimeIndexedSeries`] guarantees this.
    ///
    /// [`TimeIndexedSeries`]: crate::core::series::TimeIndexedSeries
    fn aggregate(
        &self,
        times: &[f64],
        values: &[f64],
        span: TimeSpan,
        word_size: usize,
    ) -> Result<Vec<Segment>>;
}

/// Time-aware Piecewise Aggregate Approximation.
///
/// The span is cut into `word_size` windows of equal duration
/// `step = (t_max - t_min) / word_size`. Each window's start is the previous
/// window's stop, so boundaries are exactly contiguous; the last window stops
/// at `t_max` itself so rounding in the accumulated boundaries never moves the
/// final edge. The aggregate is the mean of the non-NaN values whose timestamp
/// lies in the window; empty windows yield NaN.
///
/// Fails with `InputError::InvalidTimestamp` on a timestamp that is not finite
/// or goes backwards.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PiecewiseAggregator {
    pub boundary: WindowBoundary,
}

impl PiecewiseAggregator {
    pub fn new(boundary: WindowBoundary) -> Self {
        Self { boundary }
    }
}

impl Aggregator for PiecewiseAggregator {
    fn aggregate(
        &self,
        times: &[f64],
        values: &[f64],
        span: TimeSpan,
        word_size: usize,
    ) -> Result<Vec<Segment>> {
        if word_size == 0 {
            return Err(InputError::InvalidWordSize(word_size).into());
        }
        if times.len() != values.len() {
            return Err(InputError::ColumnMismatch {
                times: times.len(),
                values: values.len(),
            }
            .into());
        }
        if times.is_empty() {
            return Err(InputError::EmptySeries.into());
        }
        if span.duration().is_nan() || span.duration() <= 0.0 {
            return Err(InputError::ZeroDuration(span.start).into());
        }
        if let Some(index) = first_unordered(times) {
            return Err(InputError::InvalidTimestamp {
                index,
                timestamp: times[index],
            }
            .into());
        }

        let step = span.duration() / word_size as f64;
        let mut segments = Vec::with_capacity(word_size);
        let mut start = span.start;

        for i in 0..word_size {
            let last = i + 1 == word_size;
            let stop = if last { span.stop } else { start + step };

            // `times` is ascending, so each window is a contiguous slice.
            let lo = times.partition_point(|&t| t < start);
            let hi = if last && self.boundary == WindowBoundary::ClosedFinal {
                times.partition_point(|&t| t <= stop)
            } else {
                times.partition_point(|&t| t < stop)
            };

            let aggregate = window_mean(&values[lo..hi.max(lo)]);
            if aggregate.is_nan() {
                log::trace!("window {i} [{start}, {stop}) has no observations");
            }
            segments.push(Segment {
                start,
                stop,
                aggregate,
            });
            start = stop;
        }

        Ok(segments)
    }
}

/// Index of the first timestamp that is not finite or precedes its predecessor.
pub(crate) fn first_unordered(times: &[f64]) -> Option<usize> {
    let mut prev = f64::NEG_INFINITY;
    times.iter().position(|&t| {
        let bad = !t.is_finite() || t < prev;
        prev = t;
        bad
    })
}

fn window_mean(values: &[f64]) -> f64 {
    let (count, sum) = values
        .iter()
        .filter(|v| !v.is_nan())
        .fold((0usize, 0.0), |(n, s), v| (n + 1, s + v));
    if count == 0 {
        f64::NAN
    } else {
        sum / count as f64
    }
}
