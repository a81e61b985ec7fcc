use crate::core::error::{InputError, Result};

/// Strategy for rescaling the value column of a series.
///
/// Implementations must return a vector of the same length as the input and
/// leave missing values (NaN) in place.
pub trait Normalizer: Send + Sync {
    fn normalize(&self, values: &[f64]) -> Result<Vec<f64>>;
}

/// Z-normalization: zero mean, unit sample standard deviation.
///
/// Edge cases:
/// - Sample std below `epsilon` (constant or near-constant input) → every observed value is 0
/// - A single observation has no sample std and is treated as degenerate
/// - NaN values are missing: skipped by the statistics and returned as NaN
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ZNormalizer {
    pub epsilon: f64,
}

impl ZNormalizer {
    pub fn new(epsilon: f64) -> Self {
        Self { epsilon }
    }
}

impl Default for ZNormalizer {
    fn default() -> Self {
        Self { epsilon: 1e-6 }
    }
}

impl Normalizer for ZNormalizer {
    fn normalize(&self, values: &[f64]) -> Result<Vec<f64>> {
        let stats = ObservedStats::compute(values)?;

        if stats.sample_std < self.epsilon {
            log::trace!(
                "sample std {} below epsilon {}, zeroing {} values",
                stats.sample_std,
                self.epsilon,
                stats.count
            );
            return Ok(values
                .iter()
                .map(|v| if v.is_nan() { f64::NAN } else { 0.0 })
                .collect());
        }

        Ok(values
            .iter()
            .map(|v| (v - stats.mean) / stats.sample_std)
            .collect())
    }
}

/// Pass-through for data that is already normalized.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct IdentityNormalizer;

impl Normalizer for IdentityNormalizer {
    fn normalize(&self, values: &[f64]) -> Result<Vec<f64>> {
        if values.is_empty() {
            return Err(InputError::EmptySeries.into());
        }
        Ok(values.to_vec())
    }
}

/// Mean and sample standard deviation over the non-NaN values.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ObservedStats {
    pub count: usize,
    pub mean: f64,
    /// `n - 1` denominator; 0 when fewer than two observations exist.
    pub sample_std: f64,
}

impl ObservedStats {
    pub fn compute(values: &[f64]) -> Result<Self> {
        if values.is_empty() {
            return Err(InputError::EmptySeries.into());
        }

        let (count, sum) = values
            .iter()
            .filter(|v| !v.is_nan())
            .fold((0usize, 0.0), |(n, s), v| (n + 1, s + v));
        if count == 0 {
            return Err(InputError::NoObservations.into());
        }
        let mean = sum / count as f64;

        // Two-pass variance; the cumulative-sum shortcut loses precision on large offsets.
        let sample_std = if count < 2 {
            0.0
        } else {
            let ss: f64 = values
                .iter()
                .filter(|v| !v.is_nan())
                .map(|v| (v - mean) * (v - mean))
                .sum();
            (ss / (count - 1) as f64).sqrt()
        };

        Ok(Self {
            count,
            mean,
            sample_std,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::error::SaxError;

    #[test]
    fn test_hand_computed() {
        // mean = 2.5, sample var = (2.25 + 0.25 + 0.25 + 2.25) / 3 = 5/3
        let out = ZNormalizer::default().normalize(&[1.0, 2.0, 3.0, 4.0]).unwrap();
        let std = (5.0_f64 / 3.0).sqrt();
        assert!((out[0] - (-1.5 / std)).abs() < 1e-12);
        assert!((out[3] - (1.5 / std)).abs() < 1e-12);
    }

    #[test]
    fn test_constant_series_zeroed() {
        let out = ZNormalizer::default().normalize(&[5.0, 5.0, 5.0]).unwrap();
        assert_eq!(out, vec![0.0, 0.0, 0.0]);
    }

    #[test]
    fn test_single_value_zeroed() {
        let out = ZNormalizer::default().normalize(&[42.0]).unwrap();
        assert_eq!(out, vec![0.0]);
    }

    #[test]
    fn test_near_constant_below_epsilon() {
        let out = ZNormalizer::new(1e-3)
            .normalize(&[1.0, 1.0 + 1e-6, 1.0 - 1e-6])
            .unwrap();
        assert!(out.iter().all(|&v| v == 0.0));
    }

    #[test]
    fn test_missing_values_preserved() {
        let out = ZNormalizer::default()
            .normalize(&[1.0, f64::NAN, 3.0])
            .unwrap();
        assert!(out[1].is_nan());
        // Stats over [1, 3]: mean 2, sample std sqrt(2)
        let std = 2.0_f64.sqrt();
        assert!((out[0] + 1.0 / std).abs() < 1e-12);
        assert!((out[2] - 1.0 / std).abs() < 1e-12);
    }

    #[test]
    fn test_empty_and_all_missing() {
        assert_eq!(
            ZNormalizer::default().normalize(&[]).unwrap_err(),
            SaxError::Input(InputError::EmptySeries)
        );
        assert_eq!(
            ZNormalizer::default().normalize(&[f64::NAN]).unwrap_err(),
            SaxError::Input(InputError::NoObservations)
        );
    }

    #[test]
    fn test_idempotent() {
        let ts: Vec<f64> = (0..50).map(|i| (i as f64 * 0.3).sin() * 4.0 + 7.0).collect();
        let z = ZNormalizer::default();
        let once = z.normalize(&ts).unwrap();
        let twice = z.normalize(&once).unwrap();
        for (a, b) in once.iter().zip(&twice) {
            assert!((a - b).abs() < 1e-10);
        }
    }

    #[test]
    fn test_identity_passes_through() {
        let out = IdentityNormalizer.normalize(&[3.0, f64::NAN]).unwrap();
        assert_eq!(out[0], 3.0);
        assert!(out[1].is_nan());
    }
}
