use serde::{Deserialize, Serialize};

use crate::core::breakpoints::LetterPositions;
use crate::core::error::{ConfigError, InputError, Result};
use crate::core::word::{Letter, Word};

/// Graded pairwise distances between the letters of an alphabet.
///
/// `d(i, j) = pos[max(i, j)] - pos[min(i, j)]` and `d(i, i) = 0`.
/// Unlike classic SAX, adjacent letters are a small positive distance apart,
/// and with monotone positions the distance grows with letter separation.
///
/// Stored as a dense row-major `A x A` matrix; immutable after construction.
/// Deserialized tables are checked for shape before use.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawDistanceTable")]
pub struct LetterDistanceTable {
    alphabet_size: usize,
    distances: Vec<f64>,
}

#[derive(Deserialize)]
struct RawDistanceTable {
    alphabet_size: usize,
    distances: Vec<f64>,
}

impl TryFrom<RawDistanceTable> for LetterDistanceTable {
    type Error = ConfigError;

    fn try_from(raw: RawDistanceTable) -> std::result::Result<Self, Self::Error> {
        let RawDistanceTable {
            alphabet_size,
            distances,
        } = raw;
        if alphabet_size == 0 {
            return Err(ConfigError::InvalidAlphabetSize(alphabet_size));
        }
        let expected = alphabet_size
            .checked_mul(alphabet_size)
            .ok_or(ConfigError::InvalidAlphabetSize(alphabet_size))?;
        if distances.len() != expected {
            return Err(ConfigError::length_mismatch(expected, distances.len()));
        }
        if distances.iter().any(|d| !d.is_finite()) {
            return Err(ConfigError::invalid_entry(
                alphabet_size,
                "letter distances must be finite",
            ));
        }
        Ok(Self {
            alphabet_size,
            distances,
        })
    }
}

impl LetterDistanceTable {
    /// Build the table from one position per letter.
    ///
    /// Fails with `ConfigError::LengthMismatch` if `positions.len() != alphabet_size`.
    pub fn build(alphabet_size: usize, positions: &LetterPositions) -> Result<Self> {
        if positions.len() != alphabet_size {
            return Err(ConfigError::length_mismatch(alphabet_size, positions.len()).into());
        }
        let pos = positions.as_slice();

        let mut distances = vec![0.0; alphabet_size * alphabet_size];
        for i in 0..alphabet_size {
            for j in 0..alphabet_size {
                if i != j {
                    distances[i * alphabet_size + j] = pos[i.max(j)] - pos[i.min(j)];
                }
            }
        }

        Ok(Self {
            alphabet_size,
            distances,
        })
    }

    pub fn alphabet_size(&self) -> usize {
        self.alphabet_size
    }

    /// Distance between letters at indices `i` and `j`.
    ///
    /// # Panics
    /// Panics if either index is outside the alphabet.
    #[inline]
    pub fn distance(&self, i: usize, j: usize) -> f64 {
        debug_assert!(i < self.alphabet_size && j < self.alphabet_size);
        self.row(i)[j]
    }

    #[inline]
    fn row(&self, i: usize) -> &[f64] {
        let n = self.alphabet_size;
        &self.distances[i * n..(i + 1) * n]
    }

    /// Checked distance between two letters.
    pub fn letter_distance(&self, a: Letter, b: Letter) -> Result<f64> {
        let (i, j) = (a.index(), b.index());
        for index in [i, j] {
            if index >= self.alphabet_size {
                return Err(InputError::LetterOutOfRange {
                    index,
                    alphabet_size: self.alphabet_size,
                }
                .into());
            }
        }
        Ok(self.row(i)[j])
    }

    /// The table as a 2-D array, one row per letter.
    pub fn as_rows(&self) -> Vec<Vec<f64>> {
        self.distances
            .chunks(self.alphabet_size)
            .map(|row| row.to_vec())
            .collect()
    }
}

/// Sum of letter distances over aligned positions of two words.
///
/// Zero for identical words, symmetric, non-negative under a monotone
/// position table. Fails if the words differ in length or use letters
/// outside the table's alphabet.
pub fn string_distance(a: &Word, b: &Word, table: &LetterDistanceTable) -> Result<f64> {
    if a.len() != b.len() {
        return Err(InputError::LengthMismatch {
            left: a.len(),
            right: b.len(),
        }
        .into());
    }
    a.letters()
        .iter()
        .zip(b.letters())
        .map(|(&x, &y)| table.letter_distance(x, y))
        .sum()
}
