use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::sync::Arc;

use once_cell::sync::Lazy;
use parking_lot::RwLock;
use serde::{Deserialize, Serialize, Serializer};

use crate::core::error::{ConfigError, Result};
use crate::metrics::letter_distance::LetterDistanceTable;

/// Largest alphabet that can be rendered with the letters `a..=z`.
pub const MAX_ALPHABET_SIZE: usize = 26;

/// Gaussian equiprobable cut points, rounded to two decimals.
///
/// Entry `k` splits the standard normal into `k` buckets of equal mass.
/// Size 21 exists so that a 20-letter alphabet still has letter positions.
const STANDARD_ENTRIES: &[(usize, &[f64])] = &[
    (2, &[0.0]),
    (3, &[-0.43, 0.43]),
    (4, &[-0.67, 0.0, 0.67]),
    (5, &[-0.84, -0.25, 0.25, 0.84]),
    (6, &[-0.97, -0.43, 0.0, 0.43, 0.97]),
    (7, &[-1.07, -0.57, -0.18, 0.18, 0.57, 1.07]),
    (8, &[-1.15, -0.67, -0.32, 0.0, 0.32, 0.67, 1.15]),
    (9, &[-1.22, -0.76, -0.43, -0.14, 0.14, 0.43, 0.76, 1.22]),
    (10, &[-1.28, -0.84, -0.52, -0.25, 0.0, 0.25, 0.52, 0.84, 1.28]),
    (11, &[-1.34, -0.91, -0.6, -0.35, -0.11, 0.11, 0.35, 0.6, 0.91, 1.34]),
    (
        12,
        &[-1.38, -0.97, -0.67, -0.43, -0.21, 0.0, 0.21, 0.43, 0.67, 0.97, 1.38],
    ),
    (
        13,
        &[-1.43, -1.02, -0.74, -0.5, -0.29, -0.1, 0.1, 0.29, 0.5, 0.74, 1.02, 1.43],
    ),
    (
        14,
        &[
            -1.47, -1.07, -0.79, -0.57, -0.37, -0.18, 0.0, 0.18, 0.37, 0.57, 0.79, 1.07, 1.47,
        ],
    ),
    (
        15,
        &[
            -1.5, -1.11, -0.84, -0.62, -0.43, -0.25, -0.08, 0.08, 0.25, 0.43, 0.62, 0.84, 1.11,
            1.5,
        ],
    ),
    (
        16,
        &[
            -1.53, -1.15, -0.89, -0.67, -0.49, -0.32, -0.16, 0.0, 0.16, 0.32, 0.49, 0.67, 0.89,
            1.15, 1.53,
        ],
    ),
    (
        17,
        &[
            -1.56, -1.19, -0.93, -0.72, -0.54, -0.38, -0.22, -0.07, 0.07, 0.22, 0.38, 0.54, 0.72,
            0.93, 1.19, 1.56,
        ],
    ),
    (
        18,
        &[
            -1.59, -1.22, -0.97, -0.76, -0.59, -0.43, -0.28, -0.14, 0.0, 0.14, 0.28, 0.43, 0.59,
            0.76, 0.97, 1.22, 1.59,
        ],
    ),
    (
        19,
        &[
            -1.62, -1.25, -1.0, -0.8, -0.63, -0.48, -0.34, -0.2, -0.07, 0.07, 0.2, 0.34, 0.48,
            0.63, 0.8, 1.0, 1.25, 1.62,
        ],
    ),
    (
        20,
        &[
            -1.64, -1.28, -1.04, -0.84, -0.67, -0.52, -0.39, -0.25, -0.13, 0.0, 0.13, 0.25, 0.39,
            0.52, 0.67, 0.84, 1.04, 1.28, 1.64,
        ],
    ),
    (
        21,
        &[
            -1.67, -1.31, -1.07, -0.88, -0.71, -0.57, -0.43, -0.3, -0.18, -0.06, 0.06, 0.18, 0.3,
            0.43, 0.57, 0.71, 0.88, 1.07, 1.31, 1.67,
        ],
    ),
];

static STANDARD: Lazy<Arc<BreakpointTable>> = Lazy::new(|| {
    // Built-in entries are checked by `test_standard_entries_are_valid`.
    let entries = STANDARD_ENTRIES
        .iter()
        .map(|(size, cuts)| (*size, CutPoints(cuts.to_vec())))
        .collect();
    Arc::new(BreakpointTable::from_validated(entries))
});

/// Ascending cut points splitting the real line into `alphabet_size` buckets.
///
/// Used for discretizing aggregates into letters. Not to be confused with
/// [`LetterPositions`], which place letters on the line for distance purposes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CutPoints(Vec<f64>);

impl CutPoints {
    pub fn as_slice(&self) -> &[f64] {
        &self.0
    }

    /// Number of buckets these cut points produce.
    pub fn alphabet_size(&self) -> usize {
        self.0.len() + 1
    }
}

/// One real-valued position per letter, ascending in alphabet order.
///
/// For an alphabet of size `A` these are the cut points of the `A + 1` entry,
/// so the letter distance table never depends on the discretization cuts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LetterPositions(Vec<f64>);

impl LetterPositions {
    /// Wrap an arbitrary position table (e.g. a hand-tuned one).
    pub fn new(positions: Vec<f64>) -> Self {
        Self(positions)
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Whether positions are non-decreasing in alphabet order.
    pub fn is_monotone(&self) -> bool {
        self.0.windows(2).all(|w| w[0] <= w[1])
    }
}

/// Static lookup of cut points keyed by alphabet size.
///
/// Immutable once built. Letter distance tables derived from it are memoized
/// per alphabet size and shared by `Arc`.
#[derive(Deserialize)]
#[serde(try_from = "BTreeMap<usize, Vec<f64>>")]
pub struct BreakpointTable {
    entries: BTreeMap<usize, CutPoints>,
    distance_cache: RwLock<HashMap<usize, Arc<LetterDistanceTable>>>,
}

impl BreakpointTable {
    /// The shipped Gaussian table covering alphabet sizes 2..=21.
    pub fn standard() -> Arc<BreakpointTable> {
        Arc::clone(&STANDARD)
    }

    /// Build a table from `alphabet size -> ascending cut points`.
    ///
    /// Each entry must hold exactly `size - 1` finite, strictly ascending values
    /// and `size` must be in `2..=MAX_ALPHABET_SIZE + 1` (the extra size only
    /// provides letter positions).
    pub fn from_entries(entries: BTreeMap<usize, Vec<f64>>) -> Result<Self> {
        Ok(Self::try_from(entries)?)
    }

    fn from_validated(entries: BTreeMap<usize, CutPoints>) -> Self {
        Self {
            entries,
            distance_cache: RwLock::new(HashMap::new()),
        }
    }

    /// Alphabet sizes with an entry, ascending.
    pub fn sizes(&self) -> impl Iterator<Item = usize> + '_ {
        self.entries.keys().copied()
    }

    /// Cut points for discretizing into `alphabet_size` letters.
    pub fn cut_points(&self, alphabet_size: usize) -> Result<&CutPoints> {
        self.entries
            .get(&alphabet_size)
            .ok_or_else(|| ConfigError::missing(alphabet_size).into())
    }

    /// Per-letter positions for an alphabet of `alphabet_size` letters.
    ///
    /// Read from the `alphabet_size + 1` entry.
    pub fn letter_positions(&self, alphabet_size: usize) -> Result<LetterPositions> {
        let next = alphabet_size
            .checked_add(1)
            .ok_or(ConfigError::InvalidAlphabetSize(alphabet_size))?;
        let cuts = self.cut_points(next)?;
        Ok(LetterPositions(cuts.as_slice().to_vec()))
    }

    /// Graded letter distance table for `alphabet_size`, built at most once.
    ///
    /// A failed build leaves the cache untouched.
    pub fn distance_table(&self, alphabet_size: usize) -> Result<Arc<LetterDistanceTable>> {
        if let Some(table) = self.distance_cache.read().get(&alphabet_size) {
            return Ok(Arc::clone(table));
        }

        let mut cache = self.distance_cache.write();
        // Another caller may have filled the slot between the two locks.
        if let Some(table) = cache.get(&alphabet_size) {
            return Ok(Arc::clone(table));
        }
        let positions = self.letter_positions(alphabet_size)?;
        let table = Arc::new(LetterDistanceTable::build(alphabet_size, &positions)?);
        log::debug!("built letter distance table for alphabet size {alphabet_size}");
        cache.insert(alphabet_size, Arc::clone(&table));
        Ok(table)
    }

    /// Number of distance tables built so far.
    pub fn cached_tables(&self) -> usize {
        self.distance_cache.read().len()
    }
}

fn validate_entry(size: usize, cuts: &[f64]) -> std::result::Result<(), ConfigError> {
    if !(2..=MAX_ALPHABET_SIZE + 1).contains(&size) {
        return Err(ConfigError::InvalidAlphabetSize(size));
    }
    if cuts.len() != size - 1 {
        return Err(ConfigError::length_mismatch(size - 1, cuts.len()));
    }
    if cuts.iter().any(|c| !c.is_finite()) {
        return Err(ConfigError::invalid_entry(size, "cut points must be finite"));
    }
    if cuts.windows(2).any(|w| w[0] >= w[1]) {
        return Err(ConfigError::invalid_entry(
            size,
            "cut points must be strictly ascending",
        ));
    }
    Ok(())
}

impl TryFrom<BTreeMap<usize, Vec<f64>>> for BreakpointTable {
    type Error = ConfigError;

    fn try_from(entries: BTreeMap<usize, Vec<f64>>) -> std::result::Result<Self, Self::Error> {
        let mut validated = BTreeMap::new();
        for (size, cuts) in entries {
            validate_entry(size, &cuts)?;
            validated.insert(size, CutPoints(cuts));
        }
        Ok(Self::from_validated(validated))
    }
}

impl Serialize for BreakpointTable {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_map(self.entries.iter())
    }
}

impl fmt::Debug for BreakpointTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BreakpointTable")
            .field("sizes", &self.entries.keys().collect::<Vec<_>>())
            .field("cached_tables", &self.cached_tables())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::error::SaxError;

    #[test]
    fn test_standard_entries_are_valid() {
        for (size, cuts) in STANDARD_ENTRIES {
            assert!(validate_entry(*size, cuts).is_ok(), "entry {size} invalid");
        }
        let table = BreakpointTable::standard();
        assert_eq!(table.sizes().collect::<Vec<_>>(), (2..=21).collect::<Vec<_>>());
    }

    #[test]
    fn test_cut_points_lookup() {
        let table = BreakpointTable::standard();
        let cuts = table.cut_points(4).unwrap();
        assert_eq!(cuts.as_slice(), &[-0.67, 0.0, 0.67]);
        assert_eq!(cuts.alphabet_size(), 4);
    }

    #[test]
    fn test_missing_entry() {
        let table = BreakpointTable::standard();
        let err = table.cut_points(22).unwrap_err();
        assert_eq!(err, SaxError::Config(ConfigError::missing(22)));
    }

    #[test]
    fn test_letter_positions_come_from_next_entry() {
        let table = BreakpointTable::standard();
        let positions = table.letter_positions(7).unwrap();
        assert_eq!(positions.len(), 7);
        assert_eq!(positions.as_slice(), table.cut_points(8).unwrap().as_slice());
        assert!(positions.is_monotone());

        // 20 letters rely on the size-21 entry; 21 letters have nothing to draw from.
        assert_eq!(table.letter_positions(20).unwrap().len(), 20);
        assert!(table.letter_positions(21).is_err());
    }

    #[test]
    fn test_huge_alphabet_size_is_rejected() {
        let table = BreakpointTable::standard();
        let expected = SaxError::Config(ConfigError::InvalidAlphabetSize(usize::MAX));
        assert_eq!(table.letter_positions(usize::MAX).unwrap_err(), expected);
        assert_eq!(table.distance_table(usize::MAX).unwrap_err(), expected);
    }

    #[test]
    fn test_from_entries_rejects_bad_tables() {
        let mut entries = BTreeMap::new();
        entries.insert(3, vec![0.5, -0.5]);
        assert!(matches!(
            BreakpointTable::from_entries(entries),
            Err(SaxError::Config(ConfigError::InvalidEntry { alphabet_size: 3, .. }))
        ));

        let mut entries = BTreeMap::new();
        entries.insert(4, vec![-1.0, 1.0]);
        assert_eq!(
            BreakpointTable::from_entries(entries).unwrap_err(),
            SaxError::Config(ConfigError::length_mismatch(3, 2))
        );

        let mut entries = BTreeMap::new();
        entries.insert(1, vec![]);
        assert_eq!(
            BreakpointTable::from_entries(entries).unwrap_err(),
            SaxError::Config(ConfigError::InvalidAlphabetSize(1))
        );

        let mut entries = BTreeMap::new();
        entries.insert(3, vec![f64::NAN, 1.0]);
        assert!(BreakpointTable::from_entries(entries).is_err());
    }

    #[test]
    fn test_distance_table_is_cached() {
        let mut entries = BTreeMap::new();
        entries.insert(3, vec![-0.43, 0.43]);
        entries.insert(4, vec![-0.67, 0.0, 0.67]);
        let table = BreakpointTable::from_entries(entries).unwrap();

        let first = table.distance_table(3).unwrap();
        let second = table.distance_table(3).unwrap();
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(table.cached_tables(), 1);

        // Size 4 has no size-5 entry for positions; nothing gets cached.
        assert!(table.distance_table(4).is_err());
        assert_eq!(table.cached_tables(), 1);
    }
}
