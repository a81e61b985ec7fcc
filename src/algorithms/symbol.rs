use crate::algorithms::paa::Segment;
use crate::core::breakpoints::CutPoints;
use crate::core::error::{InputError, Result};
use crate::core::word::{Letter, Word};

/// Bucket index of `value`: the number of cut points `<= value`.
///
/// A value equal to a cut point belongs to the bucket above it.
/// NaN aggregates are refused rather than defaulted to a letter.
pub fn symbol_index(value: f64, cuts: &CutPoints) -> std::result::Result<usize, InputError> {
    if value.is_nan() {
        return Err(InputError::UndefinedAggregate);
    }
    Ok(cuts.as_slice().partition_point(|&c| c <= value))
}

/// Map each segment aggregate to a letter, in segment order.
///
/// Fails with `InputError::EmptyWindow` naming the first window whose
/// aggregate is undefined.
pub fn segments_to_word(segments: &[Segment], cuts: &CutPoints) -> Result<Word> {
    let letters = segments
        .iter()
        .enumerate()
        .map(|(i, seg)| {
            let idx = symbol_index(seg.aggregate, cuts).map_err(|_| InputError::EmptyWindow(i))?;
            Letter::from_index(idx)
        })
        .collect::<std::result::Result<Vec<_>, _>>()?;
    Ok(Word::new(letters))
}
