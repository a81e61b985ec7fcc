use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::core::error::{InputError, SaxError};

const FIRST_LETTER: u8 = b'a';

const LETTER_COUNT: usize = 26;

/// A single symbol, stored as its zero-based index in the alphabet.
///
/// Serialized as the bare index; deserialization rejects indices past `'z'`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Letter(u8);

impl Letter {
    /// Letter at `index` (0 → `'a'`). Fails past `'z'`.
    pub fn from_index(index: usize) -> Result<Self, InputError> {
        if index < LETTER_COUNT {
            Ok(Self(index as u8))
        } else {
            Err(InputError::LetterOutOfRange {
                index,
                alphabet_size: LETTER_COUNT,
            })
        }
    }

    pub fn index(self) -> usize {
        self.0 as usize
    }

    pub fn as_char(self) -> char {
        (FIRST_LETTER + self.0) as char
    }
}

impl TryFrom<char> for Letter {
    type Error = InputError;

    fn try_from(c: char) -> Result<Self, Self::Error> {
        if c.is_ascii_lowercase() {
            Ok(Self(c as u8 - FIRST_LETTER))
        } else {
            Err(InputError::InvalidLetter(c))
        }
    }
}

impl TryFrom<u8> for Letter {
    type Error = InputError;

    fn try_from(index: u8) -> Result<Self, Self::Error> {
        Self::from_index(index as usize)
    }
}

impl From<Letter> for u8 {
    fn from(letter: Letter) -> Self {
        letter.0
    }
}

impl fmt::Display for Letter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

/// The symbolic string produced by one encode call.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Word {
    letters: Vec<Letter>,
}

impl Word {
    pub fn new(letters: Vec<Letter>) -> Self {
        Self { letters }
    }

    pub fn letters(&self) -> &[Letter] {
        &self.letters
    }

    pub fn len(&self) -> usize {
        self.letters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.letters.is_empty()
    }
}

impl fmt::Display for Word {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for letter in &self.letters {
            write!(f, "{letter}")?;
        }
        Ok(())
    }
}

impl FromStr for Word {
    type Err = SaxError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let letters = s
            .chars()
            .map(Letter::try_from)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { letters })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_letter_index_round_trip() {
        let d = Letter::from_index(3).unwrap();
        assert_eq!(d.as_char(), 'd');
        assert_eq!(Letter::try_from('d').unwrap(), d);
        assert!(Letter::from_index(26).is_err());
        assert_eq!(Letter::try_from('A'), Err(InputError::InvalidLetter('A')));
    }

    #[test]
    fn test_deserialize_rejects_out_of_range_letters() {
        let word: Word = serde_json::from_str(r#"{"letters":[0,25,3]}"#).unwrap();
        assert_eq!(word.to_string(), "azd");
        assert_eq!(serde_json::to_string(&word).unwrap(), r#"{"letters":[0,25,3]}"#);

        assert!(serde_json::from_str::<Word>(r#"{"letters":[200]}"#).is_err());
        assert!(serde_json::from_str::<Letter>("26").is_err());
    }

    #[test]
    fn test_word_display_and_parse() {
        let word: Word = "abba".parse().unwrap();
        assert_eq!(word.len(), 4);
        assert_eq!(word.letters()[1].index(), 1);
        assert_eq!(word.to_string(), "abba");
        assert!("ab1".parse::<Word>().is_err());
    }
}
