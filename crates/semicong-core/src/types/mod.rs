//! # Core Type Definitions
//!
//! This module contains the vocabulary shared by every part of the coordinator:
//! - Words over generator indices (`Letter`, `Word`, `Relation`)
//! - The kind of congruence being computed (`CongruenceKind`)
//! - The three-valued query answer (`Verdict`)
//! - Error types (`CongruenceError`)
//!
//! ## Determinism Guarantees
//!
//! All types in this module:
//! - Use integer data only (no floating-point)
//! - Implement `Ord` where they are used as keys in `BTreeMap`/`BTreeSet`

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

use crate::primitives::MAX_TEXT_LETTERS;

// =============================================================================
// LETTERS & WORDS
// =============================================================================

/// Index of a generator. Valid letters are `0..nr_generators`.
pub type Letter = usize;

/// A word in the generators of a semigroup.
///
/// The text form uses `a` for generator 0, `b` for generator 1, and so on,
/// so `"aab"` is the word `[0, 0, 1]`. Serde uses the text form as well.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Word(pub Vec<Letter>);

impl Word {
    /// Create a word from a vector of letters.
    #[must_use]
    pub fn new(letters: Vec<Letter>) -> Self {
        Self(letters)
    }

    /// The single-letter word for a generator.
    #[must_use]
    pub fn letter(letter: Letter) -> Self {
        Self(vec![letter])
    }

    /// The letters of this word.
    #[must_use]
    pub fn letters(&self) -> &[Letter] {
        &self.0
    }

    /// Number of letters.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// True for the empty word.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Concatenate two words.
    #[must_use]
    pub fn concat(&self, other: &Word) -> Word {
        let mut letters = Vec::with_capacity(self.len() + other.len());
        letters.extend_from_slice(&self.0);
        letters.extend_from_slice(&other.0);
        Word(letters)
    }

    /// Largest letter in the word, if any.
    #[must_use]
    pub fn max_letter(&self) -> Option<Letter> {
        self.0.iter().copied().max()
    }
}

impl From<Vec<Letter>> for Word {
    fn from(letters: Vec<Letter>) -> Self {
        Self(letters)
    }
}

impl FromStr for Word {
    type Err = CongruenceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut letters = Vec::with_capacity(s.len());
        for c in s.trim().chars() {
            if !c.is_ascii_lowercase() {
                return Err(CongruenceError::InvalidWord(s.to_string()));
            }
            letters.push((c as u8 - b'a') as Letter);
        }
        Ok(Word(letters))
    }
}

impl TryFrom<String> for Word {
    type Error = CongruenceError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Word> for String {
    fn from(word: Word) -> Self {
        word.to_string()
    }
}

impl fmt::Display for Word {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for &letter in &self.0 {
            if letter < MAX_TEXT_LETTERS {
                write!(f, "{}", (b'a' + letter as u8) as char)?;
            } else {
                // Outside the text alphabet: fall back to an index.
                write!(f, "[{}]", letter)?;
            }
        }
        Ok(())
    }
}

/// A defining relation or generating pair: two words identified by the congruence.
pub type Relation = (Word, Word);

// =============================================================================
// CONGRUENCE KIND
// =============================================================================

/// The sidedness of a congruence.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum CongruenceKind {
    /// Compatible with left multiplication only.
    Left,
    /// Compatible with right multiplication only.
    Right,
    /// Compatible with multiplication on both sides.
    #[default]
    #[serde(alias = "two-sided", alias = "two_sided")]
    TwoSided,
}

impl CongruenceKind {
    /// Name used in presentation files and on the command line.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            CongruenceKind::Left => "left",
            CongruenceKind::Right => "right",
            CongruenceKind::TwoSided => "twosided",
        }
    }
}

impl FromStr for CongruenceKind {
    type Err = CongruenceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "left" => Ok(CongruenceKind::Left),
            "right" => Ok(CongruenceKind::Right),
            "twosided" | "two-sided" | "two_sided" => Ok(CongruenceKind::TwoSided),
            other => Err(CongruenceError::UnknownKind(other.to_string())),
        }
    }
}

impl fmt::Display for CongruenceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// =============================================================================
// VERDICT
// =============================================================================

/// Answer to a query that may not be decidable yet.
///
/// `Unknown` is not an error: it is how partial progress (in practice,
/// cancellation) reports that no definite answer can be given.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Verdict {
    /// The statement holds.
    True,
    /// The statement does not hold.
    False,
    /// Not enough has been computed to decide.
    Unknown,
}

impl Verdict {
    /// Definite verdict from a boolean.
    #[must_use]
    pub fn from_bool(value: bool) -> Self {
        if value { Verdict::True } else { Verdict::False }
    }

    /// True for `True` and `False`.
    #[must_use]
    pub fn is_known(&self) -> bool {
        !matches!(self, Verdict::Unknown)
    }

    /// The boolean value, or `None` for `Unknown`.
    #[must_use]
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Verdict::True => Some(true),
            Verdict::False => Some(false),
            Verdict::Unknown => None,
        }
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Verdict::True => f.write_str("TRUE"),
            Verdict::False => f.write_str("FALSE"),
            Verdict::Unknown => f.write_str("UNKNOWN"),
        }
    }
}

// =============================================================================
// ERROR TYPES
// =============================================================================

/// Errors for invalid input and for the application layer.
///
/// Broken coordinator preconditions are not represented here; they abort
/// the offending call.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CongruenceError {
    /// A word could not be parsed from its text form.
    #[error("Invalid word: {0:?}")]
    InvalidWord(String),

    /// A relation uses a generator that does not exist.
    #[error("Letter {letter} out of range for {nr_generators} generators")]
    LetterOutOfRange { letter: Letter, nr_generators: usize },

    /// A relation contains the empty word.
    #[error("Empty word in relation")]
    EmptyWord,

    /// The presentation has no generators.
    #[error("A presentation needs at least one generator")]
    NoGenerators,

    /// The congruence kind cannot be computed by rewriting then enumerating.
    #[error("Unsupported congruence kind: {0}")]
    UnsupportedKind(CongruenceKind),

    /// The congruence kind string was not recognised.
    #[error("Unknown congruence kind: {0:?}")]
    UnknownKind(String),

    /// The rewriting system is not confluent and cannot be completed here.
    #[error("Rewriting system is not confluent")]
    NotConfluent,

    /// Configuration could not be loaded.
    #[error("Configuration error: {0}")]
    Config(String),

    /// An I/O error occurred.
    #[error("I/O error: {0}")]
    Io(String),
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn word_parses_text_form() {
        let word: Word = "aab".parse().expect("parse");
        assert_eq!(word, Word::new(vec![0, 0, 1]));
        assert_eq!(word.to_string(), "aab");
    }

    #[test]
    fn word_rejects_non_letters() {
        assert!(matches!(
            "ab1".parse::<Word>(),
            Err(CongruenceError::InvalidWord(_))
        ));
        assert!(matches!(
            "aB".parse::<Word>(),
            Err(CongruenceError::InvalidWord(_))
        ));
    }

    #[test]
    fn word_display_falls_back_to_indices() {
        let word = Word::new(vec![0, 30]);
        assert_eq!(word.to_string(), "a[30]");
    }

    #[test]
    fn word_concat() {
        let a = Word::letter(0);
        let b = Word::letter(1);
        assert_eq!(a.concat(&b), Word::new(vec![0, 1]));
        assert_eq!(a.concat(&b).max_letter(), Some(1));
    }

    #[test]
    fn congruence_kind_parsing() {
        assert_eq!("left".parse::<CongruenceKind>(), Ok(CongruenceKind::Left));
        assert_eq!(
            "twosided".parse::<CongruenceKind>(),
            Ok(CongruenceKind::TwoSided)
        );
        assert!(matches!(
            "sideways".parse::<CongruenceKind>(),
            Err(CongruenceError::UnknownKind(_))
        ));
    }

    #[test]
    fn verdict_helpers() {
        assert_eq!(Verdict::from_bool(true), Verdict::True);
        assert_eq!(Verdict::False.as_bool(), Some(false));
        assert!(!Verdict::Unknown.is_known());
        assert_eq!(Verdict::Unknown.to_string(), "UNKNOWN");
    }
}
