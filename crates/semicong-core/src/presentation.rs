//! # Presentation Module
//!
//! The congruence specification consumed by the coordinator.
//!
//! - Generators, defining relations, extra generating pairs
//! - Validation before any rewriting rule is built
//! - Immutable once constructed

use serde::{Deserialize, Serialize};

use crate::{CongruenceError, CongruenceKind, Relation, Word};

/// The data defining a congruence.
///
/// The congruence is the least one of the given `kind` on the semigroup
/// presented by `nr_generators` and `relations` that also contains every
/// pair in `extra`.
///
/// When `over_semigroup` is set, `relations` were read off a concrete
/// ambient semigroup (its multiplication table) rather than supplied as a
/// presentation, and `extra` holds the generating pairs of the congruence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CongruenceSpec {
    kind: CongruenceKind,
    nr_generators: usize,
    relations: Vec<Relation>,
    extra: Vec<Relation>,
    over_semigroup: bool,
}

impl CongruenceSpec {
    /// A congruence on a finitely presented semigroup.
    #[must_use]
    pub fn new(
        kind: CongruenceKind,
        nr_generators: usize,
        relations: Vec<Relation>,
        extra: Vec<Relation>,
    ) -> Self {
        Self {
            kind,
            nr_generators,
            relations,
            extra,
            over_semigroup: false,
        }
    }

    /// A congruence on a concrete semigroup, given by the relations of that
    /// semigroup and the generating pairs of the congruence.
    #[must_use]
    pub fn over_semigroup(
        kind: CongruenceKind,
        nr_generators: usize,
        semigroup_relations: Vec<Relation>,
        generating_pairs: Vec<Relation>,
    ) -> Self {
        Self {
            kind,
            nr_generators,
            relations: semigroup_relations,
            extra: generating_pairs,
            over_semigroup: true,
        }
    }

    /// The sidedness of the congruence.
    #[must_use]
    pub fn kind(&self) -> CongruenceKind {
        self.kind
    }

    /// Number of generators.
    #[must_use]
    pub fn nr_generators(&self) -> usize {
        self.nr_generators
    }

    /// Defining relations of the underlying semigroup.
    #[must_use]
    pub fn relations(&self) -> &[Relation] {
        &self.relations
    }

    /// Extra generating pairs of the congruence.
    #[must_use]
    pub fn extra(&self) -> &[Relation] {
        &self.extra
    }

    /// Whether the relations come from an ambient semigroup.
    #[must_use]
    pub fn is_over_semigroup(&self) -> bool {
        self.over_semigroup
    }

    /// Validate the congruence data.
    ///
    /// The data is valid if:
    /// - There is at least one generator
    /// - Every word in every relation and pair is non-empty
    /// - Every letter is a valid generator index
    /// - The congruence is two-sided
    pub fn validate(&self) -> Result<(), CongruenceError> {
        if self.nr_generators == 0 {
            return Err(CongruenceError::NoGenerators);
        }

        for (lhs, rhs) in self.relations.iter().chain(self.extra.iter()) {
            self.validate_word(lhs)?;
            self.validate_word(rhs)?;
        }

        // Rewriting then enumerating the quotient only computes two-sided
        // congruences.
        if self.kind != CongruenceKind::TwoSided {
            return Err(CongruenceError::UnsupportedKind(self.kind));
        }

        Ok(())
    }

    /// Validate a single word against the generators of this specification.
    pub fn validate_word(&self, word: &Word) -> Result<(), CongruenceError> {
        if word.is_empty() {
            return Err(CongruenceError::EmptyWord);
        }
        match word.max_letter() {
            Some(letter) if letter >= self.nr_generators => {
                Err(CongruenceError::LetterOutOfRange {
                    letter,
                    nr_generators: self.nr_generators,
                })
            }
            _ => Ok(()),
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn w(s: &str) -> Word {
        s.parse().expect("word")
    }

    #[test]
    fn validate_accepts_presentation() {
        let spec = CongruenceSpec::new(
            CongruenceKind::TwoSided,
            2,
            vec![(w("aa"), w("a"))],
            vec![(w("a"), w("aa"))],
        );
        assert!(spec.validate().is_ok());
        assert!(!spec.is_over_semigroup());
    }

    #[test]
    fn validate_rejects_zero_generators() {
        let spec = CongruenceSpec::new(CongruenceKind::TwoSided, 0, vec![], vec![]);
        assert_eq!(spec.validate(), Err(CongruenceError::NoGenerators));
    }

    #[test]
    fn validate_rejects_out_of_range_letters() {
        let spec = CongruenceSpec::new(
            CongruenceKind::TwoSided,
            2,
            vec![(w("ac"), w("a"))],
            vec![],
        );
        assert_eq!(
            spec.validate(),
            Err(CongruenceError::LetterOutOfRange {
                letter: 2,
                nr_generators: 2
            })
        );
    }

    #[test]
    fn validate_rejects_empty_words_in_extra() {
        let spec = CongruenceSpec::new(
            CongruenceKind::TwoSided,
            1,
            vec![],
            vec![(w("a"), Word::default())],
        );
        assert_eq!(spec.validate(), Err(CongruenceError::EmptyWord));
    }

    #[test]
    fn validate_rejects_one_sided_kinds() {
        let spec = CongruenceSpec::new(CongruenceKind::Left, 1, vec![], vec![]);
        assert_eq!(
            spec.validate(),
            Err(CongruenceError::UnsupportedKind(CongruenceKind::Left))
        );
    }

    #[test]
    fn over_semigroup_keeps_pairs_as_extra() {
        let spec = CongruenceSpec::over_semigroup(
            CongruenceKind::TwoSided,
            1,
            vec![(w("aaa"), w("a"))],
            vec![(w("aa"), w("a"))],
        );
        assert!(spec.is_over_semigroup());
        assert_eq!(spec.extra().len(), 1);
        assert_eq!(spec.relations().len(), 1);
    }
}
