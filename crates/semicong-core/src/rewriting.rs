//! # Rewriting Module
//!
//! The contract consumed from a string rewriting engine.
//!
//! The coordinator never rewrites words itself: it feeds relations in, asks
//! for completion (cancellable), checks confluence, and from then on treats
//! the engine as a read-only normal-form oracle.

use std::cmp::Ordering;

use crate::cancel::CancelToken;
use crate::{Relation, Word};

/// A string rewriting system that can be completed to confluence.
///
/// Implementations own their rules. After `complete` returns with
/// `is_confluent() == true`, the coordinator freezes the engine behind an
/// `Arc` and only calls the `&self` methods.
pub trait RewritingEngine {
    /// Add one rule per relation, oriented by the engine's reduction order.
    /// Relations whose sides are equal add nothing.
    fn add_rules(&mut self, relations: &[Relation]);

    /// Run completion until the system is confluent or `cancel` fires.
    ///
    /// Implementations must poll `cancel` at every internal step and return
    /// promptly once it is set, leaving the rules in a consistent state.
    fn complete(&mut self, cancel: &CancelToken);

    /// Whether `complete` will reach a confluent system once `relations`
    /// are added. Checked when a coordinator is built, before any rule is
    /// loaded; engines with a full completion procedure keep the default.
    fn can_complete(&self, relations: &[Relation]) -> bool {
        let _ = relations;
        true
    }

    /// Whether the current rules are confluent.
    fn is_confluent(&self) -> bool;

    /// Rewrite a word to its normal form under the current rules.
    fn rewrite(&self, word: &Word) -> Word;

    /// Strict total order on normal forms: true iff `lhs` precedes `rhs`.
    fn less_than(&self, lhs: &Word, rhs: &Word) -> bool;

    /// Number of active rules.
    fn nr_rules(&self) -> usize;
}

/// Short-lex comparison of two words: shorter words first, then
/// lexicographic on letter indices.
#[must_use]
pub fn shortlex_cmp(lhs: &Word, rhs: &Word) -> Ordering {
    lhs.len()
        .cmp(&rhs.len())
        .then_with(|| lhs.letters().cmp(rhs.letters()))
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
    fn shortlex_prefers_shorter_words() {
        assert_eq!(shortlex_cmp(&w("b"), &w("aa")), Ordering::Less);
        assert_eq!(shortlex_cmp(&w("aaa"), &w("bb")), Ordering::Greater);
    }

    #[test]
    fn shortlex_breaks_ties_lexicographically() {
        assert_eq!(shortlex_cmp(&w("ab"), &w("ba")), Ordering::Less);
        assert_eq!(shortlex_cmp(&w("ab"), &w("ab")), Ordering::Equal);
    }
}
