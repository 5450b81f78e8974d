//! # Element Module
//!
//! Elements of the quotient semigroup handed to an enumerator.
//!
//! A `QuotientElement` is the normal form of a word together with a shared
//! handle to the frozen rewriting system that produced it. Multiplying two
//! elements concatenates their normal forms and rewrites the result.
//!
//! Elements are scoped values. The coordinator creates them inside a single
//! call (seeding generators, looking up a position) and they are dropped at
//! the end of that call; only the copies an enumerator keeps outlive it.

use std::cmp::Ordering;
use std::fmt;
use std::sync::Arc;

use crate::rewriting::RewritingEngine;
use crate::{Letter, Word};

/// An element of a semigroup that an enumerator can multiply.
///
/// `Ord` must agree with mathematical equality of elements.
pub trait SemigroupElement: Clone + Ord {
    /// The product `self * rhs`.
    #[must_use]
    fn product(&self, rhs: &Self) -> Self;
}

/// An element of the quotient defined by a confluent rewriting system.
pub struct QuotientElement<R> {
    rws: Arc<R>,
    normal_form: Word,
}

impl<R: RewritingEngine> QuotientElement<R> {
    /// The element represented by a single generator.
    #[must_use]
    pub fn from_letter(rws: &Arc<R>, letter: Letter) -> Self {
        Self::from_word(rws, &Word::letter(letter))
    }

    /// The element represented by an arbitrary word.
    #[must_use]
    pub fn from_word(rws: &Arc<R>, word: &Word) -> Self {
        Self {
            normal_form: rws.rewrite(word),
            rws: Arc::clone(rws),
        }
    }

    /// The normal form identifying this element.
    #[must_use]
    pub fn normal_form(&self) -> &Word {
        &self.normal_form
    }
}

impl<R: RewritingEngine> SemigroupElement for QuotientElement<R> {
    fn product(&self, rhs: &Self) -> Self {
        let word = self.normal_form.concat(&rhs.normal_form);
        Self {
            normal_form: self.rws.rewrite(&word),
            rws: Arc::clone(&self.rws),
        }
    }
}

impl<R> Clone for QuotientElement<R> {
    fn clone(&self) -> Self {
        Self {
            rws: Arc::clone(&self.rws),
            normal_form: self.normal_form.clone(),
        }
    }
}

impl<R> PartialEq for QuotientElement<R> {
    fn eq(&self, other: &Self) -> bool {
        self.normal_form == other.normal_form
    }
}

impl<R> Eq for QuotientElement<R> {}

impl<R> PartialOrd for QuotientElement<R> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<R> Ord for QuotientElement<R> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.normal_form.cmp(&other.normal_form)
    }
}

impl<R> fmt::Debug for QuotientElement<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("QuotientElement")
            .field("normal_form", &self.normal_form)
            .finish_non_exhaustive()
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cancel::CancelToken;
    use crate::toy::ToyRewriter;

    fn w(s: &str) -> Word {
        s.parse().expect("word")
    }

    fn idempotent_a() -> Arc<ToyRewriter> {
        let mut rws = ToyRewriter::new();
        rws.add_rules(&[(w("aa"), w("a"))]);
        rws.complete(&CancelToken::new());
        Arc::new(rws)
    }

    #[test]
    fn elements_are_identified_by_normal_form() {
        let rws = idempotent_a();
        let x = QuotientElement::from_word(&rws, &w("aaa"));
        let y = QuotientElement::from_letter(&rws, 0);
        assert_eq!(x, y);
        assert_eq!(x.normal_form(), &w("a"));
    }

    #[test]
    fn product_rewrites_the_concatenation() {
        let rws = idempotent_a();
        let a = QuotientElement::from_letter(&rws, 0);
        let b = QuotientElement::from_letter(&rws, 1);
        assert_eq!(a.product(&a).normal_form(), &w("a"));
        assert_eq!(a.product(&b).normal_form(), &w("ab"));
    }

    #[test]
    fn dropping_elements_releases_the_shared_system() {
        let rws = idempotent_a();
        {
            let _x = QuotientElement::from_letter(&rws, 0);
            assert_eq!(Arc::strong_count(&rws), 2);
        }
        assert_eq!(Arc::strong_count(&rws), 1);
    }
}
