//! # Property-Based Tests
//!
//! Invariants of the coordinator checked with proptest against presentations
//! whose quotients are known in closed form.

use proptest::collection::vec;
use proptest::prelude::*;
use semicong_core::{
    CongruenceKind, CongruenceSpec, ToyCongruence, ToyRewriter, Verdict, Word,
};
use std::collections::BTreeSet;

/// Monogenic semigroup `a^(index + period) = a^index`.
fn monogenic(index: usize, period: usize) -> ToyCongruence {
    let spec = CongruenceSpec::new(
        CongruenceKind::TwoSided,
        1,
        vec![(Word::new(vec![0; index + period]), Word::new(vec![0; index]))],
        vec![],
    );
    ToyCongruence::new(spec, ToyRewriter::new()).expect("valid spec")
}

/// Exponent of the normal form of `a^n` in the monogenic semigroup.
fn reduced_power(n: usize, index: usize, period: usize) -> usize {
    if n < index + period {
        n
    } else {
        index + (n - index) % period
    }
}

/// Free commutative idempotent semigroup on three generators: a class is
/// the set of letters a word uses.
fn semilattice3() -> ToyCongruence {
    let w = |s: &str| s.parse::<Word>().expect("word");
    let spec = CongruenceSpec::new(
        CongruenceKind::TwoSided,
        3,
        vec![
            (w("aa"), w("a")),
            (w("bb"), w("b")),
            (w("cc"), w("c")),
            (w("ba"), w("ab")),
            (w("ca"), w("ac")),
            (w("cb"), w("bc")),
        ],
        vec![],
    );
    ToyCongruence::new(spec, ToyRewriter::new()).expect("valid spec")
}

fn content(word: &Word) -> BTreeSet<usize> {
    word.letters().iter().copied().collect()
}

// =============================================================================
// PROPERTY TESTS
// =============================================================================

proptest! {
    /// Bounded runs never lose elements and always reach the closed-form size.
    #[test]
    fn progress_is_monotone(index in 1usize..5, period in 1usize..6, steps in 1usize..4) {
        let mut cong = monogenic(index, period);
        let mut previous = 0;
        while !cong.is_done() {
            cong.run_steps(steps);
            prop_assert!(cong.current_size() >= previous);
            previous = cong.current_size();
        }
        prop_assert_eq!(cong.nr_classes(), index + period - 1);
    }

    /// Equality agrees with the closed form of the monogenic semigroup.
    #[test]
    fn equality_matches_closed_form(
        index in 1usize..5,
        period in 1usize..6,
        n in 1usize..30,
        m in 1usize..30,
    ) {
        let mut cong = monogenic(index, period);
        let expected = reduced_power(n, index, period) == reduced_power(m, index, period);
        let verdict = cong.current_equals(&Word::new(vec![0; n]), &Word::new(vec![0; m]));
        prop_assert_eq!(verdict, Verdict::from_bool(expected));
    }

    /// Two words are equal exactly when they use the same letters, and then
    /// they share a class index.
    #[test]
    fn semilattice_classes_are_letter_sets(
        u in vec(0usize..3, 1..8),
        v in vec(0usize..3, 1..8),
    ) {
        let (u, v) = (Word::new(u), Word::new(v));
        let mut cong = semilattice3();
        cong.run();
        prop_assert_eq!(cong.nr_classes(), 7);

        let same = content(&u) == content(&v);
        prop_assert_eq!(cong.test_equals(&u, &v), Some(same));
        prop_assert_eq!(
            cong.word_to_class_index(&u) == cong.word_to_class_index(&v),
            same
        );
    }

    /// Class indices do not depend on how the work was split into runs.
    #[test]
    fn class_index_is_stable(steps in 1usize..10, word in vec(0usize..3, 1..8)) {
        let word = Word::new(word);

        let mut all_at_once = semilattice3();
        all_at_once.run();

        let mut stepped = semilattice3();
        while !stepped.is_done() {
            stepped.run_steps(steps);
        }

        prop_assert_eq!(
            all_at_once.word_to_class_index(&word),
            stepped.word_to_class_index(&word)
        );
    }

    /// Order on classes is a strict total order on normal forms.
    #[test]
    fn less_than_is_asymmetric(u in vec(0usize..3, 1..6), v in vec(0usize..3, 1..6)) {
        let (u, v) = (Word::new(u), Word::new(v));
        let mut cong = semilattice3();
        let forward = cong.current_less_than(&u, &v);
        let backward = cong.current_less_than(&v, &u);
        let equal = cong.current_equals(&u, &v);

        prop_assert!(forward.is_known() && backward.is_known());
        match equal {
            Verdict::True => {
                prop_assert_eq!(forward, Verdict::False);
                prop_assert_eq!(backward, Verdict::False);
            }
            Verdict::False => prop_assert_ne!(forward, backward),
            Verdict::Unknown => prop_assert!(false, "not killed"),
        }
    }
}
