//! Short-lex string rewriting with a confluence check.

use std::cmp::Ordering;

use crate::cancel::CancelToken;
use crate::rewriting::{RewritingEngine, shortlex_cmp};
use crate::{Letter, Relation, Word};

/// A string rewriting system under the short-lex order.
///
/// Every rule `lhs -> rhs` satisfies `rhs < lhs` in short-lex, so rewriting
/// always terminates.
#[derive(Debug, Clone, Default)]
pub struct ToyRewriter {
    rules: Vec<(Word, Word)>,
    /// Outcome of the last completed confluence check; cleared when rules change.
    confluence: Option<bool>,
}

impl ToyRewriter {
    /// Create an empty rewriting system.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The oriented rules, in insertion order.
    #[must_use]
    pub fn rules(&self) -> &[(Word, Word)] {
        &self.rules
    }

    /// Orient and add a single rule. Returns false if nothing was added.
    pub fn add_rule(&mut self, p: &Word, q: &Word) -> bool {
        let (lhs, rhs) = match shortlex_cmp(p, q) {
            Ordering::Equal => return false,
            Ordering::Greater => (p.clone(), q.clone()),
            Ordering::Less => (q.clone(), p.clone()),
        };
        if self.rules.iter().any(|(l, r)| *l == lhs && *r == rhs) {
            return false;
        }
        self.rules.push((lhs, rhs));
        self.confluence = None;
        true
    }

    /// Check local confluence: every critical pair must rewrite to a common
    /// normal form. Returns `None` if `cancel` fired before the check ended.
    fn check_confluence(&self, cancel: &CancelToken) -> Option<bool> {
        for (i, (lhs_i, rhs_i)) in self.rules.iter().enumerate() {
            for (j, (lhs_j, rhs_j)) in self.rules.iter().enumerate() {
                if cancel.is_cancelled() {
                    return None;
                }
                if !self.overlaps_join(lhs_i, rhs_i, lhs_j, rhs_j) {
                    tracing::debug!(rule_i = i, rule_j = j, "critical pair does not join");
                    return Some(false);
                }
                if i != j && !self.inclusions_join(lhs_i, rhs_i, lhs_j, rhs_j) {
                    tracing::debug!(rule_i = i, rule_j = j, "inclusion does not join");
                    return Some(false);
                }
            }
        }
        Some(true)
    }

    /// Overlaps where a proper suffix of `lhs_i` is a proper prefix of `lhs_j`.
    fn overlaps_join(&self, lhs_i: &Word, rhs_i: &Word, lhs_j: &Word, rhs_j: &Word) -> bool {
        let (li, lj) = (lhs_i.letters(), lhs_j.letters());
        for k in 1..li.len().min(lj.len()) {
            if li[li.len() - k..] != lj[..k] {
                continue;
            }
            let via_i = rhs_i.concat(&Word::new(lj[k..].to_vec()));
            let via_j = Word::new(li[..li.len() - k].to_vec()).concat(rhs_j);
            if self.rewrite(&via_i) != self.rewrite(&via_j) {
                return false;
            }
        }
        true
    }

    /// Occurrences of `lhs_j` inside `lhs_i`.
    fn inclusions_join(&self, lhs_i: &Word, rhs_i: &Word, lhs_j: &Word, rhs_j: &Word) -> bool {
        let (li, lj) = (lhs_i.letters(), lhs_j.letters());
        if lj.len() > li.len() {
            return true;
        }
        for start in 0..=li.len() - lj.len() {
            if li[start..start + lj.len()] != *lj {
                continue;
            }
            let mut via_j: Vec<Letter> = li[..start].to_vec();
            via_j.extend_from_slice(rhs_j.letters());
            via_j.extend_from_slice(&li[start + lj.len()..]);
            if self.rewrite(rhs_i) != self.rewrite(&Word::new(via_j)) {
                return false;
            }
        }
        true
    }

    /// Apply the first rule matching at the leftmost position, if any.
    fn rewrite_once(&self, letters: &[Letter]) -> Option<Vec<Letter>> {
        for start in 0..letters.len() {
            for (lhs, rhs) in &self.rules {
                let l = lhs.letters();
                if start + l.len() <= letters.len() && letters[start..start + l.len()] == *l {
                    let mut out = Vec::with_capacity(letters.len() - l.len() + rhs.len());
                    out.extend_from_slice(&letters[..start]);
                    out.extend_from_slice(rhs.letters());
                    out.extend_from_slice(&letters[start + l.len()..]);
                    return Some(out);
                }
            }
        }
        None
    }
}

impl RewritingEngine for ToyRewriter {
    fn add_rules(&mut self, relations: &[Relation]) {
        for (p, q) in relations {
            self.add_rule(p, q);
        }
    }

    fn complete(&mut self, cancel: &CancelToken) {
        if self.confluence.is_some() {
            return;
        }
        match self.check_confluence(cancel) {
            Some(confluent) => {
                tracing::debug!(rules = self.rules.len(), confluent, "confluence check finished");
                self.confluence = Some(confluent);
            }
            None => tracing::debug!("confluence check cancelled"),
        }
    }

    /// Completion here only checks critical pairs, so a presentation whose
    /// pairs do not join can never be completed.
    fn can_complete(&self, relations: &[Relation]) -> bool {
        let mut scratch = self.clone();
        scratch.add_rules(relations);
        scratch.check_confluence(&CancelToken::new()).unwrap_or(false)
    }

    fn is_confluent(&self) -> bool {
        match self.confluence {
            Some(confluent) => confluent,
            None => self.check_confluence(&CancelToken::new()).unwrap_or(false),
        }
    }

    fn rewrite(&self, word: &Word) -> Word {
        let mut letters = word.letters().to_vec();
        while let Some(next) = self.rewrite_once(&letters) {
            letters = next;
        }
        Word::new(letters)
    }

    fn less_than(&self, lhs: &Word, rhs: &Word) -> bool {
        shortlex_cmp(lhs, rhs) == Ordering::Less
    }

    fn nr_rules(&self) -> usize {
        self.rules.len()
    }
}

// =============================================================================
// TESTS
// =============================================================================
