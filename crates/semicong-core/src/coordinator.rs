//! # Coordinator Module
//!
//! Drives a rewriting engine and an enumerator to decide a congruence.
//!
//! The coordinator owns both engines and builds them lazily:
//!
//! ```text
//! CongruenceSpec ──add_rules──▶ RewritingEngine ──complete──▶ confluent
//!                                                               │
//!                        one QuotientElement per generator ◀────┘
//!                                       │
//!                                       ▼
//!                                  Enumerator ──enumerate(steps)──▶ done
//! ```
//!
//! ## State machine
//!
//! `Uninitialized → Building → Enumerating → Done`, with `Killed` reachable
//! from `Building` and `Enumerating`. `Killed` is terminal: no further rule
//! or element is computed, but what was computed stays queryable.
//!
//! `Building` only lasts for the duration of `init`, which holds `&mut self`,
//! so `state()` never reports it. A completion interrupted by cancellation
//! surfaces as `Killed`.
//!
//! ## Threading
//!
//! One owner drives a coordinator at a time (`&mut self`). The only
//! cross-thread signal is the `CancelToken`, which may be cancelled from
//! anywhere through a clone obtained with `cancel_token()`.

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::cancel::CancelToken;
use crate::element::QuotientElement;
use crate::enumerator::Enumerator;
use crate::primitives::{DEFAULT_NR_STEPS, UNBOUNDED_STEPS};
use crate::rewriting::RewritingEngine;
use crate::toy::{ToyEnumerator, ToyRewriter};
use crate::{CongruenceError, CongruenceSpec, Verdict, Word};

/// Coordinator wired to the toy engines.
pub type ToyCongruence = Coordinator<ToyRewriter, ToyEnumerator<QuotientElement<ToyRewriter>>>;

// =============================================================================
// CONFIGURATION
// =============================================================================

/// Tunables of a coordinator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CoordinatorConfig {
    /// Step budget per batch in `run_until` and the `test_*` queries.
    pub default_nr_steps: usize,
    /// Step budget per batch in the unbounded `run`.
    pub run_steps: usize,
}

impl Default for CoordinatorConfig {
    fn default() -> Self {
        Self {
            default_nr_steps: DEFAULT_NR_STEPS,
            run_steps: UNBOUNDED_STEPS,
        }
    }
}

// =============================================================================
// STATE
// =============================================================================

/// Observable state of a coordinator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CoordinatorState {
    /// Nothing has been built yet.
    Uninitialized,
    /// Completion in progress. Internal to `init`; never returned by
    /// `Coordinator::state`.
    Building,
    /// Confluent; the enumerator exists and has more to discover.
    Enumerating,
    /// Every element of the quotient has been discovered.
    Done,
    /// Cancellation was observed before the computation finished.
    Killed,
}

impl CoordinatorState {
    /// Get the state name.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            CoordinatorState::Uninitialized => "uninitialized",
            CoordinatorState::Building => "building",
            CoordinatorState::Enumerating => "enumerating",
            CoordinatorState::Done => "done",
            CoordinatorState::Killed => "killed",
        }
    }

    /// Check if no further progress can happen.
    #[must_use]
    pub fn is_terminal(&self) -> bool {
        matches!(self, CoordinatorState::Done | CoordinatorState::Killed)
    }
}

impl fmt::Display for CoordinatorState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// =============================================================================
// COORDINATOR
// =============================================================================

/// Decides a congruence by rewriting to confluence, then enumerating the
/// quotient.
///
/// Equality is decided by normal forms as soon as the rewriting system is
/// confluent; class indices need the quotient fully enumerated.
pub struct Coordinator<R, E> {
    spec: CongruenceSpec,
    config: CoordinatorConfig,
    /// Exclusively owned until the enumerator exists; shared read-only with
    /// the enumerator's elements afterwards.
    rws: Arc<R>,
    enumerator: Option<E>,
    rules_loaded: bool,
    cancel: CancelToken,
}

impl<R, E> Coordinator<R, E>
where
    R: RewritingEngine,
    E: Enumerator<Element = QuotientElement<R>>,
{
    /// Create a coordinator for `spec` using an empty rewriting engine.
    ///
    /// Nothing is computed until the first `init`, `run` or query.
    pub fn new(spec: CongruenceSpec, engine: R) -> Result<Self, CongruenceError> {
        Self::with_config(spec, engine, CoordinatorConfig::default())
    }

    /// Create a coordinator with explicit tunables.
    ///
    /// Fails with `NotConfluent` if the engine reports that completion
    /// cannot succeed on the spec's relations and generating pairs.
    pub fn with_config(
        spec: CongruenceSpec,
        engine: R,
        config: CoordinatorConfig,
    ) -> Result<Self, CongruenceError> {
        spec.validate()?;
        let relations: Vec<_> = spec.relations().iter().chain(spec.extra()).cloned().collect();
        if !engine.can_complete(&relations) {
            tracing::warn!(relations = relations.len(), "engine cannot complete the presentation");
            return Err(CongruenceError::NotConfluent);
        }
        Ok(Self {
            spec,
            config,
            rws: Arc::new(engine),
            enumerator: None,
            rules_loaded: false,
            cancel: CancelToken::new(),
        })
    }

    /// Use an externally owned cancellation token instead of a private one.
    #[must_use]
    pub fn with_cancel_token(mut self, cancel: CancelToken) -> Self {
        self.cancel = cancel;
        self
    }

    /// The congruence being computed.
    #[must_use]
    pub fn spec(&self) -> &CongruenceSpec {
        &self.spec
    }

    /// The tunables in use.
    #[must_use]
    pub fn config(&self) -> &CoordinatorConfig {
        &self.config
    }

    // -------------------------------------------------------------------------
    // Cancellation
    // -------------------------------------------------------------------------

    /// Cancel the computation. Permanent.
    pub fn kill(&self) {
        self.cancel.cancel();
    }

    /// Whether cancellation has been signalled.
    #[must_use]
    pub fn is_killed(&self) -> bool {
        self.cancel.is_cancelled()
    }

    /// A handle that can cancel this coordinator from another thread.
    #[must_use]
    pub fn cancel_token(&self) -> CancelToken {
        self.cancel.clone()
    }

    // -------------------------------------------------------------------------
    // Lazy construction
    // -------------------------------------------------------------------------

    /// Build the rewriting system and the enumerator. Idempotent.
    ///
    /// Returns early, leaving the enumerator unset, if cancellation is
    /// observed before or during completion; check `is_killed()` to tell
    /// that apart from success.
    pub fn init(&mut self) {
        if self.enumerator.is_some() {
            return;
        }
        if self.cancel.is_cancelled() {
            tracing::warn!("killed before the rewriting system was completed");
            return;
        }

        if !self.rules_loaded {
            assert!(
                !self.spec.is_over_semigroup() || !self.spec.extra().is_empty(),
                "a congruence over a semigroup needs at least one generating pair"
            );
            if let Some(rws) = exclusive(&mut self.rws) {
                rws.add_rules(self.spec.relations());
                rws.add_rules(self.spec.extra());
            }
            self.rules_loaded = true;
        }

        tracing::info!(rules = self.rws.nr_rules(), "running completion");
        if let Some(rws) = exclusive(&mut self.rws) {
            rws.complete(&self.cancel);
        }
        if self.cancel.is_cancelled() {
            tracing::warn!("killed during completion");
            return;
        }
        assert!(
            self.rws.is_confluent(),
            "rewriting system is not confluent after completion"
        );

        let generators: Vec<QuotientElement<R>> = (0..self.spec.nr_generators())
            .map(|letter| QuotientElement::from_letter(&self.rws, letter))
            .collect();
        self.enumerator = Some(E::from_generators(&generators));
        tracing::info!(
            generators = generators.len(),
            rules = self.rws.nr_rules(),
            "enumerator built"
        );
    }

    // -------------------------------------------------------------------------
    // Running
    // -------------------------------------------------------------------------

    /// Run to completion, or until cancelled.
    ///
    /// Cancellation is polled between bounded steps and inside every step.
    pub fn run(&mut self) {
        while !self.is_killed() && !self.is_done() {
            self.run_steps(self.config.run_steps);
        }
    }

    /// Do a bounded amount of work: initialise if needed, then let the
    /// enumerator discover up to `steps` new elements (at least one unless
    /// it finishes or is cancelled).
    ///
    /// Must not be called once `is_done()` holds.
    pub fn run_steps(&mut self, steps: usize) {
        assert!(!self.is_done(), "run_steps called after the quotient was enumerated");

        self.init();
        if self.cancel.is_cancelled() {
            tracing::warn!("killed, not enumerating");
            return;
        }
        let Some(enumerator) = self.enumerator.as_mut() else {
            return;
        };

        let before = enumerator.current_size();
        // The enumerator's own batch size favours throughput; the caller's
        // step budget bounds how long this call holds on.
        enumerator.set_batch_size(steps);
        enumerator.enumerate(&self.cancel, before.saturating_add(1));
        let after = enumerator.current_size();
        tracing::debug!(steps, before, after, done = enumerator.is_done(), "bounded run");

        if self.cancel.is_cancelled() {
            tracing::warn!(size = after, "killed during enumeration");
        }
    }

    /// Run in batches of `default_nr_steps` until `goal` holds, the
    /// quotient is enumerated, or the computation is cancelled.
    pub fn run_until<F>(&mut self, mut goal: F)
    where
        F: FnMut(&mut Self) -> bool,
    {
        if self.is_done() {
            return;
        }
        while !self.is_killed() && !self.is_done() && !goal(&mut *self) {
            self.run_steps(self.config.default_nr_steps);
        }
    }

    // -------------------------------------------------------------------------
    // Progress
    // -------------------------------------------------------------------------

    /// True once every element of the quotient has been discovered.
    #[must_use]
    pub fn is_done(&self) -> bool {
        self.enumerator.as_ref().is_some_and(|e| e.is_done())
    }

    /// Number of elements discovered so far (0 before the enumerator exists).
    #[must_use]
    pub fn current_size(&self) -> usize {
        self.enumerator.as_ref().map_or(0, |e| e.current_size())
    }

    /// Where the computation stands.
    #[must_use]
    pub fn state(&self) -> CoordinatorState {
        match &self.enumerator {
            Some(e) if e.is_done() => CoordinatorState::Done,
            _ if self.is_killed() => CoordinatorState::Killed,
            Some(_) => CoordinatorState::Enumerating,
            None => CoordinatorState::Uninitialized,
        }
    }

    /// The enumerator, once built.
    #[must_use]
    pub fn enumerator(&self) -> Option<&E> {
        self.enumerator.as_ref()
    }

    /// Read-only view of the rewriting engine.
    #[must_use]
    pub fn rewriting_engine(&self) -> &R {
        &self.rws
    }

    /// Number of active rewriting rules.
    #[must_use]
    pub fn nr_rules(&self) -> usize {
        self.rws.nr_rules()
    }

    // -------------------------------------------------------------------------
    // Queries
    // -------------------------------------------------------------------------

    /// Number of congruence classes. Requires `is_done()`.
    #[must_use]
    pub fn nr_classes(&self) -> usize {
        self.require_done("nr_classes");
        self.current_size()
    }

    /// Index of the class containing `word`. Requires `is_done()`.
    ///
    /// The index is the word's position among the enumerated elements, so
    /// words with the same normal form get the same index.
    #[must_use]
    pub fn word_to_class_index(&self, word: &Word) -> usize {
        self.require_done("word_to_class_index");
        let element = QuotientElement::from_word(&self.rws, word);
        let pos = self.enumerator.as_ref().and_then(|e| e.position(&element));
        // Every element of a finished enumeration is known.
        assert!(pos.is_some(), "class of {word} missing from a finished enumeration");
        pos.unwrap_or_default()
    }

    /// Normal form of `word` under the current rules.
    pub fn normal_form(&mut self, word: &Word) -> Word {
        self.init();
        self.rws.rewrite(word)
    }

    /// Whether `w1` and `w2` lie in the same class, as far as is known.
    ///
    /// Builds the rewriting system (and enumerator) if needed. `Unknown`
    /// once cancellation has been signalled, because an incomplete system
    /// may identify words that completion would separate.
    pub fn current_equals(&mut self, w1: &Word, w2: &Word) -> Verdict {
        self.init();
        if self.cancel.is_cancelled() {
            return Verdict::Unknown;
        }
        assert!(
            self.rws.is_confluent(),
            "equality queried against a non-confluent rewriting system"
        );
        Verdict::from_bool(self.rws.rewrite(w1) == self.rws.rewrite(w2))
    }

    /// Whether the class of `w1` precedes the class of `w2` in the engine's
    /// order on normal forms.
    ///
    /// Always definite: after cancellation the comparison is made on the
    /// normal forms of whatever rules exist.
    pub fn current_less_than(&mut self, w1: &Word, w2: &Word) -> Verdict {
        self.init();
        let lhs = self.rws.rewrite(w1);
        let rhs = self.rws.rewrite(w2);
        Verdict::from_bool(self.rws.less_than(&lhs, &rhs))
    }

    /// Decide equality, computing as much as needed. `None` if cancelled.
    pub fn test_equals(&mut self, w1: &Word, w2: &Word) -> Option<bool> {
        if !self.is_done() {
            self.run_until(|c| c.current_equals(w1, w2).is_known());
        }
        self.current_equals(w1, w2).as_bool()
    }

    /// Decide order, computing as much as needed. `None` if cancelled.
    pub fn test_less_than(&mut self, w1: &Word, w2: &Word) -> Option<bool> {
        if !self.is_done() {
            self.run_until(|c| c.current_less_than(w1, w2).is_known());
        }
        if self.is_killed() && !self.is_done() {
            return None;
        }
        self.current_less_than(w1, w2).as_bool()
    }

    fn require_done(&self, operation: &str) {
        assert!(self.is_done(), "{operation} requires a fully enumerated quotient");
    }
}

/// Mutable access to a rewriting system nobody else holds yet.
fn exclusive<R>(rws: &mut Arc<R>) -> Option<&mut R> {
    let rws = Arc::get_mut(rws);
    // Only enumerator elements share the system, and they exist only after
    // completion.
    assert!(rws.is_some(), "rewriting system mutated after the enumerator was built");
    rws
}

impl<R, E> fmt::Debug for Coordinator<R, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Coordinator")
            .field("spec", &self.spec)
            .field("config", &self.config)
            .field("rules_loaded", &self.rules_loaded)
            .field("enumerator_built", &self.enumerator.is_some())
            .field("killed", &self.cancel.is_cancelled())
            .finish_non_exhaustive()
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::CongruenceKind;

    fn w(s: &str) -> Word {
        s.parse().expect("word")
    }

    /// Commutative idempotent semigroup on {a, b}: classes a, b, ab.
    fn semilattice() -> ToyCongruence {
        let spec = CongruenceSpec::new(
            CongruenceKind::TwoSided,
            2,
            vec![(w("aa"), w("a")), (w("bb"), w("b")), (w("ab"), w("ba"))],
            vec![(w("a"), w("aa"))],
        );
        ToyCongruence::new(spec, ToyRewriter::new()).expect("valid spec")
    }

    #[test]
    fn new_coordinator_is_uninitialized() {
        let cong = semilattice();
        assert_eq!(cong.state(), CoordinatorState::Uninitialized);
        assert!(!cong.is_done());
        assert_eq!(cong.current_size(), 0);
        assert!(cong.enumerator().is_none());
    }

    #[test]
    fn invalid_spec_is_rejected() {
        let spec = CongruenceSpec::new(CongruenceKind::TwoSided, 1, vec![(w("ab"), w("a"))], vec![]);
        assert!(matches!(
            ToyCongruence::new(spec, ToyRewriter::new()),
            Err(CongruenceError::LetterOutOfRange { .. })
        ));
    }

    #[test]
    fn presentation_the_engine_cannot_complete_is_rejected() {
        // aba -> b and ab -> a overlap without joining.
        let spec = CongruenceSpec::new(
            CongruenceKind::TwoSided,
            2,
            vec![(w("aba"), w("b")), (w("ab"), w("a"))],
            vec![],
        );
        assert_eq!(
            ToyCongruence::new(spec, ToyRewriter::new()).err(),
            Some(CongruenceError::NotConfluent)
        );
    }

    #[test]
    fn generating_pairs_count_towards_completion() {
        let spec = CongruenceSpec::new(
            CongruenceKind::TwoSided,
            2,
            vec![(w("ab"), w("a"))],
            vec![(w("aba"), w("b"))],
        );
        assert!(matches!(
            ToyCongruence::new(spec, ToyRewriter::new()),
            Err(CongruenceError::NotConfluent)
        ));
    }

    #[test]
    fn init_builds_enumerator_once() {
        let mut cong = semilattice();
        cong.init();
        assert_eq!(cong.state(), CoordinatorState::Enumerating);
        let rules = cong.nr_rules();
        let size = cong.current_size();
        assert_eq!(size, 2);

        cong.init();
        assert_eq!(cong.nr_rules(), rules);
        assert_eq!(cong.current_size(), size);
    }

    #[test]
    fn run_reaches_done() {
        let mut cong = semilattice();
        cong.run();
        assert!(cong.is_done());
        assert_eq!(cong.state(), CoordinatorState::Done);
        assert_eq!(cong.nr_classes(), 3);
    }

    #[test]
    fn run_steps_makes_progress() {
        let mut cong = semilattice();
        cong.run_steps(1);
        assert!(cong.current_size() >= 3);
    }

    #[test]
    fn equality_is_decided_by_normal_forms() {
        let mut cong = semilattice();
        assert_eq!(cong.current_equals(&w("a"), &w("aa")), Verdict::True);
        assert_eq!(cong.current_equals(&w("ab"), &w("bab")), Verdict::True);
        assert_eq!(cong.current_equals(&w("a"), &w("b")), Verdict::False);
    }

    #[test]
    fn less_than_follows_shortlex_on_normal_forms() {
        let mut cong = semilattice();
        assert_eq!(cong.current_less_than(&w("bb"), &w("ab")), Verdict::True);
        assert_eq!(cong.current_less_than(&w("ba"), &w("ab")), Verdict::False);
    }

    #[test]
    fn class_indices_agree_for_equal_words() {
        let mut cong = semilattice();
        cong.run();
        assert_eq!(
            cong.word_to_class_index(&w("a")),
            cong.word_to_class_index(&w("aa"))
        );
        assert_ne!(
            cong.word_to_class_index(&w("a")),
            cong.word_to_class_index(&w("b"))
        );
    }

    #[test]
    #[should_panic(expected = "requires a fully enumerated quotient")]
    fn class_index_before_done_is_a_contract_violation() {
        let cong = semilattice();
        let _ = cong.word_to_class_index(&w("a"));
    }

    #[test]
    fn kill_before_run_leaves_everything_unknown() {
        let mut cong = semilattice();
        cong.kill();
        cong.run();
        assert_eq!(cong.state(), CoordinatorState::Killed);
        assert!(!cong.is_done());
        assert_eq!(cong.nr_rules(), 0);
        assert_eq!(cong.current_equals(&w("a"), &w("aa")), Verdict::Unknown);
        assert_eq!(cong.test_equals(&w("a"), &w("aa")), None);
    }

    #[test]
    fn test_equals_answers_without_full_enumeration() {
        let mut cong = semilattice();
        assert_eq!(cong.test_equals(&w("ab"), &w("ba")), Some(true));
        assert_eq!(cong.test_less_than(&w("a"), &w("b")), Some(true));
    }

    #[test]
    #[should_panic(expected = "at least one generating pair")]
    fn congruence_over_semigroup_needs_pairs() {
        let spec = CongruenceSpec::over_semigroup(
            CongruenceKind::TwoSided,
            1,
            vec![(w("aa"), w("a"))],
            vec![],
        );
        let mut cong = ToyCongruence::new(spec, ToyRewriter::new()).expect("valid spec");
        cong.init();
    }

    #[test]
    fn state_names() {
        assert_eq!(CoordinatorState::Done.to_string(), "done");
        assert_eq!(CoordinatorState::Building.to_string(), "building");
        assert!(CoordinatorState::Killed.is_terminal());
        assert!(!CoordinatorState::Building.is_terminal());
    }

    #[test]
    fn building_is_never_observed() {
        let mut cong = semilattice();
        assert_eq!(cong.state(), CoordinatorState::Uninitialized);
        cong.init();
        assert_eq!(cong.state(), CoordinatorState::Enumerating);

        let mut killed = semilattice();
        killed.kill();
        killed.init();
        assert_eq!(killed.state(), CoordinatorState::Killed);
    }
}
