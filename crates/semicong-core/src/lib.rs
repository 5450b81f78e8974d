//! # semicong-core
//!
//! The congruence coordinator for semicong - THE LOGIC.
//!
//! This crate decides two-sided congruences on finitely presented
//! semigroups by combining two engines behind traits:
//! - a `RewritingEngine`, completed to a confluent system of rules
//! - an `Enumerator`, which discovers the elements of the quotient
//!
//! Equality of words is decided as soon as the rewriting system is
//! confluent. Class indices and the number of classes need the quotient
//! fully enumerated.
//!
//! ## Architectural Constraints
//!
//! - Queries answer `TRUE`, `FALSE` or `UNKNOWN`; `UNKNOWN` is never an error
//! - Cancellation is the only cross-thread signal, and it is permanent
//! - Elements share the rewriting system read-only; nothing mutates it
//!   once the enumerator exists
//! - Has NO async, NO network, NO filesystem access (pure Rust)

// =============================================================================
// MODULES
// =============================================================================

pub mod cancel;
pub mod coordinator;
pub mod element;
pub mod enumerator;
pub mod presentation;
pub mod primitives;
pub mod rewriting;
pub mod toy;
pub mod types;

// =============================================================================
// RE-EXPORTS: Core Types (from types module)
// =============================================================================

pub use types::{CongruenceError, CongruenceKind, Letter, Relation, Verdict, Word};

// =============================================================================
// RE-EXPORTS: Coordinator
// =============================================================================

pub use cancel::CancelToken;
pub use coordinator::{Coordinator, CoordinatorConfig, CoordinatorState, ToyCongruence};
pub use presentation::CongruenceSpec;

// =============================================================================
// RE-EXPORTS: Engine Contracts
// =============================================================================

pub use element::{QuotientElement, SemigroupElement};
pub use enumerator::Enumerator;
pub use rewriting::{RewritingEngine, shortlex_cmp};
pub use toy::{ToyEnumerator, ToyRewriter};

// =============================================================================
// RE-EXPORTS: Constants
// =============================================================================

pub use primitives::{DEFAULT_BATCH_SIZE, DEFAULT_NR_STEPS, MAX_TEXT_LETTERS, UNBOUNDED_STEPS};
