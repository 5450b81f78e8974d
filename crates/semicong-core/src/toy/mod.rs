//! Toy engines for coordinator testing and small presentations.
//!
//! These implement the two engine contracts with the simplest semantics
//! that still honour every invariant the coordinator relies on
//! (cancellation polling, monotone discovery, normal-form identity).
//!
//! ## Engines
//!
//! - **ToyRewriter**: short-lex string rewriting. `complete` does not add
//!   rules; it checks that every critical pair of the given rules is
//!   joinable, and records the outcome. Presentations that are already
//!   confluent (e.g. `aa = a`, or a commutative idempotent alphabet
//!   written as `bb = b, ba = ab`) work end to end; others are reported as
//!   not confluent.
//!
//! - **ToyEnumerator**: breadth-first closure of the generators under
//!   right multiplication, with a `BTreeMap` index for positions.

mod enumerator;
mod rewriter;

pub use enumerator::ToyEnumerator;
pub use rewriter::ToyRewriter;
