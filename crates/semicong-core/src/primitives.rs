//! # Innate Primitives
//!
//! Fixed runtime constants for the congruence coordinator.
//!
//! These are compiled into the binary and are immutable at runtime; the
//! tunable ones have a matching field in `CoordinatorConfig`.

/// Step budget used by the unbounded `run()`.
///
/// Each bounded step asks the enumerator for at least one new element, so
/// this only means "no cap per step": cancellation is still polled between
/// steps and inside the enumerator.
pub const UNBOUNDED_STEPS: usize = usize::MAX;

/// Default batch size of an enumerator.
///
/// Tuned for throughput, not responsiveness. The coordinator overrides it
/// with the caller's step budget on every bounded run.
pub const DEFAULT_BATCH_SIZE: usize = 8192;

/// Default number of steps per batch in `run_until`.
pub const DEFAULT_NR_STEPS: usize = 1000;

/// Number of letters with a text form (`a`..`z`).
pub const MAX_TEXT_LETTERS: usize = 26;
