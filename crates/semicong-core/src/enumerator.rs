//! # Enumerator Module
//!
//! The contract consumed from an incremental semigroup enumerator.
//!
//! An enumerator starts from a generating set and discovers the elements
//! reachable by multiplication. Discovery is monotone: elements are only
//! added, `current_size` never decreases, and once `is_done` holds it holds
//! forever.

use crate::cancel::CancelToken;
use crate::element::SemigroupElement;

/// An incremental, resumable, cancellable enumerator of a finite semigroup.
pub trait Enumerator: Sized {
    /// Type of the elements being enumerated.
    type Element: SemigroupElement;

    /// Build an enumerator for the semigroup generated by `generators`.
    ///
    /// The enumerator copies what it needs; the caller keeps ownership of
    /// the slice and may drop it immediately.
    fn from_generators(generators: &[Self::Element]) -> Self;

    /// Set the minimum number of new elements one `enumerate` call aims for.
    fn set_batch_size(&mut self, batch_size: usize);

    /// The current batch size.
    fn batch_size(&self) -> usize;

    /// Discover elements until the number known reaches
    /// `max(limit, current_size() + batch_size())`, the semigroup is fully
    /// enumerated, or `cancel` fires.
    ///
    /// Returns immediately if `limit <= current_size()`, if already done, or
    /// if already cancelled. `cancel` is polled before each element is
    /// expanded.
    fn enumerate(&mut self, cancel: &CancelToken, limit: usize);

    /// Number of elements discovered so far.
    fn current_size(&self) -> usize;

    /// True once no further elements can be discovered.
    fn is_done(&self) -> bool;

    /// Position of `element` among the discovered elements, or `None` if it
    /// has not been discovered (yet).
    fn position(&self, element: &Self::Element) -> Option<usize>;
}
