//! Breadth-first enumeration of a finitely generated semigroup.

use std::collections::BTreeMap;

use crate::cancel::CancelToken;
use crate::element::SemigroupElement;
use crate::enumerator::Enumerator;
use crate::primitives::DEFAULT_BATCH_SIZE;

/// Discovers the elements generated by a fixed set under right
/// multiplication, in breadth-first order.
///
/// Positions are discovery indices: the generators (without duplicates)
/// come first, in the order given.
#[derive(Debug, Clone)]
pub struct ToyEnumerator<X> {
    generators: Vec<X>,
    elements: Vec<X>,
    index: BTreeMap<X, usize>,
    /// Next element to multiply by every generator.
    next: usize,
    batch_size: usize,
}

impl<X: SemigroupElement> ToyEnumerator<X> {
    /// Record `element` if it is new. Returns its position.
    fn insert(&mut self, element: X) -> usize {
        if let Some(&pos) = self.index.get(&element) {
            return pos;
        }
        let pos = self.elements.len();
        self.index.insert(element.clone(), pos);
        self.elements.push(element);
        pos
    }

    /// The element at a discovered position.
    #[must_use]
    pub fn at(&self, pos: usize) -> Option<&X> {
        self.elements.get(pos)
    }

    /// Number of distinct generators.
    #[must_use]
    pub fn nr_generators(&self) -> usize {
        self.generators.len()
    }
}

impl<X: SemigroupElement> Enumerator for ToyEnumerator<X> {
    type Element = X;

    fn from_generators(generators: &[X]) -> Self {
        let mut enumerator = Self {
            generators: Vec::with_capacity(generators.len()),
            elements: Vec::new(),
            index: BTreeMap::new(),
            next: 0,
            batch_size: DEFAULT_BATCH_SIZE,
        };
        for generator in generators {
            if !enumerator.index.contains_key(generator) {
                enumerator.generators.push(generator.clone());
            }
            enumerator.insert(generator.clone());
        }
        enumerator
    }

    fn set_batch_size(&mut self, batch_size: usize) {
        self.batch_size = batch_size;
    }

    fn batch_size(&self) -> usize {
        self.batch_size
    }

    fn enumerate(&mut self, cancel: &CancelToken, limit: usize) {
        if self.is_done() || limit <= self.elements.len() || cancel.is_cancelled() {
            return;
        }
        let limit = limit.max(self.elements.len().saturating_add(self.batch_size));

        while self.next < self.elements.len() && self.elements.len() < limit {
            if cancel.is_cancelled() {
                return;
            }
            let x = self.elements[self.next].clone();
            for j in 0..self.generators.len() {
                let product = x.product(&self.generators[j]);
                self.insert(product);
            }
            self.next += 1;
        }
    }

    fn current_size(&self) -> usize {
        self.elements.len()
    }

    fn is_done(&self) -> bool {
        self.next >= self.elements.len()
    }

    fn position(&self, element: &X) -> Option<usize> {
        self.index.get(element).copied()
    }
}

// =============================================================================
// TESTS
// =============================================================================
