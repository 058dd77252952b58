//! Link-order iterators over a [`Ring`]. They walk `begin()..end()` once and
//! never wrap.

use core::iter::FusedIterator;
use core::marker::PhantomData;

use super::{Node, Ring};
use crate::utils::IndexType;

/// Borrowing iterator, see [`Ring::iter`].
#[derive(Debug)]
pub struct Iter<'a, K: 'a, V: 'a, I: IndexType> {
    ring: &'a Ring<K, V, I>,
    front: I,
    back: I,
    remaining: usize,
}

impl<'a, K, V, I: IndexType> Iter<'a, K, V, I> {
    pub(crate) fn new(ring: &'a Ring<K, V, I>) -> Self {
        let boundary = &ring.nodes[I::ZERO.as_usize()];
        Self {
            ring,
            front: boundary.next,
            back: boundary.prev,
            remaining: ring.len(),
        }
    }
}

impl<'a, K, V, I: IndexType> Clone for Iter<'a, K, V, I> {
    fn clone(&self) -> Self {
        Self {
            ring: self.ring,
            front: self.front,
            back: self.back,
            remaining: self.remaining,
        }
    }
}

impl<'a, K, V, I: IndexType> Iterator for Iter<'a, K, V, I> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let node = &self.ring.nodes[self.front.as_usize()];
        self.front = node.next;
        self.remaining -= 1;
        node.entry.as_ref().map(|(k, v)| (k, v))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<'a, K, V, I: IndexType> DoubleEndedIterator for Iter<'a, K, V, I> {
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let node = &self.ring.nodes[self.back.as_usize()];
        self.back = node.prev;
        self.remaining -= 1;
        node.entry.as_ref().map(|(k, v)| (k, v))
    }
}

impl<'a, K, V, I: IndexType> ExactSizeIterator for Iter<'a, K, V, I> {}

impl<'a, K, V, I: IndexType> FusedIterator for Iter<'a, K, V, I> {}

/// Iterator with mutable values, see [`Ring::iter_mut`].
#[derive(Debug)]
pub struct IterMut<'a, K: 'a, V: 'a, I: IndexType> {
    nodes: *mut Node<K, V, I>,
    front: I,
    back: I,
    remaining: usize,
    _marker: PhantomData<&'a mut Node<K, V, I>>,
}

impl<'a, K, V, I: IndexType> IterMut<'a, K, V, I> {
    pub(crate) fn new(ring: &'a mut Ring<K, V, I>) -> Self {
        let boundary = &ring.nodes[I::ZERO.as_usize()];
        let (front, back) = (boundary.next, boundary.prev);
        Self {
            nodes: ring.nodes.as_mut_ptr(),
            front,
            back,
            remaining: ring.len(),
            _marker: PhantomData,
        }
    }
}

impl<'a, K, V, I: IndexType> Iterator for IterMut<'a, K, V, I> {
    type Item = (&'a K, &'a mut V);

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        // SAFETY: `front` is a live slot of the exclusively borrowed arena and
        // `remaining` guarantees no slot is yielded twice from either end.
        let node = unsafe { &mut *self.nodes.add(self.front.as_usize()) };
        self.front = node.next;
        self.remaining -= 1;
        node.entry.as_mut().map(|(k, v)| (&*k, v))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<'a, K, V, I: IndexType> DoubleEndedIterator for IterMut<'a, K, V, I> {
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        // SAFETY: see `next`.
        let node = unsafe { &mut *self.nodes.add(self.back.as_usize()) };
        self.back = node.prev;
        self.remaining -= 1;
        node.entry.as_mut().map(|(k, v)| (&*k, v))
    }
}

// SAFETY: `IterMut` behaves like `(&'a K, &'a mut V)` borrows of disjoint
// slots; the raw pointer only stands in for the exclusive borrow of the arena.
unsafe impl<'a, K: Sync, V: Send, I: IndexType + Send> Send for IterMut<'a, K, V, I> {}

// SAFETY: shared access to the iterator hands out nothing beyond what
// `&K` and `&V` would.
unsafe impl<'a, K: Sync, V: Sync, I: IndexType + Sync> Sync for IterMut<'a, K, V, I> {}

impl<'a, K, V, I: IndexType> ExactSizeIterator for IterMut<'a, K, V, I> {}

impl<'a, K, V, I: IndexType> FusedIterator for IterMut<'a, K, V, I> {}

/// Owning iterator, see [`Ring::into_iter`](IntoIterator::into_iter).
pub struct IntoIter<K, V, I: IndexType> {
    ring: Ring<K, V, I>,
}

impl<K, V, I: IndexType> IntoIter<K, V, I> {
    pub(crate) fn new(ring: Ring<K, V, I>) -> Self {
        Self { ring }
    }
}

impl<K, V, I: IndexType> Iterator for IntoIter<K, V, I> {
    type Item = (K, V);

    fn next(&mut self) -> Option<Self::Item> {
        self.ring.pop_front_entry()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let len = self.ring.len();
        (len, Some(len))
    }
}

impl<K, V, I: IndexType> DoubleEndedIterator for IntoIter<K, V, I> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.ring.pop_back_entry()
    }
}

impl<K, V, I: IndexType> ExactSizeIterator for IntoIter<K, V, I> {}

impl<K, V, I: IndexType> FusedIterator for IntoIter<K, V, I> {}
