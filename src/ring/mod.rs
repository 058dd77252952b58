//! A circular doubly-linked sequence of key/value pairs.
//!
//! # Overview
//! [`Ring`] keeps its elements in an arena of slots linked by compact
//! [`IndexType`] indices. Slot `0` is the **boundary**: a node that never holds
//! data and marks both the insertion point at the end and the `end()` cursor
//! position. Following `next` from the boundary visits every element once and
//! comes back to the boundary.
//!
//! ```text
//!        ┌──────────────────────────────────────┐
//!        ▼                                      │
//!   ┌────────┐    ┌────┐    ┌────┐    ┌────┐    │
//!   │boundary├───►│ e0 ├───►│ e1 ├───►│ e2 ├────┘
//!   └────────┘◄───┴────┘◄───┴────┘◄───┴────┘
//! ```
//!
//! Erased slots are threaded onto a free list and get their generation bumped,
//! so a [`Position`] that outlived its element is recognised as stale instead
//! of silently aliasing whatever reuses the slot.

use core::fmt::{self, Debug, Display};
use std::borrow::Borrow;

use crate::error::CapacityError;
use crate::utils::IndexType;

pub mod cursor;
pub mod iter;

pub(crate) use cursor::Direction;
pub use cursor::{Cursor, CursorMut, RingCursor};
pub use iter::{IntoIter, Iter, IterMut};

const BOUNDARY: usize = 0;

/// A borrow-free handle naming an element of a [`Ring`] or its boundary.
///
/// Positions are what the mutating ring operations accept, since a cursor
/// borrowing the ring cannot be handed to a method that mutates the same ring.
/// Obtain one from [`RingCursor::position`].
///
/// Each slot counts its erasures in a 64-bit generation, so a stale position
/// never matches a later occupant of the same slot.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Position {
    index: usize,
    generation: u64,
}

impl Position {
    pub(crate) const BOUNDARY: Position = Position {
        index: BOUNDARY,
        generation: 0,
    };

    /// Returns `true` if this is the boundary (`end()`) position.
    pub const fn is_boundary(self) -> bool {
        self.index == BOUNDARY
    }
}

/// One slot of the arena. `entry` is `None` for the boundary and for free slots.
pub(crate) struct Node<K, V, I> {
    pub(crate) entry: Option<(K, V)>,
    pub(crate) prev: I,
    pub(crate) next: I,
    generation: u64,
}

impl<K, V, I> Node<K, V, I> {
    fn new(entry: Option<(K, V)>, prev: I, next: I) -> Self {
        Self {
            entry,
            prev,
            next,
            generation: 0,
        }
    }
}

/// A circular doubly-linked list of key/value pairs with one boundary node.
///
/// Keys may repeat. Insertion and erasure are O(1) and relink only the
/// neighbours of the touched element, so every other [`Position`] and cursor
/// stays valid.
///
/// # Invariants
/// * `nodes[0]` is the boundary and its `entry` is always `None`.
/// * `next`/`prev` links of the boundary and of all live slots form a single
///   cycle containing the boundary exactly once.
/// * `len` equals the number of live slots.
/// * Free slots are chained through `next` starting at `free_head`,
///   terminated by [`IndexType::NONE`].
pub struct Ring<K, V, I: IndexType = u32> {
    pub(crate) nodes: Vec<Node<K, V, I>>,
    free_head: I,
    len: usize,
}

impl<K, V, I: IndexType> Ring<K, V, I> {
    /// Creates an empty ring: the boundary linked to itself.
    pub fn new() -> Self {
        Self {
            nodes: vec![Node::new(None, I::ZERO, I::ZERO)],
            free_head: I::NONE,
            len: 0,
        }
    }

    /// Returns the number of elements, boundary excluded.
    #[inline(always)]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if the ring holds no elements.
    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Maximum number of elements addressable with the index type `I`.
    pub fn max_len() -> usize {
        // Every index below `NONE` is a slot and slot 0 is the boundary.
        I::NONE.as_usize() - 1
    }

    /// Returns `true` if `at` names the boundary or a live element of this ring.
    pub fn is_valid(&self, at: Position) -> bool {
        self.live_node(at).is_some()
    }

    fn live_node(&self, at: Position) -> Option<&Node<K, V, I>> {
        let node = self.nodes.get(at.index)?;
        if node.generation != at.generation {
            return None;
        }
        if at.index != BOUNDARY && node.entry.is_none() {
            return None;
        }
        Some(node)
    }

    fn position_of(&self, index: I) -> Position {
        let index = index.as_usize();
        Position {
            index,
            generation: self.nodes[index].generation,
        }
    }

    fn first_position(&self) -> Position {
        self.position_of(self.nodes[BOUNDARY].next)
    }

    fn last_position(&self) -> Position {
        self.position_of(self.nodes[BOUNDARY].prev)
    }

    /// Follows one link from `at`, boundary included.
    ///
    /// # Panics
    /// Panics if `at` refers to an erased element.
    pub(crate) fn link(&self, at: Position, direction: Direction) -> Position {
        match self.live_node(at) {
            Some(node) => match direction {
                Direction::Forward => self.position_of(node.next),
                Direction::Backward => self.position_of(node.prev),
            },
            None => panic!("ring position {:?} refers to an erased element", at),
        }
    }

    pub(crate) fn entry(&self, at: Position) -> Option<&(K, V)> {
        self.live_node(at)?.entry.as_ref()
    }

    pub(crate) fn entry_mut(&mut self, at: Position) -> Option<&mut (K, V)> {
        if !self.is_valid(at) {
            return None;
        }
        self.nodes[at.index].entry.as_mut()
    }

    /// Read-only cursor on the first element, or on the boundary when empty.
    pub fn begin(&self) -> Cursor<'_, K, V, I> {
        RingCursor::new(self, self.first_position())
    }

    /// Read-only cursor on the boundary.
    pub fn end(&self) -> Cursor<'_, K, V, I> {
        RingCursor::new(self, Position::BOUNDARY)
    }

    /// Mutable cursor on the first element, or on the boundary when empty.
    pub fn begin_mut(&mut self) -> CursorMut<'_, K, V, I> {
        let at = self.first_position();
        RingCursor::new(self, at)
    }

    /// Mutable cursor on the boundary.
    pub fn end_mut(&mut self) -> CursorMut<'_, K, V, I> {
        RingCursor::new(self, Position::BOUNDARY)
    }

    /// Read-only cursor at `at`.
    pub fn cursor(&self, at: Position) -> Cursor<'_, K, V, I> {
        RingCursor::new(self, at)
    }

    /// Mutable cursor at `at`.
    pub fn cursor_mut(&mut self, at: Position) -> CursorMut<'_, K, V, I> {
        RingCursor::new(self, at)
    }

    /// Returns the first pair in link order.
    pub fn front(&self) -> Option<(&K, &V)> {
        self.entry(self.first_position()).map(|(k, v)| (k, v))
    }

    /// Returns the last pair in link order.
    pub fn back(&self) -> Option<(&K, &V)> {
        self.entry(self.last_position()).map(|(k, v)| (k, v))
    }

    fn allocate(&mut self, key: K, value: V) -> Result<I, CapacityError<K, V>> {
        if self.free_head != I::NONE {
            let idx = self.free_head;
            let node = &mut self.nodes[idx.as_usize()];
            self.free_head = node.next;
            node.entry = Some((key, value));
            return Ok(idx);
        }
        match I::try_from_usize(self.nodes.len()) {
            Some(idx) => {
                self.nodes
                    .push(Node::new(Some((key, value)), I::ZERO, I::ZERO));
                Ok(idx)
            }
            None => Err(CapacityError::new(key, value, Self::max_len())),
        }
    }

    /// Inserts a pair immediately before `at` and returns its position.
    ///
    /// Inserting before the boundary appends at the end.
    ///
    /// # Errors
    /// Returns the pair inside a [`CapacityError`] when no slot index is left.
    ///
    /// # Panics
    /// Panics if `at` refers to an erased element.
    pub fn try_insert(
        &mut self,
        at: Position,
        key: K,
        value: V,
    ) -> Result<Position, CapacityError<K, V>> {
        if self.live_node(at).is_none() {
            panic!("ring position {:?} refers to an erased element", at);
        }
        let prev = self.nodes[at.index].prev;
        let next = self.nodes[prev.as_usize()].next;
        let idx = self.allocate(key, value)?;

        let node = &mut self.nodes[idx.as_usize()];
        node.prev = prev;
        node.next = next;
        self.nodes[prev.as_usize()].next = idx;
        self.nodes[next.as_usize()].prev = idx;
        self.len += 1;
        Ok(self.position_of(idx))
    }

    /// Inserts a pair immediately before `at` and returns a cursor on it.
    ///
    /// # Panics
    /// Panics if the index space of `I` is exhausted or `at` is stale.
    pub fn insert(&mut self, at: Position, key: K, value: V) -> CursorMut<'_, K, V, I> {
        match self.try_insert(at, key, value) {
            Ok(pos) => RingCursor::new(self, pos),
            Err(err) => panic!("{}", err),
        }
    }

    /// Detaches the element at `at`, returning the following position and the pair.
    ///
    /// `None` for the boundary and for stale positions, with no mutation.
    pub(crate) fn unlink(&mut self, at: Position) -> Option<(Position, (K, V))> {
        if at.is_boundary() || !self.is_valid(at) {
            return None;
        }
        let entry = self.nodes[at.index].entry.take()?;
        let (prev, next) = {
            let node = &self.nodes[at.index];
            (node.prev, node.next)
        };
        let idx = self.nodes[prev.as_usize()].next;
        self.nodes[prev.as_usize()].next = next;
        self.nodes[next.as_usize()].prev = prev;

        let free_head = self.free_head;
        let node = &mut self.nodes[at.index];
        node.generation += 1;
        node.prev = I::NONE;
        node.next = free_head;
        self.free_head = idx;
        self.len -= 1;

        Some((self.position_of(next), entry))
    }

    /// Removes the element at `at` and returns a cursor on the following one.
    ///
    /// At the boundary there is nothing to erase: the ring is left untouched
    /// and the boundary cursor is returned.
    pub fn erase(&mut self, at: Position) -> CursorMut<'_, K, V, I> {
        let next = match self.unlink(at) {
            Some((next, _)) => next,
            None => {
                log::trace!("erase at {:?} is a no-op", at);
                Position::BOUNDARY
            }
        };
        RingCursor::new(self, next)
    }

    /// Removes the element at `at` and returns its pair.
    pub fn remove(&mut self, at: Position) -> Option<(K, V)> {
        self.unlink(at).map(|(_, entry)| entry)
    }

    pub(crate) fn pop_front_entry(&mut self) -> Option<(K, V)> {
        let at = self.first_position();
        self.remove(at)
    }

    pub(crate) fn pop_back_entry(&mut self) -> Option<(K, V)> {
        let at = self.last_position();
        self.remove(at)
    }

    /// Inserts a pair before the first element.
    pub fn push_front(&mut self, key: K, value: V) -> CursorMut<'_, K, V, I> {
        let at = self.first_position();
        self.insert(at, key, value)
    }

    /// Inserts a pair after the last element.
    pub fn push_back(&mut self, key: K, value: V) -> CursorMut<'_, K, V, I> {
        self.insert(Position::BOUNDARY, key, value)
    }

    /// Fallible [`Ring::push_front`].
    pub fn try_push_front(&mut self, key: K, value: V) -> Result<Position, CapacityError<K, V>> {
        let at = self.first_position();
        self.try_insert(at, key, value)
    }

    /// Fallible [`Ring::push_back`].
    pub fn try_push_back(&mut self, key: K, value: V) -> Result<Position, CapacityError<K, V>> {
        self.try_insert(Position::BOUNDARY, key, value)
    }

    /// Erases the first element; a no-op on an empty ring.
    pub fn pop_front(&mut self) -> CursorMut<'_, K, V, I> {
        let at = self.first_position();
        self.erase(at)
    }

    /// Erases the last element; a no-op on an empty ring.
    pub fn pop_back(&mut self) -> CursorMut<'_, K, V, I> {
        let at = self.last_position();
        self.erase(at)
    }

    /// Removes every element, last to first.
    pub fn clear(&mut self) {
        while !self.is_empty() {
            self.pop_back();
        }
    }

    /// Scans for `key` starting at `from` and stopping when `till` is reached.
    ///
    /// The scan follows link order and skips the boundary, so a `from` lying
    /// past `till` wraps round the ring. `till` itself is never inspected.
    /// When `from == till` the whole ring is scanned once; no call ever scans
    /// more than one lap.
    pub fn find_key<Q>(&self, key: &Q, from: Position, till: Position) -> Option<Cursor<'_, K, V, I>>
    where
        K: Borrow<Q>,
        Q: PartialEq + ?Sized,
    {
        if !self.is_valid(from) {
            return None;
        }
        let mut at = from;
        for _ in 0..=self.len {
            if let Some((k, _)) = self.entry(at) {
                if <K as Borrow<Q>>::borrow(k) == key {
                    return Some(RingCursor::new(self, at));
                }
            }
            at = self.link(at, Direction::Forward);
            if at == till {
                break;
            }
        }
        None
    }

    /// Returns a cursor on the first element whose key equals `key`.
    pub fn find<Q>(&self, key: &Q) -> Option<Cursor<'_, K, V, I>>
    where
        K: Borrow<Q>,
        Q: PartialEq + ?Sized,
    {
        self.find_key(key, self.first_position(), Position::BOUNDARY)
    }

    /// Returns `true` if some element has the key `key`.
    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: PartialEq + ?Sized,
    {
        self.find(key).is_some()
    }

    /// Counts the elements whose key equals `key`.
    pub fn occurrences_of<Q>(&self, key: &Q) -> usize
    where
        K: Borrow<Q>,
        Q: PartialEq + ?Sized,
    {
        self.iter()
            .filter(|&(k, _)| <K as Borrow<Q>>::borrow(k) == key)
            .count()
    }

    /// Iterates over the pairs in link order.
    pub fn iter(&self) -> Iter<'_, K, V, I> {
        Iter::new(self)
    }

    /// Iterates over the pairs in link order with mutable values.
    pub fn iter_mut(&mut self) -> IterMut<'_, K, V, I> {
        IterMut::new(self)
    }
}

impl<K, V, I: IndexType> Default for Ring<K, V, I> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V, I: IndexType> Drop for Ring<K, V, I> {
    fn drop(&mut self) {
        // Real elements go first; the boundary is released with the arena.
        self.clear();
    }
}

impl<K: Clone, V: Clone, I: IndexType> Clone for Ring<K, V, I> {
    fn clone(&self) -> Self {
        self.iter()
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect()
    }

    fn clone_from(&mut self, source: &Self) {
        self.clear();
        self.extend(source.iter().map(|(k, v)| (k.clone(), v.clone())));
    }
}

impl<K: PartialEq, V: PartialEq, I: IndexType> PartialEq for Ring<K, V, I> {
    fn eq(&self, other: &Self) -> bool {
        self.len == other.len && self.iter().eq(other.iter())
    }
}

impl<K: Eq, V: Eq, I: IndexType> Eq for Ring<K, V, I> {}

impl<K: Debug, V: Debug, I: IndexType> Debug for Ring<K, V, I> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

/// Renders `{ key = value, key = value }` in link order, `{ }` when empty.
impl<K: Display, V: Display, I: IndexType> Display for Ring<K, V, I> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("{")?;
        for (i, (k, v)) in self.iter().enumerate() {
            if i > 0 {
                f.write_str(",")?;
            }
            write!(f, " {} = {}", k, v)?;
        }
        f.write_str(" }")
    }
}

impl<K, V, I: IndexType> FromIterator<(K, V)> for Ring<K, V, I> {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        let mut ring = Self::new();
        ring.extend(iter);
        ring
    }
}

impl<K, V, I: IndexType> Extend<(K, V)> for Ring<K, V, I> {
    fn extend<T: IntoIterator<Item = (K, V)>>(&mut self, iter: T) {
        for (k, v) in iter {
            self.push_back(k, v);
        }
    }
}

impl<K, V, I: IndexType> IntoIterator for Ring<K, V, I> {
    type Item = (K, V);
    type IntoIter = IntoIter<K, V, I>;
    fn into_iter(self) -> Self::IntoIter {
        IntoIter::new(self)
    }
}

impl<'a, K, V, I: IndexType> IntoIterator for &'a Ring<K, V, I> {
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V, I>;
    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<'a, K, V, I: IndexType> IntoIterator for &'a mut Ring<K, V, I> {
    type Item = (&'a K, &'a mut V);
    type IntoIter = IterMut<'a, K, V, I>;
    fn into_iter(self) -> Self::IntoIter {
        self.iter_mut()
    }
}
