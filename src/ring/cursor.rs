//! Bidirectional cursors over a [`Ring`].
//!
//! A single generic [`RingCursor`] serves both capabilities: the borrow it
//! holds decides what it may do. [`Cursor`] holds `&Ring` and is `Copy`;
//! [`CursorMut`] holds `&mut Ring` and can edit the ring around itself.
//! Traversal is written once for any `R: Deref<Target = Ring>`.
//!
//! Two families of movement exist:
//! * [`RingCursor::step_forward`] / [`RingCursor::step_backward`] skip the
//!   boundary, so on a non-empty ring they never park on `end()`.
//! * [`RingCursor::move_next`] / [`RingCursor::move_prev`] follow a single
//!   link and do land on the boundary, which is how `begin()..end()` ranges
//!   are walked.

use core::fmt::{self, Debug};
use core::ops::{Add, Deref, Sub};
use core::ptr;

use super::{Position, Ring};
use crate::error::CapacityError;
use crate::utils::IndexType;

/// Direction of travel along the ring's links.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Direction {
    /// Follow `next` links.
    Forward,
    /// Follow `prev` links.
    Backward,
}

/// A position in a [`Ring`] together with the borrow needed to use it.
#[derive(Clone, Copy)]
pub struct RingCursor<R> {
    ring: R,
    at: Position,
}

/// Read-only cursor.
pub type Cursor<'a, K, V, I = u32> = RingCursor<&'a Ring<K, V, I>>;

/// Cursor that may modify the ring.
pub type CursorMut<'a, K, V, I = u32> = RingCursor<&'a mut Ring<K, V, I>>;

impl<R> RingCursor<R> {
    pub(crate) fn new(ring: R, at: Position) -> Self {
        Self { ring, at }
    }

    /// Returns the borrow-free handle of the current position.
    pub fn position(&self) -> Position {
        self.at
    }

    /// Returns `true` if the cursor sits on the boundary (`end()`).
    pub fn is_boundary(&self) -> bool {
        self.at.is_boundary()
    }
}

impl<K, V, I, R> RingCursor<R>
where
    I: IndexType,
    R: Deref<Target = Ring<K, V, I>>,
{
    /// The ring this cursor walks.
    pub fn ring(&self) -> &Ring<K, V, I> {
        &self.ring
    }

    /// Returns `false` once the element under the cursor has been erased.
    pub fn is_valid(&self) -> bool {
        self.ring.is_valid(self.at)
    }

    /// Follows the `next` link, landing on the boundary after the last element.
    ///
    /// # Panics
    /// Panics if the element under the cursor has been erased.
    pub fn move_next(&mut self) {
        self.at = self.ring.link(self.at, Direction::Forward);
    }

    /// Follows the `prev` link, landing on the boundary before the first element.
    ///
    /// # Panics
    /// Panics if the element under the cursor has been erased.
    pub fn move_prev(&mut self) {
        self.at = self.ring.link(self.at, Direction::Backward);
    }

    fn step(&mut self, direction: Direction) {
        self.at = self.ring.link(self.at, direction);
        if self.at.is_boundary() {
            log::trace!("stepping {:?} over the ring boundary", direction);
            // On an empty ring the boundary links to itself and we stay put.
            self.at = self.ring.link(self.at, direction);
        }
    }

    /// Moves to the next element, wrapping from the last element to the first.
    ///
    /// # Panics
    /// Panics if the element under the cursor has been erased.
    pub fn step_forward(&mut self) {
        self.step(Direction::Forward);
    }

    /// Moves to the previous element, wrapping from the first element to the last.
    ///
    /// # Panics
    /// Panics if the element under the cursor has been erased.
    pub fn step_backward(&mut self) {
        self.step(Direction::Backward);
    }

    fn advance_by(&mut self, magnitude: usize, direction: Direction) {
        let len = self.ring.len();
        if len == 0 {
            return;
        }
        for _ in 0..magnitude % len {
            self.step(direction);
        }
    }

    /// Steps `|n| mod len` times, forward for positive `n` and backward for
    /// negative `n`. Does nothing on an empty ring.
    pub fn advance(&mut self, n: isize) {
        let direction = if n < 0 {
            Direction::Backward
        } else {
            Direction::Forward
        };
        self.advance_by(n.unsigned_abs(), direction);
    }

    /// Consuming form of [`RingCursor::advance`].
    pub fn offset(mut self, n: isize) -> Self {
        self.advance(n);
        self
    }

    /// A read-only cursor at the same position.
    pub fn as_cursor(&self) -> Cursor<'_, K, V, I> {
        RingCursor::new(&*self.ring, self.at)
    }
}

// Read-only cursors hand out borrows of the ring itself, so keys, values and
// peeked cursors outlive the cursor they came from.
impl<'a, K, V, I: IndexType> RingCursor<&'a Ring<K, V, I>> {
    /// The pair under the cursor; `None` on the boundary or a stale position.
    pub fn current(&self) -> Option<(&'a K, &'a V)> {
        let ring: &'a Ring<K, V, I> = self.ring;
        ring.entry(self.at).map(|(k, v)| (k, v))
    }

    /// The key under the cursor.
    pub fn key(&self) -> Option<&'a K> {
        self.current().map(|(k, _)| k)
    }

    /// The value under the cursor.
    pub fn value(&self) -> Option<&'a V> {
        self.current().map(|(_, v)| v)
    }

    /// Peeks one [`step_forward`](RingCursor::step_forward) ahead without moving.
    pub fn next_cursor(&self) -> Cursor<'a, K, V, I> {
        let mut peek = *self;
        peek.step_forward();
        peek
    }

    /// Peeks one [`step_backward`](RingCursor::step_backward) behind without moving.
    pub fn prev_cursor(&self) -> Cursor<'a, K, V, I> {
        let mut peek = *self;
        peek.step_backward();
        peek
    }
}

impl<'a, K, V, I: IndexType> RingCursor<&'a mut Ring<K, V, I>> {
    /// The pair under the cursor; `None` on the boundary or a stale position.
    pub fn current(&self) -> Option<(&K, &V)> {
        self.ring.entry(self.at).map(|(k, v)| (k, v))
    }

    /// The key under the cursor.
    pub fn key(&self) -> Option<&K> {
        self.current().map(|(k, _)| k)
    }

    /// The value under the cursor.
    pub fn value(&self) -> Option<&V> {
        self.current().map(|(_, v)| v)
    }

    /// Peeks one [`step_forward`](RingCursor::step_forward) ahead without moving.
    pub fn next_cursor(&self) -> Cursor<'_, K, V, I> {
        self.as_cursor().next_cursor()
    }

    /// Peeks one [`step_backward`](RingCursor::step_backward) behind without moving.
    pub fn prev_cursor(&self) -> Cursor<'_, K, V, I> {
        self.as_cursor().prev_cursor()
    }

    /// Mutable access to the value under the cursor.
    pub fn value_mut(&mut self) -> Option<&mut V> {
        self.ring.entry_mut(self.at).map(|(_, v)| v)
    }

    /// The pair under the cursor with a mutable value.
    pub fn current_mut(&mut self) -> Option<(&K, &mut V)> {
        self.ring.entry_mut(self.at).map(|(k, v)| (&*k, v))
    }

    /// Inserts a pair before the cursor and moves onto it.
    ///
    /// # Errors
    /// Hands the pair back when the ring's index space is exhausted.
    pub fn try_insert_before(&mut self, key: K, value: V) -> Result<(), CapacityError<K, V>> {
        self.at = self.ring.try_insert(self.at, key, value)?;
        Ok(())
    }

    /// Inserts a pair before the cursor and moves onto it.
    ///
    /// # Panics
    /// Panics if the ring's index space is exhausted.
    pub fn insert_before(&mut self, key: K, value: V) {
        if let Err(err) = self.try_insert_before(key, value) {
            panic!("{}", err);
        }
    }

    /// Removes the element under the cursor and moves to the following one.
    ///
    /// On the boundary nothing happens and `None` is returned.
    pub fn erase(&mut self) -> Option<(K, V)> {
        let (next, entry) = self.ring.unlink(self.at)?;
        self.at = next;
        Some(entry)
    }
}

impl<K, V, I, R1, R2> PartialEq<RingCursor<R2>> for RingCursor<R1>
where
    I: IndexType,
    R1: Deref<Target = Ring<K, V, I>>,
    R2: Deref<Target = Ring<K, V, I>>,
{
    fn eq(&self, other: &RingCursor<R2>) -> bool {
        ptr::eq(&*self.ring, &*other.ring) && self.at == other.at
    }
}

impl<K, V, I, R> Eq for RingCursor<R>
where
    I: IndexType,
    R: Deref<Target = Ring<K, V, I>>,
{
}

impl<'a, K, V, I: IndexType> Add<isize> for RingCursor<&'a Ring<K, V, I>> {
    type Output = Self;
    fn add(mut self, n: isize) -> Self {
        self.advance(n);
        self
    }
}

impl<'a, K, V, I: IndexType> Sub<isize> for RingCursor<&'a Ring<K, V, I>> {
    type Output = Self;
    fn sub(mut self, n: isize) -> Self {
        let direction = if n < 0 {
            Direction::Forward
        } else {
            Direction::Backward
        };
        self.advance_by(n.unsigned_abs(), direction);
        self
    }
}

impl<R> Debug for RingCursor<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RingCursor")
            .field("at", &self.at)
            .finish_non_exhaustive()
    }
}
