#![cfg(feature = "algorithms")]
//! Sequence algorithms over [`Ring`]s.
//!
//! Every function here builds a fresh ring and leaves its inputs untouched.
//! They only use the public surface of the ring: cursors from
//! [`Ring::begin`]/[`Ring::end`], [`Ring::find_key`] and [`Ring::push_back`].
//!
//! ## `unique` fold order
//! ```text
//! for each element e in source, in link order:
//!     if e.key already in result: skip
//!     acc = e.value
//!     from = e
//!     loop:
//!         from = from.next (boundary included)
//!         if from == end: break
//!         hit = source.find_key(e.key, from, end) or break
//!         acc = aggregate(e.key, acc, hit.value)
//!         from = hit
//!     result.push_back(e.key, acc)
//! ```

use core::ops::Add;

use crate::ring::{Cursor, Ring};
use crate::utils::IndexType;

/// Keeps the pairs whose key satisfies `predicate`, in link order.
pub fn filter<K, V, I, P>(source: &Ring<K, V, I>, mut predicate: P) -> Ring<K, V, I>
where
    K: Clone,
    V: Clone,
    I: IndexType,
    P: FnMut(&K) -> bool,
{
    let mut result = Ring::new();
    let end = source.end();
    let mut cursor = source.begin();
    while cursor != end {
        if let Some((key, value)) = cursor.current() {
            if predicate(key) {
                result.push_back(key.clone(), value.clone());
            }
        }
        cursor.move_next();
    }
    log::debug!("filter kept {} of {} entries", result.len(), source.len());
    result
}

/// Collapses duplicate keys into their first occurrence.
///
/// Values of later occurrences are folded into the first one left to right
/// with `aggregate(key, accumulated, next)`. The result lists each key once,
/// in order of first appearance.
pub fn unique<K, V, I, F>(source: &Ring<K, V, I>, mut aggregate: F) -> Ring<K, V, I>
where
    K: Clone + PartialEq,
    V: Clone,
    I: IndexType,
    F: FnMut(&K, &V, &V) -> V,
{
    let mut result: Ring<K, V, I> = Ring::new();
    let end = source.end();
    let mut cursor = source.begin();
    while cursor != end {
        if let Some((key, value)) = cursor.current() {
            let emitted = result
                .find_key(key, result.begin().position(), result.end().position())
                .is_some();
            if !emitted {
                let accumulated = fold_later_occurrences(source, cursor, key, value, &mut aggregate);
                result.push_back(key.clone(), accumulated);
            }
        }
        cursor.move_next();
    }
    log::debug!(
        "unique folded {} entries into {} keys",
        source.len(),
        result.len()
    );
    result
}

fn fold_later_occurrences<'a, K, V, I, F>(
    source: &'a Ring<K, V, I>,
    first: Cursor<'a, K, V, I>,
    key: &K,
    value: &V,
    aggregate: &mut F,
) -> V
where
    K: PartialEq,
    V: Clone,
    I: IndexType,
    F: FnMut(&K, &V, &V) -> V,
{
    let end = source.end();
    let mut accumulated = value.clone();
    let mut from = first;
    loop {
        from.move_next();
        // `from == end` would make `find_key` scan a whole lap.
        if from == end {
            break;
        }
        match source.find_key(key, from.position(), end.position()) {
            Some(hit) => {
                if let Some(next) = hit.value() {
                    accumulated = aggregate(key, &accumulated, next);
                }
                from = hit;
            }
            None => break,
        }
    }
    accumulated
}

/// Concatenates `first` and `second`, then merges duplicate keys with `aggregate`.
pub fn join_with<K, V, I, F>(first: &Ring<K, V, I>, second: &Ring<K, V, I>, aggregate: F) -> Ring<K, V, I>
where
    K: Clone + PartialEq,
    V: Clone,
    I: IndexType,
    F: FnMut(&K, &V, &V) -> V,
{
    let mut joined = Ring::new();
    append(&mut joined, first);
    append(&mut joined, second);
    unique(&joined, aggregate)
}

/// [`join_with`] summing the values of duplicate keys.
pub fn join<K, V, I>(first: &Ring<K, V, I>, second: &Ring<K, V, I>) -> Ring<K, V, I>
where
    K: Clone + PartialEq,
    V: Clone + Add<Output = V>,
    I: IndexType,
{
    join_with(first, second, |_, accumulated, next| {
        accumulated.clone() + next.clone()
    })
}

fn append<K, V, I>(target: &mut Ring<K, V, I>, source: &Ring<K, V, I>)
where
    K: Clone,
    V: Clone,
    I: IndexType,
{
    let end = source.end();
    let mut cursor = source.begin();
    while cursor != end {
        if let Some((key, value)) = cursor.current() {
            target.push_back(key.clone(), value.clone());
        }
        cursor.move_next();
    }
}

/// Interleaves two rings in fixed-size windows.
///
/// Repeats `repetitions` times: take the next `first_count` pairs of `first`,
/// then the next `second_count` pairs of `second`. The two source cursors keep
/// their place across repetitions and wrap round their ring, so a window larger
/// than its ring repeats elements. An empty source contributes nothing.
pub fn shuffle<K, V, I>(
    first: &Ring<K, V, I>,
    first_count: usize,
    second: &Ring<K, V, I>,
    second_count: usize,
    repetitions: usize,
) -> Ring<K, V, I>
where
    K: Clone,
    V: Clone,
    I: IndexType,
{
    let mut result = Ring::new();
    let mut first_cursor = first.begin();
    let mut second_cursor = second.begin();
    for _ in 0..repetitions {
        take(&mut result, &mut first_cursor, first_count);
        take(&mut result, &mut second_cursor, second_count);
    }
    log::debug!(
        "shuffle of {}x({} + {}) produced {} entries",
        repetitions,
        first_count,
        second_count,
        result.len()
    );
    result
}

fn take<K, V, I>(result: &mut Ring<K, V, I>, cursor: &mut Cursor<'_, K, V, I>, count: usize)
where
    K: Clone,
    V: Clone,
    I: IndexType,
{
    if cursor.ring().is_empty() {
        return;
    }
    for _ in 0..count {
        if let Some((key, value)) = cursor.current() {
            result.push_back(key.clone(), value.clone());
        }
        cursor.step_forward();
    }
}
