//! Compact index types for the ring's internal links.

use core::hash::Hash;
use std::fmt::Debug;

/// A sealed-style trait for integer types used as **doubly-linked-list node indices**.
///
/// Instead of pointer-based links, the ring stores indices into its slot arena.
/// Narrow types shrink every node by a few bytes at the price of a smaller
/// maximum number of live elements.
pub trait IndexType: Copy + Eq + Hash + Debug + 'static {
    /// Sentinel value indicating "no slot". Terminates the free list.
    const NONE: Self;

    /// The first slot index. The ring reserves it for its boundary node.
    const ZERO: Self;

    /// Converts this index to a `usize` for arena access.
    fn as_usize(self) -> usize;

    /// Converts a `usize` slot index to this compact type.
    ///
    /// Returns `None` when `i` does not fit or collides with [`IndexType::NONE`].
    fn try_from_usize(i: usize) -> Option<Self>;
}

macro_rules! impl_index_type {
    ($($ty:ty),*) => {
        $(
            impl IndexType for $ty {
                const NONE: Self = <$ty>::MAX;
                const ZERO: Self = 0;
                #[inline(always)]
                fn as_usize(self) -> usize {
                    self as usize
                }
                #[inline(always)]
                fn try_from_usize(i: usize) -> Option<Self> {
                    match <$ty>::try_from(i) {
                        Ok(idx) if idx != Self::NONE => Some(idx),
                        _ => None,
                    }
                }
            }
        )*
    };
}

impl_index_type!(u8, u16, u32, usize);
