//! # Keyed Ring
//!
//! A circular doubly-linked sequence of key/value pairs with cursors that wrap
//! round the ring, plus a few sequence algorithms built on those cursors.
//!
//! ## Key Features
//!
//! * **Boundary node:** Every ring has one non-data node marking `end()` and
//!   the insertion point at the back. Cursors step over it transparently.
//! * **Stable positions:** Insert and erase relink only the touched element's
//!   neighbours. Other positions stay valid; stale ones are detected through a
//!   per-slot generation instead of dangling.
//! * **Compact links:** Elements live in an arena and link through an
//!   [`IndexType`] (`u8`, `u16`, `u32` or `usize`).
//! * **Duplicate keys:** Keys may repeat; [`Ring::find_key`] searches any
//!   sub-range, wrapping round the ring when asked to.
//! * **Algorithms** (feature `algorithms`, on by default): `filter`, `unique`,
//!   `join`, `join_with`, `shuffle`.
//!
//! ## Examples
//!
//! ### Cursors
//!
//! ```rust
//! use keyed_ring::Ring;
//!
//! let mut ring: Ring<i32, &str> = Ring::new();
//! ring.push_back(1, "one");
//! ring.push_back(2, "two");
//! ring.push_back(3, "three");
//!
//! // Stepping forward from the last element wraps to the first.
//! let mut cursor = ring.begin() + 2;
//! assert_eq!(cursor.key(), Some(&3));
//! cursor.step_forward();
//! assert_eq!(cursor.key(), Some(&1));
//!
//! // Offsets are taken modulo the length.
//! assert_eq!((ring.begin() - 1).key(), Some(&3));
//! assert_eq!(ring.to_string(), "{ 1 = one, 2 = two, 3 = three }");
//! ```
//!
//! ### Editing through positions
//!
//! ```rust
//! use keyed_ring::Ring;
//!
//! let mut ring: Ring<&str, i32> = Ring::new();
//! ring.push_back("a", 1);
//! ring.push_back("c", 3);
//!
//! let at = ring.find(&"c").map(|c| c.position()).unwrap();
//! ring.insert(at, "b", 2);
//! assert_eq!(ring.occurrences_of(&"b"), 1);
//!
//! let first = ring.begin().position();
//! let next = ring.erase(first);
//! assert_eq!(next.key(), Some(&"b"));
//! ```
//!
//! ### Algorithms
//!
//! ```rust
//! use keyed_ring::{Ring, join};
//!
//! let first: Ring<&str, i32> = vec![("uno", 1), ("due", 2)].into_iter().collect();
//! let second: Ring<&str, i32> = vec![("due", 1), ("tre", 3)].into_iter().collect();
//!
//! let joined = join(&first, &second);
//! assert_eq!(joined.to_string(), "{ uno = 1, due = 3, tre = 3 }");
//! ```

// --- Module Declarations ---

pub mod algorithms;
pub mod error;
pub mod ring;
pub mod utils;

// --- Re-exports ---

#[cfg(feature = "algorithms")]
pub use algorithms::{filter, join, join_with, shuffle, unique};
pub use error::CapacityError;
pub use ring::{Cursor, CursorMut, IntoIter, Iter, IterMut, Position, Ring, RingCursor};
pub use utils::IndexType;
