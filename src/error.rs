//! Error types for ring operations.
//!
//! Almost every ring operation is infallible: erasing at the boundary is a
//! defined no-op and lookups report absence through `Option`. The one failure
//! a caller can observe is running out of slot indices for the chosen
//! [`IndexType`](crate::IndexType), which the `try_*` insertion family reports
//! with [`CapacityError`] and the plain insertion family treats as fatal.

use core::fmt::{self, Debug, Display, Formatter};
use std::error::Error;

/// The ring has no free slot index left for another element.
///
/// Carries the rejected pair so that the caller gets ownership back.
pub struct CapacityError<K, V> {
    key: K,
    value: V,
    max_len: usize,
}

impl<K, V> CapacityError<K, V> {
    pub(crate) fn new(key: K, value: V, max_len: usize) -> Self {
        Self {
            key,
            value,
            max_len,
        }
    }

    /// Maximum number of live elements the ring's index type can address.
    pub fn max_len(&self) -> usize {
        self.max_len
    }

    /// Returns the pair that could not be inserted.
    pub fn into_inner(self) -> (K, V) {
        (self.key, self.value)
    }
}

impl<K, V> Debug for CapacityError<K, V> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("CapacityError")
            .field("max_len", &self.max_len)
            .finish_non_exhaustive()
    }
}

impl<K, V> Display for CapacityError<K, V> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "ring index space exhausted: at most {} elements fit the chosen index type",
            self.max_len
        )
    }
}

impl<K, V> Error for CapacityError<K, V> {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_capacity_error_message() {
        let err = CapacityError::new("k", 1, 254);
        assert_eq!(err.max_len(), 254);
        assert!(err.to_string().contains("at most 254 elements"));
        assert!(format!("{:?}", err).contains("max_len: 254"));
        assert_eq!(err.into_inner(), ("k", 1));
    }
}
