//! Error types for the persistent sequences.
//!
//! Every fallible operation in this crate fails with a [`SequenceError`].
//! Failures are signaled immediately to the caller; the crate performs no
//! recovery, and a returned error leaves every existing value (including
//! the receiver) untouched.

use std::fmt;

/// Represents errors that can occur when operating on a persistent sequence.
///
/// There are exactly two failure modes: asking a non-empty-only operation
/// (`head`, `tail`, `last`, `init`) for data an empty sequence does not
/// have, and addressing an element past the end of a sequence.
///
/// Negative indices are unrepresentable because all positions are `usize`.
///
/// # Examples
///
/// ```rust
/// use bankers::{PersistentList, SequenceError};
///
/// let empty: PersistentList<i32> = PersistentList::new();
/// assert_eq!(empty.head(), Err(SequenceError::EmptyCollection));
///
/// let list = PersistentList::singleton(1);
/// assert_eq!(
///     list.get(3),
///     Err(SequenceError::IndexOutOfRange { index: 3, length: 1 })
/// );
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SequenceError {
    /// The operation requires a non-empty sequence.
    EmptyCollection,
    /// The requested position does not exist in the sequence.
    IndexOutOfRange {
        /// The position that was requested.
        index: usize,
        /// The length of the sequence at the time of the request.
        length: usize,
    },
}

impl fmt::Display for SequenceError {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyCollection => {
                write!(formatter, "operation requires a non-empty sequence")
            }
            Self::IndexOutOfRange { index, length } => {
                write!(
                    formatter,
                    "index {index} out of range for sequence of length {length}"
                )
            }
        }
    }
}

impl std::error::Error for SequenceError {}
