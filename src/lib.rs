//! # bankers
//!
//! Persistent (immutable) sequences with structural sharing.
//!
//! This crate provides two data structures:
//!
//! - [`PersistentList`]: a singly-linked cons list with O(1) prepend and
//!   O(1) tail access, sharing unmodified structure between versions.
//! - [`PersistentDeque`]: a double-ended queue built from a pair of
//!   `PersistentList`s (the classic banker's deque), with amortized O(1)
//!   access at both ends.
//!
//! All operations are functional: they return new values and never modify
//! an existing one, so any number of versions may alias the same underlying
//! nodes safely.
//!
//! ## Example
//!
//! ```rust
//! use bankers::PersistentDeque;
//!
//! let deque = PersistentDeque::new().cons(3).cons(2).cons(1);
//! assert_eq!(deque.head(), Ok(&1));
//! assert_eq!(deque.last(), Ok(&3));
//!
//! // Structural sharing: the original deque is preserved
//! let shorter = deque.tail().unwrap();
//! assert_eq!(deque.len(), 3);   // Original unchanged
//! assert_eq!(shorter.len(), 2); // New deque
//! ```
//!
//! ## Feature Flags
//!
//! - `arc`: share nodes with `Arc` instead of `Rc`, making the sequences
//!   `Send + Sync` for element types that are `Send + Sync`.
//! - `serde`: `Serialize`/`Deserialize` implementations for both types.

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]

// =============================================================================
// Reference Counter Type Alias
// =============================================================================

/// Reference-counted smart pointer type.
///
/// When the `arc` feature is enabled, this is `std::sync::Arc`,
/// which is thread-safe but has slightly higher overhead.
///
/// When the `arc` feature is disabled (default), this is `std::rc::Rc`,
/// which is faster but not thread-safe.
#[cfg(feature = "arc")]
pub(crate) type ReferenceCounter<T> = std::sync::Arc<T>;

#[cfg(not(feature = "arc"))]
pub(crate) type ReferenceCounter<T> = std::rc::Rc<T>;

mod deque;
mod error;
mod list;

pub use deque::PersistentDeque;
pub use deque::PersistentDequeIntoIterator;
pub use deque::PersistentDequeIterator;
pub use error::SequenceError;
pub use list::PersistentList;
pub use list::PersistentListIntoIterator;
pub use list::PersistentListIterator;

// =============================================================================
// Tests
// =============================================================================
