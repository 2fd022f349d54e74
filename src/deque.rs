//! Persistent (immutable) double-ended queue.
//!
//! This module provides [`PersistentDeque`], a banker's deque: a pair of
//! [`PersistentList`]s where `front` holds the first half of the sequence
//! in order and `back` holds the second half reversed, so both ends are a
//! list head away.
//!
//! # Overview
//!
//! `PersistentDeque` provides:
//!
//! - amortized O(1) `cons`, `snoc`, `head`, `last`, `tail`, `init`
//! - O(1) `len`, `is_empty`, and cloning
//! - O(n) `get`, `append`, and list conversion
//!
//! All operations return new deques without modifying the original, and
//! structural sharing keeps copies cheap.
//!
//! # Balance Invariant
//!
//! After every public operation, either both internal lists are non-empty
//! or the deque holds at most one element. When removing an element would
//! leave one side empty while the other still holds two or more, the
//! non-empty side is split in half and one half is reversed onto the
//! depleted side. That O(n) rebalance only happens after Ω(n) cheap
//! operations have drained one side, which is what makes the per-operation
//! cost amortized O(1).
//!
//! # Examples
//!
//! ```rust
//! use bankers::PersistentDeque;
//!
//! let deque = PersistentDeque::new().snoc(1).snoc(2).snoc(3);
//! assert_eq!(deque.head(), Ok(&1));
//! assert_eq!(deque.last(), Ok(&3));
//! assert_eq!(deque.len(), 3);
//!
//! // Structural sharing: the original deque is preserved
//! let extended = deque.snoc(4);
//! assert_eq!(deque.len(), 3);     // Original unchanged
//! assert_eq!(extended.len(), 4);  // New deque
//! ```
//!
//! # References
//!
//! - Okasaki, "Purely Functional Data Structures" (1998), chapter 5.2

use std::fmt;
use std::hash::{Hash, Hasher};
use std::iter::FromIterator;

use crate::error::SequenceError;
use crate::list::{PersistentList, PersistentListIntoIterator, PersistentListIterator};

/// A persistent (immutable) double-ended queue.
///
/// Represented as two [`PersistentList`]s: `front` in order and `back`
/// reversed, so the logical sequence is `front ++ reverse(back)`.
///
/// # Time Complexity
///
/// | Operation   | Complexity     |
/// |-------------|----------------|
/// | `new`       | O(1)           |
/// | `singleton` | O(1)           |
/// | `cons`      | O(1)           |
/// | `snoc`      | O(1)           |
/// | `head`      | O(1)           |
/// | `last`      | O(1)           |
/// | `tail`      | amortized O(1) |
/// | `init`      | amortized O(1) |
/// | `len`       | O(1)           |
/// | `get`       | O(n)           |
/// | `append`    | O(n)           |
/// | `from_list` | O(n)           |
/// | `to_list`   | O(n)           |
///
/// # Examples
///
/// ```rust
/// use bankers::PersistentDeque;
///
/// let deque = PersistentDeque::singleton(42);
/// assert_eq!(deque.head(), Ok(&42));
/// assert_eq!(deque.len(), 1);
/// ```
pub struct PersistentDeque<T> {
    front: PersistentList<T>,
    back: PersistentList<T>,
}

impl<T> Clone for PersistentDeque<T> {
    /// Copies the deque in O(1); the copy shares all nodes.
    #[inline]
    fn clone(&self) -> Self {
        Self {
            front: self.front.clone(),
            back: self.back.clone(),
        }
    }
}

impl<T> PersistentDeque<T> {
    /// Creates a new empty deque.
    #[inline]
    #[must_use]
    pub const fn new() -> Self {
        Self {
            front: PersistentList::new(),
            back: PersistentList::new(),
        }
    }

    /// Creates a deque containing a single element.
    #[inline]
    #[must_use]
    pub fn singleton(element: T) -> Self {
        Self {
            front: PersistentList::singleton(element),
            back: PersistentList::new(),
        }
    }

    /// Returns `true` if the deque contains no elements.
    #[inline]
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.front.is_empty() && self.back.is_empty()
    }

    /// Returns `true` if the deque contains exactly one element.
    #[inline]
    #[must_use]
    pub const fn is_single(&self) -> bool {
        self.len() == 1
    }

    /// Returns the number of elements in the deque.
    ///
    /// # Complexity
    ///
    /// O(1) - both internal lists cache their length
    #[inline]
    #[must_use]
    pub const fn len(&self) -> usize {
        self.front.len() + self.back.len()
    }

    /// Returns a reference to the first element of the deque.
    ///
    /// # Errors
    ///
    /// Returns [`SequenceError::EmptyCollection`] if the deque is empty.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use bankers::{PersistentDeque, SequenceError};
    ///
    /// let deque = PersistentDeque::new().cons(2).cons(1);
    /// assert_eq!(deque.head(), Ok(&1));
    ///
    /// let empty: PersistentDeque<i32> = PersistentDeque::new();
    /// assert_eq!(empty.head(), Err(SequenceError::EmptyCollection));
    /// ```
    pub fn head(&self) -> Result<&T, SequenceError> {
        // The single element of a one-element deque may live on either side.
        if self.front.is_empty() {
            self.back.last()
        } else {
            self.front.head()
        }
    }

    /// Returns a reference to the last element of the deque.
    ///
    /// # Errors
    ///
    /// Returns [`SequenceError::EmptyCollection`] if the deque is empty.
    pub fn last(&self) -> Result<&T, SequenceError> {
        if self.back.is_empty() {
            self.front.last()
        } else {
            self.back.head()
        }
    }

    /// Prepends an element to the front of the deque.
    ///
    /// # Complexity
    ///
    /// O(1)
    ///
    /// # Examples
    ///
    /// ```rust
    /// use bankers::PersistentDeque;
    ///
    /// let deque = PersistentDeque::new().cons(3).cons(2).cons(1);
    /// assert_eq!(deque.head(), Ok(&1));
    /// assert_eq!(deque.last(), Ok(&3));
    /// ```
    #[must_use]
    pub fn cons(&self, element: T) -> Self {
        // When back is empty the deque holds at most one element, which sits
        // in front; moving it to back keeps both sides non-empty.
        if self.back.is_empty() {
            return Self {
                front: PersistentList::singleton(element),
                back: self.front.clone(),
            };
        }
        Self {
            front: self.front.cons(element),
            back: self.back.clone(),
        }
    }

    /// Appends an element to the back of the deque.
    ///
    /// # Complexity
    ///
    /// O(1)
    ///
    /// # Examples
    ///
    /// ```rust
    /// use bankers::PersistentDeque;
    ///
    /// let deque = PersistentDeque::new().snoc(1).snoc(2).snoc(3);
    /// assert_eq!(deque.head(), Ok(&1));
    /// assert_eq!(deque.last(), Ok(&3));
    /// ```
    #[must_use]
    pub fn snoc(&self, element: T) -> Self {
        if self.front.is_empty() {
            return Self {
                front: self.back.clone(),
                back: PersistentList::singleton(element),
            };
        }
        Self {
            front: self.front.clone(),
            back: self.back.cons(element),
        }
    }

    /// Returns an iterator over references to the elements in logical
    /// order (front to back).
    ///
    /// # Examples
    ///
    /// ```rust
    /// use bankers::PersistentDeque;
    ///
    /// let deque = PersistentDeque::new().snoc(1).snoc(2).snoc(3);
    /// let collected: Vec<&i32> = deque.iter().collect();
    /// assert_eq!(collected, vec![&1, &2, &3]);
    /// ```
    #[must_use]
    pub fn iter(&self) -> PersistentDequeIterator<'_, T> {
        let mut reversed_back: Vec<&T> = self.back.iter().collect();
        reversed_back.reverse();
        PersistentDequeIterator {
            front: self.front.iter(),
            back: reversed_back.into_iter(),
        }
    }

    /// Returns a reference to the element at the given index.
    ///
    /// Indices are zero-based over the logical sequence. Negative indices
    /// are unrepresentable because positions are `usize`.
    ///
    /// # Complexity
    ///
    /// O(n) where n = index
    ///
    /// # Errors
    ///
    /// Returns [`SequenceError::IndexOutOfRange`] if `index >= self.len()`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use bankers::PersistentDeque;
    ///
    /// let deque = PersistentDeque::new().cons(3).cons(2).cons(1);
    /// assert_eq!(deque.get(0), Ok(&1));
    /// assert_eq!(deque.get(2), Ok(&3));
    /// ```
    pub fn get(&self, index: usize) -> Result<&T, SequenceError> {
        let front_length = self.front.len();
        if index < front_length {
            return self.front.get(index);
        }
        let back_index = index - front_length;
        let back_length = self.back.len();
        if back_index < back_length {
            // Back is stored reversed: logical position counts from its end.
            return self.back.get(back_length - 1 - back_index);
        }
        Err(SequenceError::IndexOutOfRange {
            index,
            length: self.len(),
        })
    }
}

impl<T: Clone> PersistentDeque<T> {
    /// Builds a balanced deque from a list.
    ///
    /// The list is split at its midpoint; the first half becomes `front`
    /// and the reversed second half becomes `back`.
    ///
    /// # Complexity
    ///
    /// O(n)
    ///
    /// # Examples
    ///
    /// ```rust
    /// use bankers::{PersistentDeque, PersistentList};
    ///
    /// let list: PersistentList<i32> = (1..=4).collect();
    /// let deque = PersistentDeque::from_list(&list);
    /// assert_eq!(deque.to_list(), list);
    /// ```
    #[must_use]
    pub fn from_list(list: &PersistentList<T>) -> Self {
        let Ok((front, reversed_back)) = list.split_at(list.len() / 2) else {
            unreachable!("len / 2 is always a valid split point")
        };
        Self {
            front,
            back: reversed_back.reverse(),
        }
    }

    /// Reconstructs the logical sequence as a [`PersistentList`].
    ///
    /// # Complexity
    ///
    /// O(n)
    #[must_use]
    pub fn to_list(&self) -> PersistentList<T> {
        self.front.append(&self.back.reverse())
    }

    /// Returns the deque without its first element, rebalancing if the
    /// removal drained the front.
    ///
    /// # Complexity
    ///
    /// Amortized O(1); a removal that triggers a rebalance costs O(n).
    ///
    /// # Errors
    ///
    /// Returns [`SequenceError::EmptyCollection`] if the deque is empty.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use bankers::PersistentDeque;
    ///
    /// let deque = PersistentDeque::new().snoc(1).snoc(2).snoc(3);
    /// let rest = deque.tail().unwrap();
    /// assert_eq!(rest.head(), Ok(&2));
    /// assert_eq!(rest.len(), 2);
    /// ```
    pub fn tail(&self) -> Result<Self, SequenceError> {
        if self.is_empty() {
            return Err(SequenceError::EmptyCollection);
        }
        // One side empty means at most one element total: removing it
        // empties the deque.
        if self.front.is_empty() || self.back.is_empty() {
            return Ok(Self::new());
        }
        Ok(Self {
            front: self.front.tail()?,
            back: self.back.clone(),
        }
        .rebalanced_if_necessary())
    }

    /// Returns the deque without its last element, rebalancing if the
    /// removal drained the back.
    ///
    /// # Complexity
    ///
    /// Amortized O(1); a removal that triggers a rebalance costs O(n).
    ///
    /// # Errors
    ///
    /// Returns [`SequenceError::EmptyCollection`] if the deque is empty.
    pub fn init(&self) -> Result<Self, SequenceError> {
        if self.is_empty() {
            return Err(SequenceError::EmptyCollection);
        }
        if self.front.is_empty() || self.back.is_empty() {
            return Ok(Self::new());
        }
        Ok(Self {
            front: self.front.clone(),
            back: self.back.tail()?,
        }
        .rebalanced_if_necessary())
    }

    /// Concatenates two deques.
    ///
    /// Implemented by converting both sides to lists and rebuilding a
    /// balanced deque, so unlike the other operations this does not share
    /// structure with the inputs and costs O(n). Deque concatenation is
    /// not a cheap operation in this representation.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use bankers::PersistentDeque;
    ///
    /// let left = PersistentDeque::new().snoc(1).snoc(2);
    /// let right = PersistentDeque::new().snoc(3).snoc(4);
    /// let combined = left.append(&right);
    /// let collected: Vec<&i32> = combined.iter().collect();
    /// assert_eq!(collected, vec![&1, &2, &3, &4]);
    /// ```
    #[must_use]
    pub fn append(&self, other: &Self) -> Self {
        Self::from_list(&self.to_list().append(&other.to_list()))
    }

    /// Restores the balance invariant after a removal.
    ///
    /// If one side is empty while the other holds two or more elements,
    /// the non-empty side is split at its midpoint: the prefix stays on
    /// its side and the suffix is reversed onto the depleted side.
    fn rebalanced_if_necessary(&self) -> Self {
        if self.is_empty()
            || self.is_single()
            || (!self.front.is_empty() && !self.back.is_empty())
        {
            return self.clone();
        }

        if self.front.is_empty() {
            let Ok((kept_back, moved)) = self.back.split_at(self.back.len() / 2) else {
                unreachable!("len / 2 is always a valid split point")
            };
            return Self {
                front: moved.reverse(),
                back: kept_back,
            };
        }
        let Ok((kept_front, moved)) = self.front.split_at(self.front.len() / 2) else {
            unreachable!("len / 2 is always a valid split point")
        };
        Self {
            front: kept_front,
            back: moved.reverse(),
        }
    }
}

// =============================================================================
// Iterator Implementations
// =============================================================================

/// An iterator over references to elements of a [`PersistentDeque`] in
/// logical order.
pub struct PersistentDequeIterator<'a, T> {
    front: PersistentListIterator<'a, T>,
    back: std::vec::IntoIter<&'a T>,
}

impl<'a, T> Iterator for PersistentDequeIterator<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        self.front.next().or_else(|| self.back.next())
    }
}

/// An owning iterator over elements of a [`PersistentDeque`] in logical
/// order.
pub struct PersistentDequeIntoIterator<T> {
    list: PersistentListIntoIterator<T>,
}

impl<T: Clone> Iterator for PersistentDequeIntoIterator<T> {
    type Item = T;

    fn next(&mut self) -> Option<Self::Item> {
        self.list.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.list.size_hint()
    }
}

impl<T: Clone> ExactSizeIterator for PersistentDequeIntoIterator<T> {
    fn len(&self) -> usize {
        self.list.len()
    }
}

// =============================================================================
// Standard Trait Implementations
// =============================================================================

impl<T> Default for PersistentDeque<T> {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Clone> FromIterator<T> for PersistentDeque<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self::from_list(&iter.into_iter().collect())
    }
}

impl<T: Clone> IntoIterator for PersistentDeque<T> {
    type Item = T;
    type IntoIter = PersistentDequeIntoIterator<T>;

    fn into_iter(self) -> Self::IntoIter {
        PersistentDequeIntoIterator {
            list: self.to_list().into_iter(),
        }
    }
}

impl<'a, T> IntoIterator for &'a PersistentDeque<T> {
    type Item = &'a T;
    type IntoIter = PersistentDequeIterator<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Deques compare by logical sequence, not by internal split point: two
/// deques holding the same elements are equal even when their `front` and
/// `back` lists divide the sequence differently.
impl<T: PartialEq> PartialEq for PersistentDeque<T> {
    fn eq(&self, other: &Self) -> bool {
        if self.len() != other.len() {
            return false;
        }
        self.iter().zip(other.iter()).all(|(a, b)| a == b)
    }
}

impl<T: Eq> Eq for PersistentDeque<T> {}

/// Hashes the logical sequence (length first, then elements in order), so
/// equal deques produce equal hashes regardless of internal split point.
impl<T: Hash> Hash for PersistentDeque<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.len().hash(state);
        for element in self {
            element.hash(state);
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for PersistentDeque<T> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.debug_list().entries(self.iter()).finish()
    }
}

impl<T: fmt::Display> fmt::Display for PersistentDeque<T> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(formatter, "[")?;
        let mut first = true;
        for element in self {
            if first {
                first = false;
            } else {
                write!(formatter, ", ")?;
            }
            write!(formatter, "{element}")?;
        }
        write!(formatter, "]")
    }
}

// =============================================================================
// Serde Support
// =============================================================================

#[cfg(feature = "serde")]
impl<T: serde::Serialize> serde::Serialize for PersistentDeque<T> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        use serde::ser::SerializeSeq;
        let mut seq = serializer.serialize_seq(Some(self.len()))?;
        for element in self {
            seq.serialize_element(element)?;
        }
        seq.end()
    }
}

#[cfg(feature = "serde")]
struct PersistentDequeVisitor<T> {
    marker: std::marker::PhantomData<T>,
}

#[cfg(feature = "serde")]
impl<'de, T> serde::de::Visitor<'de> for PersistentDequeVisitor<T>
where
    T: serde::Deserialize<'de> + Clone,
{
    type Value = PersistentDeque<T>;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("a sequence")
    }

    fn visit_seq<A>(self, mut seq: A) -> Result<Self::Value, A::Error>
    where
        A: serde::de::SeqAccess<'de>,
    {
        const MAX_PREALLOCATE: usize = 4096;
        let capacity = seq.size_hint().unwrap_or(0).min(MAX_PREALLOCATE);
        let mut elements = Vec::with_capacity(capacity);
        while let Some(element) = seq.next_element()? {
            elements.push(element);
        }
        Ok(elements.into_iter().collect())
    }
}

#[cfg(feature = "serde")]
impl<'de, T> serde::Deserialize<'de> for PersistentDeque<T>
where
    T: serde::Deserialize<'de> + Clone,
{
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        deserializer.deserialize_seq(PersistentDequeVisitor {
            marker: std::marker::PhantomData,
        })
    }
}

// =============================================================================
// Tests
// =============================================================================
