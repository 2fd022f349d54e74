//! Persistent (immutable) singly-linked list.
//!
//! This module provides [`PersistentList`], an immutable cons list that
//! uses structural sharing for efficient operations.
//!
//! # Overview
//!
//! `PersistentList` provides:
//!
//! - O(1) prepend (`cons`)
//! - O(1) head and tail access
//! - O(n) index access, append, and reverse
//!
//! All operations return new lists without modifying the original, and
//! structural sharing ensures memory efficiency.
//!
//! # Examples
//!
//! ```rust
//! use bankers::PersistentList;
//!
//! // Build a list using cons
//! let list = PersistentList::new().cons(3).cons(2).cons(1);
//! assert_eq!(list.head(), Ok(&1));
//! assert_eq!(list.len(), 3);
//!
//! // Structural sharing: the original list is preserved
//! let extended = list.cons(0);
//! assert_eq!(list.len(), 3);     // Original unchanged
//! assert_eq!(extended.len(), 4); // New list with prepended element
//!
//! // Build from an iterator
//! let list: PersistentList<i32> = (1..=5).collect();
//! assert_eq!(list.iter().sum::<i32>(), 15);
//! ```
//!
//! # Structural Sharing
//!
//! When you create a new list by prepending an element with `cons`, the new
//! list shares all nodes with the original list:
//!
//! ```text
//! list1: 1 -> 2 -> 3 -> nil
//! list2 = list1.cons(0): 0 -> [1 -> 2 -> 3 -> nil]  // shares [1, 2, 3] with list1
//! ```
//!
//! This makes `cons` an O(1) operation both in time and additional space.

use std::fmt;
use std::hash::{Hash, Hasher};
use std::iter::FromIterator;

use crate::ReferenceCounter;
use crate::error::SequenceError;

/// Internal node structure for the persistent list.
///
/// Each node contains an element and an optional reference to the next node.
/// Using [`ReferenceCounter`] enables structural sharing between lists.
struct Node<T> {
    /// The element stored in this node.
    element: T,
    /// Reference to the next node (if any).
    next: Option<ReferenceCounter<Self>>,
}

/// A persistent (immutable) singly-linked list.
///
/// `PersistentList` is an immutable data structure that uses structural
/// sharing to efficiently support functional programming patterns.
///
/// # Time Complexity
///
/// | Operation  | Complexity |
/// |------------|------------|
/// | `new`      | O(1)       |
/// | `cons`     | O(1)       |
/// | `head`     | O(1)       |
/// | `tail`     | O(1)       |
/// | `len`      | O(1)       |
/// | `last`     | O(n)       |
/// | `init`     | O(n)       |
/// | `snoc`     | O(n)       |
/// | `get`      | O(n)       |
/// | `append`   | O(n)       |
/// | `reverse`  | O(n)       |
/// | `split_at` | O(n)       |
///
/// # Examples
///
/// ```rust
/// use bankers::PersistentList;
///
/// let list = PersistentList::singleton(42);
/// assert_eq!(list.head(), Ok(&42));
/// ```
pub struct PersistentList<T> {
    /// Reference to the head node (if any).
    head: Option<ReferenceCounter<Node<T>>>,
    /// Cached length for O(1) access.
    length: usize,
}

impl<T> Clone for PersistentList<T> {
    /// Copies the list handle in O(1); both copies share every node.
    #[inline]
    fn clone(&self) -> Self {
        Self {
            head: self.head.clone(),
            length: self.length,
        }
    }
}

/// Unlinks a uniquely-owned tail chain iteratively.
///
/// A naive drop of the head node would recurse through the whole chain
/// (dropping a node drops its `next` field, which drops its `next`, ...)
/// and overflow the stack on long lists. Instead, walk the chain and
/// detach each node that this list is the sole owner of, stopping at the
/// first node still shared with another list.
impl<T> Drop for PersistentList<T> {
    fn drop(&mut self) {
        let mut current = self.head.take();
        while let Some(node) = current {
            match ReferenceCounter::try_unwrap(node) {
                Ok(mut owned) => current = owned.next.take(),
                Err(_) => break,
            }
        }
    }
}

impl<T> PersistentList<T> {
    /// Creates a new empty list.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use bankers::PersistentList;
    ///
    /// let list: PersistentList<i32> = PersistentList::new();
    /// assert!(list.is_empty());
    /// ```
    #[inline]
    #[must_use]
    pub const fn new() -> Self {
        Self {
            head: None,
            length: 0,
        }
    }

    /// Creates a list containing a single element.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use bankers::PersistentList;
    ///
    /// let list = PersistentList::singleton(42);
    /// assert_eq!(list.head(), Ok(&42));
    /// assert_eq!(list.len(), 1);
    /// ```
    #[inline]
    #[must_use]
    pub fn singleton(element: T) -> Self {
        Self::new().cons(element)
    }

    /// Builds a list from a Vec efficiently.
    ///
    /// Uses `Vec::pop()` to consume elements from the end, which is O(1),
    /// avoiding the need for reverse iteration.
    fn build_from_vec(mut elements: Vec<T>) -> Self {
        let length = elements.len();
        let mut head: Option<ReferenceCounter<Node<T>>> = None;
        while let Some(element) = elements.pop() {
            head = Some(ReferenceCounter::new(Node {
                element,
                next: head,
            }));
        }

        Self { head, length }
    }

    /// Prepends an element to the front of the list.
    ///
    /// This operation creates a new list with the element at the front,
    /// sharing the structure of the original list.
    ///
    /// # Complexity
    ///
    /// O(1) time and space
    ///
    /// # Examples
    ///
    /// ```rust
    /// use bankers::PersistentList;
    ///
    /// let list = PersistentList::new().cons(3).cons(2).cons(1);
    /// assert_eq!(list.head(), Ok(&1));
    /// assert_eq!(list.len(), 3);
    /// ```
    #[inline]
    #[must_use]
    pub fn cons(&self, element: T) -> Self {
        Self {
            head: Some(ReferenceCounter::new(Node {
                element,
                next: self.head.clone(),
            })),
            length: self.length + 1,
        }
    }

    /// Returns a reference to the first element of the list.
    ///
    /// # Errors
    ///
    /// Returns [`SequenceError::EmptyCollection`] if the list is empty.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use bankers::{PersistentList, SequenceError};
    ///
    /// let list = PersistentList::new().cons(2).cons(1);
    /// assert_eq!(list.head(), Ok(&1));
    ///
    /// let empty: PersistentList<i32> = PersistentList::new();
    /// assert_eq!(empty.head(), Err(SequenceError::EmptyCollection));
    /// ```
    #[inline]
    pub fn head(&self) -> Result<&T, SequenceError> {
        self.head
            .as_deref()
            .map(|node| &node.element)
            .ok_or(SequenceError::EmptyCollection)
    }

    /// Returns the list without its first element.
    ///
    /// This operation shares structure with the original list.
    ///
    /// # Complexity
    ///
    /// O(1) time and space
    ///
    /// # Errors
    ///
    /// Returns [`SequenceError::EmptyCollection`] if the list is empty.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use bankers::PersistentList;
    ///
    /// let list = PersistentList::new().cons(3).cons(2).cons(1);
    /// let tail = list.tail().unwrap();
    /// assert_eq!(tail.head(), Ok(&2));
    /// assert_eq!(tail.len(), 2);
    /// ```
    #[inline]
    pub fn tail(&self) -> Result<Self, SequenceError> {
        self.head
            .as_deref()
            .map(|node| Self {
                head: node.next.clone(),
                length: self.length - 1,
            })
            .ok_or(SequenceError::EmptyCollection)
    }

    /// Decomposes the list into its head and tail.
    ///
    /// Returns `None` if the list is empty.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use bankers::PersistentList;
    ///
    /// let list = PersistentList::new().cons(2).cons(1);
    /// if let Some((head, tail)) = list.uncons() {
    ///     assert_eq!(*head, 1);
    ///     assert_eq!(tail.head(), Ok(&2));
    /// }
    /// ```
    #[inline]
    #[must_use]
    pub fn uncons(&self) -> Option<(&T, Self)> {
        self.head.as_deref().map(|node| {
            let tail = Self {
                head: node.next.clone(),
                length: self.length - 1,
            };
            (&node.element, tail)
        })
    }

    /// Returns a reference to the last element of the list.
    ///
    /// # Complexity
    ///
    /// O(n)
    ///
    /// # Errors
    ///
    /// Returns [`SequenceError::EmptyCollection`] if the list is empty.
    pub fn last(&self) -> Result<&T, SequenceError> {
        let mut node = self
            .head
            .as_deref()
            .ok_or(SequenceError::EmptyCollection)?;
        while let Some(next) = node.next.as_deref() {
            node = next;
        }
        Ok(&node.element)
    }

    /// Returns a reference to the element at the given index.
    ///
    /// Indices are zero-based. Negative indices are unrepresentable
    /// because positions are `usize`.
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
    /// use bankers::{PersistentList, SequenceError};
    ///
    /// let list = PersistentList::new().cons(3).cons(2).cons(1);
    /// assert_eq!(list.get(0), Ok(&1));
    /// assert_eq!(list.get(2), Ok(&3));
    /// assert_eq!(
    ///     list.get(10),
    ///     Err(SequenceError::IndexOutOfRange { index: 10, length: 3 })
    /// );
    /// ```
    pub fn get(&self, index: usize) -> Result<&T, SequenceError> {
        let mut current = self.head.as_deref();
        let mut remaining = index;

        while let Some(node) = current {
            if remaining == 0 {
                return Ok(&node.element);
            }
            remaining -= 1;
            current = node.next.as_deref();
        }
        Err(SequenceError::IndexOutOfRange {
            index,
            length: self.length,
        })
    }

    /// Returns the number of elements in the list.
    ///
    /// # Complexity
    ///
    /// O(1) - the length is cached
    #[inline]
    #[must_use]
    pub const fn len(&self) -> usize {
        self.length
    }

    /// Returns `true` if the list contains no elements.
    #[inline]
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.head.is_none()
    }

    /// Returns `true` if the list contains exactly one element.
    #[inline]
    #[must_use]
    pub const fn is_single(&self) -> bool {
        self.length == 1
    }

    /// Returns an iterator over references to the elements.
    ///
    /// The iterator yields elements from front to back.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use bankers::PersistentList;
    ///
    /// let list = PersistentList::new().cons(3).cons(2).cons(1);
    /// let collected: Vec<&i32> = list.iter().collect();
    /// assert_eq!(collected, vec![&1, &2, &3]);
    /// ```
    #[inline]
    #[must_use]
    pub const fn iter(&self) -> PersistentListIterator<'_, T> {
        PersistentListIterator {
            current: self.head.as_ref(),
        }
    }
}

impl<T: Clone> PersistentList<T> {
    /// Appends another list to this list.
    ///
    /// Returns a new list containing all elements from this list followed
    /// by all elements from the other list. This list's nodes are rebuilt
    /// (the shared originals are never touched); the other list's chain is
    /// attached by reference, so the result shares its nodes.
    ///
    /// # Complexity
    ///
    /// O(n) where n = `self.len()`
    ///
    /// # Examples
    ///
    /// ```rust
    /// use bankers::PersistentList;
    ///
    /// let list1 = PersistentList::new().cons(2).cons(1);
    /// let list2 = PersistentList::new().cons(4).cons(3);
    /// let combined = list1.append(&list2);
    ///
    /// let collected: Vec<&i32> = combined.iter().collect();
    /// assert_eq!(collected, vec![&1, &2, &3, &4]);
    /// ```
    #[must_use]
    pub fn append(&self, other: &Self) -> Self {
        if self.is_empty() {
            return other.clone();
        }
        if other.is_empty() {
            return self.clone();
        }

        // Rebuild self's elements in front of other's chain, consing from
        // the back via Vec::pop() to preserve order without a second pass.
        let mut elements: Vec<T> = self.iter().cloned().collect();
        let mut head = other.head.clone();
        let mut length = other.length;
        while let Some(element) = elements.pop() {
            head = Some(ReferenceCounter::new(Node {
                element,
                next: head,
            }));
            length += 1;
        }

        Self { head, length }
    }

    /// Appends a single element to the end of the list.
    ///
    /// Equivalent to `self.append(&PersistentList::singleton(element))`.
    ///
    /// # Complexity
    ///
    /// O(n)
    ///
    /// # Examples
    ///
    /// ```rust
    /// use bankers::PersistentList;
    ///
    /// let list = PersistentList::new().cons(2).cons(1).snoc(3);
    /// let collected: Vec<&i32> = list.iter().collect();
    /// assert_eq!(collected, vec![&1, &2, &3]);
    /// ```
    #[must_use]
    pub fn snoc(&self, element: T) -> Self {
        self.append(&Self::singleton(element))
    }

    /// Returns the list without its last element.
    ///
    /// Returns an empty list when `self` has exactly one element. The
    /// prefix is rebuilt iteratively; the original list is unchanged.
    ///
    /// # Complexity
    ///
    /// O(n)
    ///
    /// # Errors
    ///
    /// Returns [`SequenceError::EmptyCollection`] if the list is empty.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use bankers::PersistentList;
    ///
    /// let list = PersistentList::new().cons(3).cons(2).cons(1);
    /// let init = list.init().unwrap();
    /// let collected: Vec<&i32> = init.iter().collect();
    /// assert_eq!(collected, vec![&1, &2]);
    /// ```
    pub fn init(&self) -> Result<Self, SequenceError> {
        if self.is_empty() {
            return Err(SequenceError::EmptyCollection);
        }

        let mut elements: Vec<T> = self.iter().cloned().collect();
        elements.pop();
        Ok(Self::build_from_vec(elements))
    }

    /// Returns a new list with elements in reverse order.
    ///
    /// The result cannot share structure with the input (the order
    /// differs), so all nodes are rebuilt.
    ///
    /// # Complexity
    ///
    /// O(n) time and space
    ///
    /// # Examples
    ///
    /// ```rust
    /// use bankers::PersistentList;
    ///
    /// let list = PersistentList::new().cons(3).cons(2).cons(1);
    /// let reversed = list.reverse();
    ///
    /// let collected: Vec<&i32> = reversed.iter().collect();
    /// assert_eq!(collected, vec![&3, &2, &1]);
    /// ```
    #[must_use]
    pub fn reverse(&self) -> Self {
        let mut result = Self::new();
        for element in self {
            result = result.cons(element.clone());
        }
        result
    }

    /// Splits the list at the given index.
    ///
    /// Returns a pair of lists: the first contains the first `index`
    /// elements (rebuilt), and the second contains the rest, sharing the
    /// input's trailing nodes. Splitting at 0 shares the entire input as
    /// the suffix.
    ///
    /// # Complexity
    ///
    /// O(index)
    ///
    /// # Errors
    ///
    /// Returns [`SequenceError::IndexOutOfRange`] if `index > self.len()`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use bankers::PersistentList;
    ///
    /// let list: PersistentList<i32> = (1..=5).collect();
    /// let (left, right) = list.split_at(2).unwrap();
    /// let left_collected: Vec<&i32> = left.iter().collect();
    /// let right_collected: Vec<&i32> = right.iter().collect();
    /// assert_eq!(left_collected, vec![&1, &2]);
    /// assert_eq!(right_collected, vec![&3, &4, &5]);
    /// ```
    pub fn split_at(&self, index: usize) -> Result<(Self, Self), SequenceError> {
        if index > self.length {
            return Err(SequenceError::IndexOutOfRange {
                index,
                length: self.length,
            });
        }

        let mut prefix_elements = Vec::with_capacity(index);
        let mut current = &self.head;
        while prefix_elements.len() < index {
            let Some(node) = current.as_deref() else {
                unreachable!("split point verified to be within bounds")
            };
            prefix_elements.push(node.element.clone());
            current = &node.next;
        }

        let suffix = Self {
            head: current.clone(),
            length: self.length - index,
        };
        Ok((Self::build_from_vec(prefix_elements), suffix))
    }

    /// Creates a list from a slice.
    ///
    /// The first element of the slice becomes the first element of the list.
    ///
    /// # Complexity
    ///
    /// O(n) where n = `slice.len()`
    #[must_use]
    pub fn from_slice(slice: &[T]) -> Self {
        let length = slice.len();
        let mut head: Option<ReferenceCounter<Node<T>>> = None;
        for element in slice.iter().rev() {
            head = Some(ReferenceCounter::new(Node {
                element: element.clone(),
                next: head,
            }));
        }

        Self { head, length }
    }
}

// =============================================================================
// Iterator Implementations
// =============================================================================

/// An iterator over references to elements of a [`PersistentList`].
pub struct PersistentListIterator<'a, T> {
    current: Option<&'a ReferenceCounter<Node<T>>>,
}

impl<'a, T> Iterator for PersistentListIterator<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        self.current.map(|node| {
            self.current = node.next.as_ref();
            &node.element
        })
    }
}

/// An owning iterator over elements of a [`PersistentList`].
pub struct PersistentListIntoIterator<T> {
    list: PersistentList<T>,
}

impl<T: Clone> Iterator for PersistentListIntoIterator<T> {
    type Item = T;

    fn next(&mut self) -> Option<Self::Item> {
        if let Some((head, tail)) = self.list.uncons() {
            let element = head.clone();
            self.list = tail;
            Some(element)
        } else {
            None
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.list.length, Some(self.list.length))
    }
}

impl<T: Clone> ExactSizeIterator for PersistentListIntoIterator<T> {
    fn len(&self) -> usize {
        self.list.length
    }
}

// =============================================================================
// Standard Trait Implementations
// =============================================================================

impl<T> Default for PersistentList<T> {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl<T> FromIterator<T> for PersistentList<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let elements: Vec<T> = iter.into_iter().collect();
        Self::build_from_vec(elements)
    }
}

impl<T: Clone> IntoIterator for PersistentList<T> {
    type Item = T;
    type IntoIter = PersistentListIntoIterator<T>;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        PersistentListIntoIterator { list: self }
    }
}

impl<'a, T> IntoIterator for &'a PersistentList<T> {
    type Item = &'a T;
    type IntoIter = PersistentListIterator<'a, T>;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<T: PartialEq> PartialEq for PersistentList<T> {
    fn eq(&self, other: &Self) -> bool {
        if self.length != other.length {
            return false;
        }
        self.iter().zip(other.iter()).all(|(a, b)| a == b)
    }
}

impl<T: Eq> Eq for PersistentList<T> {}

/// Computes a hash value for this list.
///
/// The hash covers the length first, then each element in order, so equal
/// lists produce equal hashes and element order matters.
impl<T: Hash> Hash for PersistentList<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.length.hash(state);
        for element in self {
            element.hash(state);
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for PersistentList<T> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.debug_list().entries(self.iter()).finish()
    }
}

impl<T: fmt::Display> fmt::Display for PersistentList<T> {
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
impl<T: serde::Serialize> serde::Serialize for PersistentList<T> {
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
struct PersistentListVisitor<T> {
    marker: std::marker::PhantomData<T>,
}

#[cfg(feature = "serde")]
impl<'de, T> serde::de::Visitor<'de> for PersistentListVisitor<T>
where
    T: serde::Deserialize<'de>,
{
    type Value = PersistentList<T>;

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
impl<'de, T> serde::Deserialize<'de> for PersistentList<T>
where
    T: serde::Deserialize<'de>,
{
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        deserializer.deserialize_seq(PersistentListVisitor {
            marker: std::marker::PhantomData,
        })
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[cfg(not(feature = "arc"))]
    static_assertions::assert_not_impl_any!(PersistentList<i32>: Send, Sync);
    #[cfg(feature = "arc")]
    static_assertions::assert_impl_all!(PersistentList<i32>: Send, Sync);

    fn to_vec(list: &PersistentList<i32>) -> Vec<i32> {
        list.iter().copied().collect()
    }

    // =========================================================================
    // Construction Tests
    // =========================================================================

    #[rstest]
    fn test_new_creates_empty() {
        let list: PersistentList<i32> = PersistentList::new();
        assert!(list.is_empty());
        assert!(!list.is_single());
        assert_eq!(list.len(), 0);
    }

    #[rstest]
    fn test_singleton() {
        let list = PersistentList::singleton(7);
        assert!(!list.is_empty());
        assert!(list.is_single());
        assert_eq!(list.len(), 1);
        assert_eq!(list.head(), Ok(&7));
        assert_eq!(list.last(), Ok(&7));
        assert_eq!(to_vec(&list), vec![7]);
    }

    #[rstest]
    fn test_cons_builds_in_reverse() {
        let list = PersistentList::new().cons(1).cons(2).cons(3);
        assert_eq!(to_vec(&list), vec![3, 2, 1]);
        assert_eq!(list.head(), Ok(&3));
        assert_eq!(list.len(), 3);
        assert!(!list.is_single());
    }

    #[rstest]
    fn test_from_slice() {
        let list = PersistentList::from_slice(&[1, 2, 3]);
        assert_eq!(to_vec(&list), vec![1, 2, 3]);

        let empty: PersistentList<i32> = PersistentList::from_slice(&[]);
        assert!(empty.is_empty());
    }

    #[rstest]
    fn test_from_iter() {
        let list: PersistentList<i32> = (1..=5).collect();
        assert_eq!(list.len(), 5);
        assert_eq!(list.head(), Ok(&1));
        assert_eq!(list.last(), Ok(&5));
    }

    // =========================================================================
    // Access Tests
    // =========================================================================

    #[rstest]
    fn test_head_tail() {
        let list = PersistentList::new().cons(3).cons(2).cons(1);
        let tail = list.tail().unwrap();
        assert_eq!(to_vec(&tail), vec![2, 3]);
        assert_eq!(tail.head(), Ok(&2));
    }

    #[rstest]
    fn test_uncons() {
        let list = PersistentList::new().cons(1).cons(2);
        let (head, tail) = list.uncons().unwrap();
        assert_eq!(*head, 2);
        assert_eq!(tail.head(), Ok(&1));

        let empty: PersistentList<i32> = PersistentList::new();
        assert!(empty.uncons().is_none());
    }

    #[rstest]
    fn test_get() {
        let list = PersistentList::new().cons(3).cons(2).cons(1);
        assert_eq!(list.get(0), Ok(&1));
        assert_eq!(list.get(1), Ok(&2));
        assert_eq!(list.get(2), Ok(&3));
    }

    #[rstest]
    #[case::empty(0, 0)]
    #[case::single(1, 1)]
    #[case::single_far(1, 100)]
    #[case::longer(3, 3)]
    #[case::longer_far(3, 100)]
    fn test_get_out_of_range(#[case] length: usize, #[case] index: usize) {
        let list: PersistentList<usize> = (0..length).collect();
        assert_eq!(
            list.get(index),
            Err(SequenceError::IndexOutOfRange { index, length })
        );
    }

    #[rstest]
    fn test_empty_collection_errors() {
        let empty: PersistentList<i32> = PersistentList::new();
        assert_eq!(empty.head(), Err(SequenceError::EmptyCollection));
        assert_eq!(empty.last(), Err(SequenceError::EmptyCollection));
        assert_eq!(empty.tail().unwrap_err(), SequenceError::EmptyCollection);
        assert_eq!(empty.init().unwrap_err(), SequenceError::EmptyCollection);
    }

    #[rstest]
    fn test_last() {
        let list = PersistentList::new().cons(3).cons(2).cons(1);
        assert_eq!(list.last(), Ok(&3));
    }

    // =========================================================================
    // Structural Operation Tests
    // =========================================================================

    #[rstest]
    fn test_append() {
        let list1: PersistentList<i32> = (1..=3).collect();
        let list2: PersistentList<i32> = (4..=5).collect();
        let combined = list1.append(&list2);
        assert_eq!(to_vec(&combined), vec![1, 2, 3, 4, 5]);
        assert_eq!(combined.len(), 5);
        assert_eq!(combined.last(), Ok(&5));
        // Inputs untouched
        assert_eq!(to_vec(&list1), vec![1, 2, 3]);
        assert_eq!(to_vec(&list2), vec![4, 5]);
    }

    #[rstest]
    fn test_append_identity() {
        let list: PersistentList<i32> = (1..=3).collect();
        let empty = PersistentList::new();
        assert_eq!(list.append(&empty), list);
        assert_eq!(empty.append(&list), list);
        assert_eq!(empty.append(&empty), empty);
    }

    #[rstest]
    fn test_snoc_and_init() {
        let base = PersistentList::new().cons(2).cons(1); // [1, 2]
        let snocd = base.snoc(9); // [1, 2, 9]
        assert_eq!(to_vec(&snocd), vec![1, 2, 9]);
        assert_eq!(snocd.last(), Ok(&9));
        // Original must remain unchanged
        assert_eq!(to_vec(&base), vec![1, 2]);

        let init = snocd.init().unwrap();
        assert_eq!(to_vec(&init), vec![1, 2]);
    }

    #[rstest]
    fn test_init_of_single_is_empty() {
        let single = PersistentList::singleton(42);
        assert!(single.init().unwrap().is_empty());
    }

    #[rstest]
    fn test_snoc_init_inverse_on_empty() {
        let empty: PersistentList<i32> = PersistentList::new();
        assert_eq!(empty.snoc(5).init().unwrap(), empty);
    }

    #[rstest]
    fn test_reverse() {
        let list: PersistentList<i32> = (1..=3).collect();
        assert_eq!(to_vec(&list.reverse()), vec![3, 2, 1]);
        assert!(PersistentList::<i32>::new().reverse().is_empty());
    }

    #[rstest]
    fn test_split_at_basic() {
        let list: PersistentList<i32> = (1..=5).collect();
        let (left, right) = list.split_at(2).unwrap();
        assert_eq!(to_vec(&left), vec![1, 2]);
        assert_eq!(to_vec(&right), vec![3, 4, 5]);
    }

    #[rstest]
    fn test_split_at_zero_shares_whole_input() {
        let list: PersistentList<i32> = (1..=5).collect();
        let (left, right) = list.split_at(0).unwrap();
        assert!(left.is_empty());
        assert_eq!(right, list);
    }

    #[rstest]
    fn test_split_at_length() {
        let list: PersistentList<i32> = (1..=5).collect();
        let (left, right) = list.split_at(5).unwrap();
        assert_eq!(left, list);
        assert!(right.is_empty());
    }

    #[rstest]
    fn test_split_at_past_end_is_error() {
        let list: PersistentList<i32> = (1..=3).collect();
        assert_eq!(
            list.split_at(4).unwrap_err(),
            SequenceError::IndexOutOfRange {
                index: 4,
                length: 3
            }
        );
    }

    // =========================================================================
    // Immutability Tests
    // =========================================================================

    #[rstest]
    fn test_structural_sharing_immutability() {
        let base = PersistentList::new().cons(2).cons(1); // [1, 2]
        let extended = base.cons(0); // [0, 1, 2]
        assert_eq!(to_vec(&base), vec![1, 2]);
        assert_eq!(to_vec(&extended), vec![0, 1, 2]);
    }

    #[rstest]
    fn test_tail_shares_nodes() {
        let list = PersistentList::new().cons(3).cons(2).cons(1);
        let tail = list.tail().unwrap();
        drop(list);
        // The tail keeps the shared suffix alive
        assert_eq!(to_vec(&tail), vec![2, 3]);
    }

    // =========================================================================
    // Iterator Tests
    // =========================================================================

    #[rstest]
    fn test_iter() {
        let list = PersistentList::new().cons(3).cons(2).cons(1);
        let collected: Vec<&i32> = list.iter().collect();
        assert_eq!(collected, vec![&1, &2, &3]);
    }

    #[rstest]
    fn test_into_iter() {
        let list: PersistentList<i32> = (1..=3).collect();
        let collected: Vec<i32> = list.into_iter().collect();
        assert_eq!(collected, vec![1, 2, 3]);
    }

    #[rstest]
    fn test_into_iter_size_hint() {
        let list: PersistentList<i32> = (1..=3).collect();
        let mut iter = list.into_iter();
        assert_eq!(iter.len(), 3);
        iter.next();
        assert_eq!(iter.len(), 2);
    }

    // =========================================================================
    // Trait Tests
    // =========================================================================

    #[rstest]
    fn test_eq() {
        let list1: PersistentList<i32> = (1..=3).collect();
        let list2: PersistentList<i32> = (1..=3).collect();
        let list3: PersistentList<i32> = (1..=4).collect();
        assert_eq!(list1, list2);
        assert_ne!(list1, list3);
    }

    #[rstest]
    fn test_clone_is_shallow() {
        let list: PersistentList<i32> = (1..=3).collect();
        let clone = list.clone();
        assert_eq!(list, clone);
        drop(list);
        assert_eq!(to_vec(&clone), vec![1, 2, 3]);
    }

    #[rstest]
    fn test_hash_consistency() {
        use std::collections::HashMap;

        let mut map: HashMap<PersistentList<i32>, &str> = HashMap::new();
        let key: PersistentList<i32> = (1..=3).collect();
        map.insert(key.clone(), "value");
        assert_eq!(map.get(&key), Some(&"value"));
    }

    #[rstest]
    fn test_display() {
        let empty: PersistentList<i32> = PersistentList::new();
        assert_eq!(format!("{empty}"), "[]");
        let list: PersistentList<i32> = (1..=3).collect();
        assert_eq!(format!("{list}"), "[1, 2, 3]");
    }

    #[rstest]
    fn test_debug() {
        let list: PersistentList<i32> = (1..=3).collect();
        assert_eq!(format!("{list:?}"), "[1, 2, 3]");
    }

    #[rstest]
    fn test_default() {
        let list: PersistentList<i32> = PersistentList::default();
        assert!(list.is_empty());
    }

    // =========================================================================
    // Long Chain Tests
    // =========================================================================

    /// Builds and drops a long uniquely-owned chain. A recursive teardown
    /// would overflow the stack at this length.
    #[rstest]
    fn test_long_chain_build_and_drop() {
        let mut list = PersistentList::new();
        for index in 0..100_000 {
            list = list.cons(index);
        }
        assert_eq!(list.len(), 100_000);
        assert_eq!(list.head(), Ok(&99_999));
        assert_eq!(list.iter().count(), 100_000);
        drop(list);
    }

    #[rstest]
    fn test_long_chain_append_and_last() {
        let list: PersistentList<usize> = (0..10_000).collect();
        let appended = list.append(&PersistentList::singleton(10_000));
        assert_eq!(appended.len(), 10_001);
        assert_eq!(appended.last(), Ok(&10_000));
        assert_eq!(appended.get(10_000), Ok(&10_000));
    }
}
