//! Singly-linked list with a before-begin sentinel.
//!
//! Nodes live in a per-list [`Slab`] arena and link forward by arena key.
//! The list itself stores the sentinel's successor (the first key), the
//! element count, the identity of its chain, and the last insertion stamp.
//!
//! ```text
//! ForwardList { head, len, id, stamps }
//!      │
//!      ▼  (sentinel / before_begin)
//!    head ──▶ Node { value, next, stamp } ──▶ Node { .. } ──▶ None (end)
//!               └───────── owned by Slab<Node<T>> ──────────┘
//! ```
//!
//! Because the sentinel is addressed the same way as a real node, pushing to
//! the front is just inserting after before-begin:
//!
//! ```
//! use nexus_forward_list::ForwardList;
//!
//! let mut a = ForwardList::from([2, 3]);
//! let mut b = ForwardList::from([2, 3]);
//!
//! a.push_front(1);
//! b.insert_after(b.before_begin(), 1);
//!
//! assert_eq!(a, b);
//! ```
//!
//! # Contract checks
//!
//! Positions are plain tokens and do not borrow the list. Misusing them is a
//! contract violation, checked in two tiers:
//!
//! | Misuse | Debug build | Release build |
//! |--------|-------------|---------------|
//! | Insert/erase after end | panic | panic |
//! | Index before-begin or end | panic | panic |
//! | Position from another list | panic | unspecified, memory-safe |
//! | Position to an erased element | panic | unspecified, memory-safe |
//!
//! Erased positions are recognized even after their arena slot has been
//! reused: each node keeps the stamp it was inserted with and a position
//! must present the same stamp.
//! | Advancing end | panic | stays at end |
//!
//! The `try_*` variants check every case in every build and report a
//! [`PositionError`] instead.
//!
//! # Complexity
//!
//! | Operation | Cost |
//! |-----------|------|
//! | `push_front`, `pop_front`, `insert_after`, `erase_after` | O(1) |
//! | `push_back` | O(n), walks to the tail |
//! | `len`, `is_empty`, `swap` | O(1) |
//! | `clear`, `clone`, comparisons | O(n) |

use core::cmp::Ordering;
use core::fmt;
use core::hash::{Hash, Hasher};
use core::ops::{Index, IndexMut};

use slab::Slab;

use crate::position::{Link, ListId};
use crate::{Cursor, CursorMut, InsertError, IntoIter, Iter, IterMut, Position, PositionError};

/// A list node: one value, the key of its successor, and its insertion stamp.
#[derive(Debug, Clone)]
pub(crate) struct Node<T> {
    pub(crate) value: T,
    pub(crate) next: Option<usize>,
    pub(crate) stamp: u64,
}

/// A singly-linked list with O(1) insertion and removal after any position.
///
/// # Example
///
/// ```
/// use nexus_forward_list::ForwardList;
///
/// let mut list = ForwardList::from([1, 2, 4]);
///
/// // Find the element before the gap, then insert after it.
/// let mut pos = list.begin();
/// while list[pos] != 2 {
///     pos = list.next_position(pos);
/// }
/// list.insert_after(pos, 3);
///
/// assert!(list.iter().eq(&[1, 2, 3, 4]));
///
/// // Erase the second element.
/// let first = list.begin();
/// let after = list.erase_after(first);
/// assert_eq!(list[after], 3);
/// assert_eq!(list.len(), 3);
/// ```
pub struct ForwardList<T> {
    pub(crate) nodes: Slab<Node<T>>,
    pub(crate) head: Option<usize>,
    pub(crate) len: usize,
    pub(crate) id: ListId,
    /// Stamp handed to the most recently inserted node.
    pub(crate) stamps: u64,
}

impl<T> Default for ForwardList<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> ForwardList<T> {
    /// Creates an empty list.
    #[inline]
    pub fn new() -> Self {
        Self {
            nodes: Slab::new(),
            head: None,
            len: 0,
            id: ListId::next(),
            stamps: 0,
        }
    }

    /// Creates an empty list with room for `capacity` elements.
    #[inline]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            nodes: Slab::with_capacity(capacity),
            head: None,
            len: 0,
            id: ListId::next(),
            stamps: 0,
        }
    }

    /// Builds a list from fallible values, in order.
    ///
    /// Stops at the first `Err` and returns it. Every value produced before
    /// the error is dropped along with the partial list.
    ///
    /// # Example
    ///
    /// ```
    /// use nexus_forward_list::ForwardList;
    ///
    /// let ok: Result<ForwardList<u8>, _> =
    ///     ForwardList::try_from_iter(["1", "2"].iter().map(|s| s.parse::<u8>()));
    /// assert_eq!(ok.unwrap(), ForwardList::from([1, 2]));
    ///
    /// let err = ForwardList::try_from_iter(["1", "x"].iter().map(|s| s.parse::<u8>()));
    /// assert!(err.is_err());
    /// ```
    pub fn try_from_iter<I, E>(iter: I) -> Result<Self, E>
    where
        I: IntoIterator<Item = Result<T, E>>,
    {
        let iter = iter.into_iter();
        let mut list = Self::with_capacity(iter.size_hint().0);
        let mut tail = Link::BeforeBegin;

        for value in iter {
            let value = match value {
                Ok(value) => value,
                Err(err) => {
                    #[cfg(feature = "tracing")]
                    tracing::debug!(built = list.len, "aborted fallible list construction");
                    return Err(err);
                }
            };
            tail = list.link_after(tail, value).link;
        }

        Ok(list)
    }

    /// Returns a deep copy built with a fallible element copy.
    ///
    /// On error `self` is untouched and the partial copy is dropped.
    ///
    /// # Example
    ///
    /// ```
    /// use nexus_forward_list::ForwardList;
    ///
    /// let list = ForwardList::from([1u32, 2, 300]);
    /// let narrowed = list.try_clone_with(|&v| u8::try_from(v));
    /// assert!(narrowed.is_err());
    ///
    /// let doubled = list.try_clone_with(|&v| Ok::<_, ()>(v * 2)).unwrap();
    /// assert_eq!(doubled, ForwardList::from([2, 4, 600]));
    /// ```
    pub fn try_clone_with<U, E, F>(&self, f: F) -> Result<ForwardList<U>, E>
    where
        F: FnMut(&T) -> Result<U, E>,
    {
        ForwardList::try_from_iter(self.iter().map(f))
    }

    /// Returns the number of elements in the list.
    #[inline]
    pub const fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if the list is empty.
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns the number of elements the arena holds without reallocating.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.nodes.capacity()
    }

    /// Reserves room for at least `additional` more elements.
    #[inline]
    pub fn reserve(&mut self, additional: usize) {
        self.nodes.reserve(additional);
    }

    /// Releases arena capacity that is no longer needed.
    pub fn shrink_to_fit(&mut self) {
        #[cfg(feature = "tracing")]
        let before = self.nodes.capacity();

        self.nodes.shrink_to_fit();

        #[cfg(feature = "tracing")]
        tracing::debug!(
            before,
            after = self.nodes.capacity(),
            len = self.len,
            "shrunk list arena"
        );
    }

    // ========================================================================
    // Positions
    // ========================================================================

    /// Returns the sentinel position before the first element.
    ///
    /// It cannot be dereferenced, but it is a valid anchor for
    /// [`insert_after`](Self::insert_after) and [`erase_after`](Self::erase_after).
    #[inline]
    pub fn before_begin(&self) -> Position {
        Position::new(self.id, Link::BeforeBegin)
    }

    /// Returns the position of the first element, or end if empty.
    #[inline]
    pub fn begin(&self) -> Position {
        self.position_of(self.head)
    }

    /// Returns the past-the-end position.
    #[inline]
    pub fn end(&self) -> Position {
        Position::new(self.id, Link::End)
    }

    /// Returns the position following `pos`.
    ///
    /// # Panics
    ///
    /// In debug builds, panics if `pos` is end, belongs to another list, or
    /// refers to an erased element. In release builds end advances to end.
    #[inline]
    pub fn next_position(&self, pos: Position) -> Position {
        self.debug_check(pos);
        debug_assert!(!pos.is_end(), "advanced past the end position");
        self.position_of(self.successor(pos.link))
    }

    // ========================================================================
    // Element access
    // ========================================================================

    /// Returns a reference to the first element.
    #[inline]
    pub fn front(&self) -> Option<&T> {
        self.head.map(|key| &self.nodes[key].value)
    }

    /// Returns a mutable reference to the first element.
    #[inline]
    pub fn front_mut(&mut self) -> Option<&mut T> {
        self.head.map(|key| &mut self.nodes[key].value)
    }

    /// Returns the element at `pos`.
    ///
    /// Returns `None` for before-begin, end, foreign, and erased positions.
    #[inline]
    pub fn get(&self, pos: Position) -> Option<&T> {
        if pos.owner != self.id {
            return None;
        }
        let key = pos.key()?;
        self.nodes
            .get(key)
            .filter(|node| node.stamp == pos.stamp)
            .map(|node| &node.value)
    }

    /// Returns the element at `pos` mutably.
    ///
    /// Returns `None` for before-begin, end, foreign, and erased positions.
    #[inline]
    pub fn get_mut(&mut self, pos: Position) -> Option<&mut T> {
        if pos.owner != self.id {
            return None;
        }
        let key = pos.key()?;
        self.nodes
            .get_mut(key)
            .filter(|node| node.stamp == pos.stamp)
            .map(|node| &mut node.value)
    }

    /// Returns `true` if the list contains an element equal to `value`.
    pub fn contains(&self, value: &T) -> bool
    where
        T: PartialEq,
    {
        self.iter().any(|v| v == value)
    }

    // ========================================================================
    // Insertion
    // ========================================================================

    /// Inserts `value` as the new first element. O(1).
    ///
    /// Returns the position of the new element.
    #[inline]
    pub fn push_front(&mut self, value: T) -> Position {
        self.link_after(Link::BeforeBegin, value)
    }

    /// Appends `value` after the last element.
    ///
    /// O(n): no tail is cached, so this walks the whole chain. Prefer
    /// [`Extend`] for bulk appends, which walks once.
    pub fn push_back(&mut self, value: T) -> Position {
        let tail = self.tail_link();
        self.link_after(tail, value)
    }

    /// Inserts `value` immediately after `pos`. O(1).
    ///
    /// Returns the position of the new element.
    ///
    /// # Panics
    ///
    /// Panics if `pos` is end. In debug builds, also panics if `pos` belongs
    /// to another list or refers to an erased element.
    #[inline]
    pub fn insert_after(&mut self, pos: Position, value: T) -> Position {
        self.debug_check(pos);
        assert!(!pos.is_end(), "cannot insert after the end position");
        self.link_after(pos.link, value)
    }

    /// Inserts `value` after `pos`, validating the position first.
    ///
    /// # Errors
    ///
    /// Returns the value with the [`PositionError`] if `pos` is end, belongs
    /// to another list, or refers to an erased element.
    pub fn try_insert_after(
        &mut self,
        pos: Position,
        value: T,
    ) -> Result<Position, InsertError<T>> {
        match self.check(pos) {
            Ok(()) => Ok(self.link_after(pos.link, value)),
            Err(error) => Err(InsertError { error, value }),
        }
    }

    // ========================================================================
    // Removal
    // ========================================================================

    /// Removes and returns the first element. O(1).
    ///
    /// Returns `None` and leaves the list untouched if it is empty.
    #[inline]
    pub fn pop_front(&mut self) -> Option<T> {
        self.unlink_after(Link::BeforeBegin).map(|(value, _)| value)
    }

    /// Removes the element after `pos`. O(1).
    ///
    /// Returns the position now following `pos` (possibly end). If `pos` has
    /// no successor the list is unchanged and end is returned.
    ///
    /// # Panics
    ///
    /// Panics if `pos` is end. In debug builds, also panics if `pos` belongs
    /// to another list or refers to an erased element.
    #[inline]
    pub fn erase_after(&mut self, pos: Position) -> Position {
        self.debug_check(pos);
        assert!(!pos.is_end(), "cannot erase after the end position");
        match self.unlink_after(pos.link) {
            Some((_, next)) => self.position_of(next),
            None => self.end(),
        }
    }

    /// Removes the element after `pos` and returns it.
    ///
    /// Returns `None` if `pos` has no successor.
    ///
    /// # Panics
    ///
    /// Same as [`erase_after`](Self::erase_after).
    #[inline]
    pub fn remove_after(&mut self, pos: Position) -> Option<T> {
        self.debug_check(pos);
        assert!(!pos.is_end(), "cannot erase after the end position");
        self.unlink_after(pos.link).map(|(value, _)| value)
    }

    /// Removes the element after `pos`, validating the position first.
    ///
    /// # Errors
    ///
    /// Returns a [`PositionError`] if `pos` is end, belongs to another list,
    /// or refers to an erased element.
    pub fn try_erase_after(&mut self, pos: Position) -> Result<Position, PositionError> {
        self.check(pos)?;
        Ok(self.erase_after(pos))
    }

    /// Removes every element, front to back.
    ///
    /// Arena capacity is kept; see [`shrink_to_fit`](Self::shrink_to_fit).
    pub fn clear(&mut self) {
        while self.pop_front().is_some() {}
    }

    /// Exchanges the contents of two lists. O(1), no element is touched.
    ///
    /// Positions follow their elements: a position taken from `self` before
    /// the swap refers to the same element in `other` afterwards.
    #[inline]
    pub fn swap(&mut self, other: &mut Self) {
        core::mem::swap(self, other);
    }

    // ========================================================================
    // Iteration
    // ========================================================================

    /// Returns an iterator over references to elements, front to back.
    #[inline]
    pub fn iter(&self) -> Iter<'_, T> {
        Iter::new(&self.nodes, self.id, self.head, self.len)
    }

    /// Returns an iterator over mutable references to elements, front to back.
    #[inline]
    pub fn iter_mut(&mut self) -> IterMut<'_, T> {
        IterMut::new(&mut self.nodes, self.id, self.head, self.len)
    }

    /// Returns a read-only cursor at the before-begin position.
    #[inline]
    pub fn cursor_before_begin(&self) -> Cursor<'_, T> {
        Cursor::new(self, self.before_begin())
    }

    /// Returns a read-only cursor at the first element (end if empty).
    #[inline]
    pub fn cursor_front(&self) -> Cursor<'_, T> {
        Cursor::new(self, self.begin())
    }

    /// Returns a read-only cursor at `pos`.
    ///
    /// # Panics
    ///
    /// In debug builds, panics if `pos` belongs to another list or refers to
    /// an erased element.
    #[inline]
    pub fn cursor_at(&self, pos: Position) -> Cursor<'_, T> {
        self.debug_check(pos);
        Cursor::new(self, pos)
    }

    /// Returns a mutable cursor at the before-begin position.
    #[inline]
    pub fn cursor_mut_before_begin(&mut self) -> CursorMut<'_, T> {
        let pos = self.before_begin();
        CursorMut::new(self, pos)
    }

    /// Returns a mutable cursor at the first element (end if empty).
    #[inline]
    pub fn cursor_mut_front(&mut self) -> CursorMut<'_, T> {
        let pos = self.begin();
        CursorMut::new(self, pos)
    }

    /// Returns a mutable cursor at `pos`.
    ///
    /// # Panics
    ///
    /// In debug builds, panics if `pos` belongs to another list or refers to
    /// an erased element.
    #[inline]
    pub fn cursor_mut_at(&mut self, pos: Position) -> CursorMut<'_, T> {
        self.debug_check(pos);
        CursorMut::new(self, pos)
    }

    // ========================================================================
    // Chain plumbing
    // ========================================================================

    /// The position of the node at `key`, or end for `None`.
    #[inline]
    pub(crate) fn position_of(&self, key: Option<usize>) -> Position {
        match key {
            Some(key) => Position::element(self.id, key, self.nodes[key].stamp),
            None => self.end(),
        }
    }

    /// Key of the node following `link`, `None` at the tail or end.
    #[inline]
    pub(crate) fn successor(&self, link: Link) -> Option<usize> {
        match link {
            Link::BeforeBegin => self.head,
            Link::Node(key) => self.nodes[key].next,
            Link::End => None,
        }
    }

    /// The successor field of `link`: the sentinel's head or a node's next.
    #[inline]
    fn successor_slot(&mut self, link: Link) -> &mut Option<usize> {
        match link {
            Link::BeforeBegin => &mut self.head,
            Link::Node(key) => &mut self.nodes[key].next,
            Link::End => panic!("end position has no successor"),
        }
    }

    /// Link of the last node, or before-begin if empty.
    fn tail_link(&self) -> Link {
        let mut link = Link::BeforeBegin;
        while let Some(next) = self.successor(link) {
            link = Link::Node(next);
        }
        link
    }

    /// Allocates a node after `link`, which must not be end.
    ///
    /// The successor is read before allocating, so a vacant key panics with
    /// the list unchanged.
    #[inline]
    pub(crate) fn link_after(&mut self, link: Link, value: T) -> Position {
        let next = self.successor(link);
        let stamp = self.stamps.wrapping_add(1);
        let key = self.nodes.insert(Node { value, next, stamp });
        *self.successor_slot(link) = Some(key);
        self.stamps = stamp;
        self.len += 1;
        Position::element(self.id, key, stamp)
    }

    /// Unlinks and frees the node after `link`.
    ///
    /// Returns its value and the key that now follows `link`.
    #[inline]
    pub(crate) fn unlink_after(&mut self, link: Link) -> Option<(T, Option<usize>)> {
        let key = self.successor(link)?;
        let node = self.nodes.remove(key);
        *self.successor_slot(link) = node.next;
        self.len -= 1;
        Some((node.value, node.next))
    }

    /// Validates `pos` as an insert/erase anchor.
    fn check(&self, pos: Position) -> Result<(), PositionError> {
        if pos.is_end() {
            return Err(PositionError::End);
        }
        if pos.owner != self.id {
            return Err(PositionError::Foreign);
        }
        if !self.is_live(pos) {
            return Err(PositionError::Erased);
        }
        Ok(())
    }

    /// `true` unless `pos` names an element that has since been erased.
    ///
    /// Assumes `pos` belongs to this list.
    #[inline]
    fn is_live(&self, pos: Position) -> bool {
        match pos.key() {
            Some(key) => self.nodes.get(key).is_some_and(|node| node.stamp == pos.stamp),
            None => true,
        }
    }

    /// Debug-only ownership and liveness checks for `pos`.
    #[inline]
    pub(crate) fn debug_check(&self, pos: Position) {
        debug_assert!(
            pos.is_end() || pos.owner == self.id,
            "position belongs to a different list"
        );
        debug_assert!(
            pos.owner != self.id || self.is_live(pos),
            "position refers to an erased element"
        );
    }
}

impl<T: Clone> ForwardList<T> {
    /// Builds a list holding copies of `values`, in order.
    pub fn from_slice(values: &[T]) -> Self {
        values.iter().cloned().collect()
    }
}

/// Exchanges the contents of two lists. O(1).
#[inline]
pub fn swap<T>(a: &mut ForwardList<T>, b: &mut ForwardList<T>) {
    a.swap(b);
}

// =============================================================================
// Element access by position
// =============================================================================

impl<T> Index<Position> for ForwardList<T> {
    type Output = T;

    /// # Panics
    ///
    /// Panics if `pos` is before-begin or end, or (debug builds) if it
    /// belongs to another list or refers to an erased element.
    #[inline]
    fn index(&self, pos: Position) -> &T {
        self.debug_check(pos);
        match pos.link {
            Link::Node(key) => &self.nodes[key].value,
            Link::BeforeBegin => panic!("cannot dereference the before-begin position"),
            Link::End => panic!("cannot dereference the end position"),
        }
    }
}

impl<T> IndexMut<Position> for ForwardList<T> {
    #[inline]
    fn index_mut(&mut self, pos: Position) -> &mut T {
        self.debug_check(pos);
        match pos.link {
            Link::Node(key) => &mut self.nodes[key].value,
            Link::BeforeBegin => panic!("cannot dereference the before-begin position"),
            Link::End => panic!("cannot dereference the end position"),
        }
    }
}

// =============================================================================
// Copy semantics
// =============================================================================

impl<T: Clone> Clone for ForwardList<T> {
    fn clone(&self) -> Self {
        let mut copy = Self::with_capacity(self.len);
        copy.extend(self.iter().cloned());
        copy
    }

    /// Copy-and-swap: `self` is only touched once the copy is complete, so a
    /// panicking `T::clone` leaves it as it was.
    fn clone_from(&mut self, source: &Self) {
        let mut copy = source.clone();
        self.swap(&mut copy);
    }
}

// =============================================================================
// Construction from sequences
// =============================================================================

impl<T> FromIterator<T> for ForwardList<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut list = Self::new();
        list.extend(iter);
        list
    }
}

impl<T, const N: usize> From<[T; N]> for ForwardList<T> {
    fn from(values: [T; N]) -> Self {
        let mut list = Self::with_capacity(N);
        list.extend(values);
        list
    }
}

impl<T> Extend<T> for ForwardList<T> {
    /// Appends in order. Walks to the tail once, then inserts after the
    /// running tail.
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        let iter = iter.into_iter();
        self.nodes.reserve(iter.size_hint().0);

        let mut tail = self.tail_link();
        for value in iter {
            tail = self.link_after(tail, value).link;
        }
    }
}

impl<'a, T: Copy + 'a> Extend<&'a T> for ForwardList<T> {
    fn extend<I: IntoIterator<Item = &'a T>>(&mut self, iter: I) {
        self.extend(iter.into_iter().copied());
    }
}

impl<T> IntoIterator for ForwardList<T> {
    type Item = T;
    type IntoIter = IntoIter<T>;

    #[inline]
    fn into_iter(self) -> IntoIter<T> {
        IntoIter::new(self)
    }
}

impl<'a, T> IntoIterator for &'a ForwardList<T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    #[inline]
    fn into_iter(self) -> Iter<'a, T> {
        self.iter()
    }
}

impl<'a, T> IntoIterator for &'a mut ForwardList<T> {
    type Item = &'a mut T;
    type IntoIter = IterMut<'a, T>;

    #[inline]
    fn into_iter(self) -> IterMut<'a, T> {
        self.iter_mut()
    }
}

// =============================================================================
// Comparison
// =============================================================================

impl<T: PartialEq> PartialEq for ForwardList<T> {
    fn eq(&self, other: &Self) -> bool {
        self.len == other.len && self.iter().eq(other.iter())
    }
}

impl<T: Eq> Eq for ForwardList<T> {}

/// Ordering between lists.
///
/// `<` is the lexicographic comparison using only the elements' `<`. The
/// other three operators are derived from it: `a <= b` is `!(b < a)`,
/// `a > b` is `b < a`, and `a >= b` is `!(a < b)`. For element types with a
/// total order this agrees with [`partial_cmp`](PartialOrd::partial_cmp).
impl<T: PartialOrd> PartialOrd for ForwardList<T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        self.iter().partial_cmp(other.iter())
    }

    #[inline]
    fn lt(&self, other: &Self) -> bool {
        lexicographic_lt(self.iter(), other.iter())
    }

    #[inline]
    fn le(&self, other: &Self) -> bool {
        !(other < self)
    }

    #[inline]
    fn gt(&self, other: &Self) -> bool {
        other < self
    }

    #[inline]
    fn ge(&self, other: &Self) -> bool {
        !(self < other)
    }
}

impl<T: Ord> Ord for ForwardList<T> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.iter().cmp(other.iter())
    }
}

/// Returns `true` if `a` sorts before `b`.
///
/// Stops at the first pair where either element is less than the other.
/// A proper prefix sorts first.
fn lexicographic_lt<'a, T, A, B>(mut a: A, mut b: B) -> bool
where
    T: PartialOrd + 'a,
    A: Iterator<Item = &'a T>,
    B: Iterator<Item = &'a T>,
{
    loop {
        match (a.next(), b.next()) {
            (_, None) => return false,
            (None, Some(_)) => return true,
            (Some(x), Some(y)) => {
                if x < y {
                    return true;
                }
                if y < x {
                    return false;
                }
            }
        }
    }
}

impl<T: Hash> Hash for ForwardList<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.len.hash(state);
        for value in self {
            value.hash(state);
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for ForwardList<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self).finish()
    }
}


#[cfg(all(test, feature = "tracing"))]
mod tracing_events {
    use super::*;
    use std::io;
    use std::sync::{Arc, Mutex};

    /// Writer that keeps formatted events in memory.
    #[derive(Clone, Default)]
    struct Captured(Arc<Mutex<Vec<u8>>>);

    impl io::Write for Captured {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    fn capture(f: impl FnOnce()) -> String {
        let out = Captured::default();
        let writer = out.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_max_level(tracing::Level::DEBUG)
            .with_ansi(false)
            .with_writer(move || writer.clone())
            .finish();
        tracing::subscriber::with_default(subscriber, f);

        let bytes = out.0.lock().unwrap();
        String::from_utf8_lossy(&bytes).into_owned()
    }

    #[test]
    fn aborted_construction_is_logged() {
        let logs = capture(|| {
            let result: Result<ForwardList<u8>, ()> =
                ForwardList::try_from_iter([Ok(1), Err(()), Ok(3)]);
            assert!(result.is_err());
        });
        assert!(logs.contains("aborted fallible list construction"), "{logs}");
        assert!(logs.contains("built=1"), "{logs}");
    }

    #[test]
    fn shrink_is_logged() {
        let logs = capture(|| {
            let mut list: ForwardList<u8> = ForwardList::with_capacity(64);
            list.extend([1, 2]);
            list.shrink_to_fit();
        });
        assert!(logs.contains("shrunk list arena"), "{logs}");
        assert!(logs.contains("len=2"), "{logs}");
    }

    #[test]
    fn successful_construction_is_quiet() {
        let logs = capture(|| {
            let list: Result<ForwardList<u8>, ()> = ForwardList::try_from_iter([Ok(1), Ok(2)]);
            assert_eq!(list.unwrap().len(), 2);
        });
        assert!(logs.is_empty(), "{logs}");
    }
}

#[cfg(test)]
mod bench_forward_list {
    use super::*;
    use hdrhistogram::Histogram;

    #[inline]
    fn rdtscp() -> u64 {
        #[cfg(target_arch = "x86_64")]
        unsafe {
            core::arch::x86_64::__rdtscp(&mut 0)
        }
        #[cfg(not(target_arch = "x86_64"))]
        {
            std::time::Instant::now().elapsed().as_nanos() as u64
        }
    }

    fn print_histogram(name: &str, hist: &Histogram<u64>) {
        println!(
            "{:24} p50: {:4} cycles | p99: {:4} cycles | p999: {:5} cycles | min: {:4} | max: {:5}",
            name,
            hist.value_at_quantile(0.50),
            hist.value_at_quantile(0.99),
            hist.value_at_quantile(0.999),
            hist.min(),
            hist.max(),
        );
    }

    const WARMUP: usize = 10_000;
    const ITERATIONS: usize = 100_000;

    #[test]
    #[ignore]
    fn bench_push_front() {
        let mut list: ForwardList<u64> = ForwardList::with_capacity(16);
        let mut hist = Histogram::<u64>::new(3).unwrap();

        for i in 0..WARMUP {
            list.push_front(i as u64);
            let _ = list.pop_front();
        }

        for i in 0..ITERATIONS {
            let start = rdtscp();
            list.push_front(i as u64);
            let elapsed = rdtscp() - start;
            hist.record(elapsed).unwrap();
            let _ = list.pop_front();
        }

        print_histogram("push_front", &hist);
    }

    #[test]
    #[ignore]
    fn bench_pop_front() {
        let mut list: ForwardList<u64> = ForwardList::with_capacity(16);
        let mut hist = Histogram::<u64>::new(3).unwrap();

        for i in 0..WARMUP {
            list.push_front(i as u64);
            let _ = list.pop_front();
        }

        for i in 0..ITERATIONS {
            list.push_front(i as u64);
            let start = rdtscp();
            let _ = list.pop_front();
            let elapsed = rdtscp() - start;
            hist.record(elapsed).unwrap();
        }

        print_histogram("pop_front", &hist);
    }

    #[test]
    #[ignore]
    fn bench_insert_erase_after_middle() {
        let mut list: ForwardList<u64> = (0..1000).collect();
        let mut hist = Histogram::<u64>::new(3).unwrap();

        let mut anchor = list.begin();
        for _ in 0..500 {
            anchor = list.next_position(anchor);
        }

        for i in 0..WARMUP {
            list.insert_after(anchor, i as u64);
            list.erase_after(anchor);
        }

        for i in 0..ITERATIONS {
            let start = rdtscp();
            list.insert_after(anchor, i as u64);
            let elapsed = rdtscp() - start;
            hist.record(elapsed).unwrap();
            list.erase_after(anchor);
        }

        print_histogram("insert_after (middle)", &hist);
    }

    #[test]
    #[ignore]
    fn bench_clone_1k() {
        let list: ForwardList<u64> = (0..1000).collect();
        let mut hist = Histogram::<u64>::new(3).unwrap();

        for _ in 0..1_000 {
            std::hint::black_box(list.clone());
        }

        for _ in 0..10_000 {
            let start = rdtscp();
            let copy = list.clone();
            let elapsed = rdtscp() - start;
            hist.record(elapsed).unwrap();
            std::hint::black_box(copy);
        }

        print_histogram("clone (1k)", &hist);
    }
}
