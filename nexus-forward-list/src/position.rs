//! Positions within a [`ForwardList`](crate::ForwardList).
//!
//! A [`Position`] is a `Copy` token naming one slot in a list's chain:
//!
//! ```text
//! before_begin ──▶ [a] ──▶ [b] ──▶ [c] ──▶ end
//!   (sentinel)     begin                  (none)
//! ```
//!
//! The before-begin slot is the sentinel head. It holds no element, but it has
//! a successor, so it is a valid anchor for `insert_after` / `erase_after`.
//! The end slot is past the last element and has neither a value nor a
//! successor.
//!
//! Positions do not borrow the list. They stay meaningful until the element
//! they name is erased, at which point using them is a contract violation
//! (caught in debug builds, see [`ForwardList`](crate::ForwardList)).

use std::sync::atomic::{AtomicU64, Ordering};

static NEXT_LIST_ID: AtomicU64 = AtomicU64::new(0);

/// Identity of one node chain.
///
/// Allocated once per constructed list and carried along by `swap`, so a
/// position keeps naming the same chain after the chain changes owner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) struct ListId(u64);

impl ListId {
    /// Returns a process-unique id.
    #[inline]
    pub(crate) fn next() -> Self {
        Self(NEXT_LIST_ID.fetch_add(1, Ordering::Relaxed))
    }
}

/// The slot a position refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) enum Link {
    /// The sentinel head preceding the first element.
    BeforeBegin,
    /// An element, by arena key.
    Node(usize),
    /// Past the last element.
    End,
}

/// A position in a forward list.
///
/// Equality compares identity, not value: two positions are equal when they
/// name the same slot of the same chain. All end positions are equal to one
/// another, whichever list they came from. A position to an erased element
/// never equals a position to whatever was later inserted in its place.
///
/// # Example
///
/// ```
/// use nexus_forward_list::ForwardList;
///
/// let mut list = ForwardList::from([1, 2]);
///
/// let pos = list.insert_after(list.before_begin(), 0);
/// assert_eq!(pos, list.begin());
/// assert_eq!(list[pos], 0);
///
/// let last = list.next_position(list.next_position(pos));
/// assert_eq!(list[last], 2);
/// assert!(list.next_position(last).is_end());
/// ```
#[derive(Debug, Clone, Copy)]
pub struct Position {
    pub(crate) owner: ListId,
    pub(crate) link: Link,
    /// Insertion stamp of the element; zero for before-begin and end.
    pub(crate) stamp: u64,
}

impl Position {
    /// A before-begin or end position.
    #[inline]
    pub(crate) const fn new(owner: ListId, link: Link) -> Self {
        Self {
            owner,
            link,
            stamp: 0,
        }
    }

    /// The position of the element stored at `key` with `stamp`.
    #[inline]
    pub(crate) const fn element(owner: ListId, key: usize, stamp: u64) -> Self {
        Self {
            owner,
            link: Link::Node(key),
            stamp,
        }
    }

    /// Returns `true` if this is the past-the-end position.
    #[inline]
    pub const fn is_end(&self) -> bool {
        matches!(self.link, Link::End)
    }

    /// Returns `true` if this is the sentinel position before the first element.
    #[inline]
    pub const fn is_before_begin(&self) -> bool {
        matches!(self.link, Link::BeforeBegin)
    }

    /// Returns `true` if this position refers to an element.
    #[inline]
    pub const fn is_element(&self) -> bool {
        matches!(self.link, Link::Node(_))
    }

    /// Returns the arena key of the element, if any.
    #[inline]
    pub(crate) const fn key(&self) -> Option<usize> {
        match self.link {
            Link::Node(key) => Some(key),
            _ => None,
        }
    }
}

impl PartialEq for Position {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        match (self.link, other.link) {
            (Link::End, Link::End) => true,
            (a, b) => a == b && self.owner == other.owner && self.stamp == other.stamp,
        }
    }
}

impl Eq for Position {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn list_ids_are_unique() {
        let a = ListId::next();
        let b = ListId::next();
        assert_ne!(a, b);
    }

    #[test]
    fn predicates() {
        let id = ListId::next();

        let before = Position::new(id, Link::BeforeBegin);
        assert!(before.is_before_begin());
        assert!(!before.is_end());
        assert!(!before.is_element());
        assert_eq!(before.key(), None);

        let node = Position::element(id, 3, 1);
        assert!(node.is_element());
        assert_eq!(node.key(), Some(3));

        let end = Position::new(id, Link::End);
        assert!(end.is_end());
        assert!(!end.is_element());
    }

    #[test]
    fn equality_is_identity() {
        let a = ListId::next();
        let b = ListId::next();

        assert_eq!(Position::element(a, 0, 1), Position::element(a, 0, 1));
        assert_ne!(Position::element(a, 0, 1), Position::element(a, 1, 2));

        // Same key, different chain.
        assert_ne!(Position::element(a, 0, 1), Position::element(b, 0, 1));
        assert_ne!(
            Position::new(a, Link::BeforeBegin),
            Position::new(b, Link::BeforeBegin)
        );
    }

    #[test]
    fn reused_key_is_a_different_position() {
        let id = ListId::next();
        assert_ne!(Position::element(id, 0, 1), Position::element(id, 0, 2));
    }

    #[test]
    fn end_positions_are_all_equal() {
        let a = ListId::next();
        let b = ListId::next();
        assert_eq!(Position::new(a, Link::End), Position::new(b, Link::End));
        assert_ne!(Position::new(a, Link::End), Position::new(a, Link::BeforeBegin));
    }
}
