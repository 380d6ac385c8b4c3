//! Iterators over a [`ForwardList`].
//!
//! [`Iter`] and [`IterMut`] walk the same chain and differ only in the kind
//! of reference they hand out. An `IterMut` can be turned into an `Iter`
//! (dropping write access for the rest of the walk), never the reverse, and
//! the two compare equal when they stand on the same element.

use core::fmt;
use core::iter::FusedIterator;

use slab::Slab;

use crate::list::Node;
use crate::position::{Link, ListId};
use crate::{ForwardList, Position};

/// Where an [`Iter`] reads its nodes from.
enum Nodes<'a, T> {
    /// The list's arena.
    Arena(&'a Slab<Node<T>>),
    /// Nodes an [`IterMut`] had not yet handed out, indexed by key.
    Detached(Vec<Option<&'a Node<T>>>),
}

impl<'a, T> Nodes<'a, T> {
    #[inline]
    fn get(&self, key: usize) -> Option<&'a Node<T>> {
        match *self {
            Nodes::Arena(slab) => slab.get(key),
            Nodes::Detached(ref slots) => slots.get(key).copied().flatten(),
        }
    }
}

impl<T> Clone for Nodes<'_, T> {
    fn clone(&self) -> Self {
        match self {
            Nodes::Arena(slab) => Nodes::Arena(*slab),
            Nodes::Detached(slots) => Nodes::Detached(slots.clone()),
        }
    }
}

/// Position of the node at `key` as seen through a key-to-stamp lookup.
#[inline]
fn position_at(owner: ListId, key: Option<usize>, stamp: Option<u64>) -> Position {
    match (key, stamp) {
        (Some(key), Some(stamp)) => Position::element(owner, key, stamp),
        _ => Position::new(owner, Link::End),
    }
}

/// Iterator over references to list elements, front to back.
pub struct Iter<'a, T> {
    nodes: Nodes<'a, T>,
    owner: ListId,
    next: Option<usize>,
    remaining: usize,
}

impl<'a, T> Iter<'a, T> {
    #[inline]
    pub(crate) fn new(
        nodes: &'a Slab<Node<T>>,
        owner: ListId,
        next: Option<usize>,
        remaining: usize,
    ) -> Self {
        Self {
            nodes: Nodes::Arena(nodes),
            owner,
            next,
            remaining,
        }
    }

    /// Returns the position of the element the next call to `next` yields,
    /// or end once exhausted.
    #[inline]
    pub fn as_position(&self) -> Position {
        let stamp = self.next.and_then(|key| self.nodes.get(key)).map(|node| node.stamp);
        position_at(self.owner, self.next, stamp)
    }
}

impl<T> Clone for Iter<'_, T> {
    fn clone(&self) -> Self {
        Self {
            nodes: self.nodes.clone(),
            owner: self.owner,
            next: self.next,
            remaining: self.remaining,
        }
    }
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        let node = self.nodes.get(self.next?)?;
        self.next = node.next;
        self.remaining -= 1;
        Some(&node.value)
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<T> ExactSizeIterator for Iter<'_, T> {}

impl<T> FusedIterator for Iter<'_, T> {}

impl<T: fmt::Debug> fmt::Debug for Iter<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Iter").field(&self.clone().collect::<Vec<_>>()).finish()
    }
}

impl<'a, T> From<IterMut<'a, T>> for Iter<'a, T> {
    /// Gives up write access for the rest of the walk.
    #[inline]
    fn from(iter: IterMut<'a, T>) -> Self {
        let IterMut {
            slots,
            owner,
            next,
            remaining,
        } = iter;
        Self {
            nodes: Nodes::Detached(slots.into_iter().map(downgrade).collect()),
            owner,
            next,
            remaining,
        }
    }
}

#[inline]
fn downgrade<'a, T>(slot: Option<&'a mut Node<T>>) -> Option<&'a Node<T>> {
    match slot {
        Some(node) => Some(&*node),
        None => None,
    }
}

/// Iterator over mutable references to list elements, front to back.
///
/// Borrows every node once up front, through a single pass over the arena,
/// and hands each one out at most once in chain order.
pub struct IterMut<'a, T> {
    slots: Vec<Option<&'a mut Node<T>>>,
    owner: ListId,
    next: Option<usize>,
    remaining: usize,
}

impl<'a, T> IterMut<'a, T> {
    #[inline]
    pub(crate) fn new(
        nodes: &'a mut Slab<Node<T>>,
        owner: ListId,
        next: Option<usize>,
        remaining: usize,
    ) -> Self {
        let mut slots = Vec::new();
        if remaining > 0 {
            slots.reserve(nodes.len());
            // Keys come out ascending; vacant keys become `None`.
            for (key, node) in nodes.iter_mut() {
                slots.resize_with(key, || None);
                slots.push(Some(node));
            }
        }
        Self {
            slots,
            owner,
            next,
            remaining,
        }
    }

    /// Returns the position of the element the next call to `next` yields,
    /// or end once exhausted.
    #[inline]
    pub fn as_position(&self) -> Position {
        let stamp = self
            .next
            .and_then(|key| self.slots.get(key))
            .and_then(|slot| slot.as_ref())
            .map(|node| node.stamp);
        position_at(self.owner, self.next, stamp)
    }
}

impl<'a, T> Iterator for IterMut<'a, T> {
    type Item = &'a mut T;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        let node = self.slots.get_mut(self.next?)?.take()?;
        self.next = node.next;
        self.remaining -= 1;
        Some(&mut node.value)
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<T> ExactSizeIterator for IterMut<'_, T> {}

impl<T> FusedIterator for IterMut<'_, T> {}

impl<T> fmt::Debug for IterMut<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IterMut")
            .field("remaining", &self.remaining)
            .finish()
    }
}

impl<T> PartialEq for Iter<'_, T> {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        self.as_position() == other.as_position()
    }
}

impl<T> PartialEq<IterMut<'_, T>> for Iter<'_, T> {
    #[inline]
    fn eq(&self, other: &IterMut<'_, T>) -> bool {
        self.as_position() == other.as_position()
    }
}

impl<T> PartialEq for IterMut<'_, T> {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        self.as_position() == other.as_position()
    }
}

impl<T> PartialEq<Iter<'_, T>> for IterMut<'_, T> {
    #[inline]
    fn eq(&self, other: &Iter<'_, T>) -> bool {
        self.as_position() == other.as_position()
    }
}

/// Owning iterator that pops elements from the front.
pub struct IntoIter<T> {
    list: ForwardList<T>,
}

impl<T> IntoIter<T> {
    #[inline]
    pub(crate) fn new(list: ForwardList<T>) -> Self {
        Self { list }
    }
}

impl<T> Iterator for IntoIter<T> {
    type Item = T;

    #[inline]
    fn next(&mut self) -> Option<T> {
        self.list.pop_front()
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.list.len(), Some(self.list.len()))
    }
}

impl<T> ExactSizeIterator for IntoIter<T> {}

impl<T> FusedIterator for IntoIter<T> {}

impl<T: fmt::Debug> fmt::Debug for IntoIter<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("IntoIter").field(&self.list).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn iter_front_to_back() {
        let list = ForwardList::from([1, 2, 3]);
        let values: Vec<_> = list.iter().copied().collect();
        assert_eq!(values, vec![1, 2, 3]);
    }

    #[test]
    fn iter_empty() {
        let list: ForwardList<u64> = ForwardList::new();
        let mut iter = list.iter();
        assert_eq!(iter.len(), 0);
        assert!(iter.next().is_none());
        assert!(iter.next().is_none());
    }

    #[test]
    fn iter_exact_size() {
        let list = ForwardList::from([1, 2, 3]);
        let mut iter = list.iter();
        assert_eq!(iter.len(), 3);
        iter.next();
        assert_eq!(iter.size_hint(), (2, Some(2)));
    }

    #[test]
    fn iter_mut_modifies() {
        let mut list = ForwardList::from([1, 2, 3]);
        for value in list.iter_mut() {
            *value *= 10;
        }
        let values: Vec<_> = list.iter().copied().collect();
        assert_eq!(values, vec![10, 20, 30]);
    }

    #[test]
    fn iter_mut_holds_many_references() {
        let mut list = ForwardList::from([1, 2, 3]);
        let refs: Vec<&mut i32> = list.iter_mut().collect();
        for r in refs {
            *r += 1;
        }
        assert!(list.iter().eq(&[2, 3, 4]));
    }

    #[test]
    fn iter_mut_interleaves_writes_through_earlier_references() {
        let mut list: ForwardList<u32> = (0..4).collect();
        // Leave a vacant arena slot in the middle of the chain.
        let first = list.begin();
        list.erase_after(first);

        let mut iter = list.iter_mut();
        let a = iter.next().unwrap();
        let b = iter.next().unwrap();
        *a += 10;
        let c = iter.next().unwrap();
        *b += 10;
        *c += 10;
        *a += 1;
        assert!(iter.next().is_none());

        assert!(list.iter().eq(&[11, 12, 13]));
    }

    #[test]
    fn iter_mut_on_empty_list() {
        let mut list: ForwardList<u8> = ForwardList::new();
        let mut iter = list.iter_mut();
        assert_eq!(iter.len(), 0);
        assert!(iter.as_position().is_end());
        assert!(iter.next().is_none());
    }

    #[test]
    fn iter_clone_is_independent() {
        let list = ForwardList::from([1, 2]);
        let mut a = list.iter();
        a.next();
        let b = a.clone();
        assert_eq!(a.next(), Some(&2));
        assert_eq!(b.copied().collect::<Vec<_>>(), vec![2]);
    }

    #[test]
    fn as_position_tracks_next_element() {
        let list = ForwardList::from([1, 2]);
        let mut iter = list.iter();

        assert_eq!(iter.as_position(), list.begin());
        iter.next();
        assert_eq!(list[iter.as_position()], 2);
        iter.next();
        assert_eq!(iter.as_position(), list.end());
    }

    #[test]
    fn begin_equals_end_iff_empty() {
        let list: ForwardList<u8> = ForwardList::new();
        let mut exhausted = list.iter();
        exhausted.next();
        assert!(list.iter() == exhausted);

        let list = ForwardList::from([1u8]);
        let mut iter = list.iter();
        let begin = iter.clone();
        iter.next();
        assert!(begin != iter);
    }

    #[test]
    fn mutable_and_read_only_compare_equal() {
        let mut list = ForwardList::from([1, 2, 3]);
        let mut iter_mut = list.iter_mut();
        iter_mut.next();
        let pos = iter_mut.as_position();

        let iter: Iter<'_, i32> = iter_mut.into();
        assert_eq!(iter.as_position(), pos);
        assert_eq!(iter.len(), 2);
        assert_eq!(iter.clone().copied().collect::<Vec<_>>(), vec![2, 3]);
        assert_eq!(iter.copied().collect::<Vec<_>>(), vec![2, 3]);
    }

    #[test]
    fn cross_flavor_equality() {
        let mut a = ForwardList::from([1, 2]);
        let b = a.clone();

        // Different lists never compare equal, except at the end.
        let read = b.iter();
        let write = a.iter_mut();
        assert!(read != write);
        assert!(write != read);

        let mut read = b.iter();
        for _ in read.by_ref() {}
        let mut write = a.iter_mut();
        for _ in write.by_ref() {}
        assert!(read == write);
        assert!(write == read);
    }

    #[test]
    fn into_iter_drains() {
        let list = ForwardList::from([String::from("x"), String::from("y")]);
        let mut iter = list.into_iter();
        assert_eq!(iter.len(), 2);
        assert_eq!(iter.next().as_deref(), Some("x"));
        assert_eq!(iter.len(), 1);
        assert_eq!(iter.next().as_deref(), Some("y"));
        assert!(iter.next().is_none());
    }

    #[test]
    fn debug_formats() {
        let mut list = ForwardList::from([1, 2]);
        assert_eq!(format!("{:?}", list.iter()), "Iter([1, 2])");
        assert_eq!(format!("{:?}", list.iter_mut()), "IterMut { remaining: 2 }");
        assert_eq!(format!("{:?}", list.into_iter()), "IntoIter([1, 2])");
    }
}
