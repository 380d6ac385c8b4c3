//! Cursors: a position paired with a borrow of its list.
//!
//! A cursor behaves like a classic forward iterator. It can be dereferenced,
//! advanced, and compared, and it can stand on the before-begin sentinel.
//! [`CursorMut`] can also insert and remove after its position.
//!
//! ```
//! use nexus_forward_list::ForwardList;
//!
//! // Drop every even number, walking from before-begin so the first
//! // element can be removed too.
//! let mut list = ForwardList::from([2, 3, 4, 5, 6]);
//! let mut cursor = list.cursor_mut_before_begin();
//!
//! while let Some(&next) = cursor.peek_next() {
//!     if next % 2 == 0 {
//!         cursor.remove_next();
//!     } else {
//!         cursor.move_next();
//!     }
//! }
//!
//! assert_eq!(list, ForwardList::from([3, 5]));
//! ```

use crate::{ForwardList, Position};

/// A read-only cursor.
///
/// `Copy`, so it can be saved and compared freely.
pub struct Cursor<'a, T> {
    list: &'a ForwardList<T>,
    pos: Position,
}

impl<T> Clone for Cursor<'_, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Cursor<'_, T> {}

impl<'a, T> Cursor<'a, T> {
    #[inline]
    pub(crate) fn new(list: &'a ForwardList<T>, pos: Position) -> Self {
        Self { list, pos }
    }

    /// Returns the cursor's position.
    #[inline]
    pub fn position(&self) -> Position {
        self.pos
    }

    /// Returns the current element.
    ///
    /// Returns `None` at before-begin and at end.
    #[inline]
    pub fn current(&self) -> Option<&'a T> {
        self.list.get(self.pos)
    }

    /// Returns the element after the cursor without moving.
    #[inline]
    pub fn peek_next(&self) -> Option<&'a T> {
        let next = self.list.successor(self.pos.link)?;
        Some(&self.list.nodes[next].value)
    }

    /// Advances to the next position.
    ///
    /// # Panics
    ///
    /// In debug builds, panics if the cursor is already at end. In release
    /// builds it stays at end.
    #[inline]
    pub fn move_next(&mut self) {
        self.pos = self.list.next_position(self.pos);
    }

    /// Returns `true` at the past-the-end position.
    #[inline]
    pub fn is_end(&self) -> bool {
        self.pos.is_end()
    }

    /// Returns `true` at the before-begin position.
    #[inline]
    pub fn is_before_begin(&self) -> bool {
        self.pos.is_before_begin()
    }
}

/// A cursor with write access to its list.
///
/// Inserting or removing after the cursor keeps the cursor where it is.
pub struct CursorMut<'a, T> {
    list: &'a mut ForwardList<T>,
    pos: Position,
}

impl<'a, T> CursorMut<'a, T> {
    #[inline]
    pub(crate) fn new(list: &'a mut ForwardList<T>, pos: Position) -> Self {
        Self { list, pos }
    }

    /// Returns the cursor's position.
    #[inline]
    pub fn position(&self) -> Position {
        self.pos
    }

    /// Returns the current element.
    ///
    /// Returns `None` at before-begin and at end.
    #[inline]
    pub fn current(&self) -> Option<&T> {
        self.list.get(self.pos)
    }

    /// Returns the current element mutably.
    ///
    /// Returns `None` at before-begin and at end.
    #[inline]
    pub fn current_mut(&mut self) -> Option<&mut T> {
        self.list.get_mut(self.pos)
    }

    /// Returns the element after the cursor without moving.
    #[inline]
    pub fn peek_next(&self) -> Option<&T> {
        let next = self.list.successor(self.pos.link)?;
        Some(&self.list.nodes[next].value)
    }

    /// Advances to the next position.
    ///
    /// # Panics
    ///
    /// In debug builds, panics if the cursor is already at end. In release
    /// builds it stays at end.
    #[inline]
    pub fn move_next(&mut self) {
        self.pos = self.list.next_position(self.pos);
    }

    /// Inserts `value` after the cursor and returns its position.
    ///
    /// # Panics
    ///
    /// Panics if the cursor is at end.
    #[inline]
    pub fn insert_after(&mut self, value: T) -> Position {
        self.list.insert_after(self.pos, value)
    }

    /// Removes the element after the cursor and returns it.
    ///
    /// Returns `None` if there is no element after the cursor.
    ///
    /// # Panics
    ///
    /// Panics if the cursor is at end.
    #[inline]
    pub fn remove_next(&mut self) -> Option<T> {
        self.list.remove_after(self.pos)
    }

    /// Returns `true` at the past-the-end position.
    #[inline]
    pub fn is_end(&self) -> bool {
        self.pos.is_end()
    }

    /// Returns `true` at the before-begin position.
    #[inline]
    pub fn is_before_begin(&self) -> bool {
        self.pos.is_before_begin()
    }

    /// Borrows a read-only cursor at the same position.
    #[inline]
    pub fn as_cursor(&self) -> Cursor<'_, T> {
        Cursor::new(&*self.list, self.pos)
    }

    /// Converts into a read-only cursor at the same position.
    #[inline]
    pub fn into_cursor(self) -> Cursor<'a, T> {
        Cursor::new(self.list, self.pos)
    }
}

impl<'a, T> From<CursorMut<'a, T>> for Cursor<'a, T> {
    #[inline]
    fn from(cursor: CursorMut<'a, T>) -> Self {
        cursor.into_cursor()
    }
}

impl<T> PartialEq for Cursor<'_, T> {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        self.pos == other.pos
    }
}

impl<T> PartialEq<CursorMut<'_, T>> for Cursor<'_, T> {
    #[inline]
    fn eq(&self, other: &CursorMut<'_, T>) -> bool {
        self.pos == other.pos
    }
}

impl<T> PartialEq for CursorMut<'_, T> {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        self.pos == other.pos
    }
}

impl<T> PartialEq<Cursor<'_, T>> for CursorMut<'_, T> {
    #[inline]
    fn eq(&self, other: &Cursor<'_, T>) -> bool {
        self.pos == other.pos
    }
}

impl<T> core::fmt::Debug for Cursor<'_, T> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_tuple("Cursor").field(&self.pos).finish()
    }
}

impl<T> core::fmt::Debug for CursorMut<'_, T> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_tuple("CursorMut").field(&self.pos).finish()
    }
}
