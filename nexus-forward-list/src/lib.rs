//! A singly-linked list with a before-begin sentinel.
//!
//! [`ForwardList`] is a forward-only sequence built for positional editing:
//! insert or remove right after any position in O(1), including the
//! sentinel that precedes the first element.
//!
//! # Design
//!
//! ```text
//! before_begin ──▶ [a] ──▶ [b] ──▶ [c] ──▶ end
//!   (sentinel)
//! ```
//!
//! - **Sentinel head**: "push to front" and "insert after before-begin" are
//!   the same operation, with no special case for an empty list.
//! - **Arena nodes**: nodes live in a per-list `slab::Slab` and link by key.
//!   The arena owns every node, so each one is released exactly once on
//!   removal, `clear`, or drop.
//! - **Positions, not pointers**: a [`Position`] is a `Copy` token tagged
//!   before-begin, element, or end. It does not borrow the list, so it can
//!   be held across `insert_after` / `erase_after`.
//! - **Value semantics**: `clone` deep-copies, `clone_from` is copy-and-swap,
//!   and `swap` is O(1).
//!
//! # Quick Start
//!
//! ```
//! use nexus_forward_list::ForwardList;
//!
//! let mut list = ForwardList::from([2, 3]);
//! list.push_front(1);
//! list.push_back(5);
//!
//! // Insert 4 after 3.
//! let three = list.next_position(list.next_position(list.begin()));
//! list.insert_after(three, 4);
//! assert!(list.iter().eq(&[1, 2, 3, 4, 5]));
//!
//! // Remove the first element through the sentinel.
//! list.erase_after(list.before_begin());
//! assert_eq!(list.front(), Some(&2));
//! assert_eq!(list.len(), 4);
//! ```
//!
//! # Iteration
//!
//! | Type | Access | Use |
//! |------|--------|-----|
//! | [`Iter`] / [`IterMut`] | `&T` / `&mut T` | Ordinary `for` loops and adapters |
//! | [`Cursor`] / [`CursorMut`] | `&T` / `&mut T` + edit | Walk, compare, insert/remove after |
//! | [`IntoIter`] | `T` | Consume the list front to back |
//!
//! A mutable iterator or cursor converts into its read-only flavor, never
//! the reverse, and the two compare equal when they stand on the same
//! element.
//!
//! # Comparison
//!
//! Lists compare element-wise. `<` is lexicographic using the elements' `<`;
//! `<=`, `>`, and `>=` are derived from it.
//!
//! ```
//! use nexus_forward_list::ForwardList;
//!
//! assert!(ForwardList::from([1, 2]) < ForwardList::from([1, 2, 3]));
//! assert!(ForwardList::from([1, 3]) < ForwardList::from([2]));
//! assert!(ForwardList::from([1, 2]) <= ForwardList::from([1, 2]));
//! ```
//!
//! # Feature Flags
//!
//! - `tracing` - Emit `tracing` debug events on cold bulk paths (aborted
//!   fallible construction, arena shrinking)

#![warn(missing_docs)]

pub mod cursor;
pub mod error;
pub mod iter;
pub mod list;
pub mod position;

pub use cursor::{Cursor, CursorMut};
pub use error::{InsertError, PositionError};
pub use iter::{IntoIter, Iter, IterMut};
pub use list::{ForwardList, swap};
pub use position::Position;
