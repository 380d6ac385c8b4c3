//! Error types for checked positional operations.

use core::fmt;

/// Why a [`Position`](crate::Position) was rejected by a checked operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PositionError {
    /// The position is past the last element and has no successor slot.
    End,
    /// The position was taken from a different list.
    Foreign,
    /// The element the position referred to has been removed.
    Erased,
}

impl fmt::Display for PositionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::End => write!(f, "position is the end of the list"),
            Self::Foreign => write!(f, "position belongs to a different list"),
            Self::Erased => write!(f, "position refers to an erased element"),
        }
    }
}

impl std::error::Error for PositionError {}

/// Error returned by [`ForwardList::try_insert_after`](crate::ForwardList::try_insert_after).
///
/// Hands the rejected value back to the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InsertError<T> {
    /// Why the anchor position was rejected.
    pub error: PositionError,
    /// The value that was not inserted.
    pub value: T,
}

impl<T> InsertError<T> {
    /// Returns the value that could not be inserted.
    pub fn into_inner(self) -> T {
        self.value
    }
}

impl<T> fmt::Display for InsertError<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "cannot insert: {}", self.error)
    }
}

impl<T: fmt::Debug> std::error::Error for InsertError<T> {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.error)
    }
}
