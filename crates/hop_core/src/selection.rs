//! Cursor-indexed view model shared by every "pick one of N" screen.

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SelectionError {
    #[error("selection collection is empty")]
    EmptyCollection,
}

/// An immutable list of items plus a cursor that always points at one of them.
#[derive(Debug, Clone)]
pub struct SelectionViewModel<T> {
    collection: Vec<T>,
    cursor_pos: usize,
}

impl<T> SelectionViewModel<T> {
    /// Out-of-range cursors are clamped to the nearest bound, not wrapped.
    pub fn new(collection: Vec<T>, cursor_pos: isize) -> Result<Self, SelectionError> {
        if collection.is_empty() {
            return Err(SelectionError::EmptyCollection);
        }
        let last = (collection.len() - 1) as isize;
        let cursor_pos = cursor_pos.clamp(0, last) as usize;
        Ok(Self {
            collection,
            cursor_pos,
        })
    }

    pub fn collection(&self) -> &[T] {
        &self.collection
    }

    pub fn cursor_pos(&self) -> usize {
        self.cursor_pos
    }

    pub fn len(&self) -> usize {
        self.collection.len()
    }

    pub fn is_empty(&self) -> bool {
        self.collection.is_empty()
    }

    pub fn selected(&self) -> &T {
        &self.collection[self.cursor_pos]
    }

    pub fn increment_cursor_pos(&mut self) {
        self.cursor_pos = (self.cursor_pos + 1) % self.collection.len();
    }

    pub fn decrement_cursor_pos(&mut self) {
        let len = self.collection.len();
        self.cursor_pos = (self.cursor_pos + len - 1) % len;
    }
}
