//! Header-skipping selection cursor
//!
//! The cursor is generic over anything that knows whether it can be
//! selected, so its mechanics are independent of how items are grouped.

/// An item a cursor can (or cannot) rest on
pub trait Selectable {
    fn is_selectable(&self) -> bool;
}

/// Position within an item sequence that never rests on a non-selectable item
/// while a selectable one exists.
///
/// Position 0 on an empty sequence means "no selection".
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Cursor {
    position: usize,
}

impl Cursor {
    pub fn position(&self) -> usize {
        self.position
    }

    /// Moves to `position` and re-establishes the invariant
    pub fn set<T: Selectable>(&mut self, position: usize, items: &[T]) {
        self.position = position;
        self.clamp(items);
    }

    pub fn reset(&mut self) {
        self.position = 0;
    }

    /// Re-establishes the invariant after the sequence was rebuilt
    pub fn clamp<T: Selectable>(&mut self, items: &[T]) {
        if items.is_empty() {
            self.position = 0;
            return;
        }

        if self.position >= items.len() {
            self.position = items.len() - 1;
        }
        if items[self.position].is_selectable() {
            return;
        }

        let forward = (self.position..items.len()).find(|&i| items[i].is_selectable());
        let backward = || (0..items.len()).rev().find(|&i| items[i].is_selectable());
        self.position = forward.or_else(backward).unwrap_or(0);
    }

    /// Steps to the previous selectable item; stays put at the top
    pub fn move_up<T: Selectable>(&mut self, items: &[T]) {
        let end = self.position.min(items.len());
        if let Some(i) = (0..end).rev().find(|&i| items[i].is_selectable()) {
            self.position = i;
        } else {
            self.clamp(items);
        }
    }

    /// Steps to the next selectable item; stays put at the bottom
    pub fn move_down<T: Selectable>(&mut self, items: &[T]) {
        let start = self.position + 1;
        if let Some(i) = (start..items.len()).find(|&i| items[i].is_selectable()) {
            self.position = i;
        } else {
            self.clamp(items);
        }
    }

    /// Item under the cursor, if it is selectable
    pub fn selected<'a, T: Selectable>(&self, items: &'a [T]) -> Option<&'a T> {
        items.get(self.position).filter(|item| item.is_selectable())
    }
}
