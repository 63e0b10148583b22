//! Keyboard highlight over the candidate list.

use crate::catalog::RestaurantId;
use crate::suggest::Suggestions;

/// Tracks which candidate is highlighted, independently of pointer hover.
///
/// The list length is only ever changed through [`Navigator::reset`], which
/// also clears the highlight, so an index can never outlive the list it was
/// computed for.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Navigator {
    len: usize,
    active: Option<usize>,
}

impl Navigator {
    pub fn new(len: usize) -> Self {
        Self { len, active: None }
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn active(&self) -> Option<usize> {
        self.active
    }

    /// Active position with `-1` meaning nothing is highlighted.
    pub fn active_index(&self) -> isize {
        self.active.map_or(-1, |i| i as isize)
    }

    /// Advance with wraparound. From no highlight, the first candidate.
    pub fn move_next(&mut self) {
        if self.len == 0 {
            return;
        }
        self.active = Some(match self.active {
            None => 0,
            Some(i) => (i + 1) % self.len,
        });
    }

    /// Recede with wraparound. From no highlight, the first candidate.
    pub fn move_previous(&mut self) {
        if self.len == 0 {
            return;
        }
        self.active = Some(match self.active {
            None => 0,
            Some(i) => (i + self.len - 1) % self.len,
        });
    }

    /// Clear the highlight and adopt a freshly computed list length.
    pub fn reset(&mut self, len: usize) {
        self.len = len;
        self.active = None;
    }

    /// Highlighted candidate, if any.
    pub fn current<'a>(&self, suggestions: &'a Suggestions) -> Option<&'a RestaurantId> {
        self.active.and_then(|i| suggestions.get(i))
    }
}
