//! Replayable search history.
//!
//! A [`HistoryBuffer`] is filled by a search through [`HistoryBuffer::append`]
//! and, once the search has finished, stepped through by the consumer with a
//! cursor. Reaching either end is reported, never wrapped.

/// Result of moving the replay cursor.
#[derive(Debug, PartialEq, Eq)]
pub enum ReplayMove<'a, S> {
    /// The cursor moved; this is the state now under it.
    Moved(&'a S),
    /// Already at the last state.
    AtEnd,
    /// Already at the first state.
    AtStart,
}

// Manual impls: the derive would demand `S: Copy`.
impl<S> Clone for ReplayMove<'_, S> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<S> Copy for ReplayMove<'_, S> {}

impl<'a, S> ReplayMove<'a, S> {
    pub fn state(self) -> Option<&'a S> {
        match self {
            ReplayMove::Moved(state) => Some(state),
            ReplayMove::AtEnd | ReplayMove::AtStart => None,
        }
    }

    /// Status text for an end-of-history move.
    pub fn boundary_message(self) -> Option<&'static str> {
        match self {
            ReplayMove::Moved(_) => None,
            ReplayMove::AtEnd => Some("Reached end of history"),
            ReplayMove::AtStart => Some("At initial state"),
        }
    }
}

/// Append-only sequence of recorded states with a replay cursor.
///
/// # Example
///
/// ```
/// use backtrack_solver::history::{HistoryBuffer, ReplayMove};
///
/// let mut history = HistoryBuffer::new();
/// history.append("a");
/// history.append("b");
///
/// assert_eq!(history.current(), Some(&"a"));
/// assert_eq!(history.forward(), ReplayMove::Moved(&"b"));
/// assert_eq!(history.forward(), ReplayMove::AtEnd);
/// assert_eq!(history.cursor(), 1);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryBuffer<S> {
    states: Vec<S>,
    cursor: usize,
}

impl<S> Default for HistoryBuffer<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S> HistoryBuffer<S> {
    pub fn new() -> Self {
        Self {
            states: Vec::new(),
            cursor: 0,
        }
    }

    /// Records a state. The only mutation a search performs.
    pub fn append(&mut self, state: S) {
        self.states.push(state);
    }

    /// The `index`-th recorded state.
    pub fn at(&self, index: usize) -> Option<&S> {
        self.states.get(index)
    }

    pub fn len(&self) -> usize {
        self.states.len()
    }

    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, S> {
        self.states.iter()
    }

    pub fn last(&self) -> Option<&S> {
        self.states.last()
    }

    /// Cursor position, 0 for a fresh or empty buffer.
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// State under the cursor.
    pub fn current(&self) -> Option<&S> {
        self.states.get(self.cursor)
    }

    /// Moves the cursor to `index`, or leaves it unchanged if out of range.
    pub fn seek(&mut self, index: usize) -> Option<&S> {
        if index < self.states.len() {
            self.cursor = index;
            self.states.get(index)
        } else {
            None
        }
    }

    /// Advances the cursor by one.
    pub fn forward(&mut self) -> ReplayMove<'_, S> {
        if self.cursor + 1 < self.states.len() {
            self.cursor += 1;
            ReplayMove::Moved(&self.states[self.cursor])
        } else {
            ReplayMove::AtEnd
        }
    }

    /// Moves the cursor back by one.
    pub fn backward(&mut self) -> ReplayMove<'_, S> {
        if self.cursor > 0 && !self.states.is_empty() {
            self.cursor -= 1;
            ReplayMove::Moved(&self.states[self.cursor])
        } else {
            ReplayMove::AtStart
        }
    }

    /// Moves the cursor back to the first state.
    pub fn rewind(&mut self) {
        self.cursor = 0;
    }
}

impl<'a, S> IntoIterator for &'a HistoryBuffer<S> {
    type Item = &'a S;
    type IntoIter = std::slice::Iter<'a, S>;

    fn into_iter(self) -> Self::IntoIter {
        self.states.iter()
    }
}

#[cfg(test)]
#[path = "history_tests.rs"]
mod tests;
