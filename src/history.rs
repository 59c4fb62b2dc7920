//! Undo log for committed swipes.
//!
//! Each entry snapshots exactly what rewind needs to restore: the swiped
//! profile, the direction it went, and the index the swipe departed from.
//! Storing the originating index (rather than recomputing it from deltas)
//! keeps rewind correct for looping decks, where the index does not simply
//! decrement.

use crate::data::Profile;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SwipeDirection {
    Left,
    Right,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SwipeRecord {
    pub profile: Profile,
    pub direction: SwipeDirection,
    pub index: usize,
}

/// Append-only stack, popped only by rewind. Strictly LIFO.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SwipeHistory {
    records: Vec<SwipeRecord>,
}

impl SwipeHistory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, record: SwipeRecord) {
        self.records.push(record);
    }

    pub fn pop(&mut self) -> Option<SwipeRecord> {
        self.records.pop()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn clear(&mut self) {
        self.records.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::sample_profile;

    fn record(id: &str, direction: SwipeDirection, index: usize) -> SwipeRecord {
        SwipeRecord {
            profile: sample_profile(id),
            direction,
            index,
        }
    }

    #[test]
    fn pops_in_reverse_chronological_order() {
        let mut history = SwipeHistory::new();
        history.push(record("a", SwipeDirection::Right, 0));
        history.push(record("b", SwipeDirection::Left, 1));
        history.push(record("c", SwipeDirection::Right, 2));

        assert_eq!(history.pop().unwrap().profile.id, "c");
        assert_eq!(history.pop().unwrap().profile.id, "b");
        assert_eq!(history.pop().unwrap().profile.id, "a");
        assert_eq!(history.pop(), None);
    }

    #[test]
    fn empty_pop_is_none() {
        assert_eq!(SwipeHistory::new().pop(), None);
    }

    #[test]
    fn clear_empties_the_log() {
        let mut history = SwipeHistory::new();
        history.push(record("a", SwipeDirection::Left, 0));
        history.clear();
        assert!(history.is_empty());
        assert_eq!(history.len(), 0);
    }
}
