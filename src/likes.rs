//! Persisted likes board.
//!
//! Ordered, deduplicated (by profile id) list of right-swiped profiles,
//! mirrored to LocalStorage on every change. Exposed to the screens as a
//! `use_reducer` store shared through a context.

use gloo_storage::errors::StorageError;
use gloo_storage::{LocalStorage, Storage};
use log::warn;
use serde::{Deserialize, Serialize};
use std::rc::Rc;
use yew::prelude::{Reducible, UseReducerHandle};

use crate::data::Profile;

const STORAGE_KEY: &str = "matchdeck_likes";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LikesBoard {
    pub likes: Vec<Profile>,
}

impl LikesBoard {
    pub fn load() -> Self {
        match LocalStorage::get::<LikesBoard>(STORAGE_KEY) {
            Ok(board) => board,
            Err(StorageError::KeyNotFound(_)) => Self::default(),
            Err(err) => {
                warn!("Falling back to an empty likes board: {err}");
                Self::default()
            }
        }
    }

    fn save(&self) {
        if let Err(err) = LocalStorage::set(STORAGE_KEY, self) {
            warn!("Failed to persist likes: {err}");
        }
    }

    pub fn contains(&self, id: &str) -> bool {
        self.likes.iter().any(|profile| profile.id == id)
    }

    pub fn is_empty(&self) -> bool {
        self.likes.is_empty()
    }

    pub fn len(&self) -> usize {
        self.likes.len()
    }

    /// Appends unless a profile with the same id is already on the board.
    /// Returns whether anything changed.
    fn push_unique(&mut self, profile: Profile) -> bool {
        if self.contains(&profile.id) {
            return false;
        }
        self.likes.push(profile);
        true
    }

    fn remove(&mut self, id: &str) -> bool {
        let before = self.likes.len();
        self.likes.retain(|profile| profile.id != id);
        self.likes.len() != before
    }
}

pub enum LikesAction {
    Add(Profile),
    Remove(String),
    Clear,
}

impl Reducible for LikesBoard {
    type Action = LikesAction;

    fn reduce(self: Rc<Self>, action: LikesAction) -> Rc<Self> {
        let mut next = (*self).clone();
        let changed = match action {
            LikesAction::Add(profile) => next.push_unique(profile),
            LikesAction::Remove(id) => next.remove(&id),
            LikesAction::Clear => {
                let had_likes = !next.likes.is_empty();
                next.likes.clear();
                had_likes
            }
        };
        if changed {
            next.save();
            Rc::new(next)
        } else {
            self
        }
    }
}

pub type LikesHandle = UseReducerHandle<LikesBoard>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::sample_profile;

    #[test]
    fn add_deduplicates_by_id_and_preserves_order() {
        let mut board = LikesBoard::default();
        assert!(board.push_unique(sample_profile("a")));
        assert!(board.push_unique(sample_profile("b")));
        assert!(!board.push_unique(sample_profile("a")));

        let ids: Vec<_> = board.likes.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, ["a", "b"]);
    }

    #[test]
    fn remove_by_id() {
        let mut board = LikesBoard::default();
        board.push_unique(sample_profile("a"));
        board.push_unique(sample_profile("b"));

        assert!(board.remove("a"));
        assert!(!board.remove("a"));
        assert!(!board.contains("a"));
        assert_eq!(board.len(), 1);
    }

    #[test]
    fn clear_empties_the_board() {
        let mut board = LikesBoard::default();
        board.push_unique(sample_profile("a"));
        board.likes.clear();
        assert!(board.is_empty());
    }
}
