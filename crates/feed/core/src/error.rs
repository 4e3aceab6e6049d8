//! Error types for feed state transitions and profile validation.
use thiserror::Error;

use crate::state::ItemId;

/// Rejected state transition.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum FeedError {
    /// An item with this id is already in the feed.
    #[error("item {0} is already in the feed")]
    DuplicateItem(ItemId),
}

/// Invalid [`crate::FeedProfile`] contents.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum ProfileError {
    #[error("profile defines no categories")]
    NoCategories,

    #[error("profile defines no title templates")]
    NoTitleTemplates,

    #[error("category {name:?} is defined more than once")]
    DuplicateCategory { name: String },

    #[error("category names must not be empty")]
    EmptyCategoryName,
}
