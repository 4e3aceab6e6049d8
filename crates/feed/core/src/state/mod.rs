//! Authoritative feed state and its building blocks.
//!
//! [`FeedState`] is mutated only through [`crate::FeedReducer`]; everything
//! here is plain data plus read-only queries.
mod item;

pub use item::{DisplayItem, ItemPhase};

use std::collections::VecDeque;
use std::fmt;
use std::num::ParseIntError;
use std::str::FromStr;

/// Source-assigned identifier of a news item.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct ItemId(pub u64);

impl ItemId {
    pub const fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Accepts both `12` and `#12`.
impl FromStr for ItemId {
    type Err = ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let digits = s.trim().trim_start_matches('#');
        digits.parse().map(ItemId)
    }
}

/// Aggregate owned by the feed store.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FeedState {
    /// Newest first.
    pub items: VecDeque<DisplayItem>,
    /// Items ever moved from unread to read. Never decremented.
    pub read_count: u64,
    pub active_filter: Option<String>,
}

impl FeedState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn item(&self, id: ItemId) -> Option<&DisplayItem> {
        self.items.iter().find(|item| item.id == id)
    }

    pub(crate) fn item_mut(&mut self, id: ItemId) -> Option<&mut DisplayItem> {
        self.items.iter_mut().find(|item| item.id == id)
    }

    pub fn contains(&self, id: ItemId) -> bool {
        self.item(id).is_some()
    }

    /// Items passing the active filter, in feed order.
    ///
    /// Without a filter every item is visible. A filter naming an unknown
    /// category simply matches nothing.
    pub fn visible(&self) -> impl Iterator<Item = &DisplayItem> + '_ {
        let filter = self.active_filter.as_deref();
        self.items
            .iter()
            .filter(move |item| filter.is_none_or(|category| item.category == category))
    }

    /// Owned copy of [`Self::visible`].
    pub fn visible_items(&self) -> Vec<DisplayItem> {
        self.visible().cloned().collect()
    }
}
