use strum::{AsRefStr, Display};

use super::ItemId;
use crate::profile::ColorToken;

/// Lifecycle phase of a single [`DisplayItem`].
///
/// ```text
/// Unread --click--> Loading --fetched--> ReadExpanded <--click--> ReadCollapsed
///                   Loading --failed---> Unread
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Display, AsRefStr)]
#[strum(serialize_all = "snake_case")]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum ItemPhase {
    Unread,
    Loading,
    ReadCollapsed,
    ReadExpanded,
}

/// UI-facing projection of a raw event plus its interaction state.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DisplayItem {
    pub id: ItemId,
    pub title: String,
    pub category: String,
    pub category_color: ColorToken,
    pub time_formatted: String,
    pub is_read: bool,
    pub detail: Option<String>,
    pub is_loading: bool,
    pub is_expanded: bool,
}

impl DisplayItem {
    pub fn new(
        id: ItemId,
        title: impl Into<String>,
        category: impl Into<String>,
        category_color: ColorToken,
        time_formatted: impl Into<String>,
    ) -> Self {
        Self {
            id,
            title: title.into(),
            category: category.into(),
            category_color,
            time_formatted: time_formatted.into(),
            is_read: false,
            detail: None,
            is_loading: false,
            is_expanded: false,
        }
    }

    pub fn phase(&self) -> ItemPhase {
        match (self.is_loading, self.is_read, self.is_expanded) {
            (true, _, _) => ItemPhase::Loading,
            (false, false, _) => ItemPhase::Unread,
            (false, true, true) => ItemPhase::ReadExpanded,
            (false, true, false) => ItemPhase::ReadCollapsed,
        }
    }
}
