use crate::state::ItemId;

/// Immutable news item as produced by a news source.
///
/// Consumed by [`crate::to_display_item`] right after it is received; the
/// feed never stores raw events.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RawEvent {
    pub id: ItemId,
    pub title: String,
    pub category: String,
    /// Wall-clock creation time in milliseconds since the Unix epoch.
    pub timestamp_millis: i64,
}

impl RawEvent {
    pub fn new(
        id: ItemId,
        title: impl Into<String>,
        category: impl Into<String>,
        timestamp_millis: i64,
    ) -> Self {
        Self {
            id,
            title: title.into(),
            category: category.into(),
            timestamp_millis,
        }
    }
}
