//! Raw event to display item projection.
use chrono::{DateTime, FixedOffset, Local};

use crate::event::RawEvent;
use crate::profile::{FeedProfile, TimeFormat};
use crate::state::DisplayItem;

const UNKNOWN_TIME: &str = "--:--";

/// Project a freshly received event into an unread, collapsed display item.
pub fn to_display_item(raw: &RawEvent, profile: &FeedProfile) -> DisplayItem {
    DisplayItem::new(
        raw.id,
        raw.title.clone(),
        raw.category.clone(),
        profile.color_for(&raw.category),
        format_timestamp(
            raw.timestamp_millis,
            profile.time_format,
            profile.utc_offset_minutes,
        ),
    )
}

/// Render epoch milliseconds as a 24-hour clock.
///
/// Output never depends on the process locale. With `utc_offset_minutes` set
/// the clock is rendered at that fixed offset, otherwise in local time.
pub fn format_timestamp(
    millis: i64,
    format: TimeFormat,
    utc_offset_minutes: Option<i32>,
) -> String {
    let Some(utc) = DateTime::from_timestamp_millis(millis) else {
        return UNKNOWN_TIME.to_string();
    };

    match utc_offset_minutes {
        Some(minutes) => match FixedOffset::east_opt(minutes.saturating_mul(60)) {
            Some(offset) => utc
                .with_timezone(&offset)
                .format(format.pattern())
                .to_string(),
            None => UNKNOWN_TIME.to_string(),
        },
        None => utc
            .with_timezone(&Local)
            .format(format.pattern())
            .to_string(),
    }
}
