//! Feed data model and state transitions shared by the runtime and clients.
//!
//! `feed-core` defines the canonical news feed types ([`RawEvent`],
//! [`DisplayItem`], [`FeedState`]), the transformation from raw events into
//! display items, and the [`FeedReducer`] through which every state mutation
//! flows. Nothing in this crate performs I/O or spawns tasks; the runtime
//! crate owns scheduling and wires these pure pieces together.
pub mod engine;
pub mod error;
pub mod event;
pub mod profile;
pub mod state;
pub mod transform;

pub use engine::{ClickOutcome, FetchCompletion, FeedReducer, IngestOutcome};
pub use error::{FeedError, ProfileError};
pub use event::RawEvent;
pub use profile::{CategoryStyle, ColorToken, FeedProfile, TimeFormat};
pub use state::{DisplayItem, FeedState, ItemId, ItemPhase};
pub use transform::{format_timestamp, to_display_item};
