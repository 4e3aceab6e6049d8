//! Worker tasks that back the runtime orchestration.
//!
//! The store worker owns and mutates the feed state, while the source pump
//! feeds it news events. Both stay internal to the crate.

mod source;
mod store;

pub use source::SourcePump;
pub use store::{Command, StoreWorker};
