//! Presentation layers that drive a running feed.
mod console;
mod render;

pub use console::ConsoleFrontend;
pub use render::{ConsoleCommand, HELP, ParseCommandError, parse_command, render_card, render_feed};

use anyhow::Result;
use async_trait::async_trait;
use feed_runtime::FeedHandle;

/// Frontend abstraction for UI layers.
///
/// Frontends talk to the feed only through [`FeedHandle`]: they read the
/// published state, watch it for changes and send `click` / `set_filter`
/// commands. They never own the runtime.
#[async_trait]
pub trait Frontend: Send {
    /// Run until the user quits.
    async fn run(&mut self, handle: FeedHandle) -> Result<()>;
}
