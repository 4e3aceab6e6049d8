//! Console client for the news feed simulator.
//!
//! The binary is the composition root: it loads configuration, installs
//! logging, starts a [`feed_runtime::FeedRuntime`] and hands its handle to a
//! [`Frontend`]. When the frontend returns, the runtime is shut down.
pub mod config;
pub mod frontend;
pub mod logging;
pub mod platform;

pub use config::ClientConfig;
pub use frontend::{ConsoleFrontend, Frontend};
pub use platform::platform_name;
