//! Line-oriented console frontend.
use std::io::Write;

use anyhow::{Context, Result};
use async_trait::async_trait;
use feed_core::{ClickOutcome, FeedState};
use feed_runtime::FeedHandle;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader, Lines, Stdin};
use tracing::{debug, info, warn};

use super::Frontend;
use super::render::{ConsoleCommand, HELP, parse_command, render_feed};
use crate::config::ClientConfig;
use crate::platform::platform_name;

#[derive(Debug, PartialEq, Eq)]
enum Flow {
    Continue,
    Quit,
}

/// Reads commands line by line and prints the feed after every change.
///
/// Exits on `quit`, end of input or Ctrl-C.
pub struct ConsoleFrontend<R, W> {
    input: Lines<R>,
    output: W,
    render_limit: usize,
}

impl ConsoleFrontend<BufReader<Stdin>, std::io::Stdout> {
    /// Console bound to the process stdin and stdout.
    pub fn stdio(config: &ClientConfig) -> Self {
        Self::new(BufReader::new(tokio::io::stdin()), std::io::stdout(), config)
    }
}

impl<R, W> ConsoleFrontend<R, W>
where
    R: AsyncBufRead + Unpin + Send,
    W: Write + Send,
{
    pub fn new(input: R, output: W, config: &ClientConfig) -> Self {
        Self {
            input: input.lines(),
            output,
            render_limit: config.render_limit,
        }
    }

    fn render(&mut self, state: &FeedState) -> Result<()> {
        let text = render_feed(state, self.render_limit);
        writeln!(self.output, "{text}").context("failed to write to console")?;
        self.output.flush().context("failed to flush console")
    }

    fn say(&mut self, message: impl std::fmt::Display) -> Result<()> {
        writeln!(self.output, "{message}").context("failed to write to console")
    }

    async fn handle_line(&mut self, line: &str, handle: &FeedHandle) -> Result<Flow> {
        let command = match parse_command(line) {
            Ok(Some(command)) => command,
            Ok(None) => return Ok(Flow::Continue),
            Err(err) => {
                self.say(err)?;
                return Ok(Flow::Continue);
            }
        };
        debug!(?command, "console command");

        match command {
            ConsoleCommand::Open(id) => match handle.click(id).await? {
                ClickOutcome::NotFound => self.say(format_args!("no item {id}"))?,
                ClickOutcome::AlreadyLoading => self.say(format_args!("{id} is still loading"))?,
                ClickOutcome::Toggled { .. } | ClickOutcome::FetchStarted => {}
            },
            ConsoleCommand::Filter(category) => {
                if !handle.profile().is_known_category(&category) {
                    warn!(%category, "filtering by an unknown category");
                    let known: Vec<_> = handle.profile().category_names().collect();
                    self.say(format_args!(
                        "warning: `{category}` is not a known category ({})",
                        known.join(", ")
                    ))?;
                }
                handle.set_filter(Some(category)).await?;
            }
            ConsoleCommand::All => handle.clear_filter().await?,
            ConsoleCommand::Json => {
                let visible = handle.visible_items();
                let json = serde_json::to_string_pretty(&visible)
                    .context("failed to serialize visible items")?;
                self.say(json)?;
            }
            ConsoleCommand::Help => self.say(HELP)?,
            ConsoleCommand::Quit => return Ok(Flow::Quit),
        }

        Ok(Flow::Continue)
    }
}

#[async_trait]
impl<R, W> Frontend for ConsoleFrontend<R, W>
where
    R: AsyncBufRead + Unpin + Send,
    W: Write + Send,
{
    async fn run(&mut self, handle: FeedHandle) -> Result<()> {
        info!(platform = platform_name(), "console frontend started");
        self.say(format_args!(
            "news feed on {} (type `help` for commands)",
            platform_name()
        ))?;

        let mut state_rx = handle.watch_state();
        let initial = state_rx.borrow_and_update().clone();
        self.render(&initial)?;

        let ctrl_c = tokio::signal::ctrl_c();
        tokio::pin!(ctrl_c);

        loop {
            tokio::select! {
                line = self.input.next_line() => {
                    let Some(line) = line.context("failed to read console input")? else {
                        debug!("console input closed");
                        break;
                    };
                    if self.handle_line(&line, &handle).await? == Flow::Quit {
                        break;
                    }
                }
                changed = state_rx.changed() => {
                    if changed.is_err() {
                        warn!("feed store stopped; leaving console");
                        break;
                    }
                    let state = state_rx.borrow_and_update().clone();
                    self.render(&state)?;
                }
                signal = &mut ctrl_c => {
                    if let Err(err) = signal {
                        warn!(%err, "failed to listen for Ctrl-C");
                    }
                    break;
                }
            }
        }

        info!("console frontend stopped");
        Ok(())
    }
}
