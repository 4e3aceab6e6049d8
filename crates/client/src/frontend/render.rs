//! Plain-text rendering and command parsing for the console frontend.
use feed_core::{DisplayItem, FeedState, ItemId, ItemPhase};
use thiserror::Error;

/// A line typed by the user.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ConsoleCommand {
    /// Click an item (`<id>` or `open <id>`).
    Open(ItemId),
    /// Show only one category.
    Filter(String),
    /// Remove the filter.
    All,
    /// Dump the visible items as JSON.
    Json,
    Help,
    Quit,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseCommandError {
    #[error("unknown command `{0}`, type `help` for a list")]
    Unknown(String),
    #[error("`{0}` is not an item id")]
    BadId(String),
    #[error("usage: {0}")]
    Usage(&'static str),
}

pub const HELP: &str = "\
commands:
  <id> | open <id>    expand or collapse an item
  filter <category>   show one category
  all                 show every category
  json                print the visible items as JSON
  help                this text
  quit                exit";

/// Parse one input line. Blank lines yield `Ok(None)`.
pub fn parse_command(line: &str) -> Result<Option<ConsoleCommand>, ParseCommandError> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(None);
    }

    let (word, rest) = match line.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest.trim()),
        None => (line, ""),
    };

    let command = match word.to_ascii_lowercase().as_str() {
        "open" | "o" => {
            if rest.is_empty() {
                return Err(ParseCommandError::Usage("open <id>"));
            }
            ConsoleCommand::Open(parse_id(rest)?)
        }
        "filter" | "f" => {
            if rest.is_empty() {
                return Err(ParseCommandError::Usage("filter <category>"));
            }
            ConsoleCommand::Filter(rest.to_string())
        }
        "all" => ConsoleCommand::All,
        "json" => ConsoleCommand::Json,
        "help" | "?" => ConsoleCommand::Help,
        "quit" | "exit" | "q" => ConsoleCommand::Quit,
        _ if rest.is_empty() && looks_like_id(word) => ConsoleCommand::Open(parse_id(word)?),
        _ => return Err(ParseCommandError::Unknown(word.to_string())),
    };

    Ok(Some(command))
}

fn looks_like_id(word: &str) -> bool {
    word.trim_start_matches('#')
        .starts_with(|c: char| c.is_ascii_digit())
}

fn parse_id(text: &str) -> Result<ItemId, ParseCommandError> {
    text.parse()
        .map_err(|_| ParseCommandError::BadId(text.to_string()))
}

/// Render the visible part of the feed, newest first, at most `limit` cards.
pub fn render_feed(state: &FeedState, limit: usize) -> String {
    let visible = state.visible_items();
    let filter = state.active_filter.as_deref().unwrap_or("all");

    let mut out = format!(
        "== {} shown / {} total | read: {} | filter: {} ==\n",
        visible.len(),
        state.len(),
        state.read_count,
        filter
    );

    if visible.is_empty() {
        out.push_str("  (no news yet)\n");
        return out;
    }

    for item in visible.iter().take(limit) {
        out.push_str(&render_card(item));
    }
    if visible.len() > limit {
        out.push_str(&format!("  ... {} more\n", visible.len() - limit));
    }
    out
}

/// One card: marker, id, time, category and colour, then the title and any
/// expanded detail.
pub fn render_card(item: &DisplayItem) -> String {
    let marker = match item.phase() {
        ItemPhase::Unread => '*',
        ItemPhase::Loading => '~',
        ItemPhase::ReadCollapsed => '+',
        ItemPhase::ReadExpanded => '-',
    };

    let mut card = format!(
        "{marker} {} {} [{} {}]\n    {}\n",
        item.id,
        item.time_formatted,
        item.category,
        item.category_color.hex_rgb(),
        item.title
    );

    if item.is_loading {
        card.push_str("    loading...\n");
    } else if item.is_expanded {
        if let Some(detail) = &item.detail {
            card.push_str(&format!("    > {detail}\n"));
        }
    }
    card
}
