//! State transitions for [`FeedState`].
//!
//! [`FeedReducer`] is the only code that mutates a feed. The runtime's store
//! worker wraps every command in one reducer call, which keeps each update an
//! atomic read-modify-write step.
use crate::error::FeedError;
use crate::state::{DisplayItem, FeedState, ItemId};

/// Result of a click on an item.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ClickOutcome {
    /// No item with that id (never existed or was evicted).
    NotFound,
    /// A detail fetch is already running; the click was absorbed.
    AlreadyLoading,
    /// Detail already known; expansion flipped.
    Toggled { expanded: bool },
    /// Item marked loading. The caller must now fetch the detail and report
    /// back through [`FeedReducer::complete_fetch`] or
    /// [`FeedReducer::fail_fetch`].
    FetchStarted,
}

impl ClickOutcome {
    pub const fn needs_fetch(self) -> bool {
        matches!(self, ClickOutcome::FetchStarted)
    }
}

/// Effect of a successful detail fetch.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FetchCompletion {
    /// The item was unread before this transition and counted now.
    pub newly_read: bool,
    pub read_count: u64,
}

/// Effect of prepending an item.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct IngestOutcome {
    /// Oldest items dropped to respect the history cap, oldest last.
    pub evicted: Vec<ItemId>,
}

/// Wraps mutable access to [`FeedState`].
pub struct FeedReducer<'a> {
    state: &'a mut FeedState,
}

impl<'a> FeedReducer<'a> {
    pub fn new(state: &'a mut FeedState) -> Self {
        Self { state }
    }

    pub fn state(&self) -> &FeedState {
        self.state
    }

    /// Prepend a new item, then trim to `max_items` if a cap is set.
    pub fn ingest(
        &mut self,
        item: DisplayItem,
        max_items: Option<usize>,
    ) -> Result<IngestOutcome, FeedError> {
        if self.state.contains(item.id) {
            return Err(FeedError::DuplicateItem(item.id));
        }

        self.state.items.push_front(item);

        let mut outcome = IngestOutcome::default();
        if let Some(cap) = max_items {
            while self.state.items.len() > cap {
                if let Some(evicted) = self.state.items.pop_back() {
                    outcome.evicted.push(evicted.id);
                }
            }
        }

        Ok(outcome)
    }

    /// Replace the active filter. Returns whether the value changed.
    pub fn set_filter(&mut self, filter: Option<String>) -> bool {
        if self.state.active_filter == filter {
            return false;
        }
        self.state.active_filter = filter;
        true
    }

    pub fn click(&mut self, id: ItemId) -> ClickOutcome {
        let Some(item) = self.state.item_mut(id) else {
            return ClickOutcome::NotFound;
        };

        if item.is_loading {
            return ClickOutcome::AlreadyLoading;
        }

        if item.detail.is_some() {
            item.is_expanded = !item.is_expanded;
            return ClickOutcome::Toggled {
                expanded: item.is_expanded,
            };
        }

        item.is_loading = true;
        ClickOutcome::FetchStarted
    }

    /// Apply a fetched detail to a loading item.
    ///
    /// Returns `None` when the item is gone or not loading, in which case the
    /// state is left untouched.
    pub fn complete_fetch(&mut self, id: ItemId, detail: String) -> Option<FetchCompletion> {
        let item = self.state.item_mut(id)?;
        if !item.is_loading {
            return None;
        }

        let was_read = item.is_read;
        item.is_loading = false;
        item.is_read = true;
        item.detail = Some(detail);
        item.is_expanded = true;

        if !was_read {
            self.state.read_count += 1;
        }

        Some(FetchCompletion {
            newly_read: !was_read,
            read_count: self.state.read_count,
        })
    }

    /// Clear the loading flag after a failed fetch so the next click retries.
    pub fn fail_fetch(&mut self, id: ItemId) -> bool {
        match self.state.item_mut(id) {
            Some(item) if item.is_loading => {
                item.is_loading = false;
                true
            }
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::profile::ColorToken;
    use crate::state::ItemPhase;

    fn item(id: u64, category: &str) -> DisplayItem {
        DisplayItem::new(ItemId(id), format!("T{id}"), category, ColorToken::GREEN, "10:00")
    }

    fn feed_with(ids: &[u64]) -> FeedState {
        let mut state = FeedState::new();
        let mut reducer = FeedReducer::new(&mut state);
        for &id in ids {
            reducer.ingest(item(id, "Teknologi"), None).unwrap();
        }
        state
    }

    #[test]
    fn ingest_prepends_newest_first() {
        let state = feed_with(&[1, 2, 3]);
        let ids: Vec<_> = state.items.iter().map(|i| i.id.get()).collect();
        assert_eq!(ids, vec![3, 2, 1]);
    }

    #[test]
    fn ingest_rejects_duplicate_ids() {
        let mut state = feed_with(&[1]);
        let mut reducer = FeedReducer::new(&mut state);

        let result = reducer.ingest(item(1, "Bisnis"), None);

        assert_eq!(result, Err(FeedError::DuplicateItem(ItemId(1))));
        assert_eq!(state.len(), 1);
        assert_eq!(state.items[0].category, "Teknologi");
    }

    #[test]
    fn ingest_with_cap_evicts_oldest() {
        let mut state = feed_with(&[1, 2, 3]);
        let mut reducer = FeedReducer::new(&mut state);

        let outcome = reducer.ingest(item(4, "Bisnis"), Some(2)).unwrap();

        assert_eq!(outcome.evicted, vec![ItemId(1), ItemId(2)]);
        let ids: Vec<_> = state.items.iter().map(|i| i.id.get()).collect();
        assert_eq!(ids, vec![4, 3]);
    }

    #[test]
    fn first_click_starts_fetch() {
        let mut state = feed_with(&[1]);
        let mut reducer = FeedReducer::new(&mut state);

        assert_eq!(reducer.click(ItemId(1)), ClickOutcome::FetchStarted);
        assert!(state.items[0].is_loading);
        assert_eq!(state.items[0].phase(), ItemPhase::Loading);
    }

    #[test]
    fn click_while_loading_is_a_no_op() {
        let mut state = feed_with(&[1]);
        FeedReducer::new(&mut state).click(ItemId(1));
        let before = state.clone();

        let outcome = FeedReducer::new(&mut state).click(ItemId(1));

        assert_eq!(outcome, ClickOutcome::AlreadyLoading);
        assert_eq!(state, before);
    }

    #[test]
    fn click_unknown_item() {
        let mut state = feed_with(&[1]);
        let before = state.clone();
        assert_eq!(
            FeedReducer::new(&mut state).click(ItemId(99)),
            ClickOutcome::NotFound
        );
        assert_eq!(state, before);
    }

    #[test]
    fn completed_fetch_reads_and_expands() {
        let mut state = feed_with(&[1]);
        let mut reducer = FeedReducer::new(&mut state);
        reducer.click(ItemId(1));

        let completion = reducer.complete_fetch(ItemId(1), "detail".into());

        assert_eq!(
            completion,
            Some(FetchCompletion {
                newly_read: true,
                read_count: 1
            })
        );
        let item = &state.items[0];
        assert!(!item.is_loading);
        assert!(item.is_read);
        assert!(item.is_expanded);
        assert_eq!(item.detail.as_deref(), Some("detail"));
        assert_eq!(item.phase(), ItemPhase::ReadExpanded);
        assert_eq!(state.read_count, 1);
    }

    #[test]
    fn toggling_never_touches_read_count() {
        let mut state = feed_with(&[1]);
        let mut reducer = FeedReducer::new(&mut state);
        reducer.click(ItemId(1));
        reducer.complete_fetch(ItemId(1), "detail".into());

        assert_eq!(
            reducer.click(ItemId(1)),
            ClickOutcome::Toggled { expanded: false }
        );
        assert_eq!(reducer.state().items[0].phase(), ItemPhase::ReadCollapsed);
        assert_eq!(
            reducer.click(ItemId(1)),
            ClickOutcome::Toggled { expanded: true }
        );

        assert_eq!(state.read_count, 1);
        assert_eq!(state.items[0].detail.as_deref(), Some("detail"));
    }

    #[test]
    fn completion_without_pending_fetch_is_ignored() {
        let mut state = feed_with(&[1]);
        let before = state.clone();

        assert_eq!(
            FeedReducer::new(&mut state).complete_fetch(ItemId(1), "late".into()),
            None
        );
        assert_eq!(
            FeedReducer::new(&mut state).complete_fetch(ItemId(42), "gone".into()),
            None
        );
        assert_eq!(state, before);
    }

    #[test]
    fn failed_fetch_returns_item_to_unread() {
        let mut state = feed_with(&[1]);
        let mut reducer = FeedReducer::new(&mut state);
        reducer.click(ItemId(1));

        assert!(reducer.fail_fetch(ItemId(1)));
        assert!(!reducer.fail_fetch(ItemId(1)));
        assert_eq!(reducer.state().items[0].phase(), ItemPhase::Unread);

        // Retry goes through the fetch path again.
        assert_eq!(reducer.click(ItemId(1)), ClickOutcome::FetchStarted);
        assert_eq!(state.read_count, 0);
    }

    #[test]
    fn read_count_counts_each_item_once() {
        let mut state = feed_with(&[1, 2]);
        let mut reducer = FeedReducer::new(&mut state);

        for id in [1, 2] {
            reducer.click(ItemId(id));
            reducer.complete_fetch(ItemId(id), format!("d{id}"));
        }
        for _ in 0..3 {
            reducer.click(ItemId(1));
        }

        assert_eq!(state.read_count, 2);
        assert!(state.items.iter().all(|i| !i.is_read || i.detail.is_some()));
    }

    #[test]
    fn set_filter_reports_changes() {
        let mut state = FeedState::new();
        let mut reducer = FeedReducer::new(&mut state);

        assert!(reducer.set_filter(Some("Bisnis".into())));
        assert!(!reducer.set_filter(Some("Bisnis".into())));
        assert!(reducer.set_filter(None));
        assert_eq!(state.active_filter, None);
    }
}
