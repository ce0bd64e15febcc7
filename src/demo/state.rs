//! State for the demo screen.

use std::sync::Arc;

use serde::Serialize;

use crate::mvi::UiState;

/// Maximum number of history snapshots kept for undo/redo.
pub const MAX_HISTORY: usize = 50;

/// Items per page. A page shorter than this means the list is exhausted.
pub const PAGE_SIZE: usize = 10;

/// One row of the demo list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ListItem {
    pub id: String,
    pub title: String,
    pub subtitle: String,
}

impl ListItem {
    pub fn new(id: impl Into<String>, title: impl Into<String>, subtitle: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            subtitle: subtitle.into(),
        }
    }

    /// Generated item number `index` (1-based).
    pub fn numbered(index: usize) -> Self {
        Self::new(
            format!("item_{index}"),
            format!("Item {index}"),
            format!("This is item {index}"),
        )
    }

    /// Case-sensitive substring match on title or subtitle.
    pub fn matches(&self, query: &str) -> bool {
        self.title.contains(query) || self.subtitle.contains(query)
    }
}

/// Everything the demo screen renders.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DemoState {
    pub count: i64,
    pub toast_message: Option<String>,

    pub is_loading: bool,
    pub loading_message: Option<String>,

    pub error_message: Option<String>,

    pub items: Vec<ListItem>,

    pub search_text: String,
    pub search_results: Vec<ListItem>,

    /// 1-based.
    pub current_page: u32,
    pub has_more_pages: bool,

    pub input_text: String,
    pub input_error: Option<String>,

    /// Undo/redo snapshots. Entries never carry their own history.
    #[serde(skip)]
    pub history: Vec<Arc<DemoState>>,
    /// Position in `history`, -1 when empty.
    pub history_index: i32,
}

impl Default for DemoState {
    fn default() -> Self {
        Self {
            count: 0,
            toast_message: None,
            is_loading: false,
            loading_message: None,
            error_message: None,
            items: Vec::new(),
            search_text: String::new(),
            search_results: Vec::new(),
            current_page: 1,
            has_more_pages: true,
            input_text: String::new(),
            input_error: None,
            history: Vec::new(),
            history_index: -1,
        }
    }
}

impl UiState for DemoState {}

impl DemoState {
    /// Items to show: search results while a query is active.
    pub fn display_items(&self) -> &[ListItem] {
        if self.search_text.is_empty() {
            &self.items
        } else {
            &self.search_results
        }
    }

    pub fn can_undo(&self) -> bool {
        self.history_index > 0
    }

    pub fn can_redo(&self) -> bool {
        (self.history_index as i64) < self.history.len() as i64 - 1
    }

    pub fn history_len(&self) -> usize {
        self.history.len()
    }

    /// Copy of this state without its history, for storing in history.
    pub fn snapshot(&self) -> DemoState {
        DemoState {
            count: self.count,
            toast_message: self.toast_message.clone(),
            is_loading: self.is_loading,
            loading_message: self.loading_message.clone(),
            error_message: self.error_message.clone(),
            items: self.items.clone(),
            search_text: self.search_text.clone(),
            search_results: self.search_results.clone(),
            current_page: self.current_page,
            has_more_pages: self.has_more_pages,
            input_text: self.input_text.clone(),
            input_error: self.input_error.clone(),
            history: Vec::new(),
            history_index: -1,
        }
    }

    /// Swap in the snapshot at `index`, keeping the live history.
    ///
    /// Out-of-range indices leave the state as it is.
    pub(crate) fn restore_from_history(self, index: i32) -> DemoState {
        let snapshot = usize::try_from(index)
            .ok()
            .and_then(|position| self.history.get(position))
            .cloned();
        let Some(snapshot) = snapshot else {
            return self;
        };
        let mut restored = snapshot.as_ref().clone();
        restored.history = self.history;
        restored.history_index = index;
        restored
    }

    /// One-line summary for logs and the CLI.
    pub fn summary(&self) -> String {
        let mut parts = vec![
            format!("count={}", self.count),
            format!("items={}", self.items.len()),
            format!("page={}", self.current_page),
            format!("history={}/{}", self.history_index, self.history.len()),
        ];
        if self.is_loading {
            parts.push(format!(
                "loading({})",
                self.loading_message.as_deref().unwrap_or("")
            ));
        }
        if !self.search_text.is_empty() {
            parts.push(format!(
                "search={:?} results={}",
                self.search_text,
                self.search_results.len()
            ));
        }
        if let Some(toast) = &self.toast_message {
            parts.push(format!("toast={toast:?}"));
        }
        if let Some(error) = &self.error_message {
            parts.push(format!("error={error:?}"));
        }
        if let Some(error) = &self.input_error {
            parts.push(format!("input_error={error:?}"));
        }
        parts.join(" ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn items(n: usize) -> Vec<ListItem> {
        (1..=n).map(ListItem::numbered).collect()
    }

    #[test]
    fn default_matches_session_start() {
        let state = DemoState::default();
        assert_eq!(state.count, 0);
        assert_eq!(state.current_page, 1);
        assert!(state.has_more_pages);
        assert_eq!(state.history_index, -1);
        assert!(!state.can_undo());
        assert!(!state.can_redo());
    }

    #[test]
    fn display_items_follow_search_text() {
        let mut state = DemoState {
            items: items(3),
            search_results: items(1),
            ..DemoState::default()
        };
        assert_eq!(state.display_items().len(), 3);

        state.search_text = "Item 1".into();
        assert_eq!(state.display_items().len(), 1);
    }

    #[test]
    fn numbered_items_are_unique() {
        let a = ListItem::numbered(1);
        let b = ListItem::numbered(2);
        assert_eq!(a.id, "item_1");
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn match_is_case_sensitive() {
        let item = ListItem::numbered(7);
        assert!(item.matches("Item 7"));
        assert!(item.matches("is item"));
        assert!(!item.matches("ITEM"));
    }

    #[test]
    fn snapshot_drops_history() {
        let inner = Arc::new(DemoState::default());
        let state = DemoState {
            count: 4,
            history: vec![inner],
            history_index: 0,
            ..DemoState::default()
        };
        let snap = state.snapshot();
        assert_eq!(snap.count, 4);
        assert!(snap.history.is_empty());
        assert_eq!(snap.history_index, -1);
    }

    #[test]
    fn restore_out_of_range_keeps_state() {
        let state = DemoState {
            count: 9,
            ..DemoState::default()
        };
        assert_eq!(state.clone().restore_from_history(0), state);
        assert_eq!(state.clone().restore_from_history(-1), state);
    }

    #[test]
    fn summary_mentions_errors() {
        let state = DemoState {
            error_message: Some("boom".into()),
            ..DemoState::default()
        };
        assert!(state.summary().contains("error=\"boom\""));
    }
}
