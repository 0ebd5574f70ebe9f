//! Widget state machine
//!
//! Owns everything one autocomplete field knows and reacts to the input
//! signals (text change, focus, click, blur, key press, search responses).
//! It never touches the DOM: operations return outcomes and the view layer
//! turns them into side effects such as `on_select` or `blur()`.

use crate::autocomplete::config::AutocompleteConfig;
use crate::autocomplete::matching::{filter_suggestions, find_exact};
use crate::error::SearchError;
use crate::models::{FieldValue, Suggestion};

/// Identifies one issued search; only the latest one may land.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchTicket(u64);

/// Keys the dropdown reacts to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavKey {
    Down,
    Up,
    Enter,
    Escape,
}

impl NavKey {
    /// Map a `KeyboardEvent.key` value
    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "ArrowDown" => Some(Self::Down),
            "ArrowUp" => Some(Self::Up),
            "Enter" => Some(Self::Enter),
            "Escape" => Some(Self::Escape),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyOutcome {
    /// Dropdown closed or key has nothing to act on
    Ignored,
    /// Highlight moved (or stayed clamped at an end)
    Moved,
    Committed(Suggestion),
    /// Dropdown closed, field should lose focus
    Dismissed,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BlurOutcome {
    /// Text matched a candidate that was not committed yet
    Committed(Suggestion),
    /// Text already shows the committed candidate
    Unchanged,
    /// Unmatched free text left in place
    KeptCustom,
    /// Unmatched text removed
    Cleared,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchOutcome {
    Applied(usize),
    Failed(String),
    /// A newer search was issued after this one
    Stale,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AutocompleteState {
    suggestions: Vec<Suggestion>,
    filtered: Vec<Suggestion>,
    selected_index: Option<usize>,
    selected_item: Option<Suggestion>,
    current_value: String,
    bound_value: String,
    is_open: bool,
    is_loading: bool,
    error: Option<String>,
    disabled: bool,
    pending_default: Option<String>,
    accept_custom: bool,
    min_search_length: usize,
    placeholder: String,
    disabled_placeholder: Option<String>,
    search_seq: u64,
    /// Text changed since the last query ran, commit, clear or blur
    query_pending: bool,
}

impl AutocompleteState {
    pub fn new(config: &AutocompleteConfig) -> Self {
        Self {
            suggestions: Vec::new(),
            filtered: Vec::new(),
            selected_index: None,
            selected_item: None,
            current_value: String::new(),
            bound_value: String::new(),
            is_open: false,
            is_loading: false,
            error: None,
            disabled: config.initial_disabled,
            pending_default: config.default_select.clone(),
            accept_custom: config.accept_custom,
            min_search_length: config.min_search_length,
            placeholder: config.placeholder.clone(),
            disabled_placeholder: config.disabled_placeholder.clone(),
            search_seq: 0,
            query_pending: false,
        }
    }

    pub fn suggestions(&self) -> &[Suggestion] {
        &self.suggestions
    }

    pub fn filtered(&self) -> &[Suggestion] {
        &self.filtered
    }

    pub fn selected_index(&self) -> Option<usize> {
        self.selected_index
    }

    pub fn selected_item(&self) -> Option<&Suggestion> {
        self.selected_item.as_ref()
    }

    pub fn current_value(&self) -> &str {
        &self.current_value
    }

    pub fn bound_value(&self) -> &str {
        &self.bound_value
    }

    pub fn is_open(&self) -> bool {
        self.is_open
    }

    pub fn is_loading(&self) -> bool {
        self.is_loading
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn is_disabled(&self) -> bool {
        self.disabled
    }

    pub fn placeholder(&self) -> &str {
        match (&self.disabled_placeholder, self.disabled) {
            (Some(hint), true) => hint,
            _ => &self.placeholder,
        }
    }

    pub fn value(&self) -> FieldValue {
        FieldValue {
            label: self.current_value.clone(),
            value: self.bound_value.clone(),
            item: self.selected_item.clone(),
        }
    }

    // ========================
    // Input signals
    // ========================

    /// Text field changed. Drops a commitment the text no longer shows.
    pub fn input_changed(&mut self, text: String) {
        let diverged = self
            .selected_item
            .as_ref()
            .is_some_and(|item| item.name != text);
        if diverged {
            self.selected_item = None;
            self.bound_value.clear();
        }
        self.current_value = text;
        self.error = None;
        self.query_pending = true;
    }

    /// Whether the debounced query goes to the remote source
    pub fn wants_remote(&self, has_source: bool) -> bool {
        has_source && self.current_value.trim().chars().count() >= self.min_search_length
    }

    /// Debounced local filtering against the current text. Does nothing
    /// when no edit is pending, e.g. the field committed or blurred first.
    pub fn filter_local(&mut self) -> bool {
        if !self.query_pending {
            return false;
        }
        self.query_pending = false;
        self.filtered = filter_suggestions(&self.suggestions, &self.current_value);
        self.selected_index = None;
        self.is_open = true;
        true
    }

    /// Focus/click: list every candidate regardless of the text.
    /// Returns false when the field is disabled.
    pub fn show_all(&mut self) -> bool {
        if self.disabled {
            return false;
        }
        self.filtered = self.suggestions.clone();
        self.selected_index = None;
        self.is_open = true;
        true
    }

    pub fn handle_key(&mut self, key: NavKey) -> KeyOutcome {
        if !self.is_open {
            return KeyOutcome::Ignored;
        }
        let last = self.filtered.len().checked_sub(1);
        match key {
            NavKey::Down => {
                self.selected_index = match (self.selected_index, last) {
                    (_, None) => None,
                    (None, Some(_)) => Some(0),
                    (Some(i), Some(last)) => Some((i + 1).min(last)),
                };
                KeyOutcome::Moved
            }
            NavKey::Up => {
                self.selected_index = match self.selected_index {
                    None | Some(0) => None,
                    Some(i) => Some(i - 1),
                };
                KeyOutcome::Moved
            }
            NavKey::Enter => match self.selected_index {
                Some(index) => self
                    .commit_filtered(index)
                    .map_or(KeyOutcome::Ignored, KeyOutcome::Committed),
                None => KeyOutcome::Ignored,
            },
            NavKey::Escape => {
                self.close();
                KeyOutcome::Dismissed
            }
        }
    }

    /// Delayed blur. `focus_within` tells whether focus stayed inside the
    /// field wrapper, in which case the dropdown remains open.
    pub fn blur(&mut self, focus_within: bool) -> BlurOutcome {
        let outcome = match find_exact(&self.suggestions, &self.current_value).cloned() {
            Some(item) if self.selected_item.as_ref() == Some(&item) => BlurOutcome::Unchanged,
            Some(item) => BlurOutcome::Committed(self.commit(item)),
            None if self.accept_custom && !self.current_value.trim().is_empty() => {
                BlurOutcome::KeptCustom
            }
            None => {
                self.clear_value();
                BlurOutcome::Cleared
            }
        };
        self.query_pending = false;
        if !focus_within {
            self.close();
        }
        outcome
    }

    // ========================
    // Async search
    // ========================

    /// Mark a new search in flight; any older one becomes stale.
    /// `None` when no edit is pending.
    pub fn begin_search(&mut self) -> Option<SearchTicket> {
        if !self.query_pending {
            return None;
        }
        self.query_pending = false;
        self.search_seq += 1;
        self.is_loading = true;
        self.error = None;
        self.is_open = true;
        Some(SearchTicket(self.search_seq))
    }

    pub fn finish_search(
        &mut self,
        ticket: SearchTicket,
        query: &str,
        result: Result<Vec<Suggestion>, SearchError>,
    ) -> SearchOutcome {
        if ticket.0 != self.search_seq {
            return SearchOutcome::Stale;
        }
        self.is_loading = false;
        match result {
            Ok(items) => {
                self.suggestions = items;
                self.filtered = filter_suggestions(&self.suggestions, query);
                self.selected_index = None;
                self.is_open = true;
                SearchOutcome::Applied(self.filtered.len())
            }
            Err(err) => {
                let message = err.to_string();
                self.error = Some(message.clone());
                self.is_open = true;
                SearchOutcome::Failed(message)
            }
        }
    }

    // ========================
    // Value API
    // ========================

    /// Replace the candidates wholesale. Returns the default item if it was
    /// committed by this call; the default fires at most once.
    pub fn set_suggestions(&mut self, suggestions: Vec<Suggestion>) -> Option<Suggestion> {
        self.suggestions = suggestions;
        self.filtered = if self.selected_item.is_some() {
            self.suggestions.clone()
        } else {
            filter_suggestions(&self.suggestions, &self.current_value)
        };
        self.selected_index = None;

        let default_id = self.pending_default.as_deref()?;
        let item = self.suggestions.iter().find(|s| s.id == default_id).cloned()?;
        self.pending_default = None;
        Some(self.commit(item))
    }

    /// Commit an item, or clear the field when `None`.
    pub fn set_value(&mut self, item: Option<Suggestion>) -> Option<Suggestion> {
        match item {
            Some(item) => Some(self.commit(item)),
            None => {
                self.clear();
                None
            }
        }
    }

    pub fn commit_filtered(&mut self, index: usize) -> Option<Suggestion> {
        let item = self.filtered.get(index).cloned()?;
        Some(self.commit(item))
    }

    pub fn clear(&mut self) {
        self.clear_value();
        self.error = None;
        self.close();
    }

    pub fn disable(&mut self) {
        self.disabled = true;
        self.clear();
    }

    pub fn enable(&mut self) {
        self.disabled = false;
    }

    fn commit(&mut self, item: Suggestion) -> Suggestion {
        self.current_value = item.name.clone();
        self.bound_value = item.id.clone();
        self.selected_item = Some(item.clone());
        self.error = None;
        self.query_pending = false;
        self.cancel_search();
        self.close();
        item
    }

    fn clear_value(&mut self) {
        self.current_value.clear();
        self.bound_value.clear();
        self.selected_item = None;
        self.query_pending = false;
        self.cancel_search();
    }

    fn cancel_search(&mut self) {
        if self.is_loading {
            self.search_seq += 1;
            self.is_loading = false;
        }
    }

    fn close(&mut self) {
        self.is_open = false;
        self.selected_index = None;
    }
}
