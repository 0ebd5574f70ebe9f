//! Public value API
//!
//! A `Copy` handle over one widget's reactive state. Every mutation runs
//! inside a single signal update; `on_select` fires afterwards so callbacks
//! may freely read or write any widget, this one included.

use leptos::prelude::*;

use crate::autocomplete::config::SelectCallback;
use crate::autocomplete::state::AutocompleteState;
use crate::models::{FieldValue, Suggestion};

#[derive(Clone, Copy)]
pub struct AutocompleteHandle {
    state: RwSignal<AutocompleteState>,
    on_select: Option<SelectCallback>,
}

impl AutocompleteHandle {
    pub fn new(state: RwSignal<AutocompleteState>, on_select: Option<SelectCallback>) -> Self {
        Self { state, on_select }
    }

    /// Run a state transition, `None` once the widget is disposed.
    pub(crate) fn transition<T>(&self, f: impl FnOnce(&mut AutocompleteState) -> T) -> Option<T> {
        self.state.try_update(f)
    }

    pub(crate) fn notify(&self, item: Suggestion) {
        log::debug!("committed '{}' ({})", item.name, item.id);
        if let Some(callback) = self.on_select {
            callback.run((item, *self));
        }
    }

    /// Replace the candidates. Commits the configured default the first
    /// time it appears.
    pub fn set_suggestions(&self, suggestions: Vec<Suggestion>) {
        if let Some(item) = self.transition(|s| s.set_suggestions(suggestions)).flatten() {
            self.notify(item);
        }
    }

    pub fn get_value(&self) -> FieldValue {
        self.state.with_untracked(AutocompleteState::value)
    }

    /// Commit `item`, or clear the field when `None`.
    pub fn set_value(&self, item: Option<Suggestion>, trigger_callback: bool) {
        let committed = self.transition(|s| s.set_value(item)).flatten();
        if let (Some(item), true) = (committed, trigger_callback) {
            self.notify(item);
        }
    }

    pub fn clear(&self) {
        self.transition(AutocompleteState::clear);
    }

    pub fn enable(&self) {
        self.transition(AutocompleteState::enable);
    }

    pub fn disable(&self) {
        self.transition(AutocompleteState::disable);
    }

    /// Commit the filtered item at `index` (dropdown pick).
    pub fn select_index(&self, index: usize) {
        if let Some(item) = self.transition(|s| s.commit_filtered(index)).flatten() {
            self.notify(item);
        }
    }
}
