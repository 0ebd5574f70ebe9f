//! Dropdown projection
//!
//! What the dropdown shows is a pure function of the widget state.

use crate::autocomplete::state::AutocompleteState;

pub const LOADING_TEXT: &str = "Loading...";
pub const NO_DATA_TEXT: &str = "No matching data";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedItem {
    /// Position in the filtered list, dispatched back on pick
    pub index: usize,
    pub name: String,
    pub description: Option<String>,
    pub highlighted: bool,
}

/// Render states, highest precedence first
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DropdownView {
    Hidden,
    Loading,
    Error(String),
    NoData,
    Items(Vec<RenderedItem>),
}

pub fn dropdown_view(state: &AutocompleteState) -> DropdownView {
    if !state.is_open() {
        return DropdownView::Hidden;
    }
    if state.is_loading() {
        return DropdownView::Loading;
    }
    if let Some(message) = state.error() {
        return DropdownView::Error(message.to_string());
    }
    if state.filtered().is_empty() {
        return DropdownView::NoData;
    }

    let highlighted = state.selected_index();
    DropdownView::Items(
        state
            .filtered()
            .iter()
            .enumerate()
            .map(|(index, item)| RenderedItem {
                index,
                name: item.name.clone(),
                description: item.description.clone(),
                highlighted: highlighted == Some(index),
            })
            .collect(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::autocomplete::config::AutocompleteConfig;
    use crate::autocomplete::state::NavKey;
    use crate::error::SearchError;
    use crate::models::Suggestion;

    fn state_with(items: Vec<Suggestion>) -> AutocompleteState {
        let mut state = AutocompleteState::new(&AutocompleteConfig::default());
        state.set_suggestions(items);
        state
    }

    #[test]
    fn test_closed_dropdown_is_hidden() {
        let state = state_with(vec![Suggestion::new(1, "Apple")]);
        assert_eq!(dropdown_view(&state), DropdownView::Hidden);
    }

    #[test]
    fn test_loading_overrides_everything() {
        let mut state = state_with(vec![Suggestion::new(1, "Apple")]);
        state.show_all();
        state.input_changed("ap".into());
        assert!(state.begin_search().is_some());
        assert_eq!(dropdown_view(&state), DropdownView::Loading);
    }

    #[test]
    fn test_error_overrides_list() {
        let mut state = state_with(vec![Suggestion::new(1, "Apple")]);
        state.input_changed("ap".into());
        let ticket = state.begin_search().expect("edit pending");
        state.finish_search(ticket, "", Err(SearchError::Failed("offline".into())));
        assert_eq!(dropdown_view(&state), DropdownView::Error("offline".into()));
    }

    #[test]
    fn test_empty_filter_shows_placeholder() {
        let mut state = state_with(vec![Suggestion::new(1, "Apple")]);
        state.input_changed("zz".into());
        state.filter_local();
        assert_eq!(dropdown_view(&state), DropdownView::NoData);
    }

    #[test]
    fn test_items_carry_index_description_and_highlight() {
        let mut state = state_with(vec![
            Suggestion::new("us", "United States").with_description("North America"),
            Suggestion::new("uk", "United Kingdom"),
        ]);
        state.show_all();
        state.handle_key(NavKey::Down);
        state.handle_key(NavKey::Down);

        let DropdownView::Items(items) = dropdown_view(&state) else {
            panic!("expected items");
        };
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].description.as_deref(), Some("North America"));
        assert!(!items[0].highlighted);
        assert_eq!(items[1].index, 1);
        assert!(items[1].highlighted);
    }
}
