//! Autocomplete Input Component
//!
//! Text field with a suggestion dropdown. Renders one wrapper holding the
//! visible field, a hidden field carrying the bound id, the dropdown and an
//! inline error element, and registers itself with the enclosing form.

use leptos::html;
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::autocomplete::debounce::Debouncer;
use crate::autocomplete::render::{dropdown_view, DropdownView, LOADING_TEXT, NO_DATA_TEXT};
use crate::autocomplete::state::{AutocompleteState, BlurOutcome, KeyOutcome, NavKey, SearchOutcome};
use crate::autocomplete::{AutocompleteHandle, AutocompleteOptions};
use crate::context::use_form;
use crate::error::SetupError;
use crate::models::Suggestion;

/// Autocomplete text input
///
/// Props:
/// - field_id: id of the text field, also the registry key and hidden field name
/// - label: optional caption above the field
/// - options: configuration plus `on_select` / `on_search`
/// - suggestions: initial candidates
#[component]
pub fn AutocompleteInput(
    #[prop(into)] field_id: String,
    #[prop(optional, into)] label: Option<String>,
    #[prop(optional)] options: AutocompleteOptions,
    #[prop(optional)] suggestions: Vec<Suggestion>,
) -> impl IntoView {
    let form = use_form();
    if field_id.trim().is_empty() {
        log::error!("{}", SetupError::MissingFieldId);
        return view! { <div></div> }.into_any();
    }

    let AutocompleteOptions { config, on_select, on_search } = options;
    let state = RwSignal::new(AutocompleteState::new(&config));
    let handle = AutocompleteHandle::new(state, on_select);

    if let Some(form) = form {
        if let Err(err) = form.register(&field_id, handle) {
            log::error!("{err}");
            return view! { <div></div> }.into_any();
        }
        let registered_id = field_id.clone();
        on_cleanup(move || form.unregister(&registered_id));
    }

    if !suggestions.is_empty() {
        handle.set_suggestions(suggestions);
    }

    let debounce_ms = config.debounce_ms;
    let blur_delay_ms = config.blur_delay_ms;
    let search = StoredValue::new_local(on_search);
    let input_timer = StoredValue::new_local(Debouncer::default());
    let blur_timer = StoredValue::new_local(Debouncer::default());
    let wrapper_ref = NodeRef::<html::Div>::new();
    let input_ref = NodeRef::<html::Input>::new();

    // Debounced reaction to the latest text: remote search or local filter
    let run_query = move || {
        let has_source = search.try_with_value(Option::is_some).unwrap_or(false);
        let remote = state.try_with_untracked(|s| s.wants_remote(has_source));
        if remote != Some(true) {
            state.try_update(AutocompleteState::filter_local);
            return;
        }

        let Some(query) = state.try_with_untracked(|s| s.current_value().to_string()) else {
            return;
        };
        let Some(ticket) = state.try_update(AutocompleteState::begin_search).flatten() else {
            return;
        };
        let Some(pending) = search
            .try_with_value(|source| source.as_ref().map(|f| f(query.clone())))
            .flatten()
        else {
            return;
        };

        spawn_local(async move {
            let result = pending.await;
            match state.try_update(|s| s.finish_search(ticket, &query, result)) {
                Some(SearchOutcome::Applied(count)) => {
                    log::debug!("search '{query}' returned {count} matches");
                }
                Some(SearchOutcome::Failed(message)) => {
                    log::error!("search '{query}' failed: {message}");
                }
                Some(SearchOutcome::Stale) => log::debug!("dropped stale results for '{query}'"),
                None => {}
            }
        });
    };

    let show_all = move || {
        state.try_update(AutocompleteState::show_all);
    };

    let focus_field_id = field_id.clone();
    let click_field_id = field_id.clone();
    let blur_field_id = field_id.clone();

    // Scroll the highlighted item into view when navigation moves it
    let highlighted = Memo::new(move |_| state.with(AutocompleteState::selected_index));
    Effect::new(move |_| {
        if let Some(index) = highlighted.get() {
            request_animation_frame(move || scroll_to_item(wrapper_ref, index));
        }
    });

    let on_pick = Callback::new(move |index: usize| {
        input_timer.update_value(Debouncer::cancel);
        handle.select_index(index);
    });

    view! {
        <div class="autocomplete-wrapper" node_ref=wrapper_ref>
            {label.map(|text| view! { <span class="autocomplete-label">{text}</span> })}
            <input
                type="text"
                id=field_id.clone()
                class="autocomplete-input"
                autocomplete="off"
                node_ref=input_ref
                placeholder=move || state.with(|s| s.placeholder().to_string())
                prop:disabled=move || state.with(AutocompleteState::is_disabled)
                prop:value=move || state.with(|s| s.current_value().to_string())
                on:input=move |ev| {
                    let text = event_target_value(&ev);
                    state.update(|s| s.input_changed(text));
                    input_timer.update_value(|timer| timer.schedule(debounce_ms, run_query));
                }
                on:focus=move |_: web_sys::FocusEvent| {
                    blur_timer.update_value(Debouncer::cancel);
                    if state.with_untracked(AutocompleteState::is_disabled) {
                        return;
                    }
                    match form {
                        Some(form) => form.when_idle(&focus_field_id, show_all),
                        None => show_all(),
                    }
                }
                on:click=move |_: web_sys::MouseEvent| {
                    let ready = state.with_untracked(|s| !s.is_disabled() && !s.suggestions().is_empty());
                    if !ready {
                        return;
                    }
                    match form {
                        Some(form) => form.when_idle(&click_field_id, show_all),
                        None => show_all(),
                    }
                }
                on:blur=move |_: web_sys::FocusEvent| {
                    input_timer.update_value(Debouncer::cancel);
                    let field_id = blur_field_id.clone();
                    blur_timer.update_value(|timer| {
                        timer.schedule(blur_delay_ms, move || {
                            let inside = focus_within(wrapper_ref);
                            match state.try_update(|s| s.blur(inside)) {
                                Some(BlurOutcome::Committed(item)) => handle.notify(item),
                                Some(BlurOutcome::Cleared) => {
                                    log::debug!("'{field_id}' cleared unmatched text on blur");
                                }
                                _ => {}
                            }
                        })
                    });
                }
                on:keydown=move |ev: web_sys::KeyboardEvent| {
                    let Some(key) = NavKey::from_key(&ev.key()) else {
                        return;
                    };
                    match state.try_update(|s| s.handle_key(key)) {
                        Some(KeyOutcome::Moved) => ev.prevent_default(),
                        Some(KeyOutcome::Committed(item)) => {
                            ev.prevent_default();
                            input_timer.update_value(Debouncer::cancel);
                            handle.notify(item);
                        }
                        Some(KeyOutcome::Dismissed) => {
                            if let Some(input) = input_ref.get_untracked() {
                                let _ = input.blur();
                            }
                        }
                        Some(KeyOutcome::Ignored) | None => {}
                    }
                }
            />
            <input
                type="hidden"
                id=format!("{field_id}-value")
                name=field_id.clone()
                prop:value=move || state.with(|s| s.bound_value().to_string())
            />
            <SuggestionList dropdown_id=format!("{field_id}-dropdown") state=state on_pick=on_pick />
            <div
                id=format!("{field_id}-error")
                class="error-message"
                class:visible=move || state.with(|s| s.error().is_some())
            >
                {move || state.with(|s| s.error().map(str::to_string))}
            </div>
        </div>
    }
    .into_any()
}

/// Dropdown surface; content is rebuilt from scratch on every change.
#[component]
fn SuggestionList(
    #[prop(into)] dropdown_id: String,
    state: RwSignal<AutocompleteState>,
    on_pick: Callback<usize>,
) -> impl IntoView {
    let current = Memo::new(move |_| state.with(dropdown_view));

    view! {
        <div
            id=dropdown_id
            class="autocomplete-dropdown"
            class:open=move || current.with(|v| *v != DropdownView::Hidden)
        >
            {move || match current.get() {
                DropdownView::Hidden => view! { <div></div> }.into_any(),
                DropdownView::Loading => {
                    view! { <div class="autocomplete-loading">{LOADING_TEXT}</div> }.into_any()
                }
                DropdownView::Error(message) => {
                    view! { <div class="autocomplete-error">{message}</div> }.into_any()
                }
                DropdownView::NoData => {
                    view! { <div class="autocomplete-empty">{NO_DATA_TEXT}</div> }.into_any()
                }
                DropdownView::Items(items) => {
                    items
                        .into_iter()
                        .map(|item| {
                            let index = item.index;
                            view! {
                                <div
                                    class=if item.highlighted { "autocomplete-item selected" } else { "autocomplete-item" }
                                    data-index=index.to_string()
                                    on:mousedown=move |ev: web_sys::MouseEvent| {
                                        // keep focus in the field so blur does not race the pick
                                        ev.prevent_default();
                                        on_pick.run(index);
                                    }
                                >
                                    <span class="autocomplete-item-name">{item.name}</span>
                                    {item.description.map(|text| view! {
                                        <span class="autocomplete-item-description">{text}</span>
                                    })}
                                </div>
                            }
                        })
                        .collect_view()
                        .into_any()
                }
            }}
        </div>
    }
}

/// Whether focus currently sits inside the field wrapper
fn focus_within(wrapper: NodeRef<html::Div>) -> bool {
    let Some(wrapper) = wrapper.get_untracked() else {
        return false;
    };
    let Some(active) = document().active_element() else {
        return false;
    };
    let active: &web_sys::Node = &active;
    wrapper.contains(Some(active))
}

fn scroll_to_item(wrapper: NodeRef<html::Div>, index: usize) {
    let Some(wrapper) = wrapper.get_untracked() else {
        return;
    };
    let selector = format!(".autocomplete-item[data-index=\"{index}\"]");
    if let Ok(Some(item)) = wrapper.query_selector(&selector) {
        item.scroll_into_view_with_bool(false);
    }
}
