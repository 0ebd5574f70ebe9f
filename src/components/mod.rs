//! UI Components
//!
//! Reusable Leptos components.

mod autocomplete_input;

pub use autocomplete_input::AutocompleteInput;
