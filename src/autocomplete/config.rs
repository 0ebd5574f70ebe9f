//! Widget Configuration
//!
//! Plain settings deserializable from host-supplied JSON, plus the callbacks
//! that only Rust callers can provide.

use std::future::Future;
use std::pin::Pin;
use std::rc::Rc;

use leptos::prelude::Callback;
use serde::Deserialize;

use crate::autocomplete::AutocompleteHandle;
use crate::error::SearchError;
use crate::models::Suggestion;

pub const DEFAULT_DEBOUNCE_MS: u32 = 300;
pub const DEFAULT_BLUR_DELAY_MS: u32 = 200;

/// Future returned by a remote suggestion source
pub type SearchFuture = Pin<Box<dyn Future<Output = Result<Vec<Suggestion>, SearchError>>>>;

/// Remote lookup replacing local filtering. Receives the raw query.
pub type SearchFn = Rc<dyn Fn(String) -> SearchFuture>;

/// Fired on every commitment with the item and the widget that committed it
pub type SelectCallback = Callback<(Suggestion, AutocompleteHandle)>;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AutocompleteConfig {
    /// Quiet period before a text change is searched/filtered
    #[serde(rename = "debounceTime")]
    pub debounce_ms: u32,
    /// Delay before blur is processed so a pending pick can land first
    #[serde(rename = "blurDelay")]
    pub blur_delay_ms: u32,
    /// Shortest trimmed query sent to the remote source
    pub min_search_length: usize,
    /// Candidate id committed once, the first time it shows up
    pub default_select: Option<String>,
    /// Keep unmatched free text on blur
    pub accept_custom: bool,
    pub initial_disabled: bool,
    pub placeholder: String,
    /// Placeholder shown while disabled
    pub disabled_placeholder: Option<String>,
}

impl Default for AutocompleteConfig {
    fn default() -> Self {
        Self {
            debounce_ms: DEFAULT_DEBOUNCE_MS,
            blur_delay_ms: DEFAULT_BLUR_DELAY_MS,
            min_search_length: 0,
            default_select: None,
            accept_custom: false,
            initial_disabled: false,
            placeholder: String::new(),
            disabled_placeholder: None,
        }
    }
}

impl AutocompleteConfig {
    /// Parse a host-supplied JSON bundle; unknown keys are ignored.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

/// Everything needed to construct a widget
#[derive(Clone, Default)]
pub struct AutocompleteOptions {
    pub config: AutocompleteConfig,
    pub on_select: Option<SelectCallback>,
    pub on_search: Option<SearchFn>,
}

impl AutocompleteOptions {
    pub fn new(config: AutocompleteConfig) -> Self {
        Self {
            config,
            ..Default::default()
        }
    }

    pub fn on_select(mut self, callback: impl Fn((Suggestion, AutocompleteHandle)) + Send + Sync + 'static) -> Self {
        self.on_select = Some(Callback::new(callback));
        self
    }

    pub fn on_search<F, Fut>(mut self, search: F) -> Self
    where
        F: Fn(String) -> Fut + 'static,
        Fut: Future<Output = Result<Vec<Suggestion>, SearchError>> + 'static,
    {
        self.on_search = Some(Rc::new(move |query| Box::pin(search(query)) as SearchFuture));
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_defaults() {
        let config = AutocompleteConfig::from_json("{}").unwrap();
        assert_eq!(config, AutocompleteConfig::default());
        assert_eq!(config.debounce_ms, 300);
        assert_eq!(config.blur_delay_ms, 200);
        assert!(!config.accept_custom);
    }

    #[test]
    fn test_config_reads_host_keys() {
        let config = AutocompleteConfig::from_json(
            r#"{
                "debounceTime": 150,
                "minSearchLength": 2,
                "defaultSelect": "us",
                "acceptCustom": true,
                "initialDisabled": true,
                "disabledPlaceholder": "Select a country first",
                "somethingElse": 1
            }"#,
        )
        .unwrap();

        assert_eq!(config.debounce_ms, 150);
        assert_eq!(config.min_search_length, 2);
        assert_eq!(config.default_select.as_deref(), Some("us"));
        assert!(config.accept_custom);
        assert!(config.initial_disabled);
        assert_eq!(config.disabled_placeholder.as_deref(), Some("Select a country first"));
        assert_eq!(config.blur_delay_ms, DEFAULT_BLUR_DELAY_MS);
    }
}
