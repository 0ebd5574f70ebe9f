use thiserror::Error;

/// Shown when a search fails without a usable message.
pub const SEARCH_FALLBACK_MESSAGE: &str = "Failed to load suggestions";

/// Errors raised while wiring a widget into the page
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SetupError {
    #[error("autocomplete field id is empty")]
    MissingFieldId,

    #[error("autocomplete field '{0}' is already registered")]
    DuplicateField(String),

    #[error("autocomplete element not found: {0}")]
    MissingElement(String),
}

/// Failure of an asynchronous suggestion search
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SearchError {
    #[error("{}", display_message(.0))]
    Failed(String),

    #[error("{}", SEARCH_FALLBACK_MESSAGE)]
    Unavailable,
}

fn display_message(message: &str) -> &str {
    if message.trim().is_empty() {
        SEARCH_FALLBACK_MESSAGE
    } else {
        message
    }
}
