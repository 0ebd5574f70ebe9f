//! Autocomplete Widget Core
//!
//! Configuration, matching, the state machine, the dropdown projection and
//! the public handle. DOM wiring lives in `components::AutocompleteInput`.

pub mod config;
pub mod debounce;
pub mod handle;
pub mod matching;
pub mod render;
pub mod state;

pub use config::{AutocompleteConfig, AutocompleteOptions};
pub use handle::AutocompleteHandle;
