//! Demo Data
//!
//! Embedded location catalog and simulated async loaders for the demo form.

use std::collections::HashMap;
use std::sync::OnceLock;

use gloo_timers::future::TimeoutFuture;
use serde::Deserialize;

use crate::autocomplete::matching::filter_suggestions;
use crate::error::SearchError;
use crate::models::Suggestion;

/// Simulated backend latency
const LOAD_LATENCY_MS: u32 = 250;
const SEARCH_LATENCY_MS: u32 = 400;

const CATALOG_JSON: &str = include_str!("../assets/locations.json");

#[derive(Debug, Default, Deserialize)]
pub struct LocationCatalog {
    pub countries: Vec<Suggestion>,
    #[serde(default)]
    pub regions: HashMap<String, Vec<Suggestion>>,
    #[serde(default)]
    pub cities: HashMap<String, Vec<Suggestion>>,
    #[serde(default)]
    pub tags: Vec<Suggestion>,
}

static CATALOG: OnceLock<LocationCatalog> = OnceLock::new();

pub fn catalog() -> &'static LocationCatalog {
    CATALOG.get_or_init(|| {
        serde_json::from_str(CATALOG_JSON).unwrap_or_else(|err| {
            log::error!("location catalog is invalid: {err}");
            LocationCatalog::default()
        })
    })
}

pub async fn load_countries() -> Vec<Suggestion> {
    TimeoutFuture::new(LOAD_LATENCY_MS).await;
    catalog().countries.clone()
}

pub async fn load_regions(country_id: String) -> Vec<Suggestion> {
    TimeoutFuture::new(LOAD_LATENCY_MS).await;
    catalog().regions.get(&country_id).cloned().unwrap_or_default()
}

pub async fn load_cities(region_id: String) -> Vec<Suggestion> {
    TimeoutFuture::new(LOAD_LATENCY_MS).await;
    catalog().cities.get(&region_id).cloned().unwrap_or_default()
}

/// Remote tag lookup. Queries containing `!` are rejected so the error
/// path can be tried from the page.
pub async fn search_tags(query: String) -> Result<Vec<Suggestion>, SearchError> {
    TimeoutFuture::new(SEARCH_LATENCY_MS).await;
    match_tags(&query)
}

fn match_tags(query: &str) -> Result<Vec<Suggestion>, SearchError> {
    if query.contains('!') {
        return Err(SearchError::Failed(format!("tag service rejected '{query}'")));
    }
    Ok(filter_suggestions(&catalog().tags, query))
}
