//! Demo Form App
//!
//! Cascading Country → Region → City selects plus a remotely searched tag
//! field, all coordinated through one `FormContext`.

use std::future::Future;

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::autocomplete::{AutocompleteConfig, AutocompleteOptions};
use crate::components::AutocompleteInput;
use crate::context::FormContext;
use crate::demo_data;
use crate::models::Suggestion;

const REGION_FIELDS: &[&str] = &["region", "city"];
const CITY_FIELDS: &[&str] = &["city"];

/// After `source` commits: empty its dependents, load candidates for
/// `target`, then enable it. Focus on other fields waits until done. A load
/// overtaken by a newer commit of `source` is dropped.
fn cascade<Fut>(form: FormContext, source: &str, target: &'static str, dependents: &[&str], load: Fut)
where
    Fut: Future<Output = Vec<Suggestion>> + 'static,
{
    form.reset_dependents(dependents);
    let ticket = form.begin_cascade(source);
    let guard = match form.begin_selection(source) {
        Ok(guard) => Some(guard),
        Err(busy) => {
            log::warn!("'{source}' committed while '{}' is still loading", busy.holder);
            None
        }
    };

    spawn_local(async move {
        let items = load.await;
        if !ticket.is_some_and(|ticket| form.is_current_cascade(&ticket)) {
            log::debug!("dropped superseded candidates for '{target}'");
            drop(guard);
            return;
        }
        match form.field(target) {
            Some(field) => {
                log::info!("loaded {} candidates for '{target}'", items.len());
                field.set_suggestions(items);
                field.enable();
            }
            None => log::warn!("cascade target '{target}' is not registered"),
        }
        drop(guard);
    });
}

#[component]
pub fn App() -> impl IntoView {
    let form = FormContext::new();
    provide_context(form);

    let (submitted, set_submitted) = signal::<Option<String>>(None);

    let country_options = AutocompleteOptions::new(AutocompleteConfig {
        placeholder: "Choose a country".into(),
        default_select: Some("us".into()),
        ..Default::default()
    })
    .on_select(move |(country, _)| {
        cascade(form, "country", "region", REGION_FIELDS, demo_data::load_regions(country.id));
    });

    let region_options = AutocompleteOptions::new(AutocompleteConfig {
        placeholder: "Choose a region".into(),
        initial_disabled: true,
        disabled_placeholder: Some("Select a country first".into()),
        ..Default::default()
    })
    .on_select(move |(region, _)| {
        cascade(form, "region", "city", CITY_FIELDS, demo_data::load_cities(region.id));
    });

    let city_options = AutocompleteOptions::new(AutocompleteConfig {
        placeholder: "Choose a city".into(),
        initial_disabled: true,
        disabled_placeholder: Some("Select a region first".into()),
        ..Default::default()
    });

    let tag_options = AutocompleteOptions::new(AutocompleteConfig {
        placeholder: "Search delivery tags".into(),
        debounce_ms: 250,
        min_search_length: 1,
        accept_custom: true,
        ..Default::default()
    })
    .on_search(demo_data::search_tags);

    // Country data arrives after mount, which also applies the default
    Effect::new(move |_| {
        spawn_local(async move {
            let countries = demo_data::load_countries().await;
            if let Some(country) = form.field("country") {
                country.set_suggestions(countries);
            }
        });
    });

    let on_submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        let result = form.collect_values();
        let missing = result.missing();
        if !missing.is_empty() {
            log::warn!("submitted with empty fields: {}", missing.join(", "));
        }
        match serde_json::to_string_pretty(&result) {
            Ok(json) => set_submitted.set(Some(json)),
            Err(err) => log::error!("could not serialize form result: {err}"),
        }
    };

    let on_reset = move |_| {
        if let Some(country) = form.field("country") {
            country.set_value(None, false);
        }
        if let Some(tags) = form.field("tags") {
            tags.clear();
        }
        form.reset_dependents(REGION_FIELDS);
        set_submitted.set(None);
    };

    view! {
        <main class="demo-form">
            <h1>"Shipping destination"</h1>
            <form class="autocomplete-form" on:submit=on_submit>
                <AutocompleteInput field_id="country" label="Country" options=country_options />
                <AutocompleteInput field_id="region" label="Region" options=region_options />
                <AutocompleteInput field_id="city" label="City" options=city_options />
                <AutocompleteInput field_id="tags" label="Delivery tag" options=tag_options />
                <div class="form-actions">
                    <button type="submit">"Submit"</button>
                    <button type="button" on:click=on_reset>"Reset"</button>
                </div>
            </form>
            {move || submitted.get().map(|json| view! { <pre class="form-result">{json}</pre> })}
        </main>
    }
}
