//! Form Autocomplete Frontend Entry Point

mod app;
mod autocomplete;
mod components;
mod context;
mod demo_data;
mod error;
mod form;
mod logging;
mod models;

use app::App;
use leptos::prelude::*;

fn main() {
    console_error_panic_hook::set_once();
    logging::init(log::LevelFilter::Debug);
    mount_to_body(App);
}
