//! Food Rescue Frontend Entry Point

mod api;
mod app;
mod auth;
mod cart;
mod components;
mod config;
mod context;
mod error;
mod listing;
mod models;
mod sample;
mod storage;
mod store;

use app::App;
use config::AppConfig;
use leptos::prelude::*;

fn main() {
    console_error_panic_hook::set_once();
    let config = AppConfig::from_build_env();
    if console_logger::init(config.log_level).is_err() {
        web_sys::console::warn_1(&"logger was already initialised".into());
    }
    log::info!("[main] starting against {}", config.api_url);
    mount_to_body(move || view! { <App config=config.clone() /> });
}
