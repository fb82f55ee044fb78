mod api;
mod app;
mod browser;
mod components;
mod config;
mod controller;
mod error;
mod logging;
mod pages;
mod types;
mod validation;
mod view;

use leptos::prelude::*;

use app::App;

fn main() {
    console_error_panic_hook::set_once();
    logging::init("eco_scan=info");

    let config = browser::page_config();
    tracing::info!("Eco-Scan client starting, service at {}", config.api_base_url());
    browser::service_worker::register(&config.service_worker_script);

    leptos::mount::mount_to_body(move || view! { <App config=config.clone() /> });
}
