#![allow(warnings)]
//! CRM Frontend Entry Point

mod app;
mod browser;
mod components;
mod context;
mod markdown;
mod pages;
mod store;

use app::App;
use leptos::prelude::*;
use rolling_logger::{LogRecord, DEFAULT_CAPACITY};
use tracing::Level;

/// Mirror tracing output to the devtools console
fn console_sink(record: &LogRecord) {
    let line = wasm_bindgen::JsValue::from_str(&record.to_string());
    match record.level.as_str() {
        "ERROR" => web_sys::console::error_1(&line),
        "WARN" => web_sys::console::warn_1(&line),
        _ => web_sys::console::log_1(&line),
    }
}

fn main() {
    console_error_panic_hook::set_once();

    let max_level = if cfg!(debug_assertions) { Level::DEBUG } else { Level::INFO };
    let logs = match rolling_logger::init_with_sink(DEFAULT_CAPACITY, max_level, console_sink) {
        Ok(buffer) => Some(buffer),
        Err(e) => {
            web_sys::console::warn_1(&format!("[MAIN] Logger not installed: {}", e).into());
            None
        }
    };

    mount_to_body(move || view! { <App logs=logs /> });
}
