//! Browser Logging
//!
//! Installs the rolling logger with a sink that writes to the console.

use rolling_logger::{init_logger, DEFAULT_CAPACITY};
use tracing::level_filters::LevelFilter;
use tracing::Level;
use wasm_bindgen::JsValue;

const APP_NAME: &str = "TodoPlatform";

fn console_sink(level: Level, line: &str) {
    let value = JsValue::from_str(line);
    if level == Level::ERROR {
        web_sys::console::error_1(&value);
    } else if level == Level::WARN {
        web_sys::console::warn_1(&value);
    } else {
        web_sys::console::log_1(&value);
    }
}

pub fn init() {
    let level = if cfg!(debug_assertions) {
        LevelFilter::DEBUG
    } else {
        LevelFilter::INFO
    };
    match init_logger(APP_NAME, level, DEFAULT_CAPACITY, Some(console_sink)) {
        Ok(_) => tracing::info!(%level, "logger initialized"),
        Err(e) => web_sys::console::warn_1(&format!("[{}] logger init failed: {}", APP_NAME, e).into()),
    }
}
