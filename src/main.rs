//! Seiyuu List Frontend Entry Point

mod app;
mod commands;
mod components;
mod config;
mod context;
mod dom;
mod error;
mod favorite;
mod models;
mod ranking;
mod sequence;

use config::AppConfig;
use console_logger::LogBuffer;

fn main() {
    console_error_panic_hook::set_once();

    let Some(document) = dom::document() else {
        return;
    };
    let config = AppConfig::from_document(&document);
    let logs = match console_logger::init(&config.logger()) {
        Ok(logs) => logs,
        Err(err) => {
            web_sys::console::warn_1(&format!("[BOOT] logging unavailable: {}", err).into());
            LogBuffer::new(0)
        }
    };

    app::mount_page(&document, &config, logs);
}
