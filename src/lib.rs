//! SearchMark: keyboard-driven search over browser bookmark folders.
//!
//! One wasm module backs all three extension contexts; each page calls its own entry point.

mod app;
pub mod background;
pub mod browser;
pub mod content;
pub mod error;
pub mod folder_search;
pub mod folder_tree;
pub mod host;
mod logging;
pub mod messages;
pub mod navigation;
mod scroll;
pub mod settings;
pub mod shortcuts;
pub mod toolbar;

use wasm_bindgen::prelude::*;

use settings::Settings;

fn bundled_settings() -> Settings {
    Settings::from_json(include_str!("../extension/settings.json"))
}

#[wasm_bindgen]
pub fn start_popup() {
    logging::init();
    app::mount(bundled_settings());
}

#[wasm_bindgen]
pub fn start_background() {
    logging::init();
    background::run();
}

#[wasm_bindgen]
pub fn start_content() {
    logging::init();
    content::run(bundled_settings());
}
