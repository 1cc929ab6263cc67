/// Chat Bulk Delete - Chrome Extension for clearing out chat conversations
/// Built with Rust + WASM + Yew

pub mod bridge;
pub mod client;
pub mod config;
pub mod conversation;
pub mod error;
pub mod identity;
pub mod orchestrator;
pub mod pacing;
pub mod scanner;
pub mod selection;
pub mod ui;

#[cfg(test)]
mod testing;

use std::rc::Rc;
use wasm_bindgen::prelude::*;

// Set up panic hook for better error messages in the browser console
#[wasm_bindgen(start)]
pub fn main() {
    console_error_panic_hook::set_once();
    wasm_logger::init(wasm_logger::Config::default());
}

// Start the Yew app for the popup
#[wasm_bindgen]
pub fn start_popup() {
    yew::Renderer::<ui::popup::App>::new().render();
}

// Start the popup with a partial JSON config override
#[wasm_bindgen]
pub fn start_popup_with_config(config_json: &str) -> Result<(), JsValue> {
    let config = config::DeleteConfig::from_json(config_json)
        .map_err(|e| JsValue::from_str(&e.to_string()))?;

    yew::Renderer::<ui::popup::App>::with_props(ui::popup::PopupProps {
        config: Rc::new(config),
    })
    .render();

    Ok(())
}
