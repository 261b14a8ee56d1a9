//! Chat App — WASM entry point.
//!
//! This crate is the composition root (DI wiring layer).
//! It assembles the platform adapters and hands them to the egui UI.

mod app;

use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;

use chat_types::config::{persona_id_from_path, ChatConfig};

/// WASM entry point — called from index.html
#[wasm_bindgen(start)]
pub async fn main() {
    // Initialize logging
    wasm_logger::init(wasm_logger::Config::default());
    log::info!("Persona chat starting...");

    let web_options = eframe::WebOptions::default();

    // Get the canvas element by ID
    let canvas = gloo_utils::document()
        .get_element_by_id("chat_canvas")
        .expect("No canvas element with id 'chat_canvas'")
        .dyn_into::<web_sys::HtmlCanvasElement>()
        .expect("Element is not a canvas");

    let mut config = ChatConfig::default();
    if let Some(api_base) = canvas.get_attribute("data-api-base") {
        config = config.with_api_base(api_base);
    }
    if let Some(backend) = canvas.get_attribute("data-backend") {
        match backend.parse() {
            Ok(backend) => config = config.with_backend(backend),
            Err(e) => log::warn!("Ignoring data-backend: {}", e),
        }
    }

    let path = gloo_utils::window()
        .location()
        .pathname()
        .unwrap_or_default();
    let persona_id = match persona_id_from_path(&path) {
        Some(id) => id,
        None => {
            log::warn!("No persona in path {:?}; nothing to chat with", path);
            return;
        }
    };

    wasm_bindgen_futures::spawn_local(async move {
        eframe::WebRunner::new()
            .start(
                canvas,
                web_options,
                Box::new(move |cc| Ok(Box::new(app::ChatApp::new(cc, config, persona_id)))),
            )
            .await
            .expect("Failed to start eframe");
    });
}
