//! WASM entry point for the HouseScraper page
//!
//! Binds the page's form (or its `submit-button`) once the document is ready.
//! All handler logic lives in `scrape-client-core`; this crate only supplies
//! the browser side: DOM access, `fetch`, the console and the local executor.
//!
//! ## Usage (JavaScript)
//!
//! ```javascript
//! import init, { install_submit_button } from './pkg/housescraper_wasm.js';
//!
//! await init();              // binds the first <form> to POST /scrape
//! install_submit_button();   // pages that only carry #submit-button
//! ```

pub mod console;
pub mod dom;
pub mod fetch;

use std::rc::Rc;

use scrape_client_core::{
    app, button_click, FormSubmitHandler, HandlerConfig, LocalTask, Spawner,
};
use wasm_bindgen::prelude::*;

pub use console::ConsoleDiagnostics;
pub use dom::WebDocument;
pub use fetch::FetchTransport;

/// Runs tasks on the browser's microtask queue
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalSpawner;

impl Spawner for LocalSpawner {
    fn spawn_local(&self, task: LocalTask) {
        wasm_bindgen_futures::spawn_local(task);
    }
}

#[wasm_bindgen(start)]
pub fn main() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();

    WebDocument::from_window()?.when_content_ready(|| {
        if let Err(err) = install_scrape_form(JsValue::UNDEFINED) {
            web_sys::console::error_2(&"Failed to install scrape form:".into(), &err);
        }
    })
}

/// Bind the first form on the page to `POST /scrape`.
///
/// `config` is an optional object overriding `HandlerConfig` fields
/// (`endpoint`, `formSelector`, `readyMessage`, ...). Returns whether a form
/// was found.
#[wasm_bindgen]
pub fn install_scrape_form(config: JsValue) -> Result<bool, JsValue> {
    let config = parse_config(config)?;
    let document = WebDocument::from_window()?;
    let handler = FormSubmitHandler::new(config, FetchTransport, ConsoleDiagnostics, LocalSpawner);

    Ok(app::on_content_ready(&document, &handler).is_attached())
}

/// Bind the `submit-button` element to a console message.
///
/// Returns whether the element was found.
#[wasm_bindgen]
pub fn install_submit_button(config: JsValue) -> Result<bool, JsValue> {
    let config = parse_config(config)?;
    let document = WebDocument::from_window()?;

    Ok(button_click::register(&document, &config, Rc::new(ConsoleDiagnostics)).is_attached())
}

/// Get the library version
#[wasm_bindgen]
pub fn get_version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

fn parse_config(config: JsValue) -> Result<HandlerConfig, JsValue> {
    if config.is_undefined() || config.is_null() {
        return Ok(HandlerConfig::default());
    }
    serde_wasm_bindgen::from_value(config)
        .map_err(|e| JsValue::from_str(&format!("Invalid handler config: {}", e)))
}


#[cfg(target_arch = "wasm32")]
mod wasm_tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    fn mount(html: &str) {
        let document = web_sys::window().unwrap().document().unwrap();
        document.body().unwrap().set_inner_html(html);
    }

    #[wasm_bindgen_test]
    fn test_parse_config_defaults() {
        assert_eq!(parse_config(JsValue::UNDEFINED).unwrap(), HandlerConfig::default());
        assert_eq!(parse_config(JsValue::NULL).unwrap(), HandlerConfig::default());
    }

    #[wasm_bindgen_test]
    fn test_parse_config_override() {
        let overrides = js_sys::JSON::parse(r#"{"buttonId": "go"}"#).unwrap();
        let config = parse_config(overrides).unwrap();
        assert_eq!(config.button_id, "go");
        assert_eq!(config.endpoint, "/scrape");
    }

    #[wasm_bindgen_test]
    fn test_parse_config_rejects_wrong_types() {
        let overrides = js_sys::JSON::parse(r#"{"endpoint": 5}"#).unwrap();
        assert!(parse_config(overrides).is_err());
    }

    #[wasm_bindgen_test]
    fn test_install_without_targets() {
        mount("<p>No form here</p>");
        assert!(!install_scrape_form(JsValue::UNDEFINED).unwrap());
        assert!(!install_submit_button(JsValue::UNDEFINED).unwrap());
    }

    #[wasm_bindgen_test]
    fn test_install_with_targets() {
        mount(r#"<form><input name="location" value="Austin"></form><button id="submit-button">Go</button>"#);
        assert!(install_scrape_form(JsValue::UNDEFINED).unwrap());
        assert!(install_submit_button(JsValue::UNDEFINED).unwrap());
    }
}
