//! Browser console as the diagnostic stream

use scrape_client_core::{Diagnostics, ScrapeResponse};
use serde::Serialize;
use web_sys::console;

#[derive(Debug, Clone, Copy, Default)]
pub struct ConsoleDiagnostics;

impl Diagnostics for ConsoleDiagnostics {
    fn info(&self, message: &str) {
        console::log_1(&message.into());
    }

    fn value(&self, response: &ScrapeResponse) {
        // Log as a JS object so devtools can expand it.
        let serializer = serde_wasm_bindgen::Serializer::json_compatible();
        match response.serialize(&serializer) {
            Ok(value) => console::log_1(&value),
            Err(_) => console::log_1(&response.to_string().into()),
        }
    }

    fn error(&self, message: &str) {
        console::error_1(&message.into());
    }
}
