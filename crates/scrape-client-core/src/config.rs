//! Handler configuration
//!
//! Every field defaults to the values the HouseScraper page expects, so a
//! host can pass an empty or partial override object.

use serde::{Deserialize, Serialize};

pub const DEFAULT_ENDPOINT: &str = "/scrape";
pub const DEFAULT_FORM_SELECTOR: &str = "form";
pub const DEFAULT_BUTTON_ID: &str = "submit-button";
pub const DEFAULT_BUTTON_MESSAGE: &str = "Submit button clicked";
pub const DEFAULT_READY_MESSAGE: &str = "HouseScraper App is loaded and ready!";

/// Settings shared by the submit and click handlers
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct HandlerConfig {
    /// Path the form payload is POSTed to
    pub endpoint: String,
    /// Selector used to find the form (first match wins)
    pub form_selector: String,
    /// Id of the element the click handler binds to
    pub button_id: String,
    /// Message written on every button click
    pub button_message: String,
    /// Message written once the page entry point has run
    pub ready_message: String,
}

impl Default for HandlerConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            form_selector: DEFAULT_FORM_SELECTOR.to_string(),
            button_id: DEFAULT_BUTTON_ID.to_string(),
            button_message: DEFAULT_BUTTON_MESSAGE.to_string(),
            ready_message: DEFAULT_READY_MESSAGE.to_string(),
        }
    }
}
