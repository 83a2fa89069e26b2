//! Page-side handlers for the HouseScraper front end
//!
//! This crate holds the host-independent part of the page script:
//! - `form_submit`: posts the scrape form to `/scrape` and logs the response
//! - `button_click`: logs a fixed message when `submit-button` is clicked
//! - `app`: the content-ready entry point
//!
//! The DOM, `fetch` and the console are reached through the traits in
//! [`host`], so every handler can run against an in-memory document.

pub mod app;
pub mod button_click;
pub mod config;
pub mod error;
pub mod form_submit;
pub mod host;
pub mod payload;
pub mod response;

#[cfg(test)]
mod testing;

pub use app::on_content_ready;
pub use config::HandlerConfig;
pub use error::RequestFailure;
pub use form_submit::FormSubmitHandler;
pub use host::{
    ClickListener, ClickTarget, Diagnostics, Document, FormTarget, LocalTask, Spawner,
    SubmitEvent, SubmitListener, Transport,
};
pub use payload::{FormControl, FormPayload};
pub use response::ScrapeResponse;

/// Outcome of binding a handler at content-ready time
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Registration {
    /// Listener attached to the target element
    Attached,
    /// Target element absent; the feature is off for this page load
    Skipped,
}

impl Registration {
    pub fn is_attached(self) -> bool {
        matches!(self, Registration::Attached)
    }
}
