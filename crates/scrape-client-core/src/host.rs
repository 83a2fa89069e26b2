//! Capabilities the handlers need from their host
//!
//! The browser implements these over `web-sys`; tests implement them over an
//! in-memory document. Handlers never touch the DOM any other way.

use futures::future::LocalBoxFuture;

use crate::error::RequestFailure;
use crate::payload::FormPayload;
use crate::response::ScrapeResponse;

pub type SubmitListener = Box<dyn FnMut(&dyn SubmitEvent)>;
pub type ClickListener = Box<dyn FnMut()>;
pub type LocalTask = LocalBoxFuture<'static, ()>;

/// Read-only view of the page used at content-ready time
pub trait Document {
    type Form: FormTarget;
    type Element: ClickTarget;

    /// First form matching `selector`, if any
    fn query_form(&self, selector: &str) -> Option<Self::Form>;

    fn element_by_id(&self, id: &str) -> Option<Self::Element>;
}

pub trait FormTarget {
    fn add_submit_listener(&self, listener: SubmitListener);
}

pub trait ClickTarget {
    fn add_click_listener(&self, listener: ClickListener);
}

/// A form submission as delivered to a listener
pub trait SubmitEvent {
    /// Stop the browser from navigating to the form's action
    fn prevent_default(&self);

    /// Snapshot of the submitting form's fields
    fn payload(&self) -> FormPayload;
}

/// Outbound HTTP
pub trait Transport {
    /// POST `payload` as multipart form data to `path` and return the body text.
    /// The status code is not inspected.
    fn post_form(
        &self,
        path: &str,
        payload: FormPayload,
    ) -> LocalBoxFuture<'static, Result<String, RequestFailure>>;
}

/// Developer-facing console
pub trait Diagnostics {
    fn info(&self, message: &str);
    fn value(&self, response: &ScrapeResponse);
    fn error(&self, message: &str);
}

/// Runs a `!Send` task on the page's event loop
pub trait Spawner {
    fn spawn_local(&self, task: LocalTask);
}
