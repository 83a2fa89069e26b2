//! Content-ready entry point for the HouseScraper page

use std::rc::Rc;

use crate::form_submit::{self, FormSubmitHandler};
use crate::host::{Diagnostics, Document, Spawner, Transport};
use crate::Registration;

/// Bind the scrape form, then announce that the page is ready.
///
/// Not idempotent: every call attaches another submit listener.
pub fn on_content_ready<D, T, L, S>(
    document: &D,
    handler: &Rc<FormSubmitHandler<T, L, S>>,
) -> Registration
where
    D: Document,
    T: Transport + 'static,
    L: Diagnostics + 'static,
    S: Spawner + 'static,
{
    let registration = form_submit::register(document, handler);
    handler.diagnostics().info(&handler.config().ready_message);
    registration
}
