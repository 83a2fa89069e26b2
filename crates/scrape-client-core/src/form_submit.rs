//! Submit handler for the scrape form
//!
//! On submission the default navigation is suppressed, the form is
//! serialized, and the payload is POSTed to the configured endpoint. The
//! decoded response goes to the diagnostic stream; so does any failure.
//! Nothing is retried and nothing is shown to the user.

use std::rc::Rc;

use crate::config::HandlerConfig;
use crate::host::{Diagnostics, Document, FormTarget, LocalTask, Spawner, SubmitEvent, Transport};
use crate::response::ScrapeResponse;
use crate::Registration;

pub struct FormSubmitHandler<T, L, S> {
    config: HandlerConfig,
    transport: T,
    diagnostics: Rc<L>,
    spawner: S,
}

impl<T, L, S> FormSubmitHandler<T, L, S>
where
    T: Transport + 'static,
    L: Diagnostics + 'static,
    S: Spawner + 'static,
{
    pub fn new(config: HandlerConfig, transport: T, diagnostics: L, spawner: S) -> Rc<Self> {
        Rc::new(Self {
            config,
            transport,
            diagnostics: Rc::new(diagnostics),
            spawner,
        })
    }

    pub fn config(&self) -> &HandlerConfig {
        &self.config
    }

    pub fn diagnostics(&self) -> &L {
        &self.diagnostics
    }

    /// Handle one submission and return the pending request.
    ///
    /// The default action is suppressed and the payload captured before the
    /// request is issued. Every call issues exactly one request.
    pub fn submit(&self, event: &dyn SubmitEvent) -> LocalTask {
        event.prevent_default();
        let payload = event.payload();

        tracing::debug!(
            endpoint = %self.config.endpoint,
            fields = payload.len(),
            "Posting form payload"
        );

        let request = self.transport.post_form(&self.config.endpoint, payload);
        let diagnostics = Rc::clone(&self.diagnostics);

        Box::pin(async move {
            let outcome = request
                .await
                .and_then(|body| ScrapeResponse::from_body(&body));

            match outcome {
                // The page does not render scraped listings yet; the response is only logged.
                Ok(response) => diagnostics.value(&response),
                Err(err) => {
                    tracing::warn!("Scrape request failed: {}", err);
                    diagnostics.error(&format!("Error: {}", err));
                }
            }
        })
    }
}

/// Attach the submit handler to the first form on the page.
///
/// A page without a form is not an error: the feature is simply off.
pub fn register<D, T, L, S>(document: &D, handler: &Rc<FormSubmitHandler<T, L, S>>) -> Registration
where
    D: Document,
    T: Transport + 'static,
    L: Diagnostics + 'static,
    S: Spawner + 'static,
{
    let Some(form) = document.query_form(&handler.config.form_selector) else {
        tracing::debug!(selector = %handler.config.form_selector, "No form found, submit handler skipped");
        return Registration::Skipped;
    };

    let handler = Rc::clone(handler);
    form.add_submit_listener(Box::new(move |event: &dyn SubmitEvent| {
        let task = handler.submit(event);
        handler.spawner.spawn_local(task);
    }));

    tracing::debug!("Submit handler attached");
    Registration::Attached
}
