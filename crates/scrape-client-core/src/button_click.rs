//! Click logger for the `submit-button` element

use std::rc::Rc;

use crate::config::HandlerConfig;
use crate::host::{ClickTarget, Diagnostics, Document};
use crate::Registration;

/// Attach a listener that writes the configured message on every click.
/// No request is made.
pub fn register<D, L>(document: &D, config: &HandlerConfig, diagnostics: Rc<L>) -> Registration
where
    D: Document,
    L: Diagnostics + 'static,
{
    let Some(button) = document.element_by_id(&config.button_id) else {
        tracing::debug!(id = %config.button_id, "Button not found, click handler skipped");
        return Registration::Skipped;
    };

    let message = config.button_message.clone();
    button.add_click_listener(Box::new(move || diagnostics.info(&message)));

    Registration::Attached
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{Entry, FakeDocument, RecordingDiagnostics};

    #[test]
    fn test_click_logs_message() {
        let document = FakeDocument::with_element("submit-button");
        let diagnostics = RecordingDiagnostics::default();

        let registration = register(
            &document,
            &HandlerConfig::default(),
            Rc::new(diagnostics.clone()),
        );
        assert_eq!(registration, Registration::Attached);

        document.element("submit-button").unwrap().click();

        assert_eq!(
            diagnostics.entries(),
            vec![Entry::Info("Submit button clicked".to_string())]
        );
    }

    #[test]
    fn test_missing_button_is_skipped() {
        let document = FakeDocument::with_element("other-button");
        let diagnostics = RecordingDiagnostics::default();

        let registration = register(
            &document,
            &HandlerConfig::default(),
            Rc::new(diagnostics.clone()),
        );

        assert_eq!(registration, Registration::Skipped);
        assert_eq!(document.element("other-button").unwrap().listener_count(), 0);
        assert!(diagnostics.entries().is_empty());
    }

    #[test]
    fn test_each_click_logs_once() {
        let document = FakeDocument::with_element("submit-button");
        let diagnostics = RecordingDiagnostics::default();
        register(&document, &HandlerConfig::default(), Rc::new(diagnostics.clone()));

        let button = document.element("submit-button").unwrap();
        button.click();
        button.click();

        assert_eq!(diagnostics.entries().len(), 2);
    }

    #[test]
    fn test_double_registration_duplicates_listener() {
        let document = FakeDocument::with_element("submit-button");
        let diagnostics = RecordingDiagnostics::default();
        let config = HandlerConfig::default();
        register(&document, &config, Rc::new(diagnostics.clone()));
        register(&document, &config, Rc::new(diagnostics.clone()));

        document.element("submit-button").unwrap().click();

        // Known limitation: nothing dedupes listeners.
        assert_eq!(diagnostics.entries().len(), 2);
    }
}
