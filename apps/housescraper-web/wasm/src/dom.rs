//! `web-sys` implementations of the page capabilities
//!
//! Listeners are leaked with `Closure::forget`; they live as long as the page.

use js_sys::Array;
use scrape_client_core::{
    ClickListener, ClickTarget, Document, FormPayload, FormTarget, SubmitEvent, SubmitListener,
};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Element, Event, FormData, HtmlFormElement};

/// The live page document
pub struct WebDocument {
    document: web_sys::Document,
}

impl WebDocument {
    pub fn new(document: web_sys::Document) -> Self {
        Self { document }
    }

    pub fn from_window() -> Result<Self, JsValue> {
        let window = web_sys::window().ok_or("No window")?;
        let document = window.document().ok_or("No document")?;
        Ok(Self::new(document))
    }

    /// Run `callback` once the document has been parsed.
    ///
    /// The module usually finishes loading after `DOMContentLoaded` has fired,
    /// in which case the callback runs immediately.
    pub fn when_content_ready<F>(&self, callback: F) -> Result<(), JsValue>
    where
        F: FnOnce() + 'static,
    {
        let loading = self.document.ready_state() == "loading";
        run_when_parsed(&self.document, loading, callback)
    }
}

fn run_when_parsed<F>(
    document: &web_sys::Document,
    loading: bool,
    callback: F,
) -> Result<(), JsValue>
where
    F: FnOnce() + 'static,
{
    if !loading {
        callback();
        return Ok(());
    }

    let on_ready = Closure::once(Box::new(callback) as Box<dyn FnOnce()>);
    document
        .add_event_listener_with_callback("DOMContentLoaded", on_ready.as_ref().unchecked_ref())?;
    on_ready.forget();
    Ok(())
}

impl Document for WebDocument {
    type Form = WebForm;
    type Element = WebElement;

    fn query_form(&self, selector: &str) -> Option<WebForm> {
        // An invalid selector matches nothing.
        self.document
            .query_selector(selector)
            .ok()
            .flatten()
            .and_then(|el| el.dyn_into::<HtmlFormElement>().ok())
            .map(WebForm)
    }

    fn element_by_id(&self, id: &str) -> Option<WebElement> {
        self.document.get_element_by_id(id).map(WebElement)
    }
}

pub struct WebForm(HtmlFormElement);

impl FormTarget for WebForm {
    fn add_submit_listener(&self, mut listener: SubmitListener) {
        let bound = self.0.clone();
        let on_submit = Closure::<dyn FnMut(Event)>::new(move |event: Event| {
            let form = event
                .target()
                .and_then(|t| t.dyn_into::<HtmlFormElement>().ok())
                .unwrap_or_else(|| bound.clone());
            let submit = WebSubmitEvent { event, form };
            listener(&submit as &dyn SubmitEvent);
        });

        if let Err(err) = self
            .0
            .add_event_listener_with_callback("submit", on_submit.as_ref().unchecked_ref())
        {
            web_sys::console::error_2(&"Failed to attach submit listener:".into(), &err);
        }
        on_submit.forget();
    }
}

pub struct WebElement(Element);

impl ClickTarget for WebElement {
    fn add_click_listener(&self, mut listener: ClickListener) {
        let on_click = Closure::<dyn FnMut()>::new(move || listener());

        if let Err(err) = self
            .0
            .add_event_listener_with_callback("click", on_click.as_ref().unchecked_ref())
        {
            web_sys::console::error_2(&"Failed to attach click listener:".into(), &err);
        }
        on_click.forget();
    }
}

struct WebSubmitEvent {
    event: Event,
    form: HtmlFormElement,
}

impl SubmitEvent for WebSubmitEvent {
    fn prevent_default(&self) {
        self.event.prevent_default();
    }

    fn payload(&self) -> FormPayload {
        let mut payload = FormPayload::new();
        let Ok(data) = FormData::new_with_form(&self.form) else {
            return payload;
        };

        if let Ok(Some(entries)) = js_sys::try_iter(&data) {
            for entry in entries.flatten() {
                let pair: Array = entry.unchecked_into();
                // File entries have no string value and are not forwarded.
                if let (Some(name), Some(value)) = (pair.get(0).as_string(), pair.get(1).as_string())
                {
                    payload.push(name, value);
                }
            }
        }
        payload
    }
}

#[cfg(target_arch = "wasm32")]
mod wasm_tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen_test::*;
    use web_sys::{EventInit, HtmlElement};

    wasm_bindgen_test_configure!(run_in_browser);

    fn mount(html: &str) -> web_sys::Document {
        let document = web_sys::window().unwrap().document().unwrap();
        let body = document.body().unwrap();
        body.set_inner_html(html);
        document
    }

    #[wasm_bindgen_test]
    fn test_parsed_page_runs_callback_immediately() {
        let document = WebDocument::from_window().unwrap();
        let ran = Rc::new(RefCell::new(false));

        let flag = Rc::clone(&ran);
        document
            .when_content_ready(move || *flag.borrow_mut() = true)
            .unwrap();

        assert!(*ran.borrow());
    }

    #[wasm_bindgen_test]
    fn test_loading_page_waits_for_content_loaded() {
        let document = web_sys::window().unwrap().document().unwrap();
        let runs = Rc::new(RefCell::new(0));

        let counter = Rc::clone(&runs);
        run_when_parsed(&document, true, move || *counter.borrow_mut() += 1).unwrap();
        assert_eq!(*runs.borrow(), 0);

        document
            .dispatch_event(&Event::new("DOMContentLoaded").unwrap())
            .unwrap();
        assert_eq!(*runs.borrow(), 1);
    }

    #[wasm_bindgen_test]
    fn test_query_form_finds_first_form() {
        let document = WebDocument::new(mount(r#"<div></div><form id="search"></form>"#));
        assert!(document.query_form("form").is_some());
        assert!(document.query_form("#missing").is_none());
        assert!(document.query_form("div").is_none());
    }

    #[wasm_bindgen_test]
    fn test_payload_uses_named_enabled_fields() {
        let document = mount(
            r#"<form>
                <input name="a" value="1">
                <input name="b" value="2">
                <input value="unnamed">
                <input name="c" value="3" disabled>
            </form>"#,
        );
        let form: HtmlFormElement = document
            .query_selector("form")
            .unwrap()
            .unwrap()
            .unchecked_into();
        let submit = WebSubmitEvent {
            event: Event::new("submit").unwrap(),
            form,
        };

        let payload = submit.payload();
        let entries: Vec<_> = payload.iter().collect();
        assert_eq!(entries, vec![("a", "1"), ("b", "2")]);
    }

    #[wasm_bindgen_test]
    fn test_submit_listener_prevents_navigation() {
        let document = WebDocument::new(mount(r#"<form><input name="q" value="x"></form>"#));
        let form = document.query_form("form").unwrap();
        let seen = Rc::new(RefCell::new(Vec::new()));

        let sink = Rc::clone(&seen);
        form.add_submit_listener(Box::new(move |event: &dyn SubmitEvent| {
            event.prevent_default();
            sink.borrow_mut().push(event.payload());
        }));

        let init = EventInit::new();
        init.set_cancelable(true);
        let event = Event::new_with_event_init_dict("submit", &init).unwrap();
        let not_cancelled = form.0.dispatch_event(&event).unwrap();

        assert!(!not_cancelled);
        assert_eq!(seen.borrow().len(), 1);
        assert_eq!(seen.borrow()[0].get("q"), Some("x"));
    }

    #[wasm_bindgen_test]
    fn test_click_listener_fires() {
        let document = WebDocument::new(mount(r#"<button id="submit-button">Go</button>"#));
        let button = document.element_by_id("submit-button").unwrap();
        let clicks = Rc::new(RefCell::new(0));

        let counter = Rc::clone(&clicks);
        button.add_click_listener(Box::new(move || *counter.borrow_mut() += 1));
        button.0.unchecked_ref::<HtmlElement>().click();

        assert_eq!(*clicks.borrow(), 1);
    }
}
