//! In-memory host used by the handler tests

use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::rc::Rc;

use futures::future::{self, LocalBoxFuture};
use serde_json::Value;

use crate::error::RequestFailure;
use crate::host::{
    ClickListener, ClickTarget, Diagnostics, Document, FormTarget, LocalTask, Spawner,
    SubmitEvent, SubmitListener, Transport,
};
use crate::payload::{FormControl, FormPayload};
use crate::response::ScrapeResponse;

#[derive(Default)]
pub struct FakeDocument {
    forms: Vec<(String, FakeForm)>,
    elements: HashMap<String, FakeElement>,
}

impl FakeDocument {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn with_form(controls: Vec<FormControl>) -> Self {
        Self::with_form_at("form", controls)
    }

    pub fn with_form_at(selector: &str, controls: Vec<FormControl>) -> Self {
        let mut doc = Self::default();
        doc.forms.push((selector.to_string(), FakeForm::new(controls)));
        doc
    }

    pub fn with_element(id: &str) -> Self {
        let mut doc = Self::default();
        doc.elements.insert(id.to_string(), FakeElement::default());
        doc
    }

    pub fn form(&self) -> Option<FakeForm> {
        self.forms.first().map(|(_, form)| form.clone())
    }

    pub fn element(&self, id: &str) -> Option<FakeElement> {
        self.elements.get(id).cloned()
    }
}

impl Document for FakeDocument {
    type Form = FakeForm;
    type Element = FakeElement;

    fn query_form(&self, selector: &str) -> Option<FakeForm> {
        self.forms
            .iter()
            .find(|(s, _)| s == selector)
            .map(|(_, form)| form.clone())
    }

    fn element_by_id(&self, id: &str) -> Option<FakeElement> {
        self.element(id)
    }
}

#[derive(Clone)]
pub struct FakeForm {
    controls: Rc<RefCell<Vec<FormControl>>>,
    listeners: Rc<RefCell<Vec<SubmitListener>>>,
}

impl FakeForm {
    fn new(controls: Vec<FormControl>) -> Self {
        Self {
            controls: Rc::new(RefCell::new(controls)),
            listeners: Rc::new(RefCell::new(Vec::new())),
        }
    }

    pub fn set_controls(&self, controls: Vec<FormControl>) {
        *self.controls.borrow_mut() = controls;
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.borrow().len()
    }

    /// Dispatch a submit event; returns whether the default action was prevented
    pub fn submit(&self) -> bool {
        let event = FakeSubmitEvent {
            controls: self.controls.borrow().clone(),
            default_prevented: Cell::new(false),
        };
        let dispatched: &dyn SubmitEvent = &event;
        let mut listeners = std::mem::take(&mut *self.listeners.borrow_mut());
        for listener in listeners.iter_mut() {
            listener(dispatched);
        }
        restore(&self.listeners, listeners);
        event.default_prevented.get()
    }
}

impl FormTarget for FakeForm {
    fn add_submit_listener(&self, listener: SubmitListener) {
        self.listeners.borrow_mut().push(listener);
    }
}

struct FakeSubmitEvent {
    controls: Vec<FormControl>,
    default_prevented: Cell<bool>,
}

impl SubmitEvent for FakeSubmitEvent {
    fn prevent_default(&self) {
        self.default_prevented.set(true);
    }

    fn payload(&self) -> FormPayload {
        FormPayload::from_controls(self.controls.clone())
    }
}

#[derive(Clone, Default)]
pub struct FakeElement {
    listeners: Rc<RefCell<Vec<ClickListener>>>,
}

impl FakeElement {
    pub fn click(&self) {
        let mut listeners = std::mem::take(&mut *self.listeners.borrow_mut());
        for listener in listeners.iter_mut() {
            listener();
        }
        restore(&self.listeners, listeners);
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.borrow().len()
    }
}

impl ClickTarget for FakeElement {
    fn add_click_listener(&self, listener: ClickListener) {
        self.listeners.borrow_mut().push(listener);
    }
}

// Listeners added while dispatching land after the ones that were dispatched.
fn restore<L>(slot: &RefCell<Vec<L>>, mut dispatched: Vec<L>) {
    let mut current = slot.borrow_mut();
    dispatched.append(&mut current);
    *current = dispatched;
}

/// Records every POST and answers with a canned result
#[derive(Clone)]
pub struct FakeTransport {
    result: Result<String, RequestFailure>,
    calls: Rc<RefCell<Vec<(String, FormPayload)>>>,
}

impl FakeTransport {
    pub fn responding(body: &str) -> Self {
        Self {
            result: Ok(body.to_string()),
            calls: Rc::default(),
        }
    }

    pub fn failing(err: RequestFailure) -> Self {
        Self {
            result: Err(err),
            calls: Rc::default(),
        }
    }

    pub fn calls(&self) -> Vec<(String, FormPayload)> {
        self.calls.borrow().clone()
    }
}

impl Transport for FakeTransport {
    fn post_form(
        &self,
        path: &str,
        payload: FormPayload,
    ) -> LocalBoxFuture<'static, Result<String, RequestFailure>> {
        self.calls.borrow_mut().push((path.to_string(), payload));
        Box::pin(future::ready(self.result.clone()))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Entry {
    Info(String),
    Value(Value),
    Error(String),
}

#[derive(Clone, Default)]
pub struct RecordingDiagnostics {
    entries: Rc<RefCell<Vec<Entry>>>,
}

impl RecordingDiagnostics {
    pub fn entries(&self) -> Vec<Entry> {
        self.entries.borrow().clone()
    }
}

impl Diagnostics for RecordingDiagnostics {
    fn info(&self, message: &str) {
        self.entries.borrow_mut().push(Entry::Info(message.to_string()));
    }

    fn value(&self, response: &ScrapeResponse) {
        self.entries
            .borrow_mut()
            .push(Entry::Value(response.value().clone()));
    }

    fn error(&self, message: &str) {
        self.entries.borrow_mut().push(Entry::Error(message.to_string()));
    }
}

/// Holds spawned tasks until the test drives them
#[derive(Clone, Default)]
pub struct QueueSpawner {
    tasks: Rc<RefCell<Vec<LocalTask>>>,
}

impl QueueSpawner {
    pub fn pending(&self) -> usize {
        self.tasks.borrow().len()
    }

    pub fn run_all(&self) {
        let tasks = std::mem::take(&mut *self.tasks.borrow_mut());
        for task in tasks {
            futures::executor::block_on(task);
        }
    }
}

impl Spawner for QueueSpawner {
    fn spawn_local(&self, task: LocalTask) {
        self.tasks.borrow_mut().push(task);
    }
}
