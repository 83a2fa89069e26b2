//! Form payload built at submission time
//!
//! Mirrors what a browser puts into `FormData`: named, enabled controls in
//! document order. Repeated names produce repeated entries.

use serde::Serialize;

/// One control of a submitted form, as seen by the host
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormControl {
    pub name: String,
    pub value: String,
    pub disabled: bool,
}

impl FormControl {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
            disabled: false,
        }
    }

    pub fn disabled(mut self) -> Self {
        self.disabled = true;
        self
    }

    fn is_submittable(&self) -> bool {
        !self.name.is_empty() && !self.disabled
    }
}

/// Ordered `(name, value)` pairs sent as the request body
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FormPayload {
    entries: Vec<(String, String)>,
}

impl FormPayload {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a payload from form controls, skipping unnamed and disabled ones
    pub fn from_controls<I>(controls: I) -> Self
    where
        I: IntoIterator<Item = FormControl>,
    {
        let entries = controls
            .into_iter()
            .filter(FormControl::is_submittable)
            .map(|c| (c.name, c.value))
            .collect();
        Self { entries }
    }

    /// Append an entry as-is (host already applied submission rules)
    pub fn push(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.entries.push((name.into(), value.into()));
    }

    /// First value for `name`
    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(n, v)| (n.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for FormPayload {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        let mut payload = FormPayload::new();
        for (name, value) in iter {
            payload.push(name, value);
        }
        payload
    }
}
