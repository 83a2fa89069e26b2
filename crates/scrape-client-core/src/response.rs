use std::fmt;

use serde::Serialize;
use serde_json::Value;

use crate::error::RequestFailure;

/// Decoded `/scrape` response
///
/// The server's shape is not asserted; the value is only ever logged.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct ScrapeResponse(Value);

impl ScrapeResponse {
    pub fn from_body(body: &str) -> Result<Self, RequestFailure> {
        Ok(Self(serde_json::from_str(body)?))
    }

    pub fn value(&self) -> &Value {
        &self.0
    }
}

impl fmt::Display for ScrapeResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
