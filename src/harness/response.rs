//! Decoded response bodies and optional-field extraction.

use serde_json::Value;
use std::fmt;

/// A response payload: JSON when it decodes, raw text otherwise.
#[derive(Debug, Clone, PartialEq)]
pub enum ResponseBody {
    Json(Value),
    Text(String),
}

impl ResponseBody {
    pub fn parse(raw: &str) -> Self {
        match serde_json::from_str::<Value>(raw) {
            Ok(value) => ResponseBody::Json(value),
            Err(_) => ResponseBody::Text(raw.to_string()),
        }
    }

    /// True for `null`, `false`, zero, and empty objects, arrays or strings.
    ///
    /// Empty bodies are never used to populate session state.
    pub fn is_empty(&self) -> bool {
        match self {
            ResponseBody::Text(text) => text.is_empty(),
            ResponseBody::Json(value) => match value {
                Value::Null => true,
                Value::Bool(b) => !b,
                Value::Number(n) => n.as_f64() == Some(0.0),
                Value::String(s) => s.is_empty(),
                Value::Array(items) => items.is_empty(),
                Value::Object(map) => map.is_empty(),
            },
        }
    }

    /// String at a dotted path such as `data.user._id`.
    ///
    /// Returns None when the body is not JSON, a segment is missing, or the
    /// leaf is not a string.
    pub fn str_at(&self, path: &str) -> Option<String> {
        let ResponseBody::Json(root) = self else {
            return None;
        };
        path.split('.')
            .try_fold(root, |node, key| node.get(key))
            .and_then(Value::as_str)
            .map(str::to_string)
    }

    /// Text shown in the report preview.
    pub fn display_text(&self) -> String {
        match self {
            ResponseBody::Json(value) => {
                serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string())
            }
            ResponseBody::Text(text) => text.clone(),
        }
    }
}

impl fmt::Display for ResponseBody {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.display_text())
    }
}

/// Result of one dispatched check: `(body, status)`, both absent on
/// transport failure.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Response {
    pub body: Option<ResponseBody>,
    pub status: Option<u16>,
}

impl Response {
    pub fn failed_transport() -> Self {
        Self::default()
    }

    /// The body, if the call returned `status` with a non-empty payload.
    pub fn captured(&self, status: u16) -> Option<&ResponseBody> {
        match (&self.body, self.status) {
            (Some(body), Some(s)) if s == status && !body.is_empty() => Some(body),
            _ => None,
        }
    }
}
