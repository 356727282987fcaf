//! Content model for documents and build results.

use chrono::NaiveDate;
use serde::Serialize;
use serde_json::{Map, Value};

/// A single content document, parsed from one source file.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Document {
    /// Stable identifier derived from the source file name (extension
    /// stripped). Doubles as the output file's base name.
    pub slug: String,

    /// Open author-declared metadata from the front-matter header. No key
    /// is required; `date` and `public` are recognized by convention and
    /// everything else flows through to templates untouched.
    pub attributes: Map<String, Value>,

    /// Markdown source until rendering, HTML afterwards.
    pub body: String,
}

impl Document {
    /// Produce a structurally identical document with a replaced body.
    ///
    /// Rendering consumes the markdown document and yields a new record
    /// rather than mutating in place, so the two forms never alias.
    pub fn with_body(self, body: String) -> Document {
        Document { body, ..self }
    }

    /// Whether the document is publicly visible, per the truthiness of its
    /// `public` attribute. Missing means draft.
    pub fn is_public(&self) -> bool {
        self.attributes.get("public").is_some_and(is_truthy)
    }

    /// Publication date from the `date` attribute, if present and parsable.
    pub fn date(&self) -> Option<NaiveDate> {
        match self.attributes.get("date")? {
            Value::String(s) => parse_date(s),
            _ => None,
        }
    }

    /// Template context for this document: its attributes at top level,
    /// plus `slug` and `body`.
    pub fn context_value(&self) -> Value {
        let mut map = self.attributes.clone();
        map.insert("slug".to_string(), Value::String(self.slug.clone()));
        map.insert("body".to_string(), Value::String(self.body.clone()));
        Value::Object(map)
    }
}

/// Result of a successful build.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct BuildReport {
    /// Number of documents published (excluding the index page).
    pub published: usize,
}

/// Boolean coercion for attribute values.
///
/// Explicit table: null is false, booleans are themselves, numbers are
/// true iff nonzero, strings are true iff non-empty, arrays and mappings
/// are always true.
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().map(|f| f != 0.0).unwrap_or(true),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

fn parse_date(s: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d")
        .ok()
        .or_else(|| {
            chrono::DateTime::parse_from_rfc3339(s.trim())
                .ok()
                .map(|dt| dt.date_naive())
        })
}
