//! Front-matter parsing: splits a raw source file into an open attribute
//! mapping and a markdown body, and derives the document slug from the
//! file name.

use crate::models::Document;
use serde_json::{Map, Value};
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ParseError {
    #[error("unterminated front-matter header in '{0}'")]
    UnterminatedHeader(String),

    #[error("invalid front-matter YAML in '{file}': {source}")]
    Yaml {
        file: String,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("front-matter header in '{0}' is not a key-value mapping")]
    HeaderNotMapping(String),

    #[error("cannot derive a slug from file name '{0}'")]
    EmptySlug(String),
}

/// Parse one source file into a [`Document`].
///
/// The slug is the file name with its extension stripped. A document may
/// begin with a `---`-delimited YAML header; without one, the attributes
/// are empty and the whole text is the body. Pure: no I/O, no shared
/// state.
pub fn parse_document(file_name: &str, raw: &str) -> Result<Document, ParseError> {
    let slug = Path::new(file_name)
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("")
        .to_string();
    if slug.is_empty() {
        return Err(ParseError::EmptySlug(file_name.to_string()));
    }

    let (attributes, body) = match split_front_matter(raw) {
        Split::NoHeader => (Map::new(), raw.to_string()),
        Split::Unterminated => {
            return Err(ParseError::UnterminatedHeader(file_name.to_string()));
        }
        Split::Header { yaml, body } => (parse_attributes(file_name, yaml)?, body.to_string()),
    };

    Ok(Document {
        slug,
        attributes,
        body,
    })
}

enum Split<'a> {
    NoHeader,
    Unterminated,
    Header { yaml: &'a str, body: &'a str },
}

/// Locate the header block: a `---` line at the very top, closed by the
/// next `---` line. The body is everything after the closing delimiter.
fn split_front_matter(raw: &str) -> Split<'_> {
    let first_line_end = raw.find('\n').map(|i| i + 1).unwrap_or(raw.len());
    if raw[..first_line_end].trim_end() != "---" || first_line_end == raw.len() {
        // Not a header opening; a bare "---" document is a thematic break.
        if raw.trim_end() == "---" && raw.starts_with("---") {
            return Split::Unterminated;
        }
        return Split::NoHeader;
    }

    let mut line_start = first_line_end;
    for line in raw[first_line_end..].split_inclusive('\n') {
        if line.trim_end() == "---" {
            return Split::Header {
                yaml: &raw[first_line_end..line_start],
                body: &raw[line_start + line.len()..],
            };
        }
        line_start += line.len();
    }

    Split::Unterminated
}

fn parse_attributes(file_name: &str, yaml: &str) -> Result<Map<String, Value>, ParseError> {
    if yaml.trim().is_empty() {
        return Ok(Map::new());
    }

    let value: Value = serde_yaml::from_str(yaml).map_err(|source| ParseError::Yaml {
        file: file_name.to_string(),
        source,
    })?;

    match value {
        Value::Null => Ok(Map::new()),
        Value::Object(map) => Ok(map),
        _ => Err(ParseError::HeaderNotMapping(file_name.to_string())),
    }
}
