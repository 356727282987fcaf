//! Markdown rendering pipeline: structural conversion, heading anchor
//! ids, code block highlighting.

pub mod highlight;

use crate::slug::slugify;
use pulldown_cmark::{html, CowStr, Event, Options, Parser, Tag, TagEnd};
use std::collections::HashMap;
use thiserror::Error;

pub use highlight::HighlightTransformer;

#[derive(Error, Debug)]
pub enum RenderError {
    #[error("syntax highlighting failed: {0}")]
    Highlight(#[from] syntect::Error),

    #[error("markdown render task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}

/// Markdown-to-HTML renderer.
///
/// The pipeline runs in a fixed order: parse, heading id assignment,
/// syntax highlighting, HTML serialization.
#[derive(Debug, Clone, Copy)]
pub struct MarkdownRenderer {
    options: Options,
}

impl MarkdownRenderer {
    pub fn new() -> Self {
        let mut options = Options::empty();
        options.insert(Options::ENABLE_TABLES);
        options.insert(Options::ENABLE_FOOTNOTES);
        options.insert(Options::ENABLE_STRIKETHROUGH);
        options.insert(Options::ENABLE_TASKLISTS);
        options.insert(Options::ENABLE_HEADING_ATTRIBUTES);

        Self { options }
    }

    /// Render a markdown body to HTML.
    ///
    /// The conversion is CPU-bound, so it runs on the blocking pool; the
    /// caller suspends without tying up the runtime.
    pub async fn render_html(&self, markdown: &str) -> Result<String, RenderError> {
        let markdown = markdown.to_owned();
        let options = self.options;

        let html = tokio::task::spawn_blocking(move || convert(&markdown, options)).await??;
        Ok(html)
    }
}

impl Default for MarkdownRenderer {
    fn default() -> Self {
        Self::new()
    }
}

fn convert(markdown: &str, options: Options) -> Result<String, syntect::Error> {
    let events: Vec<Event> = Parser::new_ext(markdown, options).collect();

    let ids = collect_heading_ids(&events);
    let events = attach_heading_ids(events, &ids);
    let events = HighlightTransformer::new().transform(events)?;

    let mut html_output = String::new();
    html::push_html(&mut html_output, events.into_iter());
    Ok(html_output)
}

/// Derive one anchor id per heading, in document order. Ids come from the
/// slugified heading text; repeats get a numeric suffix so every id stays
/// unique within the document.
fn collect_heading_ids(events: &[Event]) -> Vec<String> {
    let mut ids = Vec::new();
    let mut seen: HashMap<String, usize> = HashMap::new();
    let mut current: Option<String> = None;

    for event in events {
        match event {
            Event::Start(Tag::Heading { .. }) => {
                current = Some(String::new());
            }
            Event::Text(text) | Event::Code(text) => {
                if let Some(buf) = current.as_mut() {
                    buf.push_str(text.as_ref());
                }
            }
            Event::End(TagEnd::Heading(_)) => {
                if let Some(text) = current.take() {
                    let mut base = slugify(&text);
                    if base.is_empty() {
                        base = "section".to_string();
                    }
                    let count = seen.entry(base.clone()).or_insert(0);
                    *count += 1;
                    if *count == 1 {
                        ids.push(base);
                    } else {
                        ids.push(format!("{base}-{count}"));
                    }
                }
            }
            _ => {}
        }
    }

    ids
}

fn attach_heading_ids<'a>(events: Vec<Event<'a>>, ids: &[String]) -> Vec<Event<'a>> {
    let mut id_iter = ids.iter();
    let mut result = Vec::with_capacity(events.len());

    for event in events {
        match event {
            Event::Start(Tag::Heading {
                level,
                mut id,
                classes,
                attrs,
            }) => {
                let generated = id_iter.next();
                // An author-supplied `{#id}` attribute wins.
                if id.is_none() {
                    id = generated.map(|g| CowStr::from(g.clone()));
                }
                result.push(Event::Start(Tag::Heading {
                    level,
                    id,
                    classes,
                    attrs,
                }));
            }
            other => result.push(other),
        }
    }

    result
}
