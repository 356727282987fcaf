//! Code block syntax highlighting using syntect.

use pulldown_cmark::{CodeBlockKind, CowStr, Event, Tag, TagEnd};
use std::sync::OnceLock;
use syntect::highlighting::{Theme, ThemeSet};
use syntect::html::highlighted_html_for_string;
use syntect::parsing::{SyntaxReference, SyntaxSet};

static SYNTAX_SET: OnceLock<SyntaxSet> = OnceLock::new();
static THEME: OnceLock<Theme> = OnceLock::new();

fn syntax_set() -> &'static SyntaxSet {
    SYNTAX_SET.get_or_init(SyntaxSet::load_defaults_newlines)
}

fn theme() -> &'static Theme {
    THEME.get_or_init(|| {
        let theme_set = ThemeSet::load_defaults();
        theme_set
            .themes
            .get("InspiredGitHub")
            .or_else(|| theme_set.themes.get("base16-ocean.light"))
            .unwrap()
            .clone()
    })
}

/// Event transformer that replaces fenced code blocks with highlighted
/// HTML. Languages syntect does not recognize pass through as plain code
/// blocks; a highlighting failure on a recognized language is an error.
pub struct HighlightTransformer;

impl HighlightTransformer {
    pub fn new() -> Self {
        Self
    }

    pub fn transform<'a>(&self, events: Vec<Event<'a>>) -> Result<Vec<Event<'a>>, syntect::Error> {
        let mut result = Vec::with_capacity(events.len());
        let mut in_code_block = false;
        let mut code_lang: Option<String> = None;
        let mut code_content = String::new();

        for event in events {
            match event {
                Event::Start(Tag::CodeBlock(CodeBlockKind::Fenced(lang))) => {
                    in_code_block = true;
                    code_lang = Some(lang.to_string());
                    code_content.clear();
                }
                Event::Text(text) if in_code_block => {
                    code_content.push_str(text.as_ref());
                }
                Event::End(TagEnd::CodeBlock) if in_code_block => {
                    in_code_block = false;
                    let lang = code_lang.take().unwrap_or_default();

                    match find_syntax(&lang) {
                        Some(syntax) => {
                            let html = highlighted_html_for_string(
                                &code_content,
                                syntax_set(),
                                syntax,
                                theme(),
                            )?;
                            result.push(Event::Html(CowStr::from(html)));
                        }
                        None => {
                            // Unrecognized language: emit the block untouched.
                            result.push(Event::Start(Tag::CodeBlock(CodeBlockKind::Fenced(
                                CowStr::from(lang),
                            ))));
                            result.push(Event::Text(CowStr::from(code_content.clone())));
                            result.push(Event::End(TagEnd::CodeBlock));
                        }
                    }
                }
                other => result.push(other),
            }
        }

        Ok(result)
    }
}

impl Default for HighlightTransformer {
    fn default() -> Self {
        Self::new()
    }
}

fn find_syntax(lang: &str) -> Option<&'static SyntaxReference> {
    if lang.trim().is_empty() {
        return None;
    }
    let ss = syntax_set();
    ss.find_syntax_by_token(lang)
        .or_else(|| ss.find_syntax_by_extension(lang))
}
