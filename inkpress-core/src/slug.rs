//! URL-safe slug generation, used for heading anchor ids.

use regex::Regex;
use std::sync::OnceLock;
use unicode_segmentation::UnicodeSegmentation;

static HYPHEN_RUNS: OnceLock<Regex> = OnceLock::new();

fn hyphen_runs() -> &'static Regex {
    HYPHEN_RUNS.get_or_init(|| Regex::new(r"-+").unwrap())
}

/// Convert arbitrary text to a URL-safe slug: lowercase, whitespace and
/// underscores become hyphens, punctuation is dropped, hyphen runs
/// collapse, leading/trailing hyphens are trimmed. Unicode letters are
/// kept.
pub fn slugify(input: &str) -> String {
    let cleaned: String = input
        .to_lowercase()
        .graphemes(true)
        .filter_map(|g| match g {
            " " | "_" | "\t" | "\n" => Some("-"),
            _ => {
                let c = g.chars().next()?;
                (c.is_alphanumeric() || c == '-').then_some(g)
            }
        })
        .collect();

    hyphen_runs()
        .replace_all(&cleaned, "-")
        .trim_matches('-')
        .to_string()
}
