//! # inkpress-core
//!
//! Core library for the inkpress static site generator: read a directory
//! of markdown documents with front-matter headers, render each through
//! page templates, and write a publishable output directory with
//! clean-then-regenerate semantics.

pub mod builder;
pub mod frontmatter;
pub mod markdown;
pub mod models;
pub mod output;
pub mod slug;
pub mod store;
pub mod templates;

pub use builder::{run_build, BuildConfig, BuildError, SiteBuilder};
pub use frontmatter::{parse_document, ParseError};
pub use markdown::{MarkdownRenderer, RenderError};
pub use models::{BuildReport, Document};
pub use output::OutputManager;
pub use slug::slugify;
pub use templates::{TemplateError, TemplateStore};
