//! Build orchestration: prepare, discover, filter, render, index.

use crate::{
    frontmatter::{parse_document, ParseError},
    markdown::{MarkdownRenderer, RenderError},
    models::{BuildReport, Document},
    output::OutputManager,
    store,
    templates::{TemplateError, TemplateStore},
};
use serde_json::Value;
use std::cmp::Reverse;
use std::collections::HashSet;
use std::path::PathBuf;
use std::sync::Arc;
use thiserror::Error;
use tokio::task::JoinSet;

/// Extension of source documents in the content directory.
pub const CONTENT_EXT: &str = ".md";

/// Extension of generated pages; also the purge filter.
pub const OUTPUT_EXT: &str = ".html";

#[derive(Error, Debug)]
pub enum BuildError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("parse error: {0}")]
    Parse(#[from] ParseError),

    #[error("render error: {0}")]
    Render(#[from] RenderError),

    #[error("template error: {0}")]
    Template(#[from] TemplateError),

    #[error("duplicate slug: {0}")]
    DuplicateSlug(String),

    #[error("render task failed: {0}")]
    Join(#[from] tokio::task::JoinError),
}

/// Directory layout for one build. No hidden state lives anywhere else,
/// so builds can run repeatedly in one process.
#[derive(Debug, Clone)]
pub struct BuildConfig {
    pub content_dir: PathBuf,
    pub template_dir: PathBuf,
    pub output_dir: PathBuf,
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self {
            content_dir: PathBuf::from("posts"),
            template_dir: PathBuf::from("templates"),
            output_dir: PathBuf::from("public"),
        }
    }
}

/// Run one full build. Convenience wrapper over [`SiteBuilder`].
pub async fn run_build(config: &BuildConfig) -> Result<BuildReport, BuildError> {
    SiteBuilder::new(config.clone()).build().await
}

/// Main site builder.
///
/// Five strictly sequential stages with no branching back; any failure
/// in any stage aborts the build and surfaces the triggering error
/// verbatim, with no cleanup of partially-written files.
pub struct SiteBuilder {
    config: BuildConfig,
    renderer: MarkdownRenderer,
}

impl SiteBuilder {
    pub fn new(config: BuildConfig) -> Self {
        Self {
            config,
            renderer: MarkdownRenderer::new(),
        }
    }

    pub async fn build(&self) -> Result<BuildReport, BuildError> {
        // Stage 1: prepare. Nothing is read until the output directory
        // and template store are usable.
        let templates = Arc::new(TemplateStore::load(&self.config.template_dir)?);
        let output = Arc::new(OutputManager::new(&self.config.output_dir));
        output.ensure().await?;
        output.purge(OUTPUT_EXT).await?;

        // Stage 2: discover and parse. Reads run concurrently but the
        // results stay aligned with the listing order.
        let names = store::list_document_files(&self.config.content_dir, CONTENT_EXT).await?;
        tracing::info!("Found {} markdown files", names.len());

        let contents = store::read_document_files(&self.config.content_dir, &names).await?;

        let mut documents = Vec::with_capacity(names.len());
        let mut seen_slugs = HashSet::new();
        for (name, raw) in names.iter().zip(&contents) {
            let doc = parse_document(name, raw)?;
            if !seen_slugs.insert(doc.slug.clone()) {
                return Err(BuildError::DuplicateSlug(doc.slug));
            }
            documents.push(doc);
        }

        // Stage 3: filter. Drafts are parsed for validation but never
        // rendered or written.
        let published: Vec<Document> = documents
            .into_iter()
            .filter(|doc| {
                if doc.is_public() {
                    true
                } else {
                    tracing::debug!("Skipping draft: {}", doc.slug);
                    false
                }
            })
            .collect();

        // Stage 4: render every published document concurrently and join
        // before anything is written, so one bad document leaves the
        // output directory empty rather than partially populated.
        let mut render_tasks = JoinSet::new();
        let count = published.len();
        for (idx, doc) in published.into_iter().enumerate() {
            let renderer = self.renderer;
            let templates = Arc::clone(&templates);
            render_tasks.spawn(async move {
                let html = renderer.render_html(&doc.body).await?;
                let doc = doc.with_body(html);
                let context = tera::Context::from_value(doc.context_value())
                    .map_err(TemplateError::from)?;
                let page = templates.render("post", &context)?;
                Ok::<_, BuildError>((idx, doc, page))
            });
        }

        let mut rendered = Vec::with_capacity(count);
        while let Some(joined) = render_tasks.join_next().await {
            rendered.push(joined??);
        }
        rendered.sort_by_key(|(idx, _, _)| *idx);

        let mut docs = Vec::with_capacity(rendered.len());
        let mut write_tasks = JoinSet::new();
        for (_, doc, page) in rendered {
            let file_name = format!("{}{}", doc.slug, OUTPUT_EXT);
            let output = Arc::clone(&output);
            write_tasks.spawn(async move { output.write(&file_name, &page).await });
            docs.push(doc);
        }
        while let Some(joined) = write_tasks.join_next().await {
            joined??;
        }

        // Stage 5: index, newest first. Stable sort keeps discovery
        // order for equal or missing dates; undated documents sort last.
        docs.sort_by_key(|doc| Reverse(doc.date()));

        let posts: Vec<Value> = docs.iter().map(Document::context_value).collect();
        let mut context = tera::Context::new();
        context.insert("posts", &posts);
        let index_page = templates.render("index", &context)?;
        output.write("index.html", &index_page).await?;

        tracing::info!("Published {} document(s)", docs.len());

        Ok(BuildReport {
            published: docs.len(),
        })
    }
}
