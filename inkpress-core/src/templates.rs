//! Template store: runtime lookup of named page templates.

use std::path::{Path, PathBuf};
use tera::Tera;
use thiserror::Error;

/// File extension every template in the store must carry.
pub const TEMPLATE_EXT: &str = "html";

#[derive(Error, Debug)]
pub enum TemplateError {
    #[error("template directory '{0}' is not readable")]
    StoreUnreadable(PathBuf),

    #[error("no template named '{0}' in the template store")]
    Missing(String),

    #[error("template error: {0}")]
    Engine(#[from] tera::Error),
}

/// A fixed set of templates loaded from one directory.
///
/// Logical names map to files by convention: `post` resolves to
/// `post.html` inside the store directory. Rendering is side-effect-free.
pub struct TemplateStore {
    tera: Tera,
}

impl TemplateStore {
    /// Load every `*.html` template directly inside `dir`.
    pub fn load(dir: &Path) -> Result<Self, TemplateError> {
        if !dir.is_dir() {
            return Err(TemplateError::StoreUnreadable(dir.to_path_buf()));
        }

        let glob = format!("{}/*.{}", dir.display(), TEMPLATE_EXT);
        let tera = Tera::new(&glob)?;
        Ok(Self { tera })
    }

    /// Render the template with the given logical name against `context`.
    ///
    /// Fails with [`TemplateError::Missing`] when the name has no backing
    /// file, and with [`TemplateError::Engine`] when evaluation fails
    /// (including references to variables the context does not supply).
    pub fn render(&self, name: &str, context: &tera::Context) -> Result<String, TemplateError> {
        let file_name = format!("{name}.{TEMPLATE_EXT}");
        if !self.tera.get_template_names().any(|n| n == file_name) {
            return Err(TemplateError::Missing(name.to_string()));
        }

        Ok(self.tera.render(&file_name, context)?)
    }
}
