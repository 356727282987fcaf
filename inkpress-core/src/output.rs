//! Output directory lifecycle: ensure, purge, write.

use std::io;
use std::path::{Path, PathBuf};

/// Owns the output directory.
///
/// The directory is only ever touched through one purge pass followed by
/// disjoint-filename writes, so no synchronization is needed beyond
/// stage ordering in the builder.
pub struct OutputManager {
    root: PathBuf,
}

impl OutputManager {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Create the output directory and any missing parents. Idempotent.
    pub async fn ensure(&self) -> io::Result<()> {
        tokio::fs::create_dir_all(&self.root).await
    }

    /// Delete every regular file directly inside the root whose name ends
    /// with `ext` (case-insensitive). Subdirectories are never entered.
    /// A single failed deletion fails the purge; the build must not
    /// proceed over an inconsistent output directory.
    pub async fn purge(&self, ext: &str) -> io::Result<()> {
        let ext = ext.to_lowercase();
        let mut entries = tokio::fs::read_dir(&self.root).await?;

        while let Some(entry) = entries.next_entry().await? {
            if !entry.file_type().await?.is_file() {
                continue;
            }
            let matches = entry
                .file_name()
                .to_str()
                .map(|name| name.to_lowercase().ends_with(&ext))
                .unwrap_or(false);
            if matches {
                tokio::fs::remove_file(entry.path()).await?;
            }
        }

        Ok(())
    }

    /// Write `contents` to `file_name` under the root, creating or fully
    /// overwriting the file.
    pub async fn write(&self, file_name: &str, contents: &str) -> io::Result<()> {
        tokio::fs::write(self.root.join(file_name), contents).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_ensure_is_idempotent() {
        let dir = TempDir::new().unwrap();
        let output = OutputManager::new(dir.path().join("public"));

        output.ensure().await.unwrap();
        output.ensure().await.unwrap();
        assert!(output.root().is_dir());
    }

    #[tokio::test]
    async fn test_purge_scope() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("old.html"), "").unwrap();
        fs::write(dir.path().join("OLD2.HTML"), "").unwrap();
        fs::write(dir.path().join("old.css"), "").unwrap();
        fs::create_dir(dir.path().join("assets")).unwrap();
        fs::write(dir.path().join("assets").join("deep.html"), "").unwrap();

        let output = OutputManager::new(dir.path());
        output.purge(".html").await.unwrap();

        assert!(!dir.path().join("old.html").exists());
        assert!(!dir.path().join("OLD2.HTML").exists());
        assert!(dir.path().join("old.css").exists());
        assert!(dir.path().join("assets").is_dir());
        assert!(dir.path().join("assets").join("deep.html").exists());
    }

    #[tokio::test]
    async fn test_purge_missing_root_fails() {
        let dir = TempDir::new().unwrap();
        let output = OutputManager::new(dir.path().join("absent"));
        assert!(output.purge(".html").await.is_err());
    }

    #[tokio::test]
    async fn test_write_overwrites() {
        let dir = TempDir::new().unwrap();
        let output = OutputManager::new(dir.path());

        output.write("page.html", "first").await.unwrap();
        output.write("page.html", "second").await.unwrap();

        let contents = fs::read_to_string(dir.path().join("page.html")).unwrap();
        assert_eq!(contents, "second");
    }
}
