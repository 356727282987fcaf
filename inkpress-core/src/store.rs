//! Content store reader: lists and reads source documents from the
//! content directory.

use std::io;
use std::path::Path;
use tokio::task::JoinSet;

/// List the regular files in `dir` whose names end with `ext`
/// (case-insensitive). Directories and symlinks are excluded. The result
/// is sorted by name so discovery order is deterministic across
/// platforms.
pub async fn list_document_files(dir: &Path, ext: &str) -> io::Result<Vec<String>> {
    let ext = ext.to_lowercase();
    let mut entries = tokio::fs::read_dir(dir).await?;
    let mut names = Vec::new();

    while let Some(entry) = entries.next_entry().await? {
        if !entry.file_type().await?.is_file() {
            continue;
        }
        if let Some(name) = entry.file_name().to_str() {
            if name.to_lowercase().ends_with(&ext) {
                names.push(name.to_string());
            }
        }
    }

    names.sort();
    Ok(names)
}

/// Read every named file under `dir` concurrently.
///
/// The result is order-aligned with `names`: reads are re-associated by
/// index, never by completion order. The first failed read fails the
/// whole batch.
pub async fn read_document_files(dir: &Path, names: &[String]) -> io::Result<Vec<String>> {
    let mut tasks = JoinSet::new();
    for (idx, name) in names.iter().enumerate() {
        let path = dir.join(name);
        tasks.spawn(async move { (idx, tokio::fs::read_to_string(&path).await) });
    }

    let mut contents = vec![String::new(); names.len()];
    while let Some(joined) = tasks.join_next().await {
        let (idx, read) = joined.map_err(io::Error::other)?;
        contents[idx] = read?;
    }

    Ok(contents)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_list_filters_by_extension() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("a.md"), "a").unwrap();
        fs::write(dir.path().join("b.MD"), "b").unwrap();
        fs::write(dir.path().join("style.css"), "").unwrap();
        fs::create_dir(dir.path().join("nested.md")).unwrap();

        let names = list_document_files(dir.path(), ".md").await.unwrap();
        assert_eq!(names, vec!["a.md", "b.MD"]);
    }

    #[tokio::test]
    async fn test_list_is_sorted() {
        let dir = TempDir::new().unwrap();
        for name in ["zebra.md", "apple.md", "mango.md"] {
            fs::write(dir.path().join(name), "").unwrap();
        }

        let names = list_document_files(dir.path(), ".md").await.unwrap();
        assert_eq!(names, vec!["apple.md", "mango.md", "zebra.md"]);
    }

    #[tokio::test]
    async fn test_list_missing_directory_fails() {
        let dir = TempDir::new().unwrap();
        let missing = dir.path().join("absent");
        assert!(list_document_files(&missing, ".md").await.is_err());
    }

    #[tokio::test]
    async fn test_reads_align_with_input_order() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("a.md"), "alpha").unwrap();
        fs::write(dir.path().join("b.md"), "beta").unwrap();
        fs::write(dir.path().join("c.md"), "gamma").unwrap();

        let names = vec!["c.md".to_string(), "a.md".to_string(), "b.md".to_string()];
        let contents = read_document_files(dir.path(), &names).await.unwrap();
        assert_eq!(contents, vec!["gamma", "alpha", "beta"]);
    }

    #[tokio::test]
    async fn test_one_unreadable_file_fails_the_batch() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("a.md"), "alpha").unwrap();

        let names = vec!["a.md".to_string(), "ghost.md".to_string()];
        assert!(read_document_files(dir.path(), &names).await.is_err());
    }
}
