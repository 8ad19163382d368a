//! File upload pipeline
//!
//! Walks the local site directory and pushes every file to the bucket with
//! a long-lived cache directive. The walk is fail-fast: the first IO or
//! upload error aborts the run, leaving already-uploaded files in place.

use crate::content_type::content_type_for;
use crate::storage::ObjectStorage;
use crate::{Error, Result};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

/// One-year cache directive applied to every uploaded object, shared
/// caches included. There is no per-file override.
pub const CACHE_CONTROL: &str = "public, max-age=31536000, s-maxage=31536000";

/// Upload every regular file under `source_dir` to `bucket`.
///
/// Keys are the file paths relative to `source_dir`, always with forward
/// slashes. Returns the number of files uploaded.
pub async fn upload_dir(
    storage: &dyn ObjectStorage,
    bucket: &str,
    source_dir: &Path,
) -> Result<usize> {
    let root = source_dir.canonicalize().map_err(|e| {
        Error::Path(format!(
            "Failed to resolve path {}: {}",
            source_dir.display(),
            e
        ))
    })?;

    let files = collect_files(&root)?;

    for (key, path) in &files {
        let content_type = content_type_for(path);
        let body = fs::read(path)?;
        info!("Uploading: {} (Content-Type: {})", key, content_type);
        storage
            .put_object(bucket, key, body, content_type, CACHE_CONTROL)
            .await?;
    }

    info!("Total files uploaded: {}", files.len());
    Ok(files.len())
}

/// Collect `(key, absolute path)` pairs for every file under `root`, in
/// lexical order. Directories are descended into, not uploaded.
fn collect_files(root: &Path) -> Result<Vec<(String, PathBuf)>> {
    let mut files = Vec::new();
    walk(root, root, &mut files)?;
    Ok(files)
}

fn walk(root: &Path, dir: &Path, files: &mut Vec<(String, PathBuf)>) -> Result<()> {
    let mut entries: Vec<PathBuf> = fs::read_dir(dir)?
        .map(|entry| entry.map(|e| e.path()))
        .collect::<std::io::Result<_>>()?;
    entries.sort();

    for path in entries {
        if path.is_dir() {
            walk(root, &path, files)?;
        } else {
            let key = path
                .strip_prefix(root)
                .map_err(|e| Error::Path(format!("Failed to get relative path: {}", e)))?
                .to_string_lossy()
                .replace('\\', "/");
            files.push((key, path));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MockStorageClient;
    use std::fs;
    use tempfile::tempdir;

    #[tokio::test]
    async fn test_empty_directory_uploads_nothing() {
        let dir = tempdir().unwrap();
        let storage = MockStorageClient::new();

        let count = upload_dir(&storage, "site", dir.path()).await.unwrap();

        assert_eq!(count, 0);
        assert!(storage.uploaded_keys().is_empty());
    }

    #[tokio::test]
    async fn test_nested_file_gets_forward_slash_key() {
        let dir = tempdir().unwrap();
        fs::create_dir(dir.path().join("a")).unwrap();
        fs::write(dir.path().join("a").join("b.txt"), "hello").unwrap();

        let storage = MockStorageClient::new();
        let count = upload_dir(&storage, "site", dir.path()).await.unwrap();

        assert_eq!(count, 1);
        assert_eq!(storage.uploaded_keys(), vec!["a/b.txt"]);
    }

    #[tokio::test]
    async fn test_uploads_carry_content_type_and_cache_directive() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("index.html"), "<html></html>").unwrap();
        fs::write(dir.path().join("style.css"), "body {}").unwrap();

        let storage = MockStorageClient::new();
        let count = upload_dir(&storage, "site", dir.path()).await.unwrap();
        assert_eq!(count, 2);

        let objects = storage.uploaded_objects();
        let index = objects.iter().find(|o| o.key == "index.html").unwrap();
        assert_eq!(index.content_type, "text/html");
        assert_eq!(index.cache_control, CACHE_CONTROL);
        assert_eq!(index.body, b"<html></html>");

        let css = objects.iter().find(|o| o.key == "style.css").unwrap();
        assert_eq!(css.content_type, "text/css");
    }

    #[tokio::test]
    async fn test_walk_is_lexical_and_skips_directories() {
        let dir = tempdir().unwrap();
        fs::create_dir(dir.path().join("assets")).unwrap();
        fs::write(dir.path().join("assets").join("logo.svg"), "<svg/>").unwrap();
        fs::write(dir.path().join("index.html"), "x").unwrap();
        fs::write(dir.path().join("about.html"), "x").unwrap();

        let storage = MockStorageClient::new();
        upload_dir(&storage, "site", dir.path()).await.unwrap();

        assert_eq!(
            storage.uploaded_keys(),
            vec!["about.html", "assets/logo.svg", "index.html"]
        );
    }

    #[tokio::test]
    async fn test_single_file_failure_aborts_and_keeps_earlier_uploads() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("a.txt"), "a").unwrap();
        fs::write(dir.path().join("b.txt"), "b").unwrap();

        let storage = MockStorageClient::new().with_put_object_failure_at(1);
        let err = upload_dir(&storage, "site", dir.path()).await.unwrap_err();

        assert!(err.to_string().contains("b.txt"));
        assert_eq!(storage.uploaded_keys(), vec!["a.txt"]);
    }

    #[tokio::test]
    async fn test_unresolvable_source_dir_is_a_path_error() {
        let storage = MockStorageClient::new();
        let err = upload_dir(&storage, "site", Path::new("/definitely/not/here"))
            .await
            .unwrap_err();

        assert!(err.to_string().contains("Failed to resolve path"));
    }
}
