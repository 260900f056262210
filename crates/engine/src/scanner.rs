//! Folder scanning.
//!
//! Collects the images of a single folder (non-recursive), pairs each
//! with its sidecar caption if present, and returns entries in sorted
//! path order — the order the catalog keeps for the whole load cycle.

use std::path::Path;

use capdeck_core::catalog::ImageEntry;

use crate::store;

/// File extensions treated as images (matched case-insensitively).
const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "webp"];

/// Errors from scanning a folder.
#[derive(Debug, thiserror::Error)]
pub enum ScanError {
    /// The path does not exist or is not a directory.
    #[error("Invalid folder path")]
    InvalidFolder,

    /// Reading the directory failed partway through.
    #[error("Failed to read folder: {0}")]
    Io(#[from] std::io::Error),
}

/// Scan `folder` for images and their captions.
pub async fn scan_folder(folder: &Path) -> Result<Vec<ImageEntry>, ScanError> {
    match tokio::fs::metadata(folder).await {
        Ok(meta) if meta.is_dir() => {}
        _ => return Err(ScanError::InvalidFolder),
    }

    let mut paths = Vec::new();
    let mut dir = tokio::fs::read_dir(folder).await?;
    while let Some(dir_entry) = dir.next_entry().await? {
        let path = dir_entry.path();
        if !dir_entry.file_type().await?.is_file() {
            continue;
        }
        let is_image = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| IMAGE_EXTENSIONS.contains(&ext.to_ascii_lowercase().as_str()))
            .unwrap_or(false);
        if is_image {
            paths.push(path);
        }
    }
    paths.sort();

    let mut entries = Vec::with_capacity(paths.len());
    for path in paths {
        let caption = store::read_caption_file(&path).await;
        entries.push(ImageEntry::new(path, caption));
    }

    tracing::debug!(folder = %folder.display(), images = entries.len(), "Folder scanned");
    Ok(entries)
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn touch(path: &Path) {
        tokio::fs::write(path, b"fake").await.unwrap();
    }

    #[tokio::test]
    async fn invalid_folder_rejected() {
        let err = scan_folder(Path::new("/no/such/folder")).await.unwrap_err();
        assert_eq!(err.to_string(), "Invalid folder path");

        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("not-a-dir.png");
        touch(&file).await;
        assert!(scan_folder(&file).await.is_err());
    }

    #[tokio::test]
    async fn collects_images_sorted_with_captions() {
        let dir = tempfile::tempdir().unwrap();
        touch(&dir.path().join("b.png")).await;
        touch(&dir.path().join("a.jpg")).await;
        touch(&dir.path().join("c.WEBP")).await;
        touch(&dir.path().join("notes.txt")).await;
        tokio::fs::write(dir.path().join("a.txt"), "a dog").await.unwrap();

        let entries = scan_folder(dir.path()).await.unwrap();
        let names: Vec<&str> = entries.iter().map(|e| e.filename.as_str()).collect();
        assert_eq!(names, ["a.jpg", "b.png", "c.WEBP"]);

        assert!(entries[0].has_caption);
        assert_eq!(entries[0].caption, "a dog");
        assert!(!entries[1].has_caption);
        assert_eq!(entries[1].caption, "");
    }

    #[tokio::test]
    async fn skips_subdirectories_and_unknown_extensions() {
        let dir = tempfile::tempdir().unwrap();
        tokio::fs::create_dir(dir.path().join("nested.png")).await.unwrap();
        touch(&dir.path().join("clip.gif")).await;

        let entries = scan_folder(dir.path()).await.unwrap();
        assert!(entries.is_empty());
    }

    #[tokio::test]
    async fn empty_folder_yields_empty_catalog() {
        let dir = tempfile::tempdir().unwrap();
        assert!(scan_folder(dir.path()).await.unwrap().is_empty());
    }
}
