//! Sidecar caption files.
//!
//! One caption per image, stored as `<image stem>.txt` next to the
//! image. Saves overwrite; deletes of a missing file succeed silently.

use std::io;
use std::path::{Path, PathBuf};

/// Path of the caption file paired with an image.
pub fn caption_path(image_path: &Path) -> PathBuf {
    image_path.with_extension("txt")
}

/// Write `text` as the caption for `image_path`, replacing any previous
/// caption. Returns the caption file path.
pub async fn save_caption_file(image_path: &Path, text: &str) -> io::Result<PathBuf> {
    let path = caption_path(image_path);
    tokio::fs::write(&path, text).await?;
    Ok(path)
}

/// Remove the caption for `image_path`. Returns whether a caption file
/// existed.
pub async fn delete_caption_file(image_path: &Path) -> io::Result<bool> {
    match tokio::fs::remove_file(caption_path(image_path)).await {
        Ok(()) => Ok(true),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(false),
        Err(e) => Err(e),
    }
}

/// Read the caption for `image_path`, if one exists.
pub async fn read_caption_file(image_path: &Path) -> Option<String> {
    tokio::fs::read_to_string(caption_path(image_path)).await.ok()
}
