//! The in-memory image catalog and per-entry caption lifecycle.
//!
//! The [`Catalog`] is the single source of truth for the currently loaded
//! folder. Loading a new folder replaces it wholesale; there is no
//! incremental merge. Entries are addressed primarily by image path;
//! integer indices are valid only within one load cycle and exist as a
//! display convenience.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

// ---------------------------------------------------------------------------
// Entry status
// ---------------------------------------------------------------------------

/// Observable status of a single catalog entry.
///
/// Happy path: `Ready -> Generating -> Generated -> Saved`, with
/// `Error` on any failure and `Ready` again after an explicit delete.
/// Entries scanned with an existing caption start as `Captioned`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntryStatus {
    /// No caption yet; nothing in flight.
    Ready,
    /// A caption existed on disk when the folder was scanned.
    Captioned,
    /// A generation request is in flight.
    Generating,
    /// Generation succeeded; the caption is not yet persisted.
    Generated,
    /// The caption has been persisted.
    Saved,
    /// The last generate-and-save attempt failed.
    Error,
}

impl EntryStatus {
    /// Human-readable label for display.
    pub fn label(self) -> &'static str {
        match self {
            Self::Ready => "Ready",
            Self::Captioned => "Captioned",
            Self::Generating => "Generating",
            Self::Generated => "Generated",
            Self::Saved => "Saved",
            Self::Error => "Error",
        }
    }
}

// ---------------------------------------------------------------------------
// ImageEntry
// ---------------------------------------------------------------------------

/// One row of the catalog.
///
/// Serialized field names (`absolute_path`, `caption_content`) match the
/// scan wire format consumed by the presentation layer.
#[derive(Debug, Clone, Serialize)]
pub struct ImageEntry {
    /// Absolute image path; the unique, stable key for all operations.
    #[serde(rename = "absolute_path")]
    pub path: PathBuf,
    /// File name, derived from the path. Display only.
    pub filename: String,
    /// Whether a caption currently exists in the persisted store, as
    /// last observed.
    pub has_caption: bool,
    /// Cached caption text; empty if none.
    #[serde(rename = "caption_content")]
    pub caption: String,
    /// Current lifecycle status.
    pub status: EntryStatus,
}

impl ImageEntry {
    /// Build an entry from a scan result. `caption` is `Some` exactly
    /// when a caption exists in the persisted store (even if empty).
    pub fn new(path: PathBuf, caption: Option<String>) -> Self {
        let filename = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        let has_caption = caption.is_some();
        let caption = caption.unwrap_or_default();
        let status = if has_caption {
            EntryStatus::Captioned
        } else {
            EntryStatus::Ready
        };
        Self {
            path,
            filename,
            has_caption,
            caption,
            status,
        }
    }
}

// ---------------------------------------------------------------------------
// Catalog
// ---------------------------------------------------------------------------

/// Ordered collection of [`ImageEntry`] for the currently loaded folder.
#[derive(Debug, Default)]
pub struct Catalog {
    entries: Vec<ImageEntry>,
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the catalog contents wholesale.
    ///
    /// Rejects entry sets containing duplicate paths; entry order is
    /// preserved as given (scan result order).
    pub fn load(&mut self, entries: Vec<ImageEntry>) -> Result<(), CoreError> {
        let mut seen = std::collections::HashSet::new();
        for entry in &entries {
            if !seen.insert(entry.path.as_path()) {
                return Err(CoreError::Validation(format!(
                    "Duplicate image path in scan result: {}",
                    entry.path.display()
                )));
            }
        }
        self.entries = entries;
        Ok(())
    }

    /// Index-addressed access. Indices are reused as stable handles only
    /// within one load cycle; callers must guard after a reload.
    pub fn get(&self, index: usize) -> Result<&ImageEntry, CoreError> {
        self.entries.get(index).ok_or(CoreError::OutOfRange {
            index,
            len: self.entries.len(),
        })
    }

    /// Position of the entry with the given path, if present.
    pub fn index_of_path(&self, path: &Path) -> Option<usize> {
        self.entries.iter().position(|e| e.path == path)
    }

    /// Entry with the given path, if present.
    pub fn by_path(&self, path: &Path) -> Option<&ImageEntry> {
        self.entries.iter().find(|e| e.path == path)
    }

    pub fn entries(&self) -> &[ImageEntry] {
        &self.entries
    }

    /// The only mutation path for caption state. Called after a confirmed
    /// backend write or clear, never speculatively.
    pub fn set_caption_state(
        &mut self,
        index: usize,
        has_caption: bool,
        caption: &str,
    ) -> Result<(), CoreError> {
        let len = self.entries.len();
        let entry = self
            .entries
            .get_mut(index)
            .ok_or(CoreError::OutOfRange { index, len })?;
        entry.has_caption = has_caption;
        entry.caption = caption.to_string();
        Ok(())
    }

    /// Update the displayed lifecycle status of an entry.
    pub fn set_status(&mut self, index: usize, status: EntryStatus) -> Result<(), CoreError> {
        let len = self.entries.len();
        let entry = self
            .entries
            .get_mut(index)
            .ok_or(CoreError::OutOfRange { index, len })?;
        entry.status = status;
        Ok(())
    }

    /// Number of entries whose caption currently exists.
    pub fn captioned_count(&self) -> usize {
        self.entries.iter().filter(|e| e.has_caption).count()
    }

    pub fn total(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
