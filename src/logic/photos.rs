//! Player photo storage: one image per record, named `<id>.<ext>`.

use std::fs;
use std::path::{Path, PathBuf};

use crate::models::{PlayerId, NO_PHOTO};

/// Moves uploaded photos into a fixed directory and removes them again when
/// records are edited or deleted. Every failure here is non-fatal: callers
/// get the [`NO_PHOTO`] sentinel back and the request continues.
pub struct PhotoStore {
    dir: PathBuf,
}

impl PhotoStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn destination(&self, id: PlayerId, original_name: Option<&str>) -> PathBuf {
        let extension = original_name
            .and_then(|name| Path::new(name).extension())
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.to_ascii_lowercase())
            .unwrap_or_else(|| "jpg".to_string());
        self.dir.join(format!("{id}.{extension}"))
    }

    /// Move an uploaded file into the photo directory, naming it by record
    /// id with the upload's extension (case-folded, `jpg` when absent).
    /// Returns the stored relative path, or [`NO_PHOTO`] when the move fails.
    pub fn store(&self, uploaded: &Path, original_name: Option<&str>, id: PlayerId) -> String {
        if let Err(e) = fs::create_dir_all(&self.dir) {
            log::warn!("could not create photo directory {}: {e}", self.dir.display());
            return NO_PHOTO.to_string();
        }
        let destination = self.destination(id, original_name);
        // Uploads land in a temp dir that may be on another filesystem, so
        // fall back to a copy when rename is refused.
        let moved = fs::rename(uploaded, &destination)
            .or_else(|_| fs::copy(uploaded, &destination).map(|_| ()));
        match moved {
            Ok(()) => destination.to_string_lossy().into_owned(),
            Err(e) => {
                log::warn!("failed to store photo for player {id}: {e}");
                NO_PHOTO.to_string()
            }
        }
    }

    /// Resolve the photo value for an edit. No upload keeps the current
    /// value exactly. A stored upload replaces it and removes the previous
    /// file. When the upload cannot be stored the current value is kept and
    /// the second return value reports the failure, so the caller can tell
    /// the user while still applying the rest of the edit.
    pub fn replace(
        &self,
        upload: Option<(&Path, Option<&str>)>,
        id: PlayerId,
        current: &str,
    ) -> (String, bool) {
        let Some((source, original_name)) = upload else {
            return (current.to_string(), false);
        };
        let stored = self.store(source, original_name, id);
        if stored == NO_PHOTO {
            return (current.to_string(), true);
        }
        self.remove_replaced(current, &stored);
        (stored, false)
    }

    /// After a replacement photo was stored, remove the previous file if it
    /// exists and differs from the new path. Deletion failures are logged
    /// and swallowed.
    pub fn remove_replaced(&self, old: &str, new: &str) {
        if old == new {
            return;
        }
        self.delete(old);
    }

    /// Remove a stored photo. Sentinel and missing paths are no-ops; actual
    /// deletion failures are logged and swallowed.
    pub fn delete(&self, path: &str) {
        if path.is_empty() || path == NO_PHOTO {
            return;
        }
        let file = Path::new(path);
        if !file.exists() {
            return;
        }
        if let Err(e) = fs::remove_file(file) {
            log::warn!("failed to delete photo {path}: {e}");
        }
    }
}
