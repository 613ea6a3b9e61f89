use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use uuid::Uuid;

pub const ALLOWED_IMAGE_TYPES: &[&str] = &["image/jpeg", "image/jpg", "image/png", "image/gif"];
pub const MAX_IMAGE_BYTES: usize = 5 * 1024 * 1024;

/// External image storage collaborator. The booking core never touches
/// files; handlers call this around store writes, best-effort on delete.
pub trait ImageStore: Send + Sync {
    /// Persist the uploaded file and return the path string stored on the
    /// entity.
    fn save(&self, source: &Path, original_name: Option<&str>, subdir: &str) -> io::Result<String>;

    /// Best-effort removal of a previously stored image.
    fn delete(&self, path: &str);
}

pub struct DiskImageStore {
    root: PathBuf,
}

impl DiskImageStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

impl ImageStore for DiskImageStore {
    fn save(&self, source: &Path, original_name: Option<&str>, subdir: &str) -> io::Result<String> {
        let dir = self.root.join(subdir);
        fs::create_dir_all(&dir)?;

        let ext = original_name
            .and_then(|name| Path::new(name).extension().and_then(|e| e.to_str()))
            .unwrap_or("bin");
        let file_name = format!("{}.{ext}", Uuid::new_v4());

        fs::copy(source, dir.join(&file_name))?;
        Ok(format!("{subdir}/{file_name}"))
    }

    fn delete(&self, path: &str) {
        if let Err(err) = fs::remove_file(self.root.join(path)) {
            log::warn!("failed to remove image {path}: {err}");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn save_copies_file_and_delete_removes_it() {
        let root = tempfile::tempdir().unwrap();
        let upload = tempfile::NamedTempFile::new().unwrap();
        fs::write(upload.path(), b"not really a jpeg").unwrap();

        let store = DiskImageStore::new(root.path());
        let path = store
            .save(upload.path(), Some("front.jpg"), "hotel_images")
            .unwrap();

        assert!(path.starts_with("hotel_images/"));
        assert!(path.ends_with(".jpg"));
        assert!(root.path().join(&path).exists());

        store.delete(&path);
        assert!(!root.path().join(&path).exists());
    }
}
