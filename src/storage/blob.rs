//! Blob Store
//!
//! The content area: one file per identifier, named exactly by the
//! identifier, holding the uploaded bytes verbatim.

use std::fs;
use std::io;
use std::path::{Component, Path, PathBuf};

use crate::error::Result;

/// Flat directory of content blobs
///
/// ```text
/// {dir}/
/// ├── 0b6f4c1e-8a4e-4c4f-9f39-3d0c2b1a7e55
/// ├── 9d1a7c22-5b0e-4f7a-a1d2-6c3e8f4b2a10
/// └── ...
/// ```
#[derive(Debug, Clone)]
pub struct BlobStore {
    dir: PathBuf,
}

impl BlobStore {
    /// Open the content directory, creating it if needed
    pub fn open(dir: impl Into<PathBuf>) -> Result<Self> {
        let dir = dir.into();
        fs::create_dir_all(&dir)?;
        Ok(Self { dir })
    }

    /// Write `content` as the blob for `id`, replacing any previous blob
    pub fn write(&self, id: &str, content: &[u8]) -> Result<PathBuf> {
        let path = self.resolve(id).ok_or_else(|| {
            io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("invalid blob identifier: {id:?}"),
            )
        })?;

        fs::write(&path, content)?;
        Ok(path)
    }

    /// Path of the blob for `id`, if one exists
    pub fn locate(&self, id: &str) -> Option<PathBuf> {
        self.resolve(id).filter(|path| path.is_file())
    }

    /// Read the blob for `id`
    ///
    /// Returns `Ok(None)` if there is no blob (including one removed between a
    /// `locate` and this call).
    pub fn read(&self, id: &str) -> Result<Option<Vec<u8>>> {
        let Some(path) = self.resolve(id) else {
            return Ok(None);
        };

        match fs::read(&path) {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// Identifiers of every blob currently on disk
    pub fn ids(&self) -> Result<Vec<String>> {
        let mut ids = Vec::new();

        for entry in fs::read_dir(&self.dir)? {
            let entry = entry?;
            if !entry.file_type()?.is_file() {
                continue;
            }
            if let Some(name) = entry.file_name().to_str() {
                ids.push(name.to_string());
            }
        }

        ids.sort();
        Ok(ids)
    }

    /// Get the content directory
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    // =========================================================================
    // Private Helpers
    // =========================================================================

    /// Map an identifier to its blob path
    ///
    /// Only a single plain path component is accepted, so `..`, absolute
    /// paths and anything with a separator never leave the content directory.
    fn resolve(&self, id: &str) -> Option<PathBuf> {
        let mut components = Path::new(id).components();
        match (components.next(), components.next()) {
            (Some(Component::Normal(name)), None) if name == id => Some(self.dir.join(id)),
            _ => None,
        }
    }
}
