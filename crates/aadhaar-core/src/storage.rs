//! Persistence of extracted images.

use std::collections::BTreeMap;
use std::fs;
use std::path::PathBuf;
use std::sync::Mutex;

use tracing::debug;

use crate::error::StorageError;
use crate::models::config::StorageConfig;
use crate::models::extraction::EmbeddedImage;

/// Result type for storage operations.
pub type Result<T> = std::result::Result<T, StorageError>;

/// Destination for extracted images.
pub trait ImageStore {
    /// Persist an image and return the reference callers use to fetch it.
    fn store(&self, image: &EmbeddedImage) -> Result<String>;
}

/// Writes images to a directory served by a static file server.
///
/// Images are written under their derived file name, so re-processing a
/// document overwrites earlier output at the same ordinals.
#[derive(Debug, Clone)]
pub struct FsImageStore {
    image_dir: PathBuf,
    base_url: String,
    images_route: String,
}

impl FsImageStore {
    pub fn new(
        image_dir: impl Into<PathBuf>,
        base_url: impl Into<String>,
        images_route: impl Into<String>,
    ) -> Self {
        Self {
            image_dir: image_dir.into(),
            base_url: base_url.into(),
            images_route: images_route.into(),
        }
    }

    pub fn from_config(config: &StorageConfig) -> Self {
        Self::new(&config.image_dir, &config.base_url, &config.images_route)
    }

    /// Public URL for a stored file name.
    pub fn url_for(&self, file_name: &str) -> String {
        let base = self.base_url.trim_end_matches('/');
        let route = self.images_route.trim_matches('/');
        if route.is_empty() {
            format!("{}/{}", base, file_name)
        } else {
            format!("{}/{}/{}", base, route, file_name)
        }
    }
}

impl ImageStore for FsImageStore {
    fn store(&self, image: &EmbeddedImage) -> Result<String> {
        let file_name = image.file_name();
        let path = self.image_dir.join(&file_name);

        fs::create_dir_all(&self.image_dir).map_err(|source| StorageError::Write {
            path: self.image_dir.clone(),
            source,
        })?;
        fs::write(&path, &image.data).map_err(|source| StorageError::Write {
            path: path.clone(),
            source,
        })?;

        debug!("Wrote {} bytes to {}", image.data.len(), path.display());
        Ok(self.url_for(&file_name))
    }
}

/// Keeps images in memory, keyed by file name.
#[derive(Debug, Default)]
pub struct MemoryImageStore {
    images: Mutex<BTreeMap<String, Vec<u8>>>,
}

impl MemoryImageStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stored bytes for a file name.
    pub fn get(&self, file_name: &str) -> Option<Vec<u8>> {
        self.lock().get(file_name).cloned()
    }

    /// Stored file names, sorted.
    pub fn file_names(&self) -> Vec<String> {
        self.lock().keys().cloned().collect()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, BTreeMap<String, Vec<u8>>> {
        self.images.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl ImageStore for MemoryImageStore {
    fn store(&self, image: &EmbeddedImage) -> Result<String> {
        let file_name = image.file_name();
        self.lock().insert(file_name.clone(), image.data.clone());
        Ok(format!("memory://{}", file_name))
    }
}

impl<S: ImageStore + ?Sized> ImageStore for &S {
    fn store(&self, image: &EmbeddedImage) -> Result<String> {
        (**self).store(image)
    }
}
