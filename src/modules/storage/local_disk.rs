//! Local disk storage for uploaded media
//!
//! Uploads land under `DATA_DIR/uploads/...` and homepage media under
//! `HOMEPAGE_DIR/{images,videos}`. Directories are created on first write.

use std::io;
use std::path::{Path, PathBuf};

use tokio::fs;
use tracing::{debug, info};

use crate::core::config::StorageConfig;

/// A directory media can be written to, with the URL path it is served under
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaDir {
    UploadImages,
    UploadVideos,
    SvgIcons,
    HomepageImages,
    HomepageVideos,
}

impl MediaDir {
    /// Path below the storage root
    fn relative(&self) -> &'static str {
        match self {
            MediaDir::UploadImages => "uploads/images",
            MediaDir::UploadVideos => "uploads/videos",
            MediaDir::SvgIcons => "uploads/svg-icons",
            MediaDir::HomepageImages => "images",
            MediaDir::HomepageVideos => "videos",
        }
    }

    fn is_homepage(&self) -> bool {
        matches!(self, MediaDir::HomepageImages | MediaDir::HomepageVideos)
    }

    /// URL path prefix the static file routes serve this directory under
    pub fn url_prefix(&self) -> String {
        let mount = if self.is_homepage() { "/homepage" } else { "/data" };
        format!("{}/{}", mount, self.relative())
    }

    /// Absolute public URL of `filename` in this directory
    pub fn public_url(&self, base_url: &str, filename: &str) -> String {
        format!(
            "{}{}/{}",
            base_url.trim_end_matches('/'),
            self.url_prefix(),
            filename
        )
    }
}

/// Filesystem-backed media store
#[derive(Debug, Clone)]
pub struct LocalStorage {
    data_dir: PathBuf,
    homepage_dir: PathBuf,
}

impl LocalStorage {
    pub fn new(config: &StorageConfig) -> Self {
        Self {
            data_dir: config.data_dir.clone(),
            homepage_dir: config.homepage_dir.clone(),
        }
    }

    pub fn dir(&self, dir: MediaDir) -> PathBuf {
        let root: &Path = if dir.is_homepage() {
            &self.homepage_dir
        } else {
            &self.data_dir
        };
        root.join(dir.relative())
    }

    fn path(&self, dir: MediaDir, filename: &str) -> PathBuf {
        self.dir(dir).join(filename)
    }

    /// Write a new file, creating the directory when needed
    pub async fn save(&self, dir: MediaDir, filename: &str, data: &[u8]) -> io::Result<()> {
        let target_dir = self.dir(dir);
        fs::create_dir_all(&target_dir).await?;
        fs::write(target_dir.join(filename), data).await?;

        info!(
            "Stored {} bytes at {}/{}",
            data.len(),
            dir.url_prefix(),
            filename
        );
        Ok(())
    }

    pub async fn exists(&self, dir: MediaDir, filename: &str) -> io::Result<bool> {
        match fs::metadata(self.path(dir, filename)).await {
            Ok(meta) => Ok(meta.is_file()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(false),
            Err(e) => Err(e),
        }
    }

    /// Overwrite an existing file. Returns `false` when there was nothing to replace.
    pub async fn replace(&self, dir: MediaDir, filename: &str, data: &[u8]) -> io::Result<bool> {
        if !self.exists(dir, filename).await? {
            return Ok(false);
        }

        fs::write(self.path(dir, filename), data).await?;
        info!("Replaced {}/{}", dir.url_prefix(), filename);
        Ok(true)
    }

    /// Remove a file. Returns `false` when it did not exist.
    pub async fn delete(&self, dir: MediaDir, filename: &str) -> io::Result<bool> {
        match fs::remove_file(self.path(dir, filename)).await {
            Ok(()) => {
                info!("Deleted {}/{}", dir.url_prefix(), filename);
                Ok(true)
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(false),
            Err(e) => Err(e),
        }
    }

    pub async fn read_to_string(&self, dir: MediaDir, filename: &str) -> io::Result<String> {
        fs::read_to_string(self.path(dir, filename)).await
    }

    /// Names of the regular files in `dir`, sorted. The directory is created if missing.
    pub async fn list(&self, dir: MediaDir) -> io::Result<Vec<String>> {
        let target_dir = self.dir(dir);
        fs::create_dir_all(&target_dir).await?;

        let mut entries = fs::read_dir(&target_dir).await?;
        let mut names = Vec::new();
        while let Some(entry) = entries.next_entry().await? {
            if entry.file_type().await?.is_file() {
                if let Some(name) = entry.file_name().to_str() {
                    names.push(name.to_string());
                }
            }
        }
        names.sort();

        debug!("Listed {} files in {}", names.len(), target_dir.display());
        Ok(names)
    }
}
