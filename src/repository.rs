//! Path/repository service for lorepo.
//!
//! Maps logical resource references to on-disk paths inside the repository
//! root, performs the physical file operations, and resolves public download
//! URLs for stored files.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use rusqlite::Connection;
use tracing::debug;
use url::Url;

use crate::db::ItemDataRepository;
use crate::{LorepoError, Result};

/// Filesystem and URL service for the file repository.
///
/// All relative paths are interpreted against the repository root, e.g.
/// `files/Photosynthesis.pdf` lives at `{root}/files/Photosynthesis.pdf` and
/// is served at `{base_url}/files/Photosynthesis.pdf`.
#[derive(Debug, Clone)]
pub struct Repository {
    root: PathBuf,
    base_url: String,
}

impl Repository {
    /// Create a new Repository rooted at the given directory.
    ///
    /// The root directory is created if it does not exist. `base_url` must be
    /// an absolute URL; a trailing slash is stripped.
    pub fn new(root: impl Into<PathBuf>, base_url: &str) -> Result<Self> {
        let root = root.into();
        fs::create_dir_all(&root)?;

        Url::parse(base_url)
            .map_err(|e| LorepoError::Config(format!("invalid repository base URL: {e}")))?;

        Ok(Self {
            root,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Get the absolute path of the repository root.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Create a directory (and intermediates) under the repository root.
    ///
    /// Idempotent: an existing directory is not an error.
    pub fn create_directory(&self, relative: &str) -> Result<()> {
        fs::create_dir_all(self.root.join(relative))?;
        Ok(())
    }

    /// Normalize a raw filename into a filesystem-safe form.
    ///
    /// ASCII alphanumerics, spaces, dots, dashes and underscores pass through;
    /// every other character becomes `_`. The extension survives because dots
    /// are kept. Collisions are not deduplicated; items sharing a normalized
    /// name overwrite each other's files.
    pub fn format_filename(raw: &str) -> String {
        raw.chars()
            .map(|c| {
                if c.is_ascii_alphanumeric() || matches!(c, ' ' | '.' | '-' | '_') {
                    c
                } else {
                    '_'
                }
            })
            .collect()
    }

    /// Get the absolute path for a repository-relative path.
    pub fn path_to(&self, relative: &str) -> PathBuf {
        self.root.join(relative)
    }

    /// Build the public URL for a repository-relative path.
    pub fn url_for(&self, relative: &str) -> String {
        let encoded: Vec<String> = relative
            .split('/')
            .map(|segment| urlencoding::encode(segment).into_owned())
            .collect();

        format!("{}/{}", self.base_url, encoded.join("/"))
    }

    /// Resolve the public URL of a stored file via its attribute record.
    ///
    /// Looks up the (item, property) attribute record and builds a URL from
    /// its value. A missing record is a `NotFound` error.
    pub fn file_url(&self, conn: &Connection, itemid: i64, property: &str) -> Result<String> {
        let record = ItemDataRepository::get(conn, itemid, property)?.ok_or_else(|| {
            LorepoError::NotFound(format!("attribute '{property}' for item {itemid}"))
        })?;

        Ok(self.url_for(&record.value))
    }

    /// Move/rename a stored file.
    ///
    /// A missing source is a no-op: items may be created with optional
    /// properties whose files were never uploaded.
    pub fn update_filepath(&self, old_relative: &str, new_relative: &str) -> Result<()> {
        let src = self.path_to(old_relative);
        let dst = self.path_to(new_relative);

        if let Some(parent) = dst.parent() {
            fs::create_dir_all(parent)?;
        }

        match fs::rename(&src, &dst) {
            Ok(()) => {
                debug!("Moved {:?} to {:?}", src, dst);
                Ok(())
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }

    /// Delete a stored file.
    ///
    /// Returns `true` when a file was removed, `false` when it was already
    /// absent (not an error).
    pub fn delete_file(&self, relative: &str) -> Result<bool> {
        match fs::remove_file(self.path_to(relative)) {
            Ok(()) => Ok(true),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(false),
            Err(e) => Err(e.into()),
        }
    }
}
