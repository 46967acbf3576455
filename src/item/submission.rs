//! Submitted form data and uploads.
//!
//! `ItemSubmission` is the boundary between the (external) form layer and the
//! resource types: plain field values plus uploaded byte payloads, keyed by
//! property name. Saving an upload for a property nothing was submitted for
//! is a no-op, so types can iterate their declared properties unconditionally.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use crate::Result;

/// Form values and uploaded files from one create/update request.
#[derive(Debug, Clone, Default)]
pub struct ItemSubmission {
    values: HashMap<String, String>,
    uploads: HashMap<String, Vec<u8>>,
}

impl ItemSubmission {
    /// Create an empty submission.
    pub fn new() -> Self {
        Self::default()
    }

    /// Attach a plain field value.
    pub fn with_value(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.values.insert(name.into(), value.into());
        self
    }

    /// Attach an uploaded file's content for a property.
    pub fn with_upload(mut self, name: impl Into<String>, content: Vec<u8>) -> Self {
        self.uploads.insert(name.into(), content);
        self
    }

    /// Get a submitted field value.
    pub fn value(&self, name: &str) -> Option<&str> {
        self.values.get(name).map(|s| s.as_str())
    }

    /// Whether new content was uploaded for a property.
    pub fn has_upload(&self, name: &str) -> bool {
        self.uploads.contains_key(name)
    }

    /// Write the uploaded content for a property to the destination path.
    ///
    /// Creates parent directories as needed and overwrites an existing file.
    /// Returns `Ok(false)` without touching the filesystem when no upload was
    /// submitted for the property.
    pub fn save_upload(&self, name: &str, dest: &Path) -> Result<bool> {
        let Some(content) = self.uploads.get(name) else {
            return Ok(false);
        };

        if let Some(parent) = dest.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(dest, content)?;

        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_values() {
        let submission = ItemSubmission::new().with_value("url", "https://example.com");

        assert_eq!(submission.value("url"), Some("https://example.com"));
        assert_eq!(submission.value("other"), None);
    }

    #[test]
    fn test_has_upload() {
        let submission = ItemSubmission::new().with_upload("pdf", b"%PDF-1.4".to_vec());

        assert!(submission.has_upload("pdf"));
        assert!(!submission.has_upload("document"));
    }

    #[test]
    fn test_save_upload_writes_content() {
        let temp_dir = TempDir::new().unwrap();
        let dest = temp_dir.path().join("files").join("test.pdf");
        let submission = ItemSubmission::new().with_upload("pdf", b"%PDF-1.4".to_vec());

        let saved = submission.save_upload("pdf", &dest).unwrap();

        assert!(saved);
        assert_eq!(fs::read(&dest).unwrap(), b"%PDF-1.4");
    }

    #[test]
    fn test_save_upload_noop_without_content() {
        let temp_dir = TempDir::new().unwrap();
        let dest = temp_dir.path().join("test.pdf");
        let submission = ItemSubmission::new();

        let saved = submission.save_upload("pdf", &dest).unwrap();

        assert!(!saved);
        assert!(!dest.exists());
    }

    #[test]
    fn test_save_upload_overwrites() {
        let temp_dir = TempDir::new().unwrap();
        let dest = temp_dir.path().join("test.pdf");
        fs::write(&dest, b"old").unwrap();

        let submission = ItemSubmission::new().with_upload("pdf", b"new".to_vec());
        submission.save_upload("pdf", &dest).unwrap();

        assert_eq!(fs::read(&dest).unwrap(), b"new");
    }
}
