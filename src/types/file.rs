//! File-backed resource type.
//!
//! The reference implementation of the [`ResourceType`] contract: each item
//! owns a PDF and an editable source document stored under `files/` in the
//! repository, with one attribute record per property holding the stored
//! file's repository-relative path.
//!
//! The helpers at the bottom are free functions so other file-backed types
//! can share the filename derivation and path layout without inheriting
//! anything.

use tracing::{debug, warn};

use crate::db::{format_topics, ItemDataRepository, ItemRepository};
use crate::repository::Repository;
use crate::{ItemForm, ItemSubmission, LorepoError, Result};

use super::{escape_html, Property, ResourceType, Services};

/// Properties persisted by the file type, in stable order.
const PROPERTIES: &[Property] = &[
    Property {
        name: "pdf",
        extension: "pdf",
    },
    Property {
        name: "document",
        extension: "docx",
    },
];

/// File-backed resource type ("file" discriminator).
pub struct FileType;

impl ResourceType for FileType {
    fn name(&self) -> &'static str {
        "file"
    }

    fn properties(&self) -> &'static [Property] {
        PROPERTIES
    }

    fn add_to_form(
        &self,
        svc: &Services,
        form: &mut ItemForm,
        item_id: Option<i64>,
    ) -> Result<()> {
        // When editing, point at the stored files instead of demanding a re-upload
        if let Some(id) = item_id {
            let pdf_url = svc.repo.file_url(svc.db.conn(), id, "pdf")?;
            let document_url = svc.repo.file_url(svc.db.conn(), id, "document")?;
            form.add_note(format!(
                "Files are already uploaded for this item: {pdf_url} and {document_url}. \
                 Choose a file below only to replace one."
            ));
        }

        form.add_file_picker("pdf", "PDF", &[".pdf"]);
        form.add_help("pdf", "The PDF shown on the resource page");
        form.add_file_picker("document", "Document", &[".docx"]);
        form.add_help("document", "The editable source document");

        if item_id.is_none() {
            form.require("pdf");
            form.require("document");
        }

        Ok(())
    }

    fn create(&self, svc: &Services, item_id: i64, submission: &ItemSubmission) -> Result<bool> {
        let item = ItemRepository::get_by_id(svc.db.conn(), item_id)?
            .ok_or_else(|| LorepoError::NotFound(format!("item {item_id}")))?;

        svc.repo.create_directory(self.storage_directory())?;

        let mut success = true;
        for property in self.properties() {
            let path = stored_path(self.storage_directory(), &item.name, property);

            if submission.has_upload(property.name) {
                submission.save_upload(property.name, &svc.repo.path_to(&path))?;
                debug!("Stored {} for item {} at {}", property.name, item_id, path);
            }

            // The slot is reserved even when no upload arrived for it yet; the
            // recorded path materializes once a file is uploaded.
            success = ItemDataRepository::insert(svc.db.conn(), item_id, property.name, &path)?
                && success;
        }

        Ok(success)
    }

    fn update(&self, svc: &Services, item_id: i64, submission: &ItemSubmission) -> Result<bool> {
        let item = ItemRepository::get_by_id(svc.db.conn(), item_id)?
            .ok_or_else(|| LorepoError::NotFound(format!("item {item_id}")))?;

        svc.repo.create_directory(self.storage_directory())?;

        let mut success = true;
        for property in self.properties() {
            // Properties with no attribute record are skipped, not backfilled
            let Some(existing) = ItemDataRepository::get(svc.db.conn(), item_id, property.name)?
            else {
                warn!(
                    "No {} record for item {}, skipping on update",
                    property.name, item_id
                );
                continue;
            };

            let path = stored_path(self.storage_directory(), &item.name, property);

            // Relocate first so a name change with no fresh upload still moves
            // the stored file; a fresh upload then overwrites it in place.
            svc.repo.update_filepath(&existing.value, &path)?;

            if submission.has_upload(property.name) {
                submission.save_upload(property.name, &svc.repo.path_to(&path))?;
            }

            success = ItemDataRepository::update(svc.db.conn(), existing.id, &path)? && success;
        }

        Ok(success)
    }

    fn delete(&self, svc: &Services, item_id: i64) -> Result<bool> {
        let data = ItemDataRepository::get_item_data(svc.db.conn(), item_id)?;

        // Best-effort: files removed externally are not an error
        for property in self.properties() {
            if let Some(path) = data.get(property.name) {
                if !svc.repo.delete_file(path)? {
                    debug!("Stored file {} for item {} already gone", path, item_id);
                }
            }
        }

        ItemDataRepository::delete_by_item(svc.db.conn(), item_id)?;

        Ok(true)
    }

    fn embed_html(&self, svc: &Services, item_id: i64) -> Result<String> {
        let item = ItemRepository::get_by_id(svc.db.conn(), item_id)?
            .ok_or_else(|| LorepoError::NotFound(format!("item {item_id}")))?;

        let pdf_url = svc.repo.file_url(svc.db.conn(), item_id, "pdf")?;
        let name = escape_html(&item.name);
        let topics = escape_html(&format_topics(&item.topics));

        let thumbnail = match &item.image {
            Some(image) => format!(
                r#"<img src="{}" width="200" height="150" alt="{name}"/>"#,
                svc.repo.url_for(image)
            ),
            None => name.clone(),
        };

        Ok(format!(
            r#"<table class="lor-embed"><tbody><tr>
  <td width="200px"><a href="{pdf_url}">{thumbnail}</a></td>
  <td><b>{name}</b><br/><span class="lor-topics">Topics: {topics}</span></td>
</tr></tbody></table>"#
        ))
    }

    fn display_html(&self, svc: &Services, item_id: i64) -> Result<String> {
        let url = svc.repo.file_url(svc.db.conn(), item_id, "pdf")?;
        Ok(format!(
            r#"<embed src="{url}" width="100%" height="100%">"#
        ))
    }

    fn resource_url(&self, svc: &Services, item_id: i64) -> Result<String> {
        // The PDF is the primary artifact; used for external sharing
        svc.repo.file_url(svc.db.conn(), item_id, "pdf")
    }

    fn display_height(&self) -> &'static str {
        "900px"
    }
}

/// Path of a stored file relative to the repository root.
pub fn path_to_file(directory: &str, filename: &str) -> String {
    format!("{directory}/{filename}")
}

/// Derive the stored filename for a property from the item's display name.
pub fn target_filename(item_name: &str, property: &Property) -> String {
    Repository::format_filename(&format!("{item_name}.{}", property.extension))
}

fn stored_path(directory: &str, item_name: &str, property: &Property) -> String {
    path_to_file(directory, &target_filename(item_name, property))
}
