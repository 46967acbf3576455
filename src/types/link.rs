//! Link-backed resource type.
//!
//! Stores a single external URL per item and renders it as an anchor (embed)
//! or iframe (display). No repository files are involved, so create/update
//! reduce to attribute-record writes.

use url::Url;

use crate::db::{format_topics, ItemDataRepository, ItemRepository};
use crate::{ItemForm, ItemSubmission, LorepoError, Result};

use super::{escape_html, Property, ResourceType, Services};

const PROPERTIES: &[Property] = &[Property {
    name: "url",
    extension: "",
}];

/// Link-backed resource type ("link" discriminator).
pub struct LinkType;

impl LinkType {
    fn stored_url(&self, svc: &Services, item_id: i64) -> Result<String> {
        let record = ItemDataRepository::get(svc.db.conn(), item_id, "url")?
            .ok_or_else(|| LorepoError::NotFound(format!("attribute 'url' for item {item_id}")))?;
        Ok(record.value)
    }

    fn validated_url(submission: &ItemSubmission) -> Result<String> {
        let raw = submission
            .value("url")
            .ok_or_else(|| LorepoError::Validation("url is required".to_string()))?;

        Url::parse(raw).map_err(|e| LorepoError::Validation(format!("invalid url: {e}")))?;

        Ok(raw.to_string())
    }
}

impl ResourceType for LinkType {
    fn name(&self) -> &'static str {
        "link"
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
        if let Some(id) = item_id {
            let current = self.stored_url(svc, id)?;
            form.add_note(format!("This item currently links to {current}."));
        }

        form.add_url("url", "Link");
        form.add_help("url", "The external resource this item points to");

        if item_id.is_none() {
            form.require("url");
        }

        Ok(())
    }

    fn create(&self, svc: &Services, item_id: i64, submission: &ItemSubmission) -> Result<bool> {
        let url = Self::validated_url(submission)?;
        ItemDataRepository::insert(svc.db.conn(), item_id, "url", &url)
    }

    fn update(&self, svc: &Services, item_id: i64, submission: &ItemSubmission) -> Result<bool> {
        // Same only-if-existing rule as the file type's per-property updates
        let Some(existing) = ItemDataRepository::get(svc.db.conn(), item_id, "url")? else {
            return Ok(true);
        };

        let url = Self::validated_url(submission)?;
        ItemDataRepository::update(svc.db.conn(), existing.id, &url)
    }

    fn delete(&self, svc: &Services, item_id: i64) -> Result<bool> {
        ItemDataRepository::delete_by_item(svc.db.conn(), item_id)?;
        Ok(true)
    }

    fn embed_html(&self, svc: &Services, item_id: i64) -> Result<String> {
        let item = ItemRepository::get_by_id(svc.db.conn(), item_id)?
            .ok_or_else(|| LorepoError::NotFound(format!("item {item_id}")))?;
        let url = self.stored_url(svc, item_id)?;

        let name = escape_html(&item.name);
        let topics = escape_html(&format_topics(&item.topics));

        Ok(format!(
            r#"<p class="lor-embed"><a href="{url}">{name}</a> <span class="lor-topics">Topics: {topics}</span></p>"#
        ))
    }

    fn display_html(&self, svc: &Services, item_id: i64) -> Result<String> {
        let url = self.stored_url(svc, item_id)?;
        Ok(format!(
            r#"<iframe src="{url}" width="100%" height="100%"></iframe>"#
        ))
    }

    fn resource_url(&self, svc: &Services, item_id: i64) -> Result<String> {
        self.stored_url(svc, item_id)
    }
}
