//! Generic item records for the resource catalogue.
//!
//! The storage subsystem only ever reads `id`, `name` and the type
//! discriminator from here; the embed rendering additionally reads the topic
//! list and preview image. Owner, category and grade metadata live with the
//! host system and are not modelled.

use chrono::{DateTime, Utc};
use rusqlite::{params, Connection, OptionalExtension, Row};

use crate::{LorepoError, Result};

/// A catalogued resource record.
#[derive(Debug, Clone)]
pub struct Item {
    /// Unique item ID.
    pub id: i64,
    /// Display name. Stored filenames are derived from this.
    pub name: String,
    /// Resource type discriminator ("file", "link", ...).
    pub itemtype: String,
    /// Topic tags.
    pub topics: Vec<String>,
    /// Repository-relative path of the preview image, if any.
    pub image: Option<String>,
    /// When the item was created.
    pub created_at: DateTime<Utc>,
}

/// Data for creating a new item.
#[derive(Debug, Clone)]
pub struct NewItem {
    /// Display name.
    pub name: String,
    /// Resource type discriminator.
    pub itemtype: String,
    /// Topic tags.
    pub topics: Vec<String>,
    /// Preview image path, if any.
    pub image: Option<String>,
}

impl NewItem {
    /// Create a new NewItem.
    pub fn new(name: impl Into<String>, itemtype: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            itemtype: itemtype.into(),
            topics: Vec::new(),
            image: None,
        }
    }

    /// Set the topic tags.
    pub fn with_topics(mut self, topics: Vec<String>) -> Self {
        self.topics = topics;
        self
    }

    /// Set the preview image path.
    pub fn with_image(mut self, image: impl Into<String>) -> Self {
        self.image = Some(image.into());
        self
    }
}

/// Format a topic list for display ("Biology, Chemistry").
pub fn format_topics(topics: &[String]) -> String {
    topics.join(", ")
}

/// Repository for generic item records.
pub struct ItemRepository;

impl ItemRepository {
    /// Create a new item.
    pub fn create(conn: &Connection, item: &NewItem) -> Result<Item> {
        let topics = serde_json::to_string(&item.topics)
            .map_err(|e| LorepoError::Database(e.to_string()))?;

        conn.execute(
            "INSERT INTO items (name, itemtype, topics, image) VALUES (?1, ?2, ?3, ?4)",
            params![item.name, item.itemtype, topics, item.image],
        )?;

        let id = conn.last_insert_rowid();
        Self::get_by_id(conn, id)?
            .ok_or_else(|| LorepoError::Database("inserted item not found".to_string()))
    }

    /// Get an item by ID.
    pub fn get_by_id(conn: &Connection, id: i64) -> Result<Option<Item>> {
        let item = conn
            .query_row(
                "SELECT id, name, itemtype, topics, image, created_at FROM items WHERE id = ?1",
                [id],
                Self::map_row,
            )
            .optional()?;

        Ok(item)
    }

    /// Rename an item.
    ///
    /// Only the generic record is touched; relocating stored files is the
    /// responsibility of the item's resource type (via `update`).
    pub fn rename(conn: &Connection, id: i64, name: &str) -> Result<bool> {
        let rows = conn.execute(
            "UPDATE items SET name = ?1, updated_at = datetime('now') WHERE id = ?2",
            params![name, id],
        )?;
        Ok(rows > 0)
    }

    /// Delete an item record.
    pub fn delete(conn: &Connection, id: i64) -> Result<bool> {
        let rows = conn.execute("DELETE FROM items WHERE id = ?1", [id])?;
        Ok(rows > 0)
    }

    fn map_row(row: &Row) -> rusqlite::Result<Item> {
        let topics_json: String = row.get(3)?;
        let created_at_str: String = row.get(5)?;

        Ok(Item {
            id: row.get(0)?,
            name: row.get(1)?,
            itemtype: row.get(2)?,
            topics: serde_json::from_str(&topics_json).unwrap_or_default(),
            image: row.get(4)?,
            created_at: DateTime::parse_from_rfc3339(&format!("{created_at_str}Z"))
                .map(|dt| dt.with_timezone(&Utc))
                .unwrap_or_else(|_| Utc::now()),
        })
    }
}
