//! Attribute records: per-item, per-property state for resource types.
//!
//! Each resource type persists its state as opaque string values keyed by
//! (item id, property name). For file-backed types the value is the
//! repository-relative path of the stored file.

use std::collections::HashMap;

use rusqlite::{params, Connection, OptionalExtension, Row};

use crate::Result;

/// One attribute record: (item id, property name) -> value.
#[derive(Debug, Clone)]
pub struct ItemData {
    /// Unique row ID.
    pub id: i64,
    /// Item this record belongs to.
    pub itemid: i64,
    /// Property name declared by the item's resource type.
    pub name: String,
    /// Opaque value (a relative file path for file-backed types).
    pub value: String,
}

/// Repository for attribute records.
pub struct ItemDataRepository;

impl ItemDataRepository {
    /// Insert a new attribute record.
    ///
    /// Returns `true` when the row was written. A duplicate (itemid, name)
    /// pair violates the unique constraint and surfaces as a database error.
    pub fn insert(conn: &Connection, itemid: i64, name: &str, value: &str) -> Result<bool> {
        let rows = conn.execute(
            "INSERT INTO item_data (itemid, name, value) VALUES (?1, ?2, ?3)",
            params![itemid, name, value],
        )?;
        Ok(rows > 0)
    }

    /// Update the value of an existing record by row ID.
    pub fn update(conn: &Connection, id: i64, value: &str) -> Result<bool> {
        let rows = conn.execute(
            "UPDATE item_data SET value = ?1 WHERE id = ?2",
            params![value, id],
        )?;
        Ok(rows > 0)
    }

    /// Get the record for one property of an item.
    pub fn get(conn: &Connection, itemid: i64, name: &str) -> Result<Option<ItemData>> {
        let record = conn
            .query_row(
                "SELECT id, itemid, name, value FROM item_data WHERE itemid = ?1 AND name = ?2",
                params![itemid, name],
                Self::map_row,
            )
            .optional()?;

        Ok(record)
    }

    /// Get all attribute values for an item, keyed by property name.
    pub fn get_item_data(conn: &Connection, itemid: i64) -> Result<HashMap<String, String>> {
        let mut stmt =
            conn.prepare("SELECT name, value FROM item_data WHERE itemid = ?1 ORDER BY id")?;

        let rows = stmt.query_map([itemid], |row| {
            Ok((row.get::<_, String>(0)?, row.get::<_, String>(1)?))
        })?;

        let mut data = HashMap::new();
        for row in rows {
            let (name, value) = row?;
            data.insert(name, value);
        }

        Ok(data)
    }

    /// Delete every attribute record for an item.
    ///
    /// Returns the number of rows removed; zero is not an error.
    pub fn delete_by_item(conn: &Connection, itemid: i64) -> Result<usize> {
        let rows = conn.execute("DELETE FROM item_data WHERE itemid = ?1", [itemid])?;
        Ok(rows)
    }

    fn map_row(row: &Row) -> rusqlite::Result<ItemData> {
        Ok(ItemData {
            id: row.get(0)?,
            itemid: row.get(1)?,
            name: row.get(2)?,
            value: row.get(3)?,
        })
    }
}
