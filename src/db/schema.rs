//! Database schema and migrations for lorepo.
//!
//! Migrations are applied sequentially when the database is first opened or
//! upgraded; the schema_version table tracks which have run.

/// Database migrations.
pub const MIGRATIONS: &[&str] = &[
    // v1: items table - the generic resource record
    r#"
-- Items: one row per catalogued resource
CREATE TABLE items (
    id          INTEGER PRIMARY KEY AUTOINCREMENT,
    name        TEXT NOT NULL,
    itemtype    TEXT NOT NULL,                       -- resource type discriminator ('file', 'link', ...)
    topics      TEXT NOT NULL DEFAULT '[]',          -- JSON array of topic tags
    image       TEXT,                                -- repository-relative path of the preview image
    created_at  TEXT NOT NULL DEFAULT (datetime('now')),
    updated_at  TEXT NOT NULL DEFAULT (datetime('now'))
);

CREATE INDEX idx_items_itemtype ON items(itemtype);
"#,
    // v2: item_data table - type-specific state, one row per (item, property)
    r#"
-- Attribute records: type-specific state kept apart from the core item columns
CREATE TABLE item_data (
    id          INTEGER PRIMARY KEY AUTOINCREMENT,
    itemid      INTEGER NOT NULL REFERENCES items(id) ON DELETE CASCADE,
    name        TEXT NOT NULL,
    value       TEXT NOT NULL,
    UNIQUE(itemid, name)
);

CREATE INDEX idx_item_data_itemid ON item_data(itemid);
"#,
];
