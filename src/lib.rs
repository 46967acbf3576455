//! lorepo - Learning Object Repository
//!
//! A repository of educational resources: items tagged with a resource type
//! whose payload (files, links, ...) is persisted by a matching
//! [`types::ResourceType`] implementation, with filesystem state handled by
//! the [`Repository`] service and type-specific metadata kept as per-item
//! attribute records.

pub mod config;
pub mod context;
pub mod db;
pub mod error;
pub mod item;
pub mod logging;
pub mod repository;
pub mod types;

pub use config::Config;
pub use context::PageContext;
pub use db::{
    format_topics, Database, Item, ItemData, ItemDataRepository, ItemRepository, NewItem,
    MIGRATIONS,
};
pub use error::{LorepoError, Result};
pub use item::{FieldKind, FormField, ItemForm, ItemLifecycle, ItemSubmission};
pub use repository::Repository;
pub use types::{FileType, LinkType, Property, ResourceType, Services, TypeRegistry};
