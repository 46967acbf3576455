//! Resource types for lorepo.
//!
//! Every kind of resource the repository can hold (file-backed, link-backed,
//! ...) implements the same [`ResourceType`] contract: persist its payload,
//! keep filesystem state and attribute records consistent across
//! create/update/delete, and expose a uniform rendering surface.

mod file;
mod link;

pub use file::FileType;
pub use link::LinkType;

use std::collections::HashMap;

use crate::db::Database;
use crate::repository::Repository;
use crate::{ItemForm, ItemSubmission, Result};

/// A named payload slot a resource type persists.
///
/// `extension` is the fixed file extension for file-backed properties and
/// empty for properties that hold non-file values.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Property {
    /// Property name; keys the attribute record.
    pub name: &'static str,
    /// File extension (without the dot), or empty.
    pub extension: &'static str,
}

/// Explicit service handles passed to every type operation.
///
/// Replaces any notion of global database or filesystem state; tests inject
/// in-memory and temp-dir fakes through the same struct.
#[derive(Clone, Copy)]
pub struct Services<'a> {
    /// Metadata store connection owner.
    pub db: &'a Database,
    /// Path/repository service.
    pub repo: &'a Repository,
}

/// The contract every concrete resource type implements.
///
/// Mutating operations return `Ok(bool)`: the aggregate success of the
/// per-property metadata writes. Filesystem failures propagate as errors
/// instead. Partially completed writes are not rolled back; see DESIGN.md.
pub trait ResourceType {
    /// Type discriminator stored on the item record.
    fn name(&self) -> &'static str;

    /// Sub-directory under the repository root where this type stores files.
    fn storage_directory(&self) -> &'static str {
        "files"
    }

    /// The named payload slots this type persists, in stable order.
    fn properties(&self) -> &'static [Property];

    /// Add type-specific fields to the item form.
    ///
    /// When `item_id` is given (editing), fields stay optional and a note
    /// referencing the currently stored data is attached instead.
    fn add_to_form(&self, svc: &Services, form: &mut ItemForm, item_id: Option<i64>)
        -> Result<()>;

    /// Persist the payload for a newly created item.
    fn create(&self, svc: &Services, item_id: i64, submission: &ItemSubmission) -> Result<bool>;

    /// Update the payload of an existing item.
    fn update(&self, svc: &Services, item_id: i64, submission: &ItemSubmission) -> Result<bool>;

    /// Remove the payload and every attribute record for an item.
    fn delete(&self, svc: &Services, item_id: i64) -> Result<bool>;

    /// Compact, sharable inline markup for embedding outside the viewer.
    fn embed_html(&self, svc: &Services, item_id: i64) -> Result<String>;

    /// Full in-page markup for the resource's own view page.
    fn display_html(&self, svc: &Services, item_id: i64) -> Result<String>;

    /// Stable, publicly fetchable URL of the type's primary artifact.
    fn resource_url(&self, svc: &Services, item_id: i64) -> Result<String>;

    /// A value stable for the life of the item, usable to find references to
    /// it elsewhere. Defaults to the resource URL.
    fn unique_identifier(&self, svc: &Services, item_id: i64) -> Result<String> {
        self.resource_url(svc, item_id)
    }

    /// Layout hint for the view page.
    fn display_height(&self) -> &'static str {
        "600px"
    }
}

/// Registry mapping type discriminators to implementations.
#[derive(Default)]
pub struct TypeRegistry {
    types: HashMap<&'static str, Box<dyn ResourceType>>,
}

impl TypeRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a registry with the built-in types registered.
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.register(Box::new(FileType));
        registry.register(Box::new(LinkType));
        registry
    }

    /// Register a resource type under its discriminator.
    pub fn register(&mut self, resource_type: Box<dyn ResourceType>) {
        self.types.insert(resource_type.name(), resource_type);
    }

    /// Look up a type by discriminator.
    pub fn get(&self, name: &str) -> Option<&dyn ResourceType> {
        self.types.get(name).map(|t| t.as_ref())
    }

    /// Registered discriminators, sorted.
    pub fn names(&self) -> Vec<&'static str> {
        let mut names: Vec<&'static str> = self.types.keys().copied().collect();
        names.sort_unstable();
        names
    }
}

/// Escape text for inclusion in HTML markup.
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
