//! Item lifecycle coordinator.
//!
//! Routes create/update/delete of an item's payload to the resource type
//! registered under its discriminator. The generic item record is managed
//! elsewhere; this layer holds no type-specific knowledge and passes the
//! type's success signal upward unchanged.

use tracing::debug;

use crate::db::Database;
use crate::repository::Repository;
use crate::types::{Services, TypeRegistry};
use crate::{ItemSubmission, LorepoError, Result};

/// Coordinator for type-specific item payload handling.
pub struct ItemLifecycle<'a> {
    db: &'a Database,
    repo: &'a Repository,
    registry: &'a TypeRegistry,
}

impl<'a> ItemLifecycle<'a> {
    /// Create a new coordinator over the given services and type registry.
    pub fn new(db: &'a Database, repo: &'a Repository, registry: &'a TypeRegistry) -> Self {
        Self { db, repo, registry }
    }

    fn services(&self) -> Services<'a> {
        Services {
            db: self.db,
            repo: self.repo,
        }
    }

    fn resolve(&self, type_name: &str) -> Result<&'a dyn crate::types::ResourceType> {
        self.registry
            .get(type_name)
            .ok_or_else(|| LorepoError::UnknownType(type_name.to_string()))
    }

    /// Persist a new item's type-specific payload.
    pub fn create(
        &self,
        item_id: i64,
        type_name: &str,
        submission: &ItemSubmission,
    ) -> Result<bool> {
        debug!("Creating {} payload for item {}", type_name, item_id);
        self.resolve(type_name)?
            .create(&self.services(), item_id, submission)
    }

    /// Update an existing item's type-specific payload.
    pub fn update(
        &self,
        item_id: i64,
        type_name: &str,
        submission: &ItemSubmission,
    ) -> Result<bool> {
        debug!("Updating {} payload for item {}", type_name, item_id);
        self.resolve(type_name)?
            .update(&self.services(), item_id, submission)
    }

    /// Remove an item's type-specific payload.
    pub fn delete(&self, item_id: i64, type_name: &str) -> Result<bool> {
        debug!("Deleting {} payload for item {}", type_name, item_id);
        self.resolve(type_name)?.delete(&self.services(), item_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{ItemRepository, NewItem};
    use tempfile::TempDir;

    fn setup() -> (Database, TempDir, Repository, TypeRegistry) {
        let db = Database::open_in_memory().unwrap();
        let temp_dir = TempDir::new().unwrap();
        let repo = Repository::new(temp_dir.path(), "http://localhost/repo").unwrap();
        let registry = TypeRegistry::with_defaults();
        (db, temp_dir, repo, registry)
    }

    #[test]
    fn test_unknown_type() {
        let (db, _temp_dir, repo, registry) = setup();
        let lifecycle = ItemLifecycle::new(&db, &repo, &registry);

        let result = lifecycle.create(1, "video", &ItemSubmission::new());

        assert!(matches!(result, Err(LorepoError::UnknownType(_))));
    }

    #[test]
    fn test_create_routes_to_file_type() {
        let (db, _temp_dir, repo, registry) = setup();
        let item = ItemRepository::create(db.conn(), &NewItem::new("Routed", "file")).unwrap();
        let lifecycle = ItemLifecycle::new(&db, &repo, &registry);

        let submission = ItemSubmission::new().with_upload("pdf", b"%PDF".to_vec());
        let success = lifecycle.create(item.id, "file", &submission).unwrap();

        assert!(success);
        assert!(repo.path_to("files/Routed.pdf").exists());
    }

    #[test]
    fn test_delete_routes_to_file_type() {
        let (db, _temp_dir, repo, registry) = setup();
        let item = ItemRepository::create(db.conn(), &NewItem::new("Routed", "file")).unwrap();
        let lifecycle = ItemLifecycle::new(&db, &repo, &registry);

        lifecycle
            .create(item.id, "file", &ItemSubmission::new().with_upload("pdf", b"x".to_vec()))
            .unwrap();
        let success = lifecycle.delete(item.id, "file").unwrap();

        assert!(success);
        assert!(!repo.path_to("files/Routed.pdf").exists());
    }
}
