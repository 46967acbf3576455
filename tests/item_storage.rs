//! End-to-end item storage tests: create, rename, and delete a file-backed
//! item through the lifecycle coordinator and verify filesystem and metadata
//! stay consistent.

use std::fs;

use tempfile::TempDir;

use lorepo::{
    Database, ItemDataRepository, ItemLifecycle, ItemRepository, ItemSubmission, NewItem,
    Repository, ResourceType, TypeRegistry,
};

const BASE_URL: &str = "http://localhost:8080/repository";

struct Fixture {
    db: Database,
    repo: Repository,
    registry: TypeRegistry,
    _temp_dir: TempDir,
}

impl Fixture {
    fn new() -> Self {
        let temp_dir = TempDir::new().unwrap();
        Self {
            db: Database::open_in_memory().unwrap(),
            repo: Repository::new(temp_dir.path(), BASE_URL).unwrap(),
            registry: TypeRegistry::with_defaults(),
            _temp_dir: temp_dir,
        }
    }

    fn lifecycle(&self) -> ItemLifecycle<'_> {
        ItemLifecycle::new(&self.db, &self.repo, &self.registry)
    }

    fn create_item(&self, name: &str, itemtype: &str) -> i64 {
        ItemRepository::create(self.db.conn(), &NewItem::new(name, itemtype))
            .unwrap()
            .id
    }
}

#[test]
fn create_file_item_with_pdf_only() {
    let fx = Fixture::new();
    let item_id = fx.create_item("Photosynthesis", "file");

    let submission = ItemSubmission::new().with_upload("pdf", b"%PDF-1.4 pdf bytes".to_vec());
    let success = fx.lifecycle().create(item_id, "file", &submission).unwrap();
    assert!(success);

    // Storage directory exists and the PDF holds the uploaded bytes
    assert!(fx.repo.path_to("files").is_dir());
    assert_eq!(
        fs::read(fx.repo.path_to("files/Photosynthesis.pdf")).unwrap(),
        b"%PDF-1.4 pdf bytes"
    );

    // Both attribute rows exist: the document slot is reserved, its file absent
    let data = ItemDataRepository::get_item_data(fx.db.conn(), item_id).unwrap();
    assert_eq!(data.len(), 2);
    assert_eq!(data["pdf"], "files/Photosynthesis.pdf");
    assert_eq!(data["document"], "files/Photosynthesis.docx");
    assert!(!fx.repo.path_to("files/Photosynthesis.docx").exists());

    // The resolved URL points at the stored PDF
    let file_type = fx.registry.get("file").unwrap();
    let svc = lorepo::Services {
        db: &fx.db,
        repo: &fx.repo,
    };
    assert_eq!(
        file_type.resource_url(&svc, item_id).unwrap(),
        format!("{BASE_URL}/files/Photosynthesis.pdf")
    );
}

#[test]
fn rename_relocates_stored_files() {
    let fx = Fixture::new();
    let item_id = fx.create_item("Photosynthesis", "file");

    let submission = ItemSubmission::new().with_upload("pdf", b"pdf bytes".to_vec());
    fx.lifecycle().create(item_id, "file", &submission).unwrap();

    // Rename only, no new uploads
    ItemRepository::rename(fx.db.conn(), item_id, "Photosynthesis v2").unwrap();
    let success = fx
        .lifecycle()
        .update(item_id, "file", &ItemSubmission::new())
        .unwrap();
    assert!(success);

    assert!(!fx.repo.path_to("files/Photosynthesis.pdf").exists());
    assert_eq!(
        fs::read(fx.repo.path_to("files/Photosynthesis v2.pdf")).unwrap(),
        b"pdf bytes"
    );

    // Attribute rows follow; the absent document file renamed as a no-op
    let data = ItemDataRepository::get_item_data(fx.db.conn(), item_id).unwrap();
    assert_eq!(data["pdf"], "files/Photosynthesis v2.pdf");
    assert_eq!(data["document"], "files/Photosynthesis v2.docx");
}

#[test]
fn delete_twice_leaves_no_records() {
    let fx = Fixture::new();
    let item_id = fx.create_item("Ephemeral", "file");

    let submission = ItemSubmission::new()
        .with_upload("pdf", b"pdf".to_vec())
        .with_upload("document", b"docx".to_vec());
    fx.lifecycle().create(item_id, "file", &submission).unwrap();

    assert!(fx.lifecycle().delete(item_id, "file").unwrap());
    assert!(fx.lifecycle().delete(item_id, "file").unwrap());

    assert!(ItemDataRepository::get_item_data(fx.db.conn(), item_id)
        .unwrap()
        .is_empty());
    assert!(!fx.repo.path_to("files/Ephemeral.pdf").exists());
    assert!(!fx.repo.path_to("files/Ephemeral.docx").exists());
}

#[test]
fn delete_survives_externally_removed_files() {
    let fx = Fixture::new();
    let item_id = fx.create_item("Gone", "file");

    let submission = ItemSubmission::new().with_upload("pdf", b"pdf".to_vec());
    fx.lifecycle().create(item_id, "file", &submission).unwrap();

    fs::remove_file(fx.repo.path_to("files/Gone.pdf")).unwrap();

    assert!(fx.lifecycle().delete(item_id, "file").unwrap());
    assert!(ItemDataRepository::get_item_data(fx.db.conn(), item_id)
        .unwrap()
        .is_empty());
}

#[test]
fn update_with_upload_and_rename_keeps_new_content() {
    let fx = Fixture::new();
    let item_id = fx.create_item("Lesson", "file");

    fx.lifecycle()
        .create(
            item_id,
            "file",
            &ItemSubmission::new().with_upload("pdf", b"old content".to_vec()),
        )
        .unwrap();

    // Rename and upload a replacement in the same request; the fresh upload
    // must win over the relocated old file.
    ItemRepository::rename(fx.db.conn(), item_id, "Lesson v2").unwrap();
    fx.lifecycle()
        .update(
            item_id,
            "file",
            &ItemSubmission::new().with_upload("pdf", b"new content".to_vec()),
        )
        .unwrap();

    assert_eq!(
        fs::read(fx.repo.path_to("files/Lesson v2.pdf")).unwrap(),
        b"new content"
    );
    assert!(!fx.repo.path_to("files/Lesson.pdf").exists());
}

#[test]
fn link_item_lifecycle() {
    let fx = Fixture::new();
    let item_id = fx.create_item("Simulation", "link");

    let submission = ItemSubmission::new().with_value("url", "https://phet.colorado.edu/");
    assert!(fx.lifecycle().create(item_id, "link", &submission).unwrap());

    let link_type = fx.registry.get("link").unwrap();
    let svc = lorepo::Services {
        db: &fx.db,
        repo: &fx.repo,
    };
    assert_eq!(
        link_type.unique_identifier(&svc, item_id).unwrap(),
        "https://phet.colorado.edu/"
    );

    assert!(fx.lifecycle().delete(item_id, "link").unwrap());
    assert!(ItemDataRepository::get_item_data(fx.db.conn(), item_id)
        .unwrap()
        .is_empty());
}

#[test]
fn unknown_type_is_rejected() {
    let fx = Fixture::new();
    let item_id = fx.create_item("Clip", "video");

    let result = fx.lifecycle().create(item_id, "video", &ItemSubmission::new());

    assert!(matches!(result, Err(lorepo::LorepoError::UnknownType(_))));
}
