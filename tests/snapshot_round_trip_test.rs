use bookshelf::notify::NotificationDispatcher;
use bookshelf::store::SnapshotStore;
use bookshelf::{Bookshelf, ShelfError};
use pretty_assertions::assert_eq;
use std::path::Path;
use std::time::Duration;
use tempfile::TempDir;

fn shelf_at(path: &Path) -> Bookshelf {
    Bookshelf::new(
        SnapshotStore::new(path),
        NotificationDispatcher::new(Duration::ZERO, 16),
    )
}

fn populated(path: &Path) -> Bookshelf {
    let mut shelf = shelf_at(path);
    shelf.register_user("alice", "alice@x.com").unwrap();
    shelf.register_user("carol", "carol@x.com").unwrap();
    shelf.register_author("bob", "bob@x.com").unwrap();
    shelf.register_author("eve", "eve@x.com").unwrap();
    shelf.publish_book("A001", "Go Deep", "one").unwrap();
    shelf.publish_book("A002", "Go Deep", "two").unwrap();
    shelf.publish_book("A002", "Rust Book", "three").unwrap();
    shelf.add_review("Go Deep", "U001", 5, "great").unwrap();
    shelf.add_review("Rust Book", "U002", 2, "meh").unwrap();
    shelf
}

#[test]
fn test_round_trip_preserves_everything() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("app_state.bin");
    let original = populated(&path);
    original.save_state().unwrap();

    let mut restored = shelf_at(&path);
    assert!(restored.load_state().unwrap());

    assert_eq!(restored.list_users(), original.list_users());
    assert_eq!(restored.list_authors(), original.list_authors());
    assert_eq!(restored.list_books(), original.list_books());
    assert_eq!(
        restored.view_reviews("Go Deep").unwrap(),
        original.view_reviews("Go Deep").unwrap()
    );
    assert_eq!(restored.top_rated(10), original.top_rated(10));
}

#[test]
fn test_book_authors_resolve_to_registry_records() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("app_state.bin");
    populated(&path).save_state().unwrap();

    let mut restored = shelf_at(&path);
    restored.load_state().unwrap();

    for book in restored.catalog().iter() {
        let author = restored.author(&book.author_id).unwrap();
        assert!(author.published_books.contains(&book.id));
    }

    // A publication after the reload shows up through both paths
    let id = restored.publish_book("A002", "Third", "").unwrap();
    let eve = restored.author("A002").unwrap();
    assert_eq!(eve.published_books.len(), 3);
    assert_eq!(eve.published_books.last(), Some(&id));
    let book = restored.catalog().get(&id).unwrap();
    assert_eq!(restored.author(&book.author_id).unwrap(), eve);
}

#[test]
fn test_counters_continue_after_reload() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("app_state.bin");
    populated(&path).save_state().unwrap();

    let mut restored = shelf_at(&path);
    restored.load_state().unwrap();

    assert_eq!(restored.register_user("dan", "dan@x.com").unwrap(), "U003");
    assert_eq!(restored.register_author("fay", "fay@x.com").unwrap(), "A003");
    assert_eq!(restored.add_review("Rust Book", "U003", 4, "").unwrap(), "R3");
}

#[test]
fn test_uniqueness_survives_reload() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("app_state.bin");
    populated(&path).save_state().unwrap();

    let mut restored = shelf_at(&path);
    restored.load_state().unwrap();

    assert!(matches!(
        restored.register_user("ALICE", "fresh@x.com"),
        Err(ShelfError::DuplicateIdentity(_))
    ));
    assert!(matches!(
        restored.publish_book("A001", "go deep", ""),
        Err(ShelfError::DuplicateBook(_))
    ));
}

#[test]
fn test_load_without_snapshot() {
    let temp_dir = TempDir::new().unwrap();
    let mut shelf = shelf_at(&temp_dir.path().join("missing.bin"));

    assert!(!shelf.load_state().unwrap());
    assert!(shelf.list_books().is_empty());
}

#[test]
fn test_corrupt_snapshot_allows_fresh_session() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("app_state.bin");
    std::fs::write(&path, [0xff; 64]).unwrap();

    let mut shelf = shelf_at(&path);
    assert!(matches!(shelf.load_state(), Err(ShelfError::Decode(_))));

    assert_eq!(shelf.register_user("alice", "alice@x.com").unwrap(), "U001");
}
