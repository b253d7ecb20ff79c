use bookshelf::notify::{Notice, NoticeSink, NotificationDispatcher};
use bookshelf::store::SnapshotStore;
use bookshelf::{Bookshelf, ShelfError};
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};
use tempfile::TempDir;

#[derive(Default)]
struct RecordingSink {
    delivered: Mutex<Vec<Notice>>,
}

impl NoticeSink for RecordingSink {
    fn deliver(&self, notice: &Notice) {
        self.delivered.lock().unwrap().push(notice.clone());
    }
}

impl RecordingSink {
    fn count(&self) -> usize {
        self.delivered.lock().unwrap().len()
    }
}

fn shelf_with(
    latency: Duration,
    max_in_flight: usize,
) -> (Bookshelf, Arc<RecordingSink>, TempDir) {
    let temp_dir = TempDir::new().unwrap();
    let sink = Arc::new(RecordingSink::default());
    let dispatcher =
        NotificationDispatcher::new(latency, max_in_flight).with_sink(sink.clone());
    let mut shelf = Bookshelf::new(
        SnapshotStore::new(temp_dir.path().join("app_state.bin")),
        dispatcher,
    );
    shelf.register_user("alice", "alice@x.com").unwrap();
    shelf.register_author("bob", "bob@x.com").unwrap();
    shelf.publish_book("A001", "Go Deep", "").unwrap();
    (shelf, sink, temp_dir)
}

async fn wait_for(sink: &RecordingSink, expected: usize) {
    let deadline = Instant::now() + Duration::from_secs(5);
    while sink.count() < expected && Instant::now() < deadline {
        tokio::time::sleep(Duration::from_millis(5)).await;
    }
}

#[tokio::test]
async fn test_review_notifies_author() {
    let (mut shelf, sink, _temp_dir) = shelf_with(Duration::from_millis(5), 8);

    shelf.add_review("Go Deep", "U001", 5, "").unwrap();
    wait_for(&sink, 1).await;

    let delivered = sink.delivered.lock().unwrap().clone();
    assert_eq!(delivered, vec![Notice::new("bob@x.com", "Go Deep")]);
}

#[tokio::test]
async fn test_add_review_does_not_wait_for_delivery() {
    let (mut shelf, sink, _temp_dir) = shelf_with(Duration::from_secs(30), 8);

    let started = Instant::now();
    shelf.add_review("Go Deep", "U001", 4, "").unwrap();

    assert!(started.elapsed() < Duration::from_secs(5));
    assert_eq!(sink.count(), 0);
    assert_eq!(shelf.list_books()[0].review_count, 1);
}

#[tokio::test]
async fn test_rejected_review_sends_nothing() {
    let (mut shelf, sink, _temp_dir) = shelf_with(Duration::ZERO, 8);

    assert!(matches!(
        shelf.add_review("Go Deep", "U001", 0, ""),
        Err(ShelfError::RatingOutOfBounds(0))
    ));
    tokio::time::sleep(Duration::from_millis(20)).await;

    assert_eq!(sink.count(), 0);
}

#[tokio::test]
async fn test_burst_beyond_cap_drops_but_keeps_reviews() {
    let (mut shelf, sink, _temp_dir) = shelf_with(Duration::from_millis(200), 2);

    for _ in 0..5 {
        shelf.add_review("Go Deep", "U001", 3, "").unwrap();
    }
    wait_for(&sink, 2).await;
    tokio::time::sleep(Duration::from_millis(50)).await;

    assert_eq!(shelf.list_books()[0].review_count, 5);
    assert_eq!(sink.count(), 2);
}
