//! The operation surface the CLI drives.
//!
//! [`Bookshelf`] owns every registry plus the snapshot store, resolves IDs
//! and titles coming from the outside into records, and turns missing
//! records into [`ShelfError::NotFound`].

use crate::catalog::CatalogRegistry;
use crate::config::ShelfConfig;
use crate::identity::IdentityRegistry;
use crate::model::{Author, Book, BookId, Identity, User};
use crate::notify::NotificationDispatcher;
use crate::reviews::ReviewLedger;
use crate::store::{SnapshotRef, SnapshotStore};
use crate::{Result, ShelfError};
use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::info;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BookListing {
    pub title: String,
    pub author_name: String,
    pub review_count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReviewView {
    pub rating: u8,
    pub reviewer_name: String,
    pub comment: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchHit {
    pub title: String,
    pub author_name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RatedBook {
    pub title: String,
    pub average_rating: f64,
    pub review_count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IdentityListing {
    pub id: String,
    pub display_name: String,
    pub email: String,
}

impl IdentityListing {
    fn of<R: Identity>(record: &R) -> Self {
        Self {
            id: record.id().to_string(),
            display_name: record.display_name().to_string(),
            email: record.email().to_string(),
        }
    }
}

#[derive(Debug)]
pub struct Bookshelf {
    users: IdentityRegistry<User>,
    authors: IdentityRegistry<Author>,
    catalog: CatalogRegistry,
    ledger: ReviewLedger,
    store: SnapshotStore,
}

impl Bookshelf {
    /// Empty shelf persisting to `store`
    pub fn new(store: SnapshotStore, dispatcher: NotificationDispatcher) -> Self {
        Self {
            users: IdentityRegistry::new(),
            authors: IdentityRegistry::new(),
            catalog: CatalogRegistry::new(),
            ledger: ReviewLedger::new(dispatcher),
            store,
        }
    }

    pub fn from_config(config: &ShelfConfig) -> Self {
        Self::new(
            SnapshotStore::new(config.snapshot_path.clone()),
            config.notifications.dispatcher(),
        )
    }

    pub fn register_user(&mut self, name: &str, email: &str) -> Result<String> {
        self.users.register(name, email)
    }

    pub fn register_author(&mut self, name: &str, email: &str) -> Result<String> {
        self.authors.register(name, email)
    }

    pub fn publish_book(&mut self, author_id: &str, title: &str, content: &str) -> Result<BookId> {
        let author = self
            .authors
            .get_mut(author_id)
            .ok_or_else(|| ShelfError::NotFound(format!("author '{}'", author_id)))?;
        self.catalog.publish(author, title, content)
    }

    /// Every book in publication order
    pub fn list_books(&self) -> Vec<BookListing> {
        self.catalog
            .iter()
            .map(|book| BookListing {
                title: book.title.clone(),
                author_name: self.author_name(book),
                review_count: book.review_count(),
            })
            .collect()
    }

    /// Review the book titled `book_title` as `user_id`; returns the review ID.
    /// The author's notification is sent in the background.
    pub fn add_review(
        &mut self,
        book_title: &str,
        user_id: &str,
        rating: i64,
        comment: &str,
    ) -> Result<String> {
        let book = self.catalog.find_by_title_mut(book_title)?;
        let reviewer = self
            .users
            .get(user_id)
            .ok_or_else(|| ShelfError::NotFound(format!("user '{}'", user_id)))?;
        let author = self.authors.get(&book.author_id).ok_or_else(|| {
            ShelfError::NotFound(format!("author '{}' of '{}'", book.author_id, book.title))
        })?;
        self.ledger
            .add_review(book, author, reviewer, rating, comment)
    }

    /// Reviews of the book titled `book_title`, newest first
    pub fn view_reviews(&self, book_title: &str) -> Result<Vec<ReviewView>> {
        let book = self.catalog.find_by_title(book_title)?;
        Ok(self
            .ledger
            .reverse_chronological(book)
            .into_iter()
            .map(|review| ReviewView {
                rating: review.rating,
                reviewer_name: self
                    .users
                    .get(&review.reviewer_id)
                    .map(|u| u.display_name.clone())
                    .unwrap_or_else(|| review.reviewer_id.clone()),
                comment: review.comment.clone(),
                created_at: review.created_at,
            })
            .collect())
    }

    pub fn search_books(&self, keyword: &str) -> Vec<SearchHit> {
        self.catalog
            .search(keyword)
            .into_iter()
            .map(|book| SearchHit {
                title: book.title.clone(),
                author_name: self.author_name(book),
            })
            .collect()
    }

    /// Best-rated reviewed books; `n <= 0` asks for nothing
    pub fn top_rated(&self, n: i64) -> Vec<RatedBook> {
        let n = usize::try_from(n).unwrap_or(0);
        self.catalog
            .top_n_by_rating(n)
            .into_iter()
            .filter_map(|book| {
                book.average_rating().map(|average_rating| RatedBook {
                    title: book.title.clone(),
                    average_rating,
                    review_count: book.review_count(),
                })
            })
            .collect()
    }

    pub fn list_users(&self) -> Vec<IdentityListing> {
        self.users.iter().map(IdentityListing::of).collect()
    }

    pub fn list_authors(&self) -> Vec<IdentityListing> {
        self.authors.iter().map(IdentityListing::of).collect()
    }

    pub fn user(&self, id: &str) -> Option<&User> {
        self.users.get(id)
    }

    pub fn author(&self, id: &str) -> Option<&Author> {
        self.authors.get(id)
    }

    pub fn catalog(&self) -> &CatalogRegistry {
        &self.catalog
    }

    pub fn store(&self) -> &SnapshotStore {
        &self.store
    }

    pub fn dispatcher(&self) -> &NotificationDispatcher {
        self.ledger.dispatcher()
    }

    pub fn save_state(&self) -> Result<()> {
        self.store.save(&SnapshotRef {
            users: &self.users,
            authors: &self.authors,
            catalog: &self.catalog,
            next_review: self.ledger.next_review_number(),
        })
    }

    /// Replace the in-memory state with the saved snapshot. Returns `false`
    /// when no snapshot exists; on any error the current state is kept.
    pub fn load_state(&mut self) -> Result<bool> {
        let Some(snapshot) = self.store.load()? else {
            return Ok(false);
        };

        self.users = snapshot.users;
        self.authors = snapshot.authors;
        self.catalog = snapshot.catalog;
        self.ledger.set_next_review_number(snapshot.next_review.max(1));

        info!(
            users = self.users.len(),
            authors = self.authors.len(),
            books = self.catalog.len(),
            "State restored"
        );
        Ok(true)
    }

    fn author_name(&self, book: &Book) -> String {
        self.authors
            .get(&book.author_id)
            .map(|a| a.display_name.clone())
            .unwrap_or_else(|| book.author_id.clone())
    }
}
