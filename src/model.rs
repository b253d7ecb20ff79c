use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Opaque, globally unique book identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BookId(Uuid);

impl BookId {
    pub fn new_random() -> Self {
        Self(Uuid::new_v4())
    }
}

impl fmt::Display for BookId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Common shape of registered identities, letting one registry serve both
/// users and authors.
pub trait Identity {
    /// Leading character of IDs in this namespace
    const PREFIX: char;
    /// Human-readable kind used in messages and logs
    const KIND: &'static str;

    fn create(id: String, display_name: String, email: String) -> Self;
    fn id(&self) -> &str;
    fn display_name(&self) -> &str;
    fn email(&self) -> &str;
}

/// A registered reader
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub display_name: String,
    pub email: String,
}

impl Identity for User {
    const PREFIX: char = 'U';
    const KIND: &'static str = "user";

    fn create(id: String, display_name: String, email: String) -> Self {
        Self {
            id,
            display_name,
            email,
        }
    }

    fn id(&self) -> &str {
        &self.id
    }

    fn display_name(&self) -> &str {
        &self.display_name
    }

    fn email(&self) -> &str {
        &self.email
    }
}

/// A registered author and the books they have published, in publication
/// order. Books are referenced by ID; the catalog owns them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Author {
    pub id: String,
    pub display_name: String,
    pub email: String,
    pub published_books: Vec<BookId>,
}

impl Identity for Author {
    const PREFIX: char = 'A';
    const KIND: &'static str = "author";

    fn create(id: String, display_name: String, email: String) -> Self {
        Self {
            id,
            display_name,
            email,
            published_books: Vec::new(),
        }
    }

    fn id(&self) -> &str {
        &self.id
    }

    fn display_name(&self) -> &str {
        &self.display_name
    }

    fn email(&self) -> &str {
        &self.email
    }
}

/// A published book
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Book {
    pub id: BookId,
    pub title: String,
    pub content: String,
    /// ID of the owning author in the author registry
    pub author_id: String,
    /// Reviews in insertion order
    pub reviews: Vec<Review>,
}

impl Book {
    pub fn review_count(&self) -> usize {
        self.reviews.len()
    }

    /// Mean rating over the current reviews, `None` when unreviewed
    pub fn average_rating(&self) -> Option<f64> {
        if self.reviews.is_empty() {
            return None;
        }
        let total: u32 = self.reviews.iter().map(|r| u32::from(r.rating)).sum();
        Some(f64::from(total) / self.reviews.len() as f64)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Review {
    pub id: String,
    pub reviewer_id: String,
    pub rating: u8,
    pub comment: String,
    pub created_at: DateTime<Utc>,
}
