//! Snapshot persistence for the whole catalog.
//!
//! The snapshot is a single bincode blob with no version header. Entities
//! refer to each other by ID only, so restoring the registries restores
//! every relationship with it: a book's author is whatever record the author
//! registry holds under that ID.

use crate::catalog::CatalogRegistry;
use crate::identity::IdentityRegistry;
use crate::model::{Author, User};
use crate::{Result, ShelfError};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Borrowed form of the aggregate, written on save
#[derive(Debug, Serialize)]
pub struct SnapshotRef<'a> {
    pub users: &'a IdentityRegistry<User>,
    pub authors: &'a IdentityRegistry<Author>,
    pub catalog: &'a CatalogRegistry,
    pub next_review: u64,
}

/// Owned form of the aggregate, produced on load. Field order matches
/// [`SnapshotRef`].
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Snapshot {
    pub users: IdentityRegistry<User>,
    pub authors: IdentityRegistry<Author>,
    pub catalog: CatalogRegistry,
    pub next_review: u64,
}

impl Snapshot {
    pub fn view(&self) -> SnapshotRef<'_> {
        SnapshotRef {
            users: &self.users,
            authors: &self.authors,
            catalog: &self.catalog,
            next_review: self.next_review,
        }
    }

    /// Check that every ID stored inside an entity names a live record
    pub fn verify_references(&self) -> Result<()> {
        for book in self.catalog.iter() {
            let author = self.authors.get(&book.author_id).ok_or_else(|| {
                dangling(format!("book {} names unknown author {}", book.id, book.author_id))
            })?;
            if !author.published_books.contains(&book.id) {
                return Err(dangling(format!(
                    "book {} is missing from the list of author {}",
                    book.id, author.id
                )));
            }
            for review in &book.reviews {
                if !self.users.contains(&review.reviewer_id) {
                    return Err(dangling(format!(
                        "review {} names unknown user {}",
                        review.id, review.reviewer_id
                    )));
                }
                let number = review
                    .id
                    .strip_prefix('R')
                    .and_then(|n| n.parse::<u64>().ok())
                    .ok_or_else(|| dangling(format!("malformed review id {}", review.id)))?;
                if number >= self.next_review {
                    return Err(dangling(format!(
                        "review counter {} is behind review {}",
                        self.next_review, review.id
                    )));
                }
            }
        }

        for author in self.authors.iter() {
            for book_id in &author.published_books {
                match self.catalog.get(book_id) {
                    Some(book) if book.author_id == author.id => {}
                    _ => {
                        return Err(dangling(format!(
                            "author {} lists book {} which the catalog does not attribute to them",
                            author.id, book_id
                        )))
                    }
                }
            }
        }
        Ok(())
    }
}

/// bincode reports running off the end of the input as an IO error with an
/// empty message
fn describe_decode_failure(err: bincode::Error) -> String {
    match *err {
        bincode::ErrorKind::Io(io) if io.kind() == std::io::ErrorKind::UnexpectedEof => {
            "snapshot truncated or unreadable".to_string()
        }
        bincode::ErrorKind::Io(io) => format!("snapshot unreadable ({})", io.kind()),
        other => format!("snapshot corrupt ({})", other),
    }
}

fn dangling(detail: String) -> ShelfError {
    ShelfError::Decode(format!("inconsistent snapshot: {}", detail))
}

/// Reads and writes the snapshot file at a fixed path
#[derive(Debug, Clone)]
pub struct SnapshotStore {
    path: PathBuf,
}

impl SnapshotStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn exists(&self) -> bool {
        self.path.is_file()
    }

    /// Encode and write the snapshot. The bytes land in a sibling temp file
    /// first and are renamed into place, so readers never see a partial file.
    pub fn save(&self, snapshot: &SnapshotRef<'_>) -> Result<()> {
        let bytes = bincode::serialize(snapshot)?;

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                fs::create_dir_all(parent)?;
            }
        }

        let temp_path = self.temp_path();
        fs::write(&temp_path, &bytes)?;
        if let Err(e) = fs::rename(&temp_path, &self.path) {
            let _ = fs::remove_file(&temp_path);
            return Err(e.into());
        }

        info!(path = %self.path.display(), bytes = bytes.len(), "Snapshot saved");
        Ok(())
    }

    /// Read the snapshot back. `Ok(None)` means there is nothing saved yet.
    pub fn load(&self) -> Result<Option<Snapshot>> {
        if !self.path.exists() {
            debug!(path = %self.path.display(), "No snapshot found");
            return Ok(None);
        }

        let bytes = fs::read(&self.path)?;
        let snapshot: Snapshot = bincode::deserialize(&bytes).map_err(|e| {
            ShelfError::Decode(format!("{}: {}", self.path.display(), describe_decode_failure(e)))
        })?;
        snapshot.verify_references()?;

        info!(
            path = %self.path.display(),
            users = snapshot.users.len(),
            authors = snapshot.authors.len(),
            books = snapshot.catalog.len(),
            "Snapshot loaded"
        );
        Ok(Some(snapshot))
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_default();
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}
