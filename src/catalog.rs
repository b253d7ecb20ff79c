use crate::model::{Author, Book, BookId};
use crate::validate::validate_name;
use crate::{Result, ShelfError};
use serde::{Deserialize, Serialize};
use tracing::info;

/// Every published book, kept in publication order.
///
/// Publication order is the tie-break for all queries that could otherwise
/// match several books equally.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CatalogRegistry {
    books: Vec<Book>,
}

impl CatalogRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Publish a book under `author`. Titles only need to be unique among
    /// that author's own books.
    pub fn publish(&mut self, author: &mut Author, title: &str, content: &str) -> Result<BookId> {
        validate_name(title, "Book title")?;

        let wanted = title.to_lowercase();
        let duplicate = author
            .published_books
            .iter()
            .filter_map(|id| self.get(id))
            .any(|book| book.title.to_lowercase() == wanted);
        if duplicate {
            return Err(ShelfError::DuplicateBook(format!(
                "'{}' is already published by {}",
                title, author.display_name
            )));
        }

        let id = BookId::new_random();
        self.books.push(Book {
            id,
            title: title.to_string(),
            content: content.to_string(),
            author_id: author.id.clone(),
            reviews: Vec::new(),
        });
        author.published_books.push(id);

        info!(book_id = %id, author_id = %author.id, title, "Book published");
        Ok(id)
    }

    pub fn get(&self, id: &BookId) -> Option<&Book> {
        self.books.iter().find(|b| &b.id == id)
    }

    /// Exact, case-insensitive title match; the earliest published wins
    pub fn find_by_title(&self, title: &str) -> Result<&Book> {
        let wanted = title.to_lowercase();
        self.books
            .iter()
            .find(|b| b.title.to_lowercase() == wanted)
            .ok_or_else(|| ShelfError::NotFound(format!("book with title '{}'", title)))
    }

    pub fn find_by_title_mut(&mut self, title: &str) -> Result<&mut Book> {
        let wanted = title.to_lowercase();
        self.books
            .iter_mut()
            .find(|b| b.title.to_lowercase() == wanted)
            .ok_or_else(|| ShelfError::NotFound(format!("book with title '{}'", title)))
    }

    /// Case-insensitive substring search on titles. An empty keyword
    /// matches every book.
    pub fn search(&self, keyword: &str) -> Vec<&Book> {
        let needle = keyword.to_lowercase();
        self.books
            .iter()
            .filter(|b| b.title.to_lowercase().contains(&needle))
            .collect()
    }

    /// Up to `n` reviewed books, best mean rating first
    pub fn top_n_by_rating(&self, n: usize) -> Vec<&Book> {
        let mut ranked: Vec<(&Book, f64)> = self
            .books
            .iter()
            .filter_map(|b| b.average_rating().map(|avg| (b, avg)))
            .collect();
        // stable: equal means keep publication order
        ranked.sort_by(|a, b| b.1.total_cmp(&a.1));
        ranked.into_iter().take(n).map(|(book, _)| book).collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Book> {
        self.books.iter()
    }

    pub fn len(&self) -> usize {
        self.books.len()
    }

    pub fn is_empty(&self) -> bool {
        self.books.is_empty()
    }
}
