use crate::model::{Author, Book, Review, User};
use crate::notify::{Notice, NotificationDispatcher};
use crate::{Result, ShelfError};
use chrono::Utc;
use std::cmp::Reverse;
use tracing::info;

pub const MIN_RATING: i64 = 1;
pub const MAX_RATING: i64 = 5;

/// Appends reviews to books and owns the review ID sequence (`R1`, `R2`, ...),
/// which is shared by every book.
#[derive(Debug, Clone)]
pub struct ReviewLedger {
    next_review: u64,
    dispatcher: NotificationDispatcher,
}

impl ReviewLedger {
    pub fn new(dispatcher: NotificationDispatcher) -> Self {
        Self::with_counter(dispatcher, 1)
    }

    /// Start the review sequence at `next_review`, e.g. when restoring a snapshot
    pub fn with_counter(dispatcher: NotificationDispatcher, next_review: u64) -> Self {
        Self {
            next_review,
            dispatcher,
        }
    }

    pub fn next_review_number(&self) -> u64 {
        self.next_review
    }

    pub fn set_next_review_number(&mut self, next_review: u64) {
        self.next_review = next_review;
    }

    pub fn dispatcher(&self) -> &NotificationDispatcher {
        &self.dispatcher
    }

    /// Append a review to `book` and notify its author in the background.
    ///
    /// The rating is checked before anything is touched, so a rejected
    /// review leaves both the book and the ID sequence unchanged.
    pub fn add_review(
        &mut self,
        book: &mut Book,
        author: &Author,
        reviewer: &User,
        rating: i64,
        comment: &str,
    ) -> Result<String> {
        if !(MIN_RATING..=MAX_RATING).contains(&rating) {
            return Err(ShelfError::RatingOutOfBounds(rating));
        }
        let rating = u8::try_from(rating).map_err(|_| ShelfError::RatingOutOfBounds(rating))?;

        let id = format!("R{}", self.next_review);
        self.next_review += 1;
        book.reviews.push(Review {
            id: id.clone(),
            reviewer_id: reviewer.id.clone(),
            rating,
            comment: comment.to_string(),
            created_at: Utc::now(),
        });
        info!(review_id = %id, book_id = %book.id, reviewer_id = %reviewer.id, rating, "Review added");

        self.dispatcher
            .dispatch(Notice::new(author.email.clone(), book.title.clone()));
        Ok(id)
    }

    /// Newest first. Reviews sharing a timestamp come out latest-added first.
    /// The book's stored order is left alone.
    pub fn reverse_chronological<'a>(&self, book: &'a Book) -> Vec<&'a Review> {
        let mut reviews: Vec<&Review> = book.reviews.iter().rev().collect();
        reviews.sort_by_key(|r| Reverse(r.created_at));
        reviews
    }
}

impl Default for ReviewLedger {
    fn default() -> Self {
        Self::new(NotificationDispatcher::default())
    }
}
