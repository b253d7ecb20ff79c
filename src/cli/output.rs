//! Console rendering of query results.

use super::app::OutputFormat;
use crate::shelf::{BookListing, IdentityListing, RatedBook, ReviewView, SearchHit};
use crate::Result;
use serde::Serialize;
use tabled::{
    settings::{object::Rows, Alignment, Modify, Style},
    Table, Tabled,
};

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

pub fn books(listings: &[BookListing]) -> String {
    if listings.is_empty() {
        return "No books published yet.".to_string();
    }
    listings
        .iter()
        .map(|b| format!("Book: {} by {} (Reviews: {})", b.title, b.author_name, b.review_count))
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn reviews(views: &[ReviewView]) -> String {
    if views.is_empty() {
        return "No reviews yet.".to_string();
    }
    views
        .iter()
        .map(|r| {
            format!(
                "⭐ {}/5 by {}: {} [{}]",
                r.rating,
                r.reviewer_name,
                r.comment,
                r.created_at.format(TIMESTAMP_FORMAT)
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn search_hits(hits: &[SearchHit]) -> String {
    if hits.is_empty() {
        return "No books found.".to_string();
    }
    hits.iter()
        .map(|h| format!("Book Title: {} by {}", h.title, h.author_name))
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn top_rated(books: &[RatedBook]) -> String {
    if books.is_empty() {
        return "No reviews available yet.".to_string();
    }
    books
        .iter()
        .map(|b| {
            format!(
                "Book {} - {:.2} stars ({} reviews)",
                b.title, b.average_rating, b.review_count
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

#[derive(Tabled)]
struct IdentityRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Email")]
    email: String,
}

/// Table of users or authors; `kind` is the plural used when there are none
pub fn identities(listings: &[IdentityListing], kind: &str) -> String {
    if listings.is_empty() {
        return format!("No {} found.", kind);
    }
    let rows: Vec<IdentityRow> = listings
        .iter()
        .map(|l| IdentityRow {
            id: l.id.clone(),
            name: l.display_name.clone(),
            email: l.email.clone(),
        })
        .collect();
    Table::new(&rows)
        .with(Style::rounded())
        .with(Modify::new(Rows::first()).with(Alignment::center()))
        .to_string()
}

/// Render `value` as JSON, or through `text` for the plain format
pub fn render<T: Serialize + ?Sized>(
    value: &T,
    format: OutputFormat,
    text: impl FnOnce(&T) -> String,
) -> Result<String> {
    match format {
        OutputFormat::Text => Ok(text(value)),
        OutputFormat::Json => serde_json::to_string_pretty(value)
            .map_err(|e| anyhow::anyhow!("Failed to encode output: {}", e).into()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use pretty_assertions::assert_eq;

    #[test]
    fn test_empty_messages() {
        assert_eq!(books(&[]), "No books published yet.");
        assert_eq!(reviews(&[]), "No reviews yet.");
        assert_eq!(search_hits(&[]), "No books found.");
        assert_eq!(top_rated(&[]), "No reviews available yet.");
        assert_eq!(identities(&[], "authors"), "No authors found.");
    }

    #[test]
    fn test_text_lines() {
        let listing = vec![BookListing {
            title: "Go Deep".to_string(),
            author_name: "bob".to_string(),
            review_count: 2,
        }];
        assert_eq!(books(&listing), "Book: Go Deep by bob (Reviews: 2)");

        let rated = vec![RatedBook {
            title: "Go Deep".to_string(),
            average_rating: 3.0,
            review_count: 2,
        }];
        assert_eq!(top_rated(&rated), "Book Go Deep - 3.00 stars (2 reviews)");

        let view = vec![ReviewView {
            rating: 5,
            reviewer_name: "alice".to_string(),
            comment: "great".to_string(),
            created_at: Utc.with_ymd_and_hms(2024, 5, 1, 9, 30, 0).unwrap(),
        }];
        assert_eq!(reviews(&view), "⭐ 5/5 by alice: great [2024-05-01 09:30:00]");
    }

    #[test]
    fn test_identity_table_contains_rows() {
        let table = identities(
            &[IdentityListing {
                id: "U001".to_string(),
                display_name: "alice".to_string(),
                email: "alice@x.com".to_string(),
            }],
            "users",
        );
        assert!(table.contains("U001"));
        assert!(table.contains("alice@x.com"));
        assert!(table.contains("Email"));
    }

    #[test]
    fn test_render_json() {
        let hits = vec![SearchHit {
            title: "Go Deep".to_string(),
            author_name: "bob".to_string(),
        }];
        let json = render(hits.as_slice(), OutputFormat::Json, |h| search_hits(h)).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed[0]["title"], "Go Deep");
        assert_eq!(parsed[0]["author_name"], "bob");
    }
}
