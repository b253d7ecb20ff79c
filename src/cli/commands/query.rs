use super::CommandHandler;
use crate::cli::app::OutputFormat;
use crate::cli::output;
use crate::shelf::Bookshelf;
use crate::Result;
use std::io::Write;

/// Read-only questions a one-shot command can ask
#[derive(Debug, Clone, PartialEq)]
pub enum Query {
    Books,
    Reviews(String),
    Search(String),
    Top(i64),
    Users,
    Authors,
}

/// Handler for the listing commands (`list`, `reviews`, `search`, `top`,
/// `users`, `authors`)
pub struct QueryCommand {
    pub query: Query,
    pub format: OutputFormat,
}

impl QueryCommand {
    pub fn new(query: Query, format: OutputFormat) -> Self {
        Self { query, format }
    }
}

impl CommandHandler for QueryCommand {
    fn execute(&self, shelf: &mut Bookshelf, out: &mut dyn Write) -> Result<()> {
        let rendered = match &self.query {
            Query::Books => output::render(&shelf.list_books(), self.format, |b| output::books(b))?,
            Query::Reviews(title) => {
                output::render(&shelf.view_reviews(title)?, self.format, |r| output::reviews(r))?
            }
            Query::Search(keyword) => output::render(&shelf.search_books(keyword), self.format, |h| {
                output::search_hits(h)
            })?,
            Query::Top(n) => {
                output::render(&shelf.top_rated(*n), self.format, |b| output::top_rated(b))?
            }
            Query::Users => output::render(&shelf.list_users(), self.format, |u| {
                output::identities(u, "users")
            })?,
            Query::Authors => output::render(&shelf.list_authors(), self.format, |a| {
                output::identities(a, "authors")
            })?,
        };
        writeln!(out, "{}", rendered)?;
        Ok(())
    }

    fn name(&self) -> &'static str {
        match self.query {
            Query::Books => "list",
            Query::Reviews(_) => "reviews",
            Query::Search(_) => "search",
            Query::Top(_) => "top",
            Query::Users => "users",
            Query::Authors => "authors",
        }
    }
}
