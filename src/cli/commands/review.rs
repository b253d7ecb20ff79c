use super::CommandHandler;
use crate::shelf::Bookshelf;
use crate::Result;
use std::io::Write;

/// Handler for the `review` command
pub struct ReviewCommand {
    pub title: String,
    pub user_id: String,
    pub rating: i64,
    pub comment: String,
}

impl ReviewCommand {
    pub fn new(title: String, user_id: String, rating: i64, comment: String) -> Self {
        Self {
            title,
            user_id,
            rating,
            comment,
        }
    }
}

impl CommandHandler for ReviewCommand {
    fn execute(&self, shelf: &mut Bookshelf, out: &mut dyn Write) -> Result<()> {
        shelf.add_review(&self.title, &self.user_id, self.rating, &self.comment)?;
        writeln!(out, "Review added to book: {}", self.title)?;
        Ok(())
    }

    fn name(&self) -> &'static str {
        "review"
    }
}
