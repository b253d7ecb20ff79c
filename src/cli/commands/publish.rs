use super::CommandHandler;
use crate::shelf::Bookshelf;
use crate::Result;
use std::io::Write;

/// Handler for the `publish` command
pub struct PublishCommand {
    pub author_id: String,
    pub title: String,
    pub content: String,
}

impl PublishCommand {
    pub fn new(author_id: String, title: String, content: String) -> Self {
        Self {
            author_id,
            title,
            content,
        }
    }
}

impl CommandHandler for PublishCommand {
    fn execute(&self, shelf: &mut Bookshelf, out: &mut dyn Write) -> Result<()> {
        let id = shelf.publish_book(&self.author_id, &self.title, &self.content)?;
        writeln!(out, "Book published successfully: {} ({})", self.title, id)?;
        Ok(())
    }

    fn name(&self) -> &'static str {
        "publish"
    }
}
