pub mod publish;
pub mod query;
pub mod register;
pub mod review;

use super::app::Commands;
use crate::shelf::Bookshelf;
use crate::Result;
use std::io::Write;

/// Common trait for the one-shot command handlers
pub trait CommandHandler {
    /// Run the command against `shelf`, writing user-facing output to `out`
    fn execute(&self, shelf: &mut Bookshelf, out: &mut dyn Write) -> Result<()>;

    /// Get command name for logging
    fn name(&self) -> &'static str;
}

/// Build the handler for a one-shot command; `None` for the interactive shell
pub fn handler_for(command: Commands) -> Option<Box<dyn CommandHandler>> {
    let handler: Box<dyn CommandHandler> = match command {
        Commands::Shell => return None,
        Commands::RegisterUser { name, email } => {
            Box::new(register::RegisterCommand::user(name, email))
        }
        Commands::RegisterAuthor { name, email } => {
            Box::new(register::RegisterCommand::author(name, email))
        }
        Commands::Publish {
            author_id,
            title,
            content,
        } => Box::new(publish::PublishCommand::new(author_id, title, content)),
        Commands::Review {
            title,
            user_id,
            rating,
            comment,
        } => Box::new(review::ReviewCommand::new(title, user_id, rating, comment)),
        Commands::Reviews { title, format } => {
            Box::new(query::QueryCommand::new(query::Query::Reviews(title), format))
        }
        Commands::List { format } => Box::new(query::QueryCommand::new(query::Query::Books, format)),
        Commands::Search { keyword, format } => {
            Box::new(query::QueryCommand::new(query::Query::Search(keyword), format))
        }
        Commands::Top { n, format } => {
            Box::new(query::QueryCommand::new(query::Query::Top(n), format))
        }
        Commands::Users { format } => Box::new(query::QueryCommand::new(query::Query::Users, format)),
        Commands::Authors { format } => {
            Box::new(query::QueryCommand::new(query::Query::Authors, format))
        }
    };
    Some(handler)
}

#[cfg(test)]
pub(crate) mod test_support {
    use crate::notify::NotificationDispatcher;
    use crate::shelf::Bookshelf;
    use crate::store::SnapshotStore;
    use std::time::Duration;
    use tempfile::TempDir;

    pub fn create_test_shelf() -> (Bookshelf, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        let shelf = Bookshelf::new(
            SnapshotStore::new(temp_dir.path().join("app_state.bin")),
            NotificationDispatcher::new(Duration::ZERO, 8),
        );
        (shelf, temp_dir)
    }
}
