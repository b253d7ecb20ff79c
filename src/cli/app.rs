use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Bookshelf: publish books, review them, and query the catalog
#[derive(Parser, Debug)]
#[command(name = "bookshelf")]
#[command(version)]
#[command(about = "Book publishing and review catalog")]
#[command(
    long_about = "Bookshelf keeps users, authors, books and reviews in memory and snapshots them to a single file between sessions."
)]
pub struct Cli {
    /// Configuration file (defaults to ./bookshelf.yaml, then the platform config dir)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Snapshot file, overriding the configured one
    #[arg(long, global = true)]
    pub snapshot: Option<PathBuf>,

    /// Log level for diagnostics on stderr (RUST_LOG is used when omitted)
    #[arg(long, global = true, value_enum)]
    pub log_level: Option<LogLevel>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    pub fn to_filter_directive(self) -> &'static str {
        match self {
            LogLevel::Error => "error",
            LogLevel::Warn => "warn",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
            LogLevel::Trace => "trace",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum Commands {
    /// Interactive menu (the default)
    Shell,

    /// Register a reader
    RegisterUser {
        name: String,
        email: String,
    },

    /// Register an author
    RegisterAuthor {
        name: String,
        email: String,
    },

    /// Publish a book under an author
    Publish {
        /// Author ID, e.g. A001
        author_id: String,
        title: String,
        /// Book content
        #[arg(default_value = "")]
        content: String,
    },

    /// List every book with its author and review count
    List {
        #[arg(short, long, value_enum, default_value_t)]
        format: OutputFormat,
    },

    /// Review a book
    ///
    /// The author's notification is printed once its simulated delivery
    /// latency has passed. The command waits up to
    /// `notifications.shutdown_grace_ms` for it before exiting; a notice still
    /// pending after that is dropped.
    Review {
        /// Exact book title (case-insensitive)
        title: String,
        /// Reviewer's user ID, e.g. U001
        user_id: String,
        /// Star rating from 1 to 5
        #[arg(allow_negative_numbers = true)]
        rating: i64,
        #[arg(default_value = "")]
        comment: String,
    },

    /// Show a book's reviews, newest first
    Reviews {
        title: String,
        #[arg(short, long, value_enum, default_value_t)]
        format: OutputFormat,
    },

    /// Search book titles by keyword
    Search {
        #[arg(default_value = "")]
        keyword: String,
        #[arg(short, long, value_enum, default_value_t)]
        format: OutputFormat,
    },

    /// Highest rated books
    Top {
        #[arg(default_value_t = 5, allow_negative_numbers = true)]
        n: i64,
        #[arg(short, long, value_enum, default_value_t)]
        format: OutputFormat,
    },

    /// List registered users
    Users {
        #[arg(short, long, value_enum, default_value_t)]
        format: OutputFormat,
    },

    /// List registered authors
    Authors {
        #[arg(short, long, value_enum, default_value_t)]
        format: OutputFormat,
    },
}

impl Commands {
    /// Get the command name as a string
    pub fn name(&self) -> &'static str {
        match self {
            Commands::Shell => "shell",
            Commands::RegisterUser { .. } => "register-user",
            Commands::RegisterAuthor { .. } => "register-author",
            Commands::Publish { .. } => "publish",
            Commands::List { .. } => "list",
            Commands::Review { .. } => "review",
            Commands::Reviews { .. } => "reviews",
            Commands::Search { .. } => "search",
            Commands::Top { .. } => "top",
            Commands::Users { .. } => "users",
            Commands::Authors { .. } => "authors",
        }
    }

    /// Check if this command changes the catalog and needs a save afterwards
    pub fn modifies_state(&self) -> bool {
        matches!(
            self,
            Commands::RegisterUser { .. }
                | Commands::RegisterAuthor { .. }
                | Commands::Publish { .. }
                | Commands::Review { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn test_defaults_to_shell() {
        let cli = Cli::parse_from(["bookshelf"]);
        assert!(cli.command.is_none());
        assert!(cli.config.is_none());
        assert!(cli.log_level.is_none());
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::parse_from([
            "bookshelf",
            "list",
            "--snapshot",
            "/tmp/shelf.bin",
            "--log-level",
            "debug",
        ]);

        assert_eq!(cli.snapshot, Some(PathBuf::from("/tmp/shelf.bin")));
        assert_eq!(cli.log_level, Some(LogLevel::Debug));
        assert_eq!(
            cli.command,
            Some(Commands::List {
                format: OutputFormat::Text
            })
        );
    }

    #[test]
    fn test_review_command() {
        let cli = Cli::parse_from(["bookshelf", "review", "Go Deep", "U001", "5", "loved it"]);

        match cli.command {
            Some(Commands::Review {
                title,
                user_id,
                rating,
                comment,
            }) => {
                assert_eq!(title, "Go Deep");
                assert_eq!(user_id, "U001");
                assert_eq!(rating, 5);
                assert_eq!(comment, "loved it");
            }
            other => panic!("Wrong command parsed: {:?}", other),
        }
    }

    #[test]
    fn test_negative_rating_reaches_the_core() {
        let cli = Cli::parse_from(["bookshelf", "review", "Go Deep", "U001", "-2"]);
        assert!(matches!(
            cli.command,
            Some(Commands::Review { rating: -2, .. })
        ));
    }

    #[test]
    fn test_top_command_defaults() {
        let cli = Cli::parse_from(["bookshelf", "top", "--format", "json"]);
        assert_eq!(
            cli.command,
            Some(Commands::Top {
                n: 5,
                format: OutputFormat::Json
            })
        );
    }

    #[test]
    fn test_command_properties() {
        let publish = Commands::Publish {
            author_id: "A001".to_string(),
            title: "Go Deep".to_string(),
            content: String::new(),
        };
        assert_eq!(publish.name(), "publish");
        assert!(publish.modifies_state());

        let search = Commands::Search {
            keyword: String::new(),
            format: OutputFormat::Text,
        };
        assert_eq!(search.name(), "search");
        assert!(!search.modifies_state());
        assert!(!Commands::Shell.modifies_state());
    }
}
