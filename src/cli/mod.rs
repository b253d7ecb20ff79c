pub mod app;
pub mod commands;
pub mod output;
pub mod shell;

pub use app::{Cli, Commands, LogLevel, OutputFormat};
pub use shell::Shell;
