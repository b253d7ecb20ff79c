pub mod catalog;
pub mod cli;
pub mod config;
pub mod error;
pub mod identity;
pub mod io;
pub mod model;
pub mod notify;
pub mod reviews;
pub mod shelf;
pub mod store;
pub mod validate;

pub use error::{Result, ShelfError};
pub use shelf::Bookshelf;
