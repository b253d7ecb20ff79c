use thiserror::Error;

#[derive(Error, Debug)]
pub enum ShelfError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Duplicate identity: {0}")]
    DuplicateIdentity(String),

    #[error("Duplicate book title: {0}")]
    DuplicateBook(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Rating must be between 1 and 5, got {0}")]
    RatingOutOfBounds(i64),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Snapshot decode error: {0}")]
    Decode(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Generic error: {0}")]
    Generic(#[from] anyhow::Error),
}

impl From<bincode::Error> for ShelfError {
    fn from(err: bincode::Error) -> Self {
        match *err {
            bincode::ErrorKind::Io(io) => ShelfError::Io(io),
            other => ShelfError::Decode(other.to_string()),
        }
    }
}

pub type Result<T> = std::result::Result<T, ShelfError>;
