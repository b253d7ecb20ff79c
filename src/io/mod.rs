pub mod paths;

pub use paths::ShelfPaths;
