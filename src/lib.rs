//! # Snippets - a tiny named-text store
//!
//! Snippets keeps short pieces of text under a unique name in a SQLite table
//! and exposes four operations over them:
//! - `put`: insert or update a snippet
//! - `get`: retrieve a snippet by name
//! - `catalog`: list every stored name
//! - `search`: find snippets whose text contains a substring

pub mod snippet;
pub mod storage;
pub mod commands;
pub mod output;
pub mod config;
pub mod logging;
pub mod ui;

// Re-exports for convenient access
pub use snippet::Snippet;
pub use storage::SnippetStore;
pub use output::OutputMode;

/// Result type alias for snippet operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for snippet operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Storage error: {0}")]
    Storage(#[from] rusqlite::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
