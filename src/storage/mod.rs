//! Storage Layer - SQLite-backed persistence
//!
//! System of record is a single SQLite table:
//! - snippets(keyword, message)

pub mod schema;
pub mod sqlite;

pub use sqlite::SnippetStore;
