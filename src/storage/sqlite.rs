//! SQLite storage implementation

use super::schema;
use crate::Result;
use crate::snippet::Snippet;
use rusqlite::{Connection, OptionalExtension, params};
use std::path::Path;

/// SQLite-backed storage for snippets.
///
/// One handle owns one connection for the lifetime of an invocation; every
/// operation borrows it instead of reaching for shared global state.
pub struct SnippetStore {
    conn: Connection,
}

impl SnippetStore {
    /// Open a database file (creates it and its parent directory if needed)
    pub fn open(path: &Path) -> Result<Self> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                std::fs::create_dir_all(parent)?;
            }
        }

        tracing::debug!("Connecting to {}", path.display());
        let conn = Connection::open(path)?;
        let store = Self { conn };
        store.initialize_schema()?;
        tracing::debug!("Database connection established.");
        Ok(store)
    }

    /// Open an in-memory database (for testing)
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        let store = Self { conn };
        store.initialize_schema()?;
        Ok(store)
    }

    /// Initialize the database schema
    fn initialize_schema(&self) -> Result<()> {
        for stmt in schema::all_schema_statements() {
            self.conn.execute(stmt, [])?;
        }
        Ok(())
    }

    /// Store a snippet under `name`, replacing the text of an existing one.
    ///
    /// The insert and the conflict update are a single statement, so two
    /// writers racing on the same name cannot observe a half-applied state.
    pub fn put(&self, name: &str, text: &str) -> Result<Snippet> {
        tracing::info!("Storing snippet {:?}: {:?}", name, text);

        let tx = self.conn.unchecked_transaction()?;
        tx.execute(
            r#"
            INSERT INTO snippets (keyword, message)
            VALUES (?1, ?2)
            ON CONFLICT(keyword) DO UPDATE SET message = excluded.message
            "#,
            params![name, text],
        )?;
        tx.commit()?;

        tracing::debug!("Snippet stored successfully.");
        Ok(Snippet::new(name, text))
    }

    /// Retrieve the text stored under `name`, or `None` if there is none.
    pub fn get(&self, name: &str) -> Result<Option<String>> {
        tracing::info!("Getting snippet {:?}", name);

        let text = self
            .conn
            .query_row(
                "SELECT message FROM snippets WHERE keyword = ?1",
                [name],
                |row| row.get(0),
            )
            .optional()?;

        tracing::debug!("Snippet retrieved successfully.");
        Ok(text)
    }

    /// All stored names in ascending order
    pub fn keywords(&self) -> Result<Vec<String>> {
        tracing::info!("Querying the database");

        let mut stmt = self.conn.prepare("SELECT keyword FROM snippets ORDER BY keyword")?;
        let keywords = stmt
            .query_map([], |row| row.get(0))?
            .collect::<rusqlite::Result<Vec<String>>>()?;

        tracing::debug!("Query complete");
        Ok(keywords)
    }

    /// Texts of every snippet containing `needle`, ordered by name.
    ///
    /// `%`, `_` and `\` in `needle` match literally. Letter case follows
    /// SQLite's LIKE, which folds ASCII only.
    pub fn search(&self, needle: &str) -> Result<Vec<String>> {
        tracing::info!("Searching snippets for {}", needle);

        let pattern = format!("%{}%", escape_like(needle));
        let mut stmt = self.conn.prepare(
            r#"
            SELECT message FROM snippets
            WHERE message LIKE ?1 ESCAPE '\'
            ORDER BY keyword
            "#,
        )?;
        let messages = stmt
            .query_map([pattern], |row| row.get(0))?
            .collect::<rusqlite::Result<Vec<String>>>()?;

        tracing::debug!("Search complete");
        Ok(messages)
    }
}

fn escape_like(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len());
    for c in raw.chars() {
        if matches!(c, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store_with(snippets: &[(&str, &str)]) -> SnippetStore {
        let store = SnippetStore::open_in_memory().unwrap();
        for (name, text) in snippets {
            store.put(name, text).unwrap();
        }
        store
    }

    #[test]
    fn test_put_then_get() {
        let store = SnippetStore::open_in_memory().unwrap();

        let stored = store.put("greeting", "hello world").unwrap();
        assert_eq!(stored, Snippet::new("greeting", "hello world"));

        let text = store.get("greeting").unwrap();
        assert_eq!(text.as_deref(), Some("hello world"));
    }

    #[test]
    fn test_put_overwrites_existing() {
        let store = store_with(&[("greeting", "hello"), ("greeting", "goodbye")]);

        assert_eq!(store.get("greeting").unwrap().as_deref(), Some("goodbye"));
        assert_eq!(store.keywords().unwrap(), vec!["greeting"]);
    }

    #[test]
    fn test_get_missing() {
        let store = store_with(&[("greeting", "hello")]);
        assert_eq!(store.get("missing").unwrap(), None);
    }

    #[test]
    fn test_not_found_text_is_still_data() {
        let store = store_with(&[("odd", "404: Snippet Not Found")]);
        assert_eq!(store.get("odd").unwrap().as_deref(), Some("404: Snippet Not Found"));
    }

    #[test]
    fn test_keywords_sorted() {
        let store = store_with(&[("b", "two"), ("a", "one"), ("c", "three")]);
        assert_eq!(store.keywords().unwrap(), vec!["a", "b", "c"]);
    }

    #[test]
    fn test_keywords_empty() {
        let store = SnippetStore::open_in_memory().unwrap();
        assert!(store.keywords().unwrap().is_empty());
    }

    #[test]
    fn test_search_substring() {
        let store = store_with(&[("x", "foobar"), ("y", "baz")]);
        assert_eq!(store.search("oo").unwrap(), vec!["foobar"]);
        assert!(store.search("qux").unwrap().is_empty());
    }

    #[test]
    fn test_search_folds_ascii_case() {
        let store = store_with(&[("x", "foobar")]);
        assert_eq!(store.search("FOO").unwrap(), vec!["foobar"]);
    }

    #[test]
    fn test_search_wildcards_are_literal() {
        let store = store_with(&[
            ("a", "50% off"),
            ("b", "500 off"),
            ("c", "snake_case"),
            ("d", "snakeXcase"),
        ]);
        assert_eq!(store.search("0%").unwrap(), vec!["50% off"]);
        assert_eq!(store.search("e_c").unwrap(), vec!["snake_case"]);
    }

    #[test]
    fn test_search_ordered_by_name() {
        let store = store_with(&[("z", "tea time"), ("a", "green tea")]);
        assert_eq!(store.search("tea").unwrap(), vec!["green tea", "tea time"]);
    }

    #[test]
    fn test_open_persists_between_handles() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("snippets.db");

        {
            let store = SnippetStore::open(&path).unwrap();
            store.put("kept", "still here").unwrap();
        }

        let reopened = SnippetStore::open(&path).unwrap();
        assert_eq!(reopened.get("kept").unwrap().as_deref(), Some("still here"));
    }

    #[test]
    fn test_escape_like() {
        assert_eq!(escape_like("plain"), "plain");
        assert_eq!(escape_like(r"a%b_c\d"), r"a\%b\_c\\d");
    }
}
