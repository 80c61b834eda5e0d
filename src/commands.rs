//! Subcommand handlers
//!
//! Each handler runs one repository operation against the store handle it is
//! given and renders the result to `out` in the requested [`OutputMode`].

use std::io::Write;

use crate::output::{OutputMode, emit_success, quoted};
use crate::storage::SnippetStore;

/// Shown in place of a snippet's text when the name is not stored
pub const NOT_FOUND: &str = "404: Snippet Not Found";

pub fn run_put(
    store: &SnippetStore,
    output_mode: OutputMode,
    out: &mut dyn Write,
    name: &str,
    snippet: &str,
) -> anyhow::Result<()> {
    let stored = store.put(name, snippet)?;

    if output_mode.is_human() {
        writeln!(out, "Stored {} as {}", quoted(&stored.text), quoted(&stored.name))?;
    } else {
        emit_success(out, "put", serde_json::to_value(&stored)?)?;
    }
    Ok(())
}

pub fn run_get(
    store: &SnippetStore,
    output_mode: OutputMode,
    out: &mut dyn Write,
    name: &str,
) -> anyhow::Result<()> {
    let text = store.get(name)?;

    if output_mode.is_human() {
        let shown = text.as_deref().unwrap_or(NOT_FOUND);
        writeln!(out, "Retrieved snippet: {}", quoted(shown))?;
    } else {
        let data = serde_json::json!({
            "name": name,
            "found": text.is_some(),
            "snippet": text,
        });
        emit_success(out, "get", data)?;
    }
    Ok(())
}

pub fn run_catalog(
    store: &SnippetStore,
    output_mode: OutputMode,
    out: &mut dyn Write,
) -> anyhow::Result<()> {
    let keywords = store.keywords()?;

    if output_mode.is_human() {
        for keyword in &keywords {
            writeln!(out, "{}", keyword)?;
        }
        writeln!(out, "Retrieved keywords")?;
    } else {
        emit_success(out, "catalog", serde_json::json!({ "keywords": keywords }))?;
    }
    Ok(())
}

pub fn run_search(
    store: &SnippetStore,
    output_mode: OutputMode,
    out: &mut dyn Write,
    string: &str,
) -> anyhow::Result<()> {
    let matches = store.search(string)?;

    if output_mode.is_human() {
        for message in &matches {
            writeln!(out, "{}", message)?;
        }
        writeln!(out, "Search complete")?;
        let noun = if matches.len() == 1 { "message" } else { "messages" };
        writeln!(out, "Found {} in {} {}", quoted(string), matches.len(), noun)?;
    } else {
        let data = serde_json::json!({
            "query": string,
            "count": matches.len(),
            "matches": matches,
        });
        emit_success(out, "search", data)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn human<F>(f: F) -> String
    where
        F: FnOnce(&mut dyn Write) -> anyhow::Result<()>,
    {
        let mut out = Vec::new();
        f(&mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    fn json<F>(f: F) -> serde_json::Value
    where
        F: FnOnce(&mut dyn Write) -> anyhow::Result<()>,
    {
        let mut out = Vec::new();
        f(&mut out).unwrap();
        serde_json::from_slice(&out).unwrap()
    }

    #[test]
    fn test_put_and_get_output() {
        let store = SnippetStore::open_in_memory().unwrap();
        let mode = OutputMode::Human;

        let put = human(|out| run_put(&store, mode, out, "greeting", "hello world"));
        assert_eq!(put, "Stored 'hello world' as 'greeting'\n");

        let get = human(|out| run_get(&store, mode, out, "greeting"));
        assert_eq!(get, "Retrieved snippet: 'hello world'\n");

        let missing = human(|out| run_get(&store, mode, out, "missing"));
        assert_eq!(missing, "Retrieved snippet: '404: Snippet Not Found'\n");
    }

    #[test]
    fn test_catalog_output() {
        let store = SnippetStore::open_in_memory().unwrap();
        for name in ["b", "a", "c"] {
            store.put(name, "text").unwrap();
        }

        let catalog = human(|out| run_catalog(&store, OutputMode::Human, out));
        assert_eq!(catalog, "a\nb\nc\nRetrieved keywords\n");
    }

    #[test]
    fn test_search_output() {
        let store = SnippetStore::open_in_memory().unwrap();
        store.put("x", "foobar").unwrap();
        store.put("y", "baz").unwrap();

        let search = human(|out| run_search(&store, OutputMode::Human, out, "oo"));
        assert_eq!(search, "foobar\nSearch complete\nFound 'oo' in 1 message\n");

        let none = human(|out| run_search(&store, OutputMode::Human, out, "zzz"));
        assert_eq!(none, "Search complete\nFound 'zzz' in 0 messages\n");
    }

    #[test]
    fn test_get_json_distinguishes_not_found() {
        let store = SnippetStore::open_in_memory().unwrap();
        store.put("odd", NOT_FOUND).unwrap();

        let found = json(|out| run_get(&store, OutputMode::Json, out, "odd"));
        assert_eq!(found["data"]["found"], true);
        assert_eq!(found["data"]["snippet"], NOT_FOUND);

        let missing = json(|out| run_get(&store, OutputMode::Json, out, "missing"));
        assert_eq!(missing["command"], "get");
        assert_eq!(missing["data"]["found"], false);
        assert!(missing["data"]["snippet"].is_null());
    }

    #[test]
    fn test_json_put_catalog_search() {
        let store = SnippetStore::open_in_memory().unwrap();

        let put = json(|out| run_put(&store, OutputMode::Json, out, "x", "foobar"));
        assert_eq!(put["data"]["name"], "x");
        assert_eq!(put["data"]["snippet"], "foobar");

        let catalog = json(|out| run_catalog(&store, OutputMode::Json, out));
        assert_eq!(catalog["data"]["keywords"], serde_json::json!(["x"]));

        let search = json(|out| run_search(&store, OutputMode::Json, out, "bar"));
        assert_eq!(search["data"]["count"], 1);
        assert_eq!(search["data"]["matches"], serde_json::json!(["foobar"]));
    }
}
