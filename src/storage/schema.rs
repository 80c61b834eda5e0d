//! Database schema definitions

/// SQL to create the snippets table
pub const CREATE_SNIPPETS_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS snippets (
    keyword TEXT NOT NULL UNIQUE,
    message TEXT NOT NULL
)
"#;

/// All schema creation statements
pub fn all_schema_statements() -> Vec<&'static str> {
    vec![CREATE_SNIPPETS_TABLE]
}
