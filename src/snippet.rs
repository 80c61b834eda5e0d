//! The snippet record

use serde::Serialize;

/// A named piece of text. `name` is unique across the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Snippet {
    pub name: String,
    #[serde(rename = "snippet")]
    pub text: String,
}

impl Snippet {
    pub fn new(name: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            text: text.into(),
        }
    }
}
