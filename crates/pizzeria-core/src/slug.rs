//! Human-readable primary keys for catalog entities.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Immutable, unique string identifier of an ingredient or a pizza.
///
/// Serialized transparently as a plain JSON string.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Slug(String);

impl Slug {
    pub fn new(value: impl Into<String>) -> Self {
        Slug(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// `true` for the empty string, which never names a catalog row.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for Slug {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Slug {
    fn from(value: &str) -> Self {
        Slug(value.to_string())
    }
}

impl From<String> for Slug {
    fn from(value: String) -> Self {
        Slug(value)
    }
}

impl AsRef<str> for Slug {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializes_as_plain_string() {
        let slug = Slug::from("margherita");
        assert_eq!(serde_json::to_string(&slug).unwrap(), "\"margherita\"");
        let back: Slug = serde_json::from_str("\"margherita\"").unwrap();
        assert_eq!(back, slug);
    }

    #[test]
    fn display_prints_inner_value() {
        assert_eq!(Slug::new("dough").to_string(), "dough");
        assert!(Slug::new("").is_empty());
    }
}
