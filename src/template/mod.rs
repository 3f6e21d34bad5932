//! Parsed template records and their metadata.
//!
//! A [`TemplateRecord`] pairs a template's raw text and renderable body with
//! an adjacent [`TemplateMetadata`] map. The compiled form lives inside the
//! service's engine environment, keyed by name; records themselves are
//! immutable and shared via `Arc`.

use std::collections::{BTreeMap, BTreeSet};

/// Placeholder description when none is declared.
pub const DEFAULT_DESCRIPTION: &str = "No description provided";

/// Placeholder author when none is declared.
pub const DEFAULT_AUTHOR: &str = "Unknown";

/// String-keyed template metadata.
///
/// Local templates collect this from the front-matter header; remote
/// templates from the `description`/`author` table columns. Arbitrary keys
/// are kept; `description` and `author` have documented defaults.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TemplateMetadata {
    values: BTreeMap<String, String>,
}

impl TemplateMetadata {
    /// Create an empty metadata map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up a metadata value by key.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }

    /// Insert a metadata value.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.values.insert(key.into(), value.into());
    }

    /// Declared description, or the documented placeholder.
    pub fn description(&self) -> &str {
        self.get("description").unwrap_or(DEFAULT_DESCRIPTION)
    }

    /// Declared author, or the documented placeholder.
    pub fn author(&self) -> &str {
        self.get("author").unwrap_or(DEFAULT_AUTHOR)
    }

    /// Number of declared keys.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// True when no keys are declared.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Iterate over declared key-value pairs in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl FromIterator<(String, String)> for TemplateMetadata {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(iter: I) -> Self {
        Self {
            values: iter.into_iter().collect(),
        }
    }
}

/// A loaded, renderable template.
///
/// Owned by the service cache; callers receive an `Arc` and must treat the
/// record as read-only.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateRecord {
    /// Name used to fetch the template.
    pub name: String,
    /// Original raw text, including any front-matter header.
    pub source: String,
    /// Renderable body (front-matter stripped for local templates).
    pub body: String,
    /// Declared metadata.
    pub metadata: TemplateMetadata,
}

/// Introspection result for a loaded template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateInfo {
    /// Template name.
    pub name: String,
    /// Declared description, or the documented placeholder.
    pub description: String,
    /// Declared author, or the documented placeholder.
    pub author: String,
    /// Variables the body references but does not itself define.
    pub variables: BTreeSet<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn metadata_defaults_apply_when_absent() {
        let meta = TemplateMetadata::new();
        assert_eq!(meta.description(), "No description provided");
        assert_eq!(meta.author(), "Unknown");
        assert!(meta.is_empty());
    }

    #[test]
    fn metadata_declared_values_win() {
        let mut meta = TemplateMetadata::new();
        meta.insert("description", "Greets a user");
        meta.insert("author", "Ada");
        assert_eq!(meta.description(), "Greets a user");
        assert_eq!(meta.author(), "Ada");
    }

    #[test]
    fn metadata_keeps_arbitrary_keys() {
        let meta: TemplateMetadata = [("version".to_string(), "2".to_string())]
            .into_iter()
            .collect();
        assert_eq!(meta.get("version"), Some("2"));
        assert_eq!(meta.len(), 1);
    }

    #[test]
    fn metadata_iterates_in_key_order() {
        let mut meta = TemplateMetadata::new();
        meta.insert("b", "2");
        meta.insert("a", "1");
        let keys: Vec<&str> = meta.iter().map(|(k, _)| k).collect();
        assert_eq!(keys, vec!["a", "b"]);
    }
}
