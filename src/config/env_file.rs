//! .env file parsing.
//!
//! This module provides functionality for parsing environment variable files
//! in the standard KEY=value format. Settings are loaded from an optional
//! `.prompting_env` file overlaid by the real process environment.

use std::collections::HashMap;
use std::path::Path;

use crate::error::{PromptError, Result};

/// Parses .env files into a map of environment variables.
///
/// # Supported Formats
///
/// - Simple: `KEY=value`
/// - Quoted: `KEY="value with spaces"` or `KEY='single quoted'`
/// - Empty: `KEY=`
/// - Comments: `# This is a comment`
/// - Whitespace around equals: `KEY = value`
/// - Values with equals signs: `SUPABASE_URL=https://example.com?foo=bar`
///
/// # Example
///
/// ```
/// use promptkit::config::EnvFileParser;
///
/// let content = r#"
/// # Remote prompt table
/// SUPABASE_URL=https://project.supabase.co
/// USE_CACHE="true"
/// FORCED_SOURCE=
/// "#;
///
/// let vars = EnvFileParser::parse(content);
/// assert_eq!(vars.get("SUPABASE_URL"), Some(&"https://project.supabase.co".to_string()));
/// assert_eq!(vars.get("USE_CACHE"), Some(&"true".to_string()));
/// assert_eq!(vars.get("FORCED_SOURCE"), Some(&"".to_string()));
/// ```
pub struct EnvFileParser;

impl EnvFileParser {
    /// Parse an env file content string into a map of variables.
    pub fn parse(content: &str) -> HashMap<String, String> {
        let mut vars = HashMap::new();

        for line in content.lines() {
            let line = line.trim();

            // Skip empty lines and comments
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            if let Some((key, value)) = Self::parse_line(line) {
                vars.insert(key, value);
            }
        }

        vars
    }

    /// Parse a single line.
    fn parse_line(line: &str) -> Option<(String, String)> {
        let eq_pos = line.find('=')?;
        let key = line[..eq_pos].trim().to_string();
        let value = line[eq_pos + 1..].trim();

        Some((key, Self::unquote(value)))
    }

    /// Remove surrounding quotes from a value.
    fn unquote(value: &str) -> String {
        if value.len() >= 2
            && ((value.starts_with('"') && value.ends_with('"'))
                || (value.starts_with('\'') && value.ends_with('\'')))
        {
            value[1..value.len() - 1].to_string()
        } else {
            value.to_string()
        }
    }

    /// Load and parse an env file from a path.
    pub fn load(path: &Path) -> Result<HashMap<String, String>> {
        let content =
            std::fs::read_to_string(path).map_err(|e| PromptError::Configuration {
                message: format!("Failed to read env file {}: {}", path.display(), e),
            })?;
        Ok(Self::parse(&content))
    }

    /// Load and parse an env file, returning an empty map if it doesn't exist.
    pub fn load_optional(path: &Path) -> Result<HashMap<String, String>> {
        if path.exists() {
            Self::load(path)
        } else {
            Ok(HashMap::new())
        }
    }
}
