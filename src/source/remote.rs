//! Remote template loading from a hosted prompt table.
//!
//! Templates live in a `prompts` table behind a Supabase-style REST endpoint
//! with `name`, `content`, `description`, and `author` columns. Lookups query
//! for exactly one row matching the template name. Remote content is used
//! verbatim as the template body; metadata comes only from the table columns,
//! never from front-matter.

use std::time::Duration;

use serde::Deserialize;

use crate::error::{PromptError, Result};
use crate::source::RawTemplate;
use crate::template::{TemplateMetadata, DEFAULT_AUTHOR, DEFAULT_DESCRIPTION};

/// Table holding the prompt templates.
const PROMPTS_TABLE: &str = "prompts";

/// Default request timeout.
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// A single row from the prompts table.
#[derive(Debug, Deserialize)]
struct PromptRow {
    content: String,
    description: Option<String>,
    author: Option<String>,
}

/// Fetches raw templates from the hosted prompt table.
#[derive(Debug, Clone)]
pub struct RemoteSource {
    /// Endpoint base URL, without a trailing slash.
    base_url: String,
    /// Access key, sent as both `apikey` and bearer token.
    api_key: String,
    client: reqwest::blocking::Client,
}

impl RemoteSource {
    /// Create a remote source for the given endpoint and access key.
    ///
    /// Fails with a `Configuration` error when either credential is blank,
    /// before any network call is attempted.
    pub fn new(url: &str, key: &str) -> Result<Self> {
        Self::with_timeout(url, key, DEFAULT_TIMEOUT)
    }

    /// Create a remote source with a custom request timeout.
    pub fn with_timeout(url: &str, key: &str, timeout: Duration) -> Result<Self> {
        let url = url.trim();
        let key = key.trim();
        if url.is_empty() || key.is_empty() {
            return Err(PromptError::Configuration {
                message: "Remote source requires both supabase_url and supabase_key".to_string(),
            });
        }

        let client = reqwest::blocking::Client::builder()
            .user_agent("promptkit")
            .timeout(timeout)
            .build()
            .map_err(|e| PromptError::Configuration {
                message: format!("Failed to build HTTP client: {e}"),
            })?;

        Ok(Self {
            base_url: url.trim_end_matches('/').to_string(),
            api_key: key.to_string(),
            client,
        })
    }

    /// The configured endpoint base URL.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Query the prompts table for the single row matching `name`.
    pub fn fetch_raw(&self, name: &str) -> Result<RawTemplate> {
        let url = format!("{}/rest/v1/{}", self.base_url, PROMPTS_TABLE);
        tracing::debug!(template = %name, %url, "querying remote prompt table");

        let name_filter = format!("eq.{name}");
        let response = self
            .client
            .get(&url)
            .query(&[
                ("select", "content,description,author"),
                ("name", name_filter.as_str()),
            ])
            .header("apikey", &self.api_key)
            .bearer_auth(&self.api_key)
            .send()
            .map_err(|e| PromptError::Configuration {
                message: format!("Failed to query prompt table for '{name}': {e}"),
            })?;

        let status = response.status();
        if status == reqwest::StatusCode::UNAUTHORIZED || status == reqwest::StatusCode::FORBIDDEN {
            return Err(PromptError::Configuration {
                message: format!("Prompt table rejected the access key (HTTP {status})"),
            });
        }
        if !status.is_success() {
            return Err(PromptError::Configuration {
                message: format!("HTTP {status} querying prompt table for '{name}'"),
            });
        }

        let mut rows: Vec<PromptRow> =
            response.json().map_err(|e| PromptError::Malformed {
                name: name.to_string(),
                message: format!("undecodable prompt table response: {e}"),
            })?;

        if rows.is_empty() {
            return Err(PromptError::NotFound {
                name: name.to_string(),
            });
        }
        if rows.len() > 1 {
            return Err(PromptError::Malformed {
                name: name.to_string(),
                message: format!(
                    "prompt table matched {} rows, expected exactly one",
                    rows.len()
                ),
            });
        }
        let row = rows.remove(0);

        let mut metadata = TemplateMetadata::new();
        metadata.insert(
            "description",
            row.description
                .unwrap_or_else(|| DEFAULT_DESCRIPTION.to_string()),
        );
        metadata.insert(
            "author",
            row.author.unwrap_or_else(|| DEFAULT_AUTHOR.to_string()),
        );

        Ok(RawTemplate {
            source: row.content.clone(),
            body: row.content,
            metadata,
        })
    }
}
