//! Local template loading from a configured directory.

use std::path::{Path, PathBuf};

use crate::error::{PromptError, Result};
use crate::source::{frontmatter, RawTemplate};

/// File suffix appended to template names.
pub const TEMPLATE_SUFFIX: &str = "j2";

/// Fetches raw templates from a local directory, one `<name>.j2` file per
/// template, with an optional YAML front-matter header.
#[derive(Debug, Clone)]
pub struct LocalSource {
    dir: PathBuf,
}

impl LocalSource {
    /// Create a source rooted at the given template directory.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// The configured template directory.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Read and split the template file for `name`.
    pub fn fetch_raw(&self, name: &str) -> Result<RawTemplate> {
        let path = self.dir.join(format!("{name}.{TEMPLATE_SUFFIX}"));
        tracing::debug!(template = %name, path = %path.display(), "reading local template");

        let source = std::fs::read_to_string(&path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                PromptError::NotFound {
                    name: name.to_string(),
                }
            } else {
                PromptError::Configuration {
                    message: format!("Failed to read {}: {}", path.display(), e),
                }
            }
        })?;

        let (metadata, body) =
            frontmatter::split(&source).map_err(|e| PromptError::Malformed {
                name: name.to_string(),
                message: e.to_string(),
            })?;

        Ok(RawTemplate {
            source,
            body,
            metadata,
        })
    }
}
