//! YAML front-matter splitting for local templates.
//!
//! Local template files carry an optional metadata header delimited by `---`
//! lines, followed by the renderable body:
//!
//! ```text
//! ---
//! description: Greets a user
//! author: Ada
//! ---
//! Hello, {{ user }}!
//! ```
//!
//! Remote templates never go through this path; their metadata comes from
//! table columns instead.

use thiserror::Error;

use crate::template::TemplateMetadata;

/// Front-matter delimiter line.
const DELIMITER: &str = "---";

/// Errors raised while splitting a front-matter header.
#[derive(Debug, Error)]
pub enum FrontmatterError {
    #[error("front-matter header is not terminated by '---'")]
    Unterminated,
    #[error("front-matter is not valid YAML: {0}")]
    InvalidYaml(String),
    #[error("front-matter is not a key-value mapping")]
    NotAMapping,
    #[error("front-matter key '{key}' has a non-scalar value")]
    NonScalarValue { key: String },
}

/// Split a raw template into its metadata header and body.
///
/// Text without a leading `---` line has no header: the metadata is empty and
/// the whole text is the body. The body is trimmed of surrounding whitespace
/// either way, matching the conventional front-matter semantics.
pub fn split(raw: &str) -> Result<(TemplateMetadata, String), FrontmatterError> {
    let trimmed = raw.trim_start();
    if !is_delimited(trimmed) {
        return Ok((TemplateMetadata::new(), raw.trim().to_string()));
    }

    // Skip the opening delimiter line, then collect header lines until the
    // closing delimiter.
    let mut lines = trimmed.lines();
    let _ = lines.next();

    let mut header_lines = Vec::new();
    let mut terminated = false;
    for line in lines.by_ref() {
        if line.trim_end() == DELIMITER {
            terminated = true;
            break;
        }
        header_lines.push(line);
    }
    if !terminated {
        return Err(FrontmatterError::Unterminated);
    }

    let metadata = parse_header(&header_lines.join("\n"))?;
    let body = lines.collect::<Vec<_>>().join("\n").trim().to_string();

    Ok((metadata, body))
}

fn is_delimited(text: &str) -> bool {
    text.lines()
        .next()
        .map(|first| first.trim_end() == DELIMITER)
        .unwrap_or(false)
}

/// Parse the YAML header into a flat string-keyed metadata map.
fn parse_header(header: &str) -> Result<TemplateMetadata, FrontmatterError> {
    let value: serde_yaml::Value = serde_yaml::from_str(header)
        .map_err(|e| FrontmatterError::InvalidYaml(e.to_string()))?;

    let mapping = match value {
        serde_yaml::Value::Null => return Ok(TemplateMetadata::new()),
        serde_yaml::Value::Mapping(m) => m,
        _ => return Err(FrontmatterError::NotAMapping),
    };

    let mut metadata = TemplateMetadata::new();
    for (key, value) in mapping {
        let key = match key {
            serde_yaml::Value::String(s) => s,
            other => serde_yaml::to_string(&other)
                .map(|s| s.trim().to_string())
                .map_err(|e| FrontmatterError::InvalidYaml(e.to_string()))?,
        };
        let value = scalar_to_string(&key, value)?;
        metadata.insert(key, value);
    }
    Ok(metadata)
}

fn scalar_to_string(
    key: &str,
    value: serde_yaml::Value,
) -> Result<String, FrontmatterError> {
    match value {
        serde_yaml::Value::String(s) => Ok(s),
        serde_yaml::Value::Bool(b) => Ok(b.to_string()),
        serde_yaml::Value::Number(n) => Ok(n.to_string()),
        serde_yaml::Value::Null => Ok(String::new()),
        _ => Err(FrontmatterError::NonScalarValue {
            key: key.to_string(),
        }),
    }
}
