//! Template sources for promptkit.
//!
//! Templates come from exactly one of two backends, chosen once when the
//! service is constructed and never re-checked per call:
//!
//! - [`LocalSource`] — one `<name>.j2` file per template under a configured
//!   directory, with an optional YAML front-matter header
//! - [`RemoteSource`] — a hosted `prompts` table queried over REST
//!
//! Both expose the same capability: fetch the raw content and metadata for a
//! name. The remote backend deliberately skips front-matter splitting
//! (metadata comes only from table columns); see the crate docs for this
//! documented divergence.

pub mod frontmatter;
pub mod local;
pub mod remote;

pub use frontmatter::FrontmatterError;
pub use local::{LocalSource, TEMPLATE_SUFFIX};
pub use remote::RemoteSource;

use crate::config::{ForcedSource, Settings};
use crate::error::Result;
use crate::template::TemplateMetadata;

/// Which backend a source reads from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceKind {
    /// Local filesystem directory.
    Local,
    /// Hosted prompt table.
    Remote,
}

impl std::fmt::Display for SourceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Local => write!(f, "local"),
            Self::Remote => write!(f, "remote"),
        }
    }
}

/// Raw template content as returned by a backend, before compilation.
#[derive(Debug, Clone)]
pub struct RawTemplate {
    /// Original raw text, including any front-matter header.
    pub source: String,
    /// Renderable body.
    pub body: String,
    /// Metadata from the header (local) or table columns (remote).
    pub metadata: TemplateMetadata,
}

/// The closed set of template backends.
#[derive(Debug, Clone)]
pub enum Source {
    Local(LocalSource),
    Remote(RemoteSource),
}

impl Source {
    /// Select the backend for the given settings.
    ///
    /// The remote source is chosen when both credentials are present and the
    /// forced-source override is not `local`; otherwise templates come from
    /// the local directory. The selection is permanent for the lifetime of
    /// the service.
    pub fn select(settings: &Settings) -> Result<Self> {
        if settings.forced_source != ForcedSource::Local {
            if let (Some(url), Some(key)) =
                (settings.supabase_url.as_deref(), settings.supabase_key.as_deref())
            {
                tracing::debug!(%url, "selecting remote template source");
                return Ok(Self::Remote(RemoteSource::new(url, key)?));
            }
        }

        tracing::debug!(dir = %settings.template_path.display(), "selecting local template source");
        Ok(Self::Local(LocalSource::new(&settings.template_path)))
    }

    /// Fetch the raw content and metadata for a template name.
    pub fn fetch_raw(&self, name: &str) -> Result<RawTemplate> {
        match self {
            Self::Local(local) => local.fetch_raw(name),
            Self::Remote(remote) => remote.fetch_raw(name),
        }
    }

    /// Which backend this source reads from.
    pub fn kind(&self) -> SourceKind {
        match self {
            Self::Local(_) => SourceKind::Local,
            Self::Remote(_) => SourceKind::Remote,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn remote_settings() -> Settings {
        Settings {
            supabase_url: Some("https://project.supabase.co".to_string()),
            supabase_key: Some("secret".to_string()),
            ..Settings::default()
        }
    }

    #[test]
    fn defaults_select_local() {
        let source = Source::select(&Settings::default()).unwrap();
        assert_eq!(source.kind(), SourceKind::Local);
    }

    #[test]
    fn credentials_select_remote() {
        let source = Source::select(&remote_settings()).unwrap();
        assert_eq!(source.kind(), SourceKind::Remote);
    }

    #[test]
    fn partial_credentials_select_local() {
        let settings = Settings {
            supabase_key: None,
            ..remote_settings()
        };
        let source = Source::select(&settings).unwrap();
        assert_eq!(source.kind(), SourceKind::Local);
    }

    #[test]
    fn forced_local_wins_over_credentials() {
        let settings = Settings {
            forced_source: ForcedSource::Local,
            ..remote_settings()
        };
        let source = Source::select(&settings).unwrap();
        assert_eq!(source.kind(), SourceKind::Local);
    }

    #[test]
    fn kind_display() {
        assert_eq!(SourceKind::Local.to_string(), "local");
        assert_eq!(SourceKind::Remote.to_string(), "remote");
    }
}
