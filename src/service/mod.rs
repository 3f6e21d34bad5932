//! Template service: loading, caching, rendering, and introspection.
//!
//! [`TemplateService`] is the injectable context object that owns everything
//! the access layer needs: the selected source, the template engine
//! environment, and the per-source caches. Construct one per configuration;
//! there is no process-global state, so tests and multi-tenant callers can
//! hold independently configured instances side by side.
//!
//! Mutating operations take `&mut self`. Callers sharing a service across
//! threads wrap it in their own lock, which is exactly the read-check-insert
//! discipline the cache needs.

use std::sync::Arc;

use minijinja::{Environment, UndefinedBehavior};
use serde::Serialize;

use crate::cache::TemplateCache;
use crate::config::Settings;
use crate::error::{PromptError, Result};
use crate::source::{Source, SourceKind};
use crate::template::{TemplateInfo, TemplateRecord};

/// Cache-backed template loader, renderer, and introspector.
pub struct TemplateService {
    /// Engine environment holding the compiled templates, keyed by name.
    /// Strict undefined behavior; auto-escaping off (prompts are plain text).
    env: Environment<'static>,
    /// Backend selected once at construction.
    source: Source,
    use_cache: bool,
    /// One cache per source kind. Only the selected source's cache fills;
    /// `clear` empties both.
    local_cache: TemplateCache,
    remote_cache: TemplateCache,
}

impl std::fmt::Debug for TemplateService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TemplateService")
            .field("source", &self.source.kind())
            .field("use_cache", &self.use_cache)
            .field("cached", &(self.local_cache.len() + self.remote_cache.len()))
            .finish()
    }
}

impl TemplateService {
    /// Create a service for the given settings.
    ///
    /// The source is selected here, once: remote when both credentials are
    /// present and not overridden to local, otherwise the local directory.
    pub fn new(settings: &Settings) -> Result<Self> {
        let source = Source::select(settings)?;

        let mut env = Environment::new();
        env.set_undefined_behavior(UndefinedBehavior::Strict);
        env.set_auto_escape_callback(|_| minijinja::AutoEscape::None);

        Ok(Self {
            env,
            source,
            use_cache: settings.use_cache,
            local_cache: TemplateCache::new(),
            remote_cache: TemplateCache::new(),
        })
    }

    /// Create a service from the process environment (and `.prompting_env`).
    pub fn from_env() -> Result<Self> {
        Self::new(&Settings::from_env()?)
    }

    /// Which backend this service reads from.
    pub fn source_kind(&self) -> SourceKind {
        self.source.kind()
    }

    /// Whether loaded templates are memoized.
    pub fn use_cache(&self) -> bool {
        self.use_cache
    }

    /// Load a template by name.
    ///
    /// With caching enabled, repeated loads of the same name return the
    /// identical cached record without re-fetching; otherwise every call
    /// re-fetches and re-parses. A loaded record stays valid until the
    /// service is dropped, even across `clear`.
    pub fn load(&mut self, name: &str) -> Result<Arc<TemplateRecord>> {
        if name.is_empty() {
            return Err(PromptError::NotFound {
                name: name.to_string(),
            });
        }

        if self.use_cache {
            if let Some(record) = self.cache().get(name) {
                tracing::debug!(template = %name, "cache hit");
                return Ok(record);
            }
        }

        let raw = self.source.fetch_raw(name)?;

        // Compile eagerly so malformed bodies fail at load, not at render.
        self.env
            .add_template_owned(name.to_string(), raw.body.clone())
            .map_err(|e| PromptError::Malformed {
                name: name.to_string(),
                message: e.to_string(),
            })?;

        let record = Arc::new(TemplateRecord {
            name: name.to_string(),
            source: raw.source,
            body: raw.body,
            metadata: raw.metadata,
        });

        if self.use_cache {
            self.cache_mut().insert(Arc::clone(&record));
        }
        tracing::debug!(template = %name, source = %self.source.kind(), "template loaded");

        Ok(record)
    }

    /// Render a loaded template against a context mapping.
    ///
    /// Strict mode: referencing a name absent from the context fails with an
    /// `UndefinedVariable` error rather than substituting an empty string.
    pub fn render<S: Serialize>(&self, record: &TemplateRecord, context: S) -> Result<String> {
        let template = self.template_for(record)?;
        template.render(context).map_err(|e| {
            if is_undefined(&e) {
                PromptError::UndefinedVariable {
                    name: record.name.clone(),
                    message: e.to_string(),
                }
            } else {
                PromptError::Malformed {
                    name: record.name.clone(),
                    message: e.to_string(),
                }
            }
        })
    }

    /// Report a template's declared metadata and the variables its body
    /// references but does not itself define.
    ///
    /// Purely static: the template is analyzed, never executed.
    pub fn info(&self, record: &TemplateRecord) -> Result<TemplateInfo> {
        let template = self.template_for(record)?;
        let variables = template
            .undeclared_variables(false)
            .into_iter()
            .collect();

        Ok(TemplateInfo {
            name: record.name.clone(),
            description: record.metadata.description().to_string(),
            author: record.metadata.author().to_string(),
            variables,
        })
    }

    /// Empty both caches. Subsequent loads re-fetch from the source.
    pub fn clear(&mut self) {
        self.local_cache.clear();
        self.remote_cache.clear();
        tracing::debug!("template caches cleared");
    }

    /// Check whether a name is currently cached.
    pub fn is_cached(&self, name: &str) -> bool {
        self.cache().contains(name)
    }

    fn cache(&self) -> &TemplateCache {
        match self.source.kind() {
            SourceKind::Local => &self.local_cache,
            SourceKind::Remote => &self.remote_cache,
        }
    }

    fn cache_mut(&mut self) -> &mut TemplateCache {
        match self.source.kind() {
            SourceKind::Local => &mut self.local_cache,
            SourceKind::Remote => &mut self.remote_cache,
        }
    }

    fn template_for(&self, record: &TemplateRecord) -> Result<minijinja::Template<'_, '_>> {
        self.env
            .get_template(&record.name)
            .map_err(|_| PromptError::Configuration {
                message: format!(
                    "Template '{}' is not registered with this service; load it first",
                    record.name
                ),
            })
    }
}

fn is_undefined(err: &minijinja::Error) -> bool {
    err.kind() == minijinja::ErrorKind::UndefinedError
}
