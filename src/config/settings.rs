//! Process configuration for the template service.
//!
//! Settings are resolved once, from an optional `.prompting_env` file overlaid
//! by the real process environment (process environment wins), and are
//! immutable afterwards.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crate::config::env_file::EnvFileParser;
use crate::error::Result;

/// Default env file name, read from the current directory when present.
pub const ENV_FILE: &str = ".prompting_env";

/// Default local template directory.
pub const DEFAULT_TEMPLATE_PATH: &str = "prompts/templates";

/// Source override requested via configuration.
///
/// `FORCED_SOURCE=local` forces the local filesystem source even when remote
/// credentials are present. Any other value (including empty) means no
/// override.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ForcedSource {
    /// No override; the source is selected from the credentials.
    #[default]
    None,
    /// Always use the local filesystem source.
    Local,
}

impl ForcedSource {
    fn parse(value: &str) -> Self {
        if value.trim().eq_ignore_ascii_case("local") {
            Self::Local
        } else {
            Self::None
        }
    }
}

/// Process-wide configuration, read once at startup.
///
/// # Example
///
/// ```
/// use promptkit::config::Settings;
///
/// let settings = Settings::default();
/// assert_eq!(settings.template_path.to_str(), Some("prompts/templates"));
/// assert!(settings.use_cache);
/// ```
#[derive(Debug, Clone)]
pub struct Settings {
    /// Remote table endpoint. Together with `supabase_key`, selects the
    /// remote source.
    pub supabase_url: Option<String>,
    /// Remote table access key.
    pub supabase_key: Option<String>,
    /// Local template directory.
    pub template_path: PathBuf,
    /// Whether loaded templates are memoized.
    pub use_cache: bool,
    /// Source override.
    pub forced_source: ForcedSource,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            supabase_url: None,
            supabase_key: None,
            template_path: PathBuf::from(DEFAULT_TEMPLATE_PATH),
            use_cache: true,
            forced_source: ForcedSource::None,
        }
    }
}

impl Settings {
    /// Build settings from an explicit variable map.
    ///
    /// Keys are matched case-insensitively, mirroring the usual env-settings
    /// convention (`SUPABASE_URL` and `supabase_url` are equivalent).
    pub fn from_vars(vars: &HashMap<String, String>) -> Self {
        let lookup = |key: &str| -> Option<String> {
            vars.iter()
                .find(|(k, _)| k.eq_ignore_ascii_case(key))
                .map(|(_, v)| v.clone())
                .filter(|v| !v.trim().is_empty())
        };

        let defaults = Self::default();

        Self {
            supabase_url: lookup("SUPABASE_URL"),
            supabase_key: lookup("SUPABASE_KEY"),
            template_path: lookup("TEMPLATE_PATH")
                .map(PathBuf::from)
                .unwrap_or(defaults.template_path),
            use_cache: lookup("USE_CACHE")
                .and_then(|v| parse_bool(&v))
                .unwrap_or(defaults.use_cache),
            forced_source: lookup("FORCED_SOURCE")
                .map(|v| ForcedSource::parse(&v))
                .unwrap_or(defaults.forced_source),
        }
    }

    /// Load settings from the process environment, overlaying `.prompting_env`
    /// in the current directory when present.
    pub fn from_env() -> Result<Self> {
        Self::from_env_file(Path::new(ENV_FILE))
    }

    /// Load settings from a specific env file path plus the process
    /// environment. Process environment variables win over file entries.
    pub fn from_env_file(env_file: &Path) -> Result<Self> {
        let mut vars = EnvFileParser::load_optional(env_file)?;
        for (key, value) in std::env::vars() {
            vars.insert(key, value);
        }
        Ok(Self::from_vars(&vars))
    }

    /// True when both remote credentials are present.
    pub fn has_remote_credentials(&self) -> bool {
        self.supabase_url.is_some() && self.supabase_key.is_some()
    }
}

/// Parse a boolean setting. Accepts `1/true/yes/on` and `0/false/no/off`,
/// case-insensitive. Anything else is `None` so the default applies.
fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vars(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn defaults_applied_for_empty_map() {
        let settings = Settings::from_vars(&HashMap::new());
        assert!(settings.supabase_url.is_none());
        assert!(settings.supabase_key.is_none());
        assert_eq!(settings.template_path, PathBuf::from("prompts/templates"));
        assert!(settings.use_cache);
        assert_eq!(settings.forced_source, ForcedSource::None);
    }

    #[test]
    fn reads_remote_credentials() {
        let settings = Settings::from_vars(&vars(&[
            ("SUPABASE_URL", "https://project.supabase.co"),
            ("SUPABASE_KEY", "secret"),
        ]));
        assert!(settings.has_remote_credentials());
    }

    #[test]
    fn keys_are_case_insensitive() {
        let settings = Settings::from_vars(&vars(&[("supabase_url", "https://x.co")]));
        assert_eq!(settings.supabase_url.as_deref(), Some("https://x.co"));
    }

    #[test]
    fn blank_values_count_as_unset() {
        let settings = Settings::from_vars(&vars(&[
            ("SUPABASE_URL", "  "),
            ("SUPABASE_KEY", ""),
        ]));
        assert!(!settings.has_remote_credentials());
    }

    #[test]
    fn use_cache_parses_common_spellings() {
        for (value, expected) in [
            ("true", true),
            ("YES", true),
            ("1", true),
            ("on", true),
            ("false", false),
            ("No", false),
            ("0", false),
            ("off", false),
        ] {
            let settings = Settings::from_vars(&vars(&[("USE_CACHE", value)]));
            assert_eq!(settings.use_cache, expected, "value: {value}");
        }
    }

    #[test]
    fn unparseable_use_cache_falls_back_to_default() {
        let settings = Settings::from_vars(&vars(&[("USE_CACHE", "maybe")]));
        assert!(settings.use_cache);
    }

    #[test]
    fn forced_source_local() {
        let settings = Settings::from_vars(&vars(&[("FORCED_SOURCE", "local")]));
        assert_eq!(settings.forced_source, ForcedSource::Local);

        let settings = Settings::from_vars(&vars(&[("FORCED_SOURCE", "LOCAL")]));
        assert_eq!(settings.forced_source, ForcedSource::Local);
    }

    #[test]
    fn forced_source_other_values_mean_none() {
        let settings = Settings::from_vars(&vars(&[("FORCED_SOURCE", "remote")]));
        assert_eq!(settings.forced_source, ForcedSource::None);
    }

    #[test]
    fn template_path_override() {
        let settings = Settings::from_vars(&vars(&[("TEMPLATE_PATH", "custom/dir")]));
        assert_eq!(settings.template_path, PathBuf::from("custom/dir"));
    }

    #[test]
    fn env_file_overlaid_by_explicit_vars() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(".prompting_env");
        std::fs::write(&path, "TEMPLATE_PATH=from-file\nUSE_CACHE=false\n").unwrap();

        // from_env_file merges the real process env on top; neither
        // TEMPLATE_PATH nor USE_CACHE is expected there.
        let settings = Settings::from_env_file(&path).unwrap();
        assert_eq!(settings.template_path, PathBuf::from("from-file"));
        assert!(!settings.use_cache);
    }
}
