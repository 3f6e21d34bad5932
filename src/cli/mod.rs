//! Command-line interface for promptkit.
//!
//! The CLI is a thin wrapper over [`TemplateService`]: it resolves settings
//! from the environment (plus a few flag overrides), loads the named
//! template, and either renders it or prints its metadata.

use std::collections::HashMap;
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};

use crate::config::{ForcedSource, Settings};
use crate::service::TemplateService;

/// promptkit - prompt template loading, rendering, and introspection.
#[derive(Debug, Parser)]
#[command(name = "promptkit")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Local template directory (overrides TEMPLATE_PATH)
    #[arg(long, global = true, env = "TEMPLATE_PATH")]
    pub template_path: Option<PathBuf>,

    /// Force the local source even when remote credentials are set
    #[arg(long, global = true)]
    pub local: bool,

    /// Disable template caching
    #[arg(long, global = true)]
    pub no_cache: bool,

    /// Enable debug logging
    #[arg(long, global = true)]
    pub debug: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Render a template against --var key=value pairs
    Render(RenderArgs),

    /// Show a template's metadata and referenced variables
    Info(InfoArgs),
}

/// Arguments for `promptkit render`.
#[derive(Debug, clap::Args)]
pub struct RenderArgs {
    /// Template name (without the .j2 suffix)
    pub name: String,

    /// Context variable, repeatable: --var user=Ada
    #[arg(long = "var", value_name = "KEY=VALUE")]
    pub vars: Vec<String>,
}

/// Arguments for `promptkit info`.
#[derive(Debug, clap::Args)]
pub struct InfoArgs {
    /// Template name (without the .j2 suffix)
    pub name: String,
}

impl Cli {
    /// Resolve settings from the environment, applying flag overrides.
    pub fn settings(&self) -> Result<Settings> {
        let mut settings = Settings::from_env()?;
        if let Some(path) = &self.template_path {
            settings.template_path = path.clone();
        }
        if self.local {
            settings.forced_source = ForcedSource::Local;
        }
        if self.no_cache {
            settings.use_cache = false;
        }
        Ok(settings)
    }
}

/// Parse repeated `KEY=VALUE` pairs into a context map.
pub fn parse_vars(pairs: &[String]) -> Result<HashMap<String, String>> {
    let mut vars = HashMap::new();
    for pair in pairs {
        let Some((key, value)) = pair.split_once('=') else {
            bail!("Invalid --var '{pair}': expected KEY=VALUE");
        };
        let key = key.trim();
        if key.is_empty() {
            bail!("Invalid --var '{pair}': empty key");
        }
        vars.insert(key.to_string(), value.to_string());
    }
    Ok(vars)
}

/// Run the parsed command, writing output to stdout.
pub fn dispatch(cli: &Cli) -> Result<()> {
    let settings = cli.settings()?;
    let mut service = TemplateService::new(&settings)?;

    match &cli.command {
        Commands::Render(args) => {
            let context = parse_vars(&args.vars)?;
            let record = service
                .load(&args.name)
                .with_context(|| format!("Failed to load template '{}'", args.name))?;
            let output = service.render(&record, context)?;
            println!("{output}");
        }
        Commands::Info(args) => {
            let record = service
                .load(&args.name)
                .with_context(|| format!("Failed to load template '{}'", args.name))?;
            let info = service.info(&record)?;

            println!("name: {}", info.name);
            println!("description: {}", info.description);
            println!("author: {}", info.author);
            let variables: Vec<String> = info.variables.into_iter().collect();
            println!("variables: {}", variables.join(", "));
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_vars_splits_pairs() {
        let vars = parse_vars(&["user=Ada".to_string(), "mode=dev".to_string()]).unwrap();
        assert_eq!(vars.get("user").unwrap(), "Ada");
        assert_eq!(vars.get("mode").unwrap(), "dev");
    }

    #[test]
    fn parse_vars_keeps_equals_in_value() {
        let vars = parse_vars(&["url=https://x.co?a=1".to_string()]).unwrap();
        assert_eq!(vars.get("url").unwrap(), "https://x.co?a=1");
    }

    #[test]
    fn parse_vars_allows_empty_value() {
        let vars = parse_vars(&["flag=".to_string()]).unwrap();
        assert_eq!(vars.get("flag").unwrap(), "");
    }

    #[test]
    fn parse_vars_rejects_missing_equals() {
        assert!(parse_vars(&["nope".to_string()]).is_err());
    }

    #[test]
    fn parse_vars_rejects_empty_key() {
        assert!(parse_vars(&["=value".to_string()]).is_err());
    }

    #[test]
    fn cli_parses_render_command() {
        let cli = Cli::try_parse_from([
            "promptkit", "render", "greeting", "--var", "user=Ada", "--local",
        ])
        .unwrap();
        assert!(cli.local);
        match cli.command {
            Commands::Render(args) => {
                assert_eq!(args.name, "greeting");
                assert_eq!(args.vars, vec!["user=Ada".to_string()]);
            }
            _ => panic!("expected render command"),
        }
    }

    #[test]
    fn cli_parses_info_command() {
        let cli = Cli::try_parse_from(["promptkit", "info", "greeting", "--no-cache"]).unwrap();
        assert!(cli.no_cache);
        assert!(matches!(cli.command, Commands::Info(args) if args.name == "greeting"));
    }
}
