//! promptkit - prompt template loading, caching, and rendering.
//!
//! A cache-backed access layer over a Jinja-style template engine: resolve a
//! named prompt template from one of two interchangeable sources (a local
//! file tree or a hosted prompt table), parse front-matter metadata, memoize
//! the parsed record, and render it against a caller-supplied context.
//!
//! # Modules
//!
//! - [`cache`] - Bounded in-memory memoization of loaded templates
//! - [`cli`] - Command-line interface and argument parsing
//! - [`config`] - Environment-sourced settings and .env file parsing
//! - [`error`] - Error types and result aliases
//! - [`service`] - The template service: load, render, info, clear
//! - [`source`] - Local and remote template backends
//! - [`template`] - Parsed records, metadata, and introspection results
//!
//! # Example
//!
//! ```no_run
//! use std::collections::HashMap;
//! use promptkit::config::Settings;
//! use promptkit::service::TemplateService;
//!
//! let mut service = TemplateService::new(&Settings::default()).unwrap();
//! let record = service.load("greeting").unwrap();
//!
//! let mut context = HashMap::new();
//! context.insert("user".to_string(), "Ada".to_string());
//! let output = service.render(&record, context).unwrap();
//! ```
//!
//! # Source asymmetry
//!
//! Local templates carry their metadata in a YAML front-matter header that is
//! split off the body; remote templates take metadata from table columns and
//! their content is used verbatim, front-matter included. Both behaviors are
//! kept as-is and exercised by the test suite.

pub mod cache;
pub mod cli;
pub mod config;
pub mod error;
pub mod service;
pub mod source;
pub mod template;

pub use error::{PromptError, Result};
pub use service::TemplateService;
pub use template::{TemplateInfo, TemplateMetadata, TemplateRecord};
