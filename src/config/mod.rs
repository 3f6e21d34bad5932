//! Configuration loading for promptkit.
//!
//! Settings come from the process environment, optionally overlaying a
//! dotenv-style `.prompting_env` file. See [`Settings`] for the full surface.

pub mod env_file;
pub mod settings;

pub use env_file::EnvFileParser;
pub use settings::{ForcedSource, Settings, DEFAULT_TEMPLATE_PATH, ENV_FILE};
