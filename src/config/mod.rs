//! Optional `mqwriter.toml` configuration.

mod loader;
mod types;

pub use loader::ConfigError;
pub use types::{Config, CONFIG_FILE_NAME};
