use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::emit::EmitOptions;

/// File name looked up in the root directory when no config path is given.
pub const CONFIG_FILE_NAME: &str = "mqwriter.toml";

/// Settings read from `mqwriter.toml`.
///
/// Every key is optional; command-line flags override whatever is set here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Output base path, e.g. "dist/css/app.css" or "dist/css".
    #[serde(default)]
    pub to: Option<PathBuf>,
    /// Strip whitespace from emitted rules (default: true).
    #[serde(default = "default_compress")]
    pub compress: bool,
    /// Text prepended to every output file (default: empty).
    #[serde(default)]
    pub banner: String,
    /// Name files after their media condition (default: false).
    #[serde(default)]
    pub descriptive: bool,
}

fn default_compress() -> bool {
    true
}

impl Default for Config {
    fn default() -> Self {
        Self {
            to: None,
            compress: default_compress(),
            banner: String::new(),
            descriptive: false,
        }
    }
}

impl Config {
    /// Builds emission options rooted at `root`.
    pub fn emit_options(&self, root: impl Into<PathBuf>) -> EmitOptions {
        let mut options = EmitOptions::new(root)
            .with_compress(self.compress)
            .with_banner(self.banner.clone())
            .with_descriptive(self.descriptive);
        if let Some(to) = &self.to {
            options = options.with_to(to.clone());
        }
        options
    }
}
