//! Session configuration
//!
//! Settings come from an optional TOML file, then CLI flags override them.
//!
//! ```toml
//! prompt = "glenisp> "
//! history_file = ".glenisp_history"
//! echo_input = false
//! show_tree = false
//! ```

use std::path::{Path, PathBuf};

use miette::{IntoDiagnostic, Result, WrapErr};
use serde::Deserialize;

/// File looked up in the working directory when no `--config` is given
pub const DEFAULT_CONFIG_FILE: &str = "glenisp.toml";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// REPL prompt
    pub prompt: String,
    /// Where line history is loaded from and saved to
    pub history_file: Option<PathBuf>,
    /// Print each form back (`Input:` / `Output:`) before its result
    pub echo_input: bool,
    /// Print the parse tree of every line
    pub show_tree: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            prompt: "glenisp> ".to_string(),
            history_file: None,
            echo_input: false,
            show_tree: false,
        }
    }
}

impl Config {
    /// Parse configuration from TOML text
    pub fn from_toml(text: &str) -> Result<Self> {
        toml::from_str(text)
            .into_diagnostic()
            .wrap_err("invalid configuration")
    }

    /// Load configuration.
    ///
    /// An explicit path must exist and parse. Without one, the default file
    /// is used if present and defaults otherwise.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::load_file(path),
            None => {
                let default = Path::new(DEFAULT_CONFIG_FILE);
                if default.exists() {
                    Self::load_file(default)
                } else {
                    Ok(Self::default())
                }
            }
        }
    }

    fn load_file(path: &Path) -> Result<Self> {
        tracing::debug!("loading config from {:?}", path);
        let text = std::fs::read_to_string(path)
            .map_err(|e| miette::miette!("Failed to read config file {}: {}", path.display(), e))?;
        Self::from_toml(&text).wrap_err_with(|| format!("in {}", path.display()))
    }
}
