//! Compiler configuration from `iconmap.toml` and the command line.
//!
//! # Example
//!
//! ```toml
//! [icons]
//! source = "assets/icons"                   # directory scanned for icons
//! output = "src/components/Icons/map.json"  # JSON map written here
//! extension = "svg"                         # icon file extension
//! strict = false                            # abort on malformed icons
//! pretty = false                            # pretty-print the JSON
//! ```
//!
//! The config file is optional. Relative paths inside it resolve against the
//! directory holding the file; paths given on the command line resolve
//! against the working directory and take precedence.

mod error;
mod util;

pub use error::ConfigError;
use util::find_config_file;

use crate::{
    cli::{Cli, DEFAULT_CONFIG},
    compiler::{CompileOptions, DEFAULT_EXTENSION},
    log,
    utils::path::resolve_against,
};
use anyhow::{Context, Result};
use serde::Deserialize;
use std::{
    fs,
    path::{Path, PathBuf},
};

// ============================================================================
// [icons] section
// ============================================================================

/// `[icons]` section configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct IconsConfig {
    /// Directory scanned (non-recursively) for icon files.
    pub source: PathBuf,
    /// JSON file the icon map is written to.
    pub output: PathBuf,
    /// Icon file extension, without the leading dot.
    pub extension: String,
    /// Abort on the first malformed icon instead of skipping it.
    pub strict: bool,
    /// Pretty-print the JSON output.
    pub pretty: bool,
}

impl Default for IconsConfig {
    fn default() -> Self {
        Self {
            source: PathBuf::from("assets/icons"),
            output: PathBuf::from("src/components/Icons/map.json"),
            extension: DEFAULT_EXTENSION.to_string(),
            strict: false,
            pretty: false,
        }
    }
}

// ============================================================================
// root configuration
// ============================================================================

/// Root configuration structure representing iconmap.toml
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Absolute path to the config file, if one was found (internal use only)
    #[serde(skip)]
    pub config_path: Option<PathBuf>,

    /// Directory relative config paths resolve against (internal use only)
    #[serde(skip)]
    pub root: PathBuf,

    /// Icon compiler settings
    pub icons: IconsConfig,
}

impl Config {
    /// Load configuration for this invocation.
    pub fn load(cli: &Cli) -> Result<Self> {
        let cwd = std::env::current_dir().context("Failed to get current working directory")?;
        Self::load_from(cli, &cwd)
    }

    /// Load configuration, searching for the config file upward from `cwd`.
    pub fn load_from(cli: &Cli, cwd: &Path) -> Result<Self> {
        let mut config = match Self::resolve_config_path(cli, cwd)? {
            Some(path) => {
                let mut config = Self::from_path(&path)?;
                config.root = path.parent().map(Path::to_path_buf).unwrap_or_default();
                config.config_path = Some(path);
                config
            }
            None => Self {
                root: cwd.to_path_buf(),
                ..Self::default()
            },
        };

        config.validate()?;
        config.finalize(cli, cwd);
        Ok(config)
    }

    /// Locate the config file. An explicit `--config` must exist.
    fn resolve_config_path(cli: &Cli, cwd: &Path) -> Result<Option<PathBuf>, ConfigError> {
        match &cli.config {
            Some(explicit) => {
                let path = resolve_against(explicit, cwd);
                if path.is_file() {
                    Ok(Some(path))
                } else {
                    Err(ConfigError::NotFound(path))
                }
            }
            None => Ok(find_config_file(Path::new(DEFAULT_CONFIG), cwd)),
        }
    }

    /// Load configuration from file path with unknown field detection.
    fn from_path(path: &Path) -> Result<Self> {
        let content =
            fs::read_to_string(path).map_err(|err| ConfigError::Io(path.to_path_buf(), err))?;

        let (config, ignored) = Self::parse_with_ignored(&content)?;

        if !ignored.is_empty() {
            Self::print_unknown_fields_warning(&ignored, path);
        }

        Ok(config)
    }

    /// Parse TOML content, collecting any unknown fields.
    fn parse_with_ignored(content: &str) -> Result<(Self, Vec<String>), ConfigError> {
        let mut ignored = Vec::new();
        let deserializer = toml::Deserializer::new(content);
        let config = serde_ignored::deserialize(deserializer, |path: serde_ignored::Path| {
            ignored.push(path.to_string());
        })?;
        Ok((config, ignored))
    }

    /// Print warning about unknown fields.
    fn print_unknown_fields_warning(fields: &[String], path: &Path) {
        log!("warning"; "unknown fields in {}, ignoring:", path.display());
        for field in fields {
            eprintln!("- {}", field);
        }
    }

    /// Validate raw config values.
    fn validate(&self) -> Result<(), ConfigError> {
        let icons = &self.icons;
        if icons.extension.is_empty() {
            return Err(ConfigError::Validation(
                "[icons] extension must not be empty".to_string(),
            ));
        }
        if icons.extension.contains(['.', '/', '\\']) {
            return Err(ConfigError::Validation(format!(
                "[icons] extension `{}` must be a bare extension such as `svg`",
                icons.extension
            )));
        }
        if icons.source.as_os_str().is_empty() || icons.output.as_os_str().is_empty() {
            return Err(ConfigError::Validation(
                "[icons] source and output must not be empty".to_string(),
            ));
        }
        Ok(())
    }

    /// Resolve paths and apply command-line overrides.
    fn finalize(&mut self, cli: &Cli, cwd: &Path) {
        let icons = &mut self.icons;

        icons.source = match &cli.source {
            Some(source) => resolve_against(source, cwd),
            None => resolve_against(&icons.source, &self.root),
        };
        icons.output = match &cli.output {
            Some(output) => resolve_against(output, cwd),
            None => resolve_against(&icons.output, &self.root),
        };
        icons.strict |= cli.strict;
        icons.pretty |= cli.pretty;
    }

    /// Options passed to the compiler.
    pub fn compile_options(&self) -> CompileOptions {
        CompileOptions {
            extension: self.icons.extension.clone(),
            strict: self.icons.strict,
            pretty: self.icons.pretty,
        }
    }
}

// ============================================================================
// tests
// ============================================================================
