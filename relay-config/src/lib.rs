//! Shared configuration loader for the relay toolchain.
//!
//! `defaults/relay.default.toml` is embedded into every binary so that docs and
//! runtime behavior stay in sync. Applications layer user-specific files on top
//! of those defaults via [`Loader`] before deserializing into [`RelayConfig`].

use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError, File, FileFormat, ValueKind};
use relay_markup::options::ConvertOptions;
use serde::Deserialize;
use std::path::Path;

const DEFAULT_TOML: &str = include_str!("../defaults/relay.default.toml");

/// Top-level configuration consumed by relay applications.
#[derive(Debug, Clone, Deserialize)]
pub struct RelayConfig {
    pub markdown: MarkdownConfig,
    pub chat: ChatConfig,
}

/// Markdown conversion knobs.
#[derive(Debug, Clone, Deserialize)]
pub struct MarkdownConfig {
    pub max_depth: usize,
    pub header_level: usize,
}

/// Chat-side knobs.
#[derive(Debug, Clone, Deserialize)]
pub struct ChatConfig {
    pub downconvert_rich_text: bool,
}

impl From<&RelayConfig> for ConvertOptions {
    fn from(config: &RelayConfig) -> Self {
        ConvertOptions::default()
            .with_max_depth(config.markdown.max_depth)
            .with_header_level(config.markdown.header_level)
            .with_downconversion(config.chat.downconvert_rich_text)
    }
}

impl From<RelayConfig> for ConvertOptions {
    fn from(config: RelayConfig) -> Self {
        ConvertOptions::from(&config)
    }
}

/// Helper for layering user overrides over the built-in defaults.
#[derive(Debug, Clone)]
pub struct Loader {
    builder: ConfigBuilder<DefaultState>,
}

impl Loader {
    /// Start a loader seeded with the embedded defaults.
    pub fn new() -> Self {
        let builder = Config::builder().add_source(File::from_str(DEFAULT_TOML, FileFormat::Toml));
        Self { builder }
    }

    /// Layer a configuration file. Missing files trigger an error.
    pub fn with_file(mut self, path: impl AsRef<Path>) -> Self {
        let source = File::from(path.as_ref())
            .format(FileFormat::Toml)
            .required(true);
        self.builder = self.builder.add_source(source);
        self
    }

    /// Layer an optional configuration file (ignored if the file is absent).
    pub fn with_optional_file(mut self, path: impl AsRef<Path>) -> Self {
        let source = File::from(path.as_ref())
            .format(FileFormat::Toml)
            .required(false);
        self.builder = self.builder.add_source(source);
        self
    }

    /// Apply a single key/value override (e.g. `markdown.max_depth` from a CLI flag).
    pub fn set_override<I>(mut self, key: &str, value: I) -> Result<Self, ConfigError>
    where
        I: Into<ValueKind>,
    {
        self.builder = self.builder.set_override(key, value)?;
        Ok(self)
    }

    /// Finalize the builder and deserialize the resulting configuration.
    pub fn build(self) -> Result<RelayConfig, ConfigError> {
        self.builder.build()?.try_deserialize()
    }
}

impl Default for Loader {
    fn default() -> Self {
        Self::new()
    }
}

/// Convenience helper for callers that only need the defaults.
pub fn load_defaults() -> Result<RelayConfig, ConfigError> {
    Loader::new().build()
}
