//! Shared configuration loader for the md2storage toolchain.
//!
//! `defaults/storage.default.toml` is embedded into every binary so that docs
//! and runtime behavior stay in sync. Applications layer user-specific files
//! and `CONFLUENCE_*` environment variables on top of those defaults via
//! [`Loader`] before deserializing into [`StorageConfig`].

use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError, File, FileFormat, ValueKind};
use serde::Deserialize;
use std::path::Path;
use std::time::Duration;
use storage_babel::publish::ClientSettings;
use storage_babel::{ConvertOptions, MarkdownOptions, PublishError};

const DEFAULT_TOML: &str = include_str!("../defaults/storage.default.toml");

/// Environment variables and the keys they override.
pub const ENV_OVERRIDES: &[(&str, &str)] = &[
    ("CONFLUENCE_URL", "publish.url"),
    ("CONFLUENCE_API_TOKEN", "publish.api_token"),
    ("CONFLUENCE_SPACE_KEY", "publish.space_key"),
    ("CONFLUENCE_PARENT_PAGE_TITLE", "publish.parent_page_title"),
];

/// Top-level configuration consumed by md2storage.
#[derive(Debug, Clone, Deserialize)]
pub struct StorageConfig {
    pub convert: ConvertConfig,
    pub publish: PublishConfig,
}

/// Conversion knobs.
#[derive(Debug, Clone, Deserialize)]
pub struct ConvertConfig {
    pub strip_title: bool,
    pub output_dir: String,
    pub output_suffix: String,
    pub markdown: MarkdownConfig,
}

/// Mirrors the parser switches of [`MarkdownOptions`].
#[derive(Debug, Clone, Deserialize)]
pub struct MarkdownConfig {
    pub hard_breaks: bool,
    pub unsafe_html: bool,
    pub tables: bool,
    pub strikethrough: bool,
    pub autolink: bool,
    pub tasklist: bool,
}

impl From<&MarkdownConfig> for MarkdownOptions {
    fn from(config: &MarkdownConfig) -> Self {
        MarkdownOptions {
            hard_breaks: config.hard_breaks,
            unsafe_html: config.unsafe_html,
            tables: config.tables,
            strikethrough: config.strikethrough,
            autolink: config.autolink,
            tasklist: config.tasklist,
        }
    }
}

impl From<ConvertConfig> for ConvertOptions {
    fn from(config: ConvertConfig) -> Self {
        ConvertOptions::from(&config)
    }
}

impl From<&ConvertConfig> for ConvertOptions {
    fn from(config: &ConvertConfig) -> Self {
        ConvertOptions {
            strip_title: config.strip_title,
            markdown: MarkdownOptions::from(&config.markdown),
        }
    }
}

/// Where and how drafts are published.
#[derive(Debug, Clone, Deserialize)]
pub struct PublishConfig {
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub api_token: Option<String>,
    #[serde(default)]
    pub space_key: Option<String>,
    #[serde(default)]
    pub parent_page_title: Option<String>,
    pub title_suffix: String,
    pub timeout_secs: u64,
}

impl PublishConfig {
    /// Settings for a REST client.
    ///
    /// Fails with [`PublishError::MissingSettings`] naming the environment
    /// variable of every absent or blank value.
    pub fn client_settings(&self) -> Result<ClientSettings, PublishError> {
        let required = [
            ("CONFLUENCE_URL", &self.url),
            ("CONFLUENCE_API_TOKEN", &self.api_token),
            ("CONFLUENCE_SPACE_KEY", &self.space_key),
        ];
        let missing: Vec<String> = required
            .iter()
            .filter(|(_, value)| non_blank(value).is_none())
            .map(|(name, _)| name.to_string())
            .collect();

        match (
            non_blank(&self.url),
            non_blank(&self.api_token),
            non_blank(&self.space_key),
        ) {
            (Some(url), Some(token), Some(space)) => {
                Ok(ClientSettings::new(url, token, space)
                    .with_timeout(Duration::from_secs(self.timeout_secs)))
            }
            _ => Err(PublishError::MissingSettings(missing)),
        }
    }

    /// Configured parent page title, if not blank.
    pub fn parent_title(&self) -> Option<&str> {
        non_blank(&self.parent_page_title)
    }
}

fn non_blank(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
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

    /// Apply the `CONFLUENCE_*` variables of the process environment.
    pub fn with_env(self) -> Result<Self, ConfigError> {
        self.with_env_vars(std::env::vars())
    }

    /// Apply the `CONFLUENCE_*` entries of `vars`; other names are ignored.
    pub fn with_env_vars<I, K, V>(mut self, vars: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        for (name, value) in vars {
            if let Some((_, key)) = ENV_OVERRIDES.iter().find(|(env, _)| *env == name.as_ref()) {
                let value: String = value.into();
                self = self.set_override(key, value)?;
            }
        }
        Ok(self)
    }

    /// Apply a single key/value override (useful for CLI settings).
    pub fn set_override<I>(mut self, key: &str, value: I) -> Result<Self, ConfigError>
    where
        I: Into<ValueKind>,
    {
        self.builder = self.builder.set_override(key, value)?;
        Ok(self)
    }

    /// Finalize the builder and deserialize the resulting configuration.
    pub fn build(self) -> Result<StorageConfig, ConfigError> {
        self.builder.build()?.try_deserialize()
    }
}

impl Default for Loader {
    fn default() -> Self {
        Self::new()
    }
}

/// Convenience helper for callers that only need the defaults.
pub fn load_defaults() -> Result<StorageConfig, ConfigError> {
    Loader::new().build()
}
