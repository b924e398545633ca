//! Shared configuration loader for the specmd tools.
//!
//! `defaults/specmd.default.toml` is embedded into every binary so that docs and
//! runtime behavior stay in sync. Applications layer user-specific files on top
//! of those defaults via [`Loader`] before deserializing into [`SpecmdConfig`].

use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError, File, FileFormat, ValueKind};
use serde::Deserialize;
use specmd::spec::formats::FormatOptions;
use std::path::Path;

pub use config::ConfigError as SpecmdConfigError;

const DEFAULT_TOML: &str = include_str!("../defaults/specmd.default.toml");

/// Top-level configuration consumed by specmd applications.
#[derive(Debug, Clone, Deserialize)]
pub struct SpecmdConfig {
    pub formatting: FormattingConfig,
    pub diagnostics: DiagnosticsConfig,
}

/// Mirrors the knobs exposed by the canonical formatter.
#[derive(Debug, Clone, Deserialize)]
pub struct FormattingConfig {
    pub table_indent: usize,
    pub spec_underline: char,
    pub scenario_underline: char,
}

impl FormattingConfig {
    pub fn to_format_options(&self) -> FormatOptions {
        FormatOptions {
            table_indent: self.table_indent,
            spec_underline: self.spec_underline,
            scenario_underline: self.scenario_underline,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct DiagnosticsConfig {
    pub fail_on_warnings: bool,
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

    /// Apply a single key/value override (useful for CLI settings).
    pub fn set_override<I>(mut self, key: &str, value: I) -> Result<Self, ConfigError>
    where
        I: Into<ValueKind>,
    {
        self.builder = self.builder.set_override(key, value)?;
        Ok(self)
    }

    /// Finalize the builder and deserialize the resulting configuration.
    pub fn build(self) -> Result<SpecmdConfig, ConfigError> {
        self.builder.build()?.try_deserialize()
    }
}

impl Default for Loader {
    fn default() -> Self {
        Self::new()
    }
}

/// Convenience helper for callers that only need the defaults.
pub fn load_defaults() -> Result<SpecmdConfig, ConfigError> {
    Loader::new().build()
}
