//! Layered settings for the driver and the CLI.
//!
//! `defaults/combinate.default.toml` is embedded into the crate so that the
//! documented defaults and runtime behavior stay in sync. Applications layer
//! user-specific files on top of those defaults via [`Loader`] before
//! deserializing into [`Settings`].

use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError, File, FileFormat, ValueKind};
use serde::Deserialize;
use std::path::Path;

use crate::driver::DriverOptions;
use crate::grammars::calc::CalcOptions;

const DEFAULT_TOML: &str = include_str!("../defaults/combinate.default.toml");

/// Top-level settings consumed by the `combinate` binary.
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub driver: DriverOptions,
    pub calc: CalcOptions,
    pub output: OutputOptions,
}

#[derive(Debug, Clone, Deserialize)]
pub struct OutputOptions {
    pub format: OutputFormat,
}

/// How the CLI prints what it parsed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum OutputFormat {
    /// The evaluated value only.
    Value,
    Json,
    Yaml,
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

    /// Apply a single key/value override (useful for CLI flags).
    pub fn set_override<I>(mut self, key: &str, value: I) -> Result<Self, ConfigError>
    where
        I: Into<ValueKind>,
    {
        self.builder = self.builder.set_override(key, value)?;
        Ok(self)
    }

    /// Finalize the builder and deserialize the resulting settings.
    pub fn build(self) -> Result<Settings, ConfigError> {
        self.builder.build()?.try_deserialize()
    }
}

impl Default for Loader {
    fn default() -> Self {
        Self::new()
    }
}

/// Convenience helper for callers that only need the defaults.
pub fn load_defaults() -> Result<Settings, ConfigError> {
    Loader::new().build()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn loads_default_settings() {
        let settings = load_defaults().expect("defaults to deserialize");
        assert!(settings.driver.require_complete);
        assert!(!settings.calc.allow_whitespace);
        assert_eq!(settings.output.format, OutputFormat::Value);
    }

    #[test]
    fn supports_overrides() {
        let settings = Loader::new()
            .set_override("output.format", "yaml")
            .expect("override to apply")
            .set_override("calc.allow_whitespace", true)
            .expect("override to apply")
            .build()
            .expect("settings to build");
        assert_eq!(settings.output.format, OutputFormat::Yaml);
        assert!(settings.calc.allow_whitespace);
    }

    #[test]
    fn missing_required_file_is_an_error() {
        let result = Loader::new()
            .with_file("/nonexistent/combinate.toml")
            .build();
        assert!(result.is_err());
    }

    #[test]
    fn missing_optional_file_is_ignored() {
        let settings = Loader::new()
            .with_optional_file("/nonexistent/combinate.toml")
            .build()
            .expect("settings to build");
        assert!(settings.driver.require_complete);
    }
}
