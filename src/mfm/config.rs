//! Configuration loader.
//!
//! `defaults/mfm.default.toml` is embedded into the library so that the
//! documented defaults and runtime behavior stay in sync. Callers layer user
//! files and single-key overrides on top via [`Loader`] before deserializing
//! into [`MfmConfig`].

use crate::mfm::formats::OutputFormat;
use crate::mfm::parsing::option::{ParseOption, SyntaxFamily};
use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError, File, FileFormat, ValueKind};
use serde::Deserialize;
use std::path::Path;

const DEFAULT_TOML: &str = include_str!("../../defaults/mfm.default.toml");

/// Top-level configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct MfmConfig {
    pub syntax: ParseOption,
    pub inspect: InspectConfig,
}

/// Controls `mfm parse` / `mfm tokens` output.
#[derive(Debug, Clone, Deserialize)]
pub struct InspectConfig {
    pub format: OutputFormat,
    pub truncate: usize,
}

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

    /// Layer a configuration file that may be absent.
    pub fn with_optional_file(mut self, path: impl AsRef<Path>) -> Self {
        let source = File::from(path.as_ref())
            .format(FileFormat::Toml)
            .required(false);
        self.builder = self.builder.add_source(source);
        self
    }

    pub fn set_override<I>(mut self, key: &str, value: I) -> Result<Self, ConfigError>
    where
        I: Into<ValueKind>,
    {
        self.builder = self.builder.set_override(key, value)?;
        Ok(self)
    }

    /// Switch one syntax family on or off.
    pub fn set_family(self, family: SyntaxFamily, enabled: bool) -> Result<Self, ConfigError> {
        self.set_override(&format!("syntax.{}", family.config_key()), enabled)
    }

    pub fn build(self) -> Result<MfmConfig, ConfigError> {
        self.builder.build()?.try_deserialize()
    }
}

impl Default for Loader {
    fn default() -> Self {
        Self::new()
    }
}

pub fn load_defaults() -> Result<MfmConfig, ConfigError> {
    Loader::new().build()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn loads_default_config() {
        let config = load_defaults().expect("defaults to deserialize");
        assert_eq!(config.syntax, ParseOption::all_enabled());
        assert_eq!(config.inspect.format, OutputFormat::Treeviz);
        assert_eq!(config.inspect.truncate, 40);
    }

    #[test]
    fn supports_family_overrides() {
        let config = Loader::new()
            .set_family(SyntaxFamily::InlineCode, false)
            .expect("override to apply")
            .set_override("inspect.format", "json")
            .expect("override to apply")
            .build()
            .expect("config to build");
        assert!(!config.syntax.inline_code);
        assert!(config.syntax.bold);
        assert_eq!(config.inspect.format, OutputFormat::Json);
    }

    #[test]
    fn layers_user_file() {
        let mut file = tempfile::Builder::new()
            .suffix(".toml")
            .tempfile()
            .expect("temp file");
        writeln!(file, "[syntax]\nmention = false\n[inspect]\ntruncate = 0").expect("write");

        let config = Loader::new()
            .with_file(file.path())
            .build()
            .expect("config to build");
        assert!(!config.syntax.mention);
        assert!(config.syntax.url);
        assert_eq!(config.inspect.truncate, 0);
    }

    #[test]
    fn missing_optional_file_is_ignored() {
        let config = Loader::new()
            .with_optional_file("/nonexistent/mfm.toml")
            .build()
            .expect("config to build");
        assert!(config.syntax.quote);
    }
}
