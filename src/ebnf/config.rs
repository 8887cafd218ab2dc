//! Converter configuration
//!
//! The defaults in `defaults/ebnf2bnf.default.toml` are compiled in. [`Loader`] puts
//! user TOML files and the command-line prefix on top of them, in that order, and
//! checks the merged result before handing out a [`ConverterConfig`].

use crate::ebnf::lexer::Token;
use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError, File, FileFormat};
use logos::Logos;
use serde::Deserialize;
use std::path::Path;

const DEFAULT_TOML: &str = include_str!("../../defaults/ebnf2bnf.default.toml");

/// Top-level configuration consumed by the converter and its binary.
#[derive(Debug, Clone, Deserialize)]
pub struct ConverterConfig {
    pub naming: NamingConfig,
    pub output: OutputConfig,
    pub tokens: TokensConfig,
}

/// How synthesized non-terminals are named.
#[derive(Debug, Clone, Deserialize)]
pub struct NamingConfig {
    pub fresh_prefix: String,
}

impl NamingConfig {
    /// Synthesized names must not be writable as identifiers, or a user rule could
    /// silently add alternatives to a synthesized one.
    fn validate(&self) -> Result<(), ConfigError> {
        if self.fresh_prefix.is_empty() {
            return Err(ConfigError::Message(
                "naming.fresh_prefix must not be empty".to_string(),
            ));
        }
        let sample = format!("{}0", self.fresh_prefix);
        let mut lexer = Token::lexer(&sample);
        let spells_identifier = matches!(lexer.next(), Some(Ok(Token::NonTerminal(_))))
            && lexer.span() == (0..sample.len());
        if spells_identifier {
            return Err(ConfigError::Message(format!(
                "naming.fresh_prefix \"{}\" would let grammars name synthesized rules such as {}",
                self.fresh_prefix, sample
            )));
        }
        Ok(())
    }
}

/// Grammar output settings.
#[derive(Debug, Clone, Deserialize)]
pub struct OutputConfig {
    pub format: String,
    pub extension: String,
}

/// Token dump settings.
#[derive(Debug, Clone, Deserialize)]
pub struct TokensConfig {
    pub format: String,
    pub extension: String,
}

/// Builds a [`ConverterConfig`] from the defaults and whatever the caller layers on.
#[derive(Debug, Clone)]
pub struct Loader {
    builder: ConfigBuilder<DefaultState>,
}

impl Loader {
    pub fn new() -> Self {
        let defaults = File::from_str(DEFAULT_TOML, FileFormat::Toml);
        Loader {
            builder: Config::builder().add_source(defaults),
        }
    }

    /// Layer a TOML file that must exist.
    pub fn with_file(self, path: impl AsRef<Path>) -> Self {
        self.with_toml(path.as_ref(), true)
    }

    /// Layer a TOML file if it exists.
    pub fn with_optional_file(self, path: impl AsRef<Path>) -> Self {
        self.with_toml(path.as_ref(), false)
    }

    fn with_toml(mut self, path: &Path, required: bool) -> Self {
        log::debug!("config layer {} (required: {})", path.display(), required);
        let source = File::from(path).format(FileFormat::Toml).required(required);
        self.builder = self.builder.add_source(source);
        self
    }

    /// Override the fresh-name prefix, winning over every file layer.
    pub fn with_fresh_prefix(mut self, prefix: &str) -> Result<Self, ConfigError> {
        self.builder = self.builder.set_override("naming.fresh_prefix", prefix)?;
        Ok(self)
    }

    /// Merge the layers, deserialize and validate.
    pub fn build(self) -> Result<ConverterConfig, ConfigError> {
        let config: ConverterConfig = self.builder.build()?.try_deserialize()?;
        config.naming.validate()?;
        Ok(config)
    }
}

impl Default for Loader {
    fn default() -> Self {
        Self::new()
    }
}

/// The built-in defaults alone
pub fn load_defaults() -> Result<ConverterConfig, ConfigError> {
    Loader::new().build()
}
