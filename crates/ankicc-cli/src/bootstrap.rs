//! CLI bootstrap - configuration and logging.
//!
//! Configuration comes from the environment (optionally seeded from a
//! `.env` file by `main`) and is then overridden by command-line flags:
//!
//! - `ANKICC_LOG` - tracing filter directive, default `warn`
//! - `ANKICC_INDENT` - JSON indentation, `1`-`8` spaces or `tab`, default `2`

use tracing_subscriber::EnvFilter;

use crate::error::CliError;

/// Environment variable holding the tracing filter.
pub const LOG_ENV: &str = "ANKICC_LOG";

/// Environment variable holding the output indentation.
pub const INDENT_ENV: &str = "ANKICC_INDENT";

pub const DEFAULT_LOG_FILTER: &str = "warn";

/// Configuration validation error.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("Indent must be 1-8 spaces or \"tab\", got {0:?}")]
    InvalidIndent(String),

    #[error("Log filter cannot be empty")]
    EmptyLogFilter,

    #[error("Invalid log filter {filter:?}: {reason}")]
    InvalidLogFilter { filter: String, reason: String },
}

/// Indentation used for pretty JSON output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Indent {
    Spaces(usize),
    Tab,
}

impl Default for Indent {
    fn default() -> Self {
        Self::Spaces(2)
    }
}

impl Indent {
    /// Parse `"tab"` or a space count between 1 and 8.
    pub fn parse(s: &str) -> Result<Self, ConfigError> {
        let trimmed = s.trim();
        if trimmed.eq_ignore_ascii_case("tab") {
            return Ok(Self::Tab);
        }
        match trimmed.parse::<usize>() {
            Ok(n) if (1..=8).contains(&n) => Ok(Self::Spaces(n)),
            _ => Err(ConfigError::InvalidIndent(s.to_string())),
        }
    }

    /// The bytes written for one indentation level.
    pub fn unit(self) -> Vec<u8> {
        match self {
            Self::Spaces(n) => vec![b' '; n],
            Self::Tab => vec![b'\t'],
        }
    }
}

/// Bootstrap configuration for the CLI.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CliConfig {
    /// Tracing filter directive.
    pub log_filter: String,
    /// Indentation for JSON output.
    pub indent: Indent,
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            log_filter: DEFAULT_LOG_FILTER.to_string(),
            indent: Indent::default(),
        }
    }
}

impl CliConfig {
    /// Read configuration through an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();
        if let Some(filter) = lookup(LOG_ENV) {
            config.log_filter = filter;
        }
        if let Some(indent) = lookup(INDENT_ENV) {
            config.indent = Indent::parse(&indent)?;
        }
        validate_config(&config)?;
        Ok(config)
    }

    /// Apply command-line overrides on top of the environment.
    pub fn with_overrides(
        mut self,
        verbose: bool,
        indent: Option<&str>,
    ) -> Result<Self, ConfigError> {
        if verbose {
            self.log_filter = "debug".to_string();
        }
        if let Some(indent) = indent {
            self.indent = Indent::parse(indent)?;
        }
        Ok(self)
    }

    /// Resolve the environment, then the flags.
    ///
    /// A bad environment value is a configuration error, a bad flag is a
    /// usage error.
    pub fn resolve<F>(lookup: F, verbose: bool, indent: Option<&str>) -> Result<Self, CliError>
    where
        F: Fn(&str) -> Option<String>,
    {
        Self::from_lookup(lookup)?
            .with_overrides(verbose, indent)
            .map_err(|e| CliError::Arguments(e.to_string()))
    }
}

/// Validate configuration values.
pub fn validate_config(config: &CliConfig) -> Result<(), ConfigError> {
    if config.log_filter.trim().is_empty() {
        return Err(ConfigError::EmptyLogFilter);
    }
    EnvFilter::try_new(&config.log_filter).map_err(|e| ConfigError::InvalidLogFilter {
        filter: config.log_filter.clone(),
        reason: e.to_string(),
    })?;
    Ok(())
}

/// Install the global tracing subscriber, logging to stderr.
///
/// Stdout is reserved for command output (`fmt` pipes documents through it).
pub fn init_logging(config: &CliConfig) {
    let filter = EnvFilter::try_new(&config.log_filter)
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Everything a command handler needs.
#[derive(Debug, Clone)]
pub struct CliContext {
    pub config: CliConfig,
}

impl CliContext {
    pub const fn new(config: CliConfig) -> Self {
        Self { config }
    }

    /// Access the configuration.
    pub const fn config(&self) -> &CliConfig {
        &self.config
    }
}
