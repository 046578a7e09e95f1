//! Configuration system for the backtrack search engines.
//!
//! Load search configuration from TOML or YAML to control pacing, seeding
//! and default inputs without code changes.
//!
//! # Examples
//!
//! Load configuration from TOML string:
//!
//! ```
//! use backtrack_config::SearchConfig;
//! use std::time::Duration;
//!
//! let config = SearchConfig::from_toml_str(r#"
//!     random_seed = 42
//!
//!     [pacing]
//!     step_delay_ms = 0
//!
//!     [queens]
//!     board_size = 10
//!
//!     [subset_sum]
//!     target = 21
//!     numbers = [4, 8, 15, 16, 23, 42]
//! "#).unwrap();
//!
//! assert_eq!(config.pacing.step_delay(), Duration::ZERO);
//! assert_eq!(config.queens.board_size, 10);
//! assert_eq!(config.subset_sum.target, 21);
//! ```
//!
//! Use default config when file is missing:
//!
//! ```
//! use backtrack_config::SearchConfig;
//!
//! let config = SearchConfig::load("search.toml").unwrap_or_default();
//! // Proceeds with defaults if file doesn't exist
//! ```

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Configuration error
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Main search configuration.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct SearchConfig {
    /// Random seed for reproducible Las Vegas runs.
    #[serde(default)]
    pub random_seed: Option<u64>,

    /// Animation pacing between placements.
    #[serde(default)]
    pub pacing: PacingConfig,

    /// N-Queens defaults.
    #[serde(default)]
    pub queens: QueensConfig,

    /// Las Vegas retry settings.
    #[serde(default)]
    pub las_vegas: LasVegasConfig,

    /// Subset-sum defaults.
    #[serde(default)]
    pub subset_sum: SubsetSumConfig,
}

impl SearchConfig {
    /// Creates a new default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads and validates configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns error if file doesn't exist, contains invalid TOML, or fails
    /// validation.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let config = Self::from_toml_file(path)?;
        config.validate()?;
        Ok(config)
    }

    /// Loads configuration from a TOML file.
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    /// Parses configuration from a TOML string.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(s)?)
    }

    /// Loads configuration from a YAML file.
    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&contents)
    }

    /// Parses configuration from a YAML string.
    pub fn from_yaml_str(s: &str) -> Result<Self, ConfigError> {
        Ok(serde_yaml::from_str(s)?)
    }

    /// Checks values a search cannot start with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.queens.board_size == 0 {
            return Err(ConfigError::Invalid(
                "queens.board_size must be at least 1".to_string(),
            ));
        }
        if self.las_vegas.max_attempts == Some(0) {
            return Err(ConfigError::Invalid(
                "las_vegas.max_attempts must be at least 1".to_string(),
            ));
        }
        if self.subset_sum.random_max < 1 {
            return Err(ConfigError::Invalid(
                "subset_sum.random_max must be at least 1".to_string(),
            ));
        }
        Ok(())
    }

    /// Sets the random seed.
    pub fn with_random_seed(mut self, seed: u64) -> Self {
        self.random_seed = Some(seed);
        self
    }

    /// Sets the pacing delay between placements.
    pub fn with_step_delay(mut self, delay: Duration) -> Self {
        self.pacing.step_delay_ms = delay.as_millis() as u64;
        self
    }

    /// Sets the default board size.
    pub fn with_board_size(mut self, size: usize) -> Self {
        self.queens.board_size = size;
        self
    }

    /// Caps the Las Vegas retry loop.
    pub fn with_max_attempts(mut self, attempts: u64) -> Self {
        self.las_vegas.max_attempts = Some(attempts);
        self
    }
}

/// Pacing configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct PacingConfig {
    /// Milliseconds to pause after each placement (0 disables pacing).
    #[serde(default = "default_step_delay_ms")]
    pub step_delay_ms: u64,
}

fn default_step_delay_ms() -> u64 {
    50
}

impl Default for PacingConfig {
    fn default() -> Self {
        Self {
            step_delay_ms: default_step_delay_ms(),
        }
    }
}

impl PacingConfig {
    /// Returns the pacing delay as a Duration.
    pub fn step_delay(&self) -> Duration {
        Duration::from_millis(self.step_delay_ms)
    }
}

/// N-Queens configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct QueensConfig {
    #[serde(default = "default_board_size")]
    pub board_size: usize,
}

fn default_board_size() -> usize {
    8
}

impl Default for QueensConfig {
    fn default() -> Self {
        Self {
            board_size: default_board_size(),
        }
    }
}

/// Las Vegas retry configuration.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct LasVegasConfig {
    /// Maximum attempts before giving up (None = retry until solved).
    pub max_attempts: Option<u64>,
}

/// Subset-sum configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct SubsetSumConfig {
    /// Target sum used when no target is supplied.
    #[serde(default = "default_target")]
    pub target: i64,

    /// Array used when no array is supplied.
    #[serde(default = "SubsetSumConfig::default_numbers")]
    pub numbers: Vec<i64>,

    /// Length of randomly generated arrays.
    #[serde(default = "default_random_count")]
    pub random_count: usize,

    /// Inclusive upper bound of randomly generated values.
    #[serde(default = "default_random_max")]
    pub random_max: i64,
}

fn default_target() -> i64 {
    15
}

fn default_random_count() -> usize {
    10
}

fn default_random_max() -> i64 {
    20
}

impl SubsetSumConfig {
    /// The built-in array `[2, 3, 5, 7, 11]`.
    pub fn default_numbers() -> Vec<i64> {
        vec![2, 3, 5, 7, 11]
    }
}

impl Default for SubsetSumConfig {
    fn default() -> Self {
        Self {
            target: default_target(),
            numbers: Self::default_numbers(),
            random_count: default_random_count(),
            random_max: default_random_max(),
        }
    }
}
