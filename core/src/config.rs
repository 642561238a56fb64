use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use evaluation::Weights;
use oracle::{DEFAULT_MAX_PIECES, LICHESS_TABLEBASE_URL};
use rules::Square;
use search::{OrderingWeights, SearchConfig};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::adjustments::Adjustments;
use crate::opening::OpeningConfig;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("cannot read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid config: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OracleConfig {
    pub enabled: bool,
    pub url: String,
    /// Most pieces on the board, kings included, for a lookup.
    pub max_pieces: usize,
    pub timeout_ms: u64,
}

impl Default for OracleConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            url: LICHESS_TABLEBASE_URL.to_string(),
            max_pieces: DEFAULT_MAX_PIECES,
            timeout_ms: 3_000,
        }
    }
}

impl OracleConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}

/// Everything that shapes an engine's play. Fixed once the engine is built.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub weights: Weights,
    pub ordering: OrderingWeights,
    pub search: SearchConfig,
    pub adjustments: Adjustments,
    pub opening: OpeningConfig,
    pub oracle: OracleConfig,
    /// Upper bound of the random amount added to each root score.
    pub tie_break_noise: f32,
    /// Seed for tie-breaking and fallback picks. Unseeded engines draw from
    /// the OS.
    pub seed: Option<u64>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            weights: Weights::default(),
            ordering: OrderingWeights::default(),
            search: SearchConfig::default(),
            adjustments: Adjustments::default(),
            opening: OpeningConfig::default(),
            oracle: OracleConfig::default(),
            tie_break_noise: 5.0,
            seed: None,
        }
    }
}

impl EngineConfig {
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&text)
    }

    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.tie_break_noise.is_finite() || self.tie_break_noise < 0.0 {
            return Err(ConfigError::Invalid(format!(
                "tie_break_noise must be finite and non-negative, got {}",
                self.tie_break_noise
            )));
        }

        if let Some((name, value)) = self
            .adjustments
            .terms()
            .into_iter()
            .find(|(_, value)| !value.is_finite())
        {
            return Err(ConfigError::Invalid(format!(
                "adjustments.{} must be finite, got {}",
                name, value
            )));
        }

        if self.search.depth_by_phase.min() == 0 {
            return Err(ConfigError::Invalid("search depths must be at least 1".to_string()));
        }

        if self.oracle.max_pieces == 0 {
            return Err(ConfigError::Invalid("oracle.max_pieces must be at least 1".to_string()));
        }

        if let Some(origin) = self
            .adjustments
            .flagged_pawn_origins
            .iter()
            .find(|origin| origin.parse::<Square>().is_err())
        {
            return Err(ConfigError::Invalid(format!("'{}' is not a square", origin)));
        }

        Ok(())
    }
}
