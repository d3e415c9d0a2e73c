//! Dashboard configuration: backend location, timing, sources and tier tables.
//!
//! Stored as TOML. Every field has a default, so an empty file yields the
//! stock dashboard. A few scalars can be overridden from the environment.

use radar_core::classify::{credit_spread_tiers, funding_spread_tiers, CreditTier, FundingTier, ThresholdTable};
use radar_core::domain::PayloadKind;
use radar_core::series::DEFAULT_MAX_POINTS;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

/// Logical slot names of the stock sources.
pub mod slots {
    pub const MARKET_PULSE: &str = "market_pulse";
    pub const CPI: &str = "cpi";
    pub const UNRATE: &str = "unrate";
    pub const RISK_RATIO: &str = "risk_ratio";
    pub const CREDIT_SPREAD: &str = "credit_spread";
    pub const YIELD_GAP: &str = "yield_gap";
    pub const RATE_SPREAD: &str = "rate_spread";
    pub const US_RATE_SPREAD: &str = "us_rate_spread";
}

pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:8000";
pub const DEFAULT_TIMEOUT_MS: u64 = 5_000;
pub const DEFAULT_REFRESH_SECS: u64 = 20 * 60;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),

    #[error("invalid config: {0}")]
    Invalid(String),

    #[error("HTTP client: {0}")]
    HttpClient(String),
}

/// One logical source: a path on the backend decoded as one payload shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SourceConfig {
    pub name: String,
    pub path: String,
    pub kind: PayloadKind,
    /// The pulse feed: its failure is surfaced as `pulse_error`.
    #[serde(default)]
    pub mandatory: bool,
}

impl SourceConfig {
    fn best_effort(name: &str, path: &str, kind: PayloadKind) -> Self {
        Self {
            name: name.into(),
            path: path.into(),
            kind,
            mandatory: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ThresholdConfig {
    pub credit: ThresholdTable<CreditTier>,
    pub funding: ThresholdTable<FundingTier>,
}

impl Default for ThresholdConfig {
    fn default() -> Self {
        Self {
            credit: credit_spread_tiers(),
            funding: funding_spread_tiers(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RadarConfig {
    pub base_url: String,
    /// Per-request bound applied by the controller.
    pub timeout_ms: u64,
    pub refresh_secs: u64,
    /// Render budget per chart panel.
    pub max_points: usize,
    pub sources: Vec<SourceConfig>,
    pub thresholds: ThresholdConfig,
}

impl Default for RadarConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.into(),
            timeout_ms: DEFAULT_TIMEOUT_MS,
            refresh_secs: DEFAULT_REFRESH_SECS,
            max_points: DEFAULT_MAX_POINTS,
            sources: default_sources(),
            thresholds: ThresholdConfig::default(),
        }
    }
}

fn default_sources() -> Vec<SourceConfig> {
    use slots::*;
    vec![
        SourceConfig {
            name: MARKET_PULSE.into(),
            path: "/api/market/pulse".into(),
            kind: PayloadKind::Pulse,
            mandatory: true,
        },
        SourceConfig::best_effort(CPI, "/api/macro/cpi", PayloadKind::Macro),
        SourceConfig::best_effort(UNRATE, "/api/macro/unrate", PayloadKind::Macro),
        SourceConfig::best_effort(RISK_RATIO, "/api/macro/risk-ratio", PayloadKind::Risk),
        SourceConfig::best_effort(CREDIT_SPREAD, "/api/market/credit-spread", PayloadKind::Spread),
        SourceConfig::best_effort(YIELD_GAP, "/api/market/yield-gap", PayloadKind::YieldGap),
        SourceConfig::best_effort(RATE_SPREAD, "/api/macro/rate-spread", PayloadKind::Spread),
        SourceConfig::best_effort(US_RATE_SPREAD, "/api/macro/us-rate-spread", PayloadKind::Spread),
    ]
}

impl RadarConfig {
    /// Load from a TOML file. Environment overrides are not applied.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml(&content)
    }

    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    pub fn to_toml(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Apply `RADAR_BASE_URL`, `RADAR_TIMEOUT_MS` and `RADAR_REFRESH_SECS`.
    pub fn with_env_overrides(self) -> Self {
        self.with_overrides_from(|key| std::env::var(key).ok())
    }

    /// Apply overrides from an arbitrary key lookup. Unparseable or blank
    /// values are ignored.
    pub fn with_overrides_from<F>(mut self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        self.base_url = lookup_str(&lookup, "RADAR_BASE_URL", &self.base_url);
        self.timeout_ms = lookup_u64(&lookup, "RADAR_TIMEOUT_MS", self.timeout_ms);
        self.refresh_secs = lookup_u64(&lookup, "RADAR_REFRESH_SECS", self.refresh_secs);
        self
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    pub fn refresh_interval(&self) -> Duration {
        Duration::from_secs(self.refresh_secs)
    }

    pub fn mandatory_source(&self) -> Option<&SourceConfig> {
        self.sources.iter().find(|s| s.mandatory)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.base_url.trim().is_empty() {
            return Err(ConfigError::Invalid("base_url is empty".into()));
        }
        if self.timeout_ms == 0 {
            return Err(ConfigError::Invalid("timeout_ms must be positive".into()));
        }
        if self.refresh_secs == 0 {
            return Err(ConfigError::Invalid("refresh_secs must be positive".into()));
        }
        if self.max_points == 0 {
            return Err(ConfigError::Invalid("max_points must be positive".into()));
        }

        let mut names = HashSet::new();
        for source in &self.sources {
            if !names.insert(source.name.as_str()) {
                return Err(ConfigError::Invalid(format!(
                    "duplicate source name '{}'",
                    source.name
                )));
            }
        }

        match self.sources.iter().filter(|s| s.mandatory).count() {
            0 => Err(ConfigError::Invalid("no mandatory source".into())),
            1 => Ok(()),
            n => Err(ConfigError::Invalid(format!(
                "{n} mandatory sources, expected exactly one"
            ))),
        }
    }
}

fn lookup_str<F: Fn(&str) -> Option<String>>(lookup: &F, name: &str, default: &str) -> String {
    lookup(name)
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| default.to_string())
}

fn lookup_u64<F: Fn(&str) -> Option<String>>(lookup: &F, name: &str, default: u64) -> u64 {
    lookup(name)
        .and_then(|s| s.trim().parse().ok())
        .unwrap_or(default)
}
