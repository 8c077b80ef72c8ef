//! Layered configuration: defaults, then a TOML file named by
//! `CROUPIER_CONFIG`, then `CROUPIER_*` environment variables.
//!
//! Command-line flags are applied on top by each command handler.

use croupier_engine::env::EnvConfig;
use croupier_engine::session::SessionConfig;
use serde::{Deserialize, Serialize};
use std::fs;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Config {
    pub seed: Option<u64>,
    pub bankroll: f64,
    pub bet_fraction: f64,
    pub max_steps: u64,
    pub target_bankroll: f64,
    pub bankrupt_threshold: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ValueSource {
    Default,
    File,
    Env,
}

#[derive(Debug, Clone, Copy)]
pub struct ConfigSources {
    pub seed: ValueSource,
    pub bankroll: ValueSource,
    pub bet_fraction: ValueSource,
    pub max_steps: ValueSource,
    pub target_bankroll: ValueSource,
    pub bankrupt_threshold: ValueSource,
}

impl Default for ConfigSources {
    fn default() -> Self {
        Self {
            seed: ValueSource::Default,
            bankroll: ValueSource::Default,
            bet_fraction: ValueSource::Default,
            max_steps: ValueSource::Default,
            target_bankroll: ValueSource::Default,
            bankrupt_threshold: ValueSource::Default,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ConfigResolved {
    pub config: Config,
    pub sources: ConfigSources,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            seed: None,
            bankroll: 100.0,
            bet_fraction: 0.10,
            max_steps: 2_000,
            target_bankroll: 200.0,
            bankrupt_threshold: 0.0,
        }
    }
}

impl Config {
    /// Session limits described by this configuration.
    pub fn session_config(&self) -> SessionConfig {
        SessionConfig {
            initial_bankroll: self.bankroll,
            bankrupt_threshold: self.bankrupt_threshold,
            target_bankroll: Some(self.target_bankroll),
            max_steps: Some(self.max_steps),
        }
    }

    pub fn env_config(&self) -> EnvConfig {
        EnvConfig {
            session: self.session_config(),
            bet_fraction: self.bet_fraction,
            seed: self.seed,
        }
    }
}

#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(toml::de::Error),
    Invalid(String),
}

impl From<std::io::Error> for ConfigError {
    fn from(e: std::io::Error) -> Self {
        ConfigError::Io(e)
    }
}
impl From<toml::de::Error> for ConfigError {
    fn from(e: toml::de::Error) -> Self {
        ConfigError::Parse(e)
    }
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "cannot read config file: {}", e),
            ConfigError::Parse(e) => write!(f, "cannot parse config file: {}", e),
            ConfigError::Invalid(msg) => f.write_str(msg),
        }
    }
}

pub fn load() -> Result<Config, ConfigError> {
    load_with_sources().map(|resolved| resolved.config)
}

pub fn load_with_sources() -> Result<ConfigResolved, ConfigError> {
    let mut cfg = Config::default();
    let mut sources = ConfigSources::default();

    if let Ok(path) = std::env::var("CROUPIER_CONFIG")
        && !path.is_empty()
    {
        let s = fs::read_to_string(path)?;
        let f: FileConfig = toml::from_str(&s)?;
        if let Some(v) = f.seed {
            cfg.seed = Some(v);
            sources.seed = ValueSource::File;
        }
        if let Some(v) = f.bankroll {
            cfg.bankroll = v;
            sources.bankroll = ValueSource::File;
        }
        if let Some(v) = f.bet_fraction {
            cfg.bet_fraction = v;
            sources.bet_fraction = ValueSource::File;
        }
        if let Some(v) = f.max_steps {
            cfg.max_steps = v;
            sources.max_steps = ValueSource::File;
        }
        if let Some(v) = f.target_bankroll {
            cfg.target_bankroll = v;
            sources.target_bankroll = ValueSource::File;
        }
        if let Some(v) = f.bankrupt_threshold {
            cfg.bankrupt_threshold = v;
            sources.bankrupt_threshold = ValueSource::File;
        }
    }

    if let Some(seed) = env_value("CROUPIER_SEED", "seed")? {
        cfg.seed = Some(seed);
        sources.seed = ValueSource::Env;
    }
    if let Some(v) = env_value("CROUPIER_BANKROLL", "bankroll")? {
        cfg.bankroll = v;
        sources.bankroll = ValueSource::Env;
    }
    if let Some(v) = env_value("CROUPIER_BET_FRACTION", "bet fraction")? {
        cfg.bet_fraction = v;
        sources.bet_fraction = ValueSource::Env;
    }
    if let Some(v) = env_value("CROUPIER_MAX_STEPS", "max steps")? {
        cfg.max_steps = v;
        sources.max_steps = ValueSource::Env;
    }
    if let Some(v) = env_value("CROUPIER_TARGET_BANKROLL", "target bankroll")? {
        cfg.target_bankroll = v;
        sources.target_bankroll = ValueSource::Env;
    }
    if let Some(v) = env_value("CROUPIER_BANKRUPT_THRESHOLD", "bankrupt threshold")? {
        cfg.bankrupt_threshold = v;
        sources.bankrupt_threshold = ValueSource::Env;
    }

    validate(&cfg)?;
    Ok(ConfigResolved {
        config: cfg,
        sources,
    })
}

/// Read and parse `key`; unset and empty variables are skipped.
fn env_value<T: std::str::FromStr>(key: &str, what: &str) -> Result<Option<T>, ConfigError> {
    match std::env::var(key) {
        Ok(v) if !v.is_empty() => v
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| ConfigError::Invalid(format!("Invalid {}: {}", what, v))),
        _ => Ok(None),
    }
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct FileConfig {
    #[serde(default)]
    seed: Option<u64>,
    #[serde(default)]
    bankroll: Option<f64>,
    #[serde(default)]
    bet_fraction: Option<f64>,
    #[serde(default)]
    max_steps: Option<u64>,
    #[serde(default)]
    target_bankroll: Option<f64>,
    #[serde(default)]
    bankrupt_threshold: Option<f64>,
}

pub fn validate(cfg: &Config) -> Result<(), ConfigError> {
    if !cfg.bankroll.is_finite() || cfg.bankroll <= 0.0 {
        return Err(ConfigError::Invalid(
            "Invalid configuration: bankroll must be >0".into(),
        ));
    }
    if !(cfg.bet_fraction > 0.0 && cfg.bet_fraction <= 1.0) {
        return Err(ConfigError::Invalid(
            "Invalid configuration: bet_fraction must be in (0, 1]".into(),
        ));
    }
    if cfg.max_steps == 0 {
        return Err(ConfigError::Invalid(
            "Invalid configuration: max_steps must be >=1".into(),
        ));
    }
    if !cfg.bankrupt_threshold.is_finite() {
        return Err(ConfigError::Invalid(
            "Invalid configuration: bankrupt_threshold must be finite".into(),
        ));
    }
    if cfg.target_bankroll.is_nan() || cfg.target_bankroll <= cfg.bankrupt_threshold {
        return Err(ConfigError::Invalid(
            "Invalid configuration: target_bankroll must exceed bankrupt_threshold".into(),
        ));
    }
    Ok(())
}
