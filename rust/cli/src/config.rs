use serde::{Deserialize, Serialize};
use std::fs;

use holdem_engine::player::{CHIP_SCALE, Chips, format_chips};
use holdem_engine::rules::{KNOWN_TIERS, TableLimit};
use holdem_engine::table::{DEFAULT_ACTION_TIMEOUT_SECS, TableConfig};

/// Settings shared by the table-driving commands.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Config {
    /// Limit tier of the table (100, 1000 or 10000)
    pub limit: u32,
    pub action_timeout_secs: u64,
    pub seed: Option<u64>,
    /// Buy-in per seat in whole chips
    pub starting_stack: u64,
}

impl Config {
    pub fn table_config(&self, seed: Option<u64>) -> TableConfig {
        TableConfig {
            limit: self.limit,
            action_timeout_secs: self.action_timeout_secs,
            seed: seed.or(self.seed),
            ..TableConfig::default()
        }
    }

    pub fn starting_stack_units(&self) -> Chips {
        self.starting_stack.saturating_mul(CHIP_SCALE)
    }
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
    pub limit: ValueSource,
    pub action_timeout_secs: ValueSource,
    pub seed: ValueSource,
    pub starting_stack: ValueSource,
}

impl Default for ConfigSources {
    fn default() -> Self {
        Self {
            limit: ValueSource::Default,
            action_timeout_secs: ValueSource::Default,
            seed: ValueSource::Default,
            starting_stack: ValueSource::Default,
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
            limit: 1_000,
            action_timeout_secs: DEFAULT_ACTION_TIMEOUT_SECS,
            seed: None,
            starting_stack: 1_000,
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
            ConfigError::Invalid(msg) => write!(f, "{}", msg),
        }
    }
}

pub fn load() -> Result<Config, ConfigError> {
    load_with_sources().map(|resolved| resolved.config)
}

/// Defaults, then the TOML file named by `HOLDEM_CONFIG`, then `HOLDEM_*`
/// environment variables. Empty variables are ignored.
pub fn load_with_sources() -> Result<ConfigResolved, ConfigError> {
    let mut cfg = Config::default();
    let mut sources = ConfigSources::default();

    if let Ok(path) = std::env::var("HOLDEM_CONFIG")
        && !path.is_empty()
    {
        let s = fs::read_to_string(path)?;
        let f: FileConfig = toml::from_str(&s)?;
        if let Some(v) = f.limit {
            cfg.limit = v;
            sources.limit = ValueSource::File;
        }
        if let Some(v) = f.action_timeout_secs {
            cfg.action_timeout_secs = v;
            sources.action_timeout_secs = ValueSource::File;
        }
        if let Some(v) = f.seed {
            cfg.seed = Some(v);
            sources.seed = ValueSource::File;
        }
        if let Some(v) = f.starting_stack {
            cfg.starting_stack = v;
            sources.starting_stack = ValueSource::File;
        }
    }

    if let Some(v) = env_value("HOLDEM_LIMIT")? {
        cfg.limit = v;
        sources.limit = ValueSource::Env;
    }
    if let Some(v) = env_value("HOLDEM_TIMEOUT")? {
        cfg.action_timeout_secs = v;
        sources.action_timeout_secs = ValueSource::Env;
    }
    if let Some(v) = env_value("HOLDEM_SEED")? {
        cfg.seed = Some(v);
        sources.seed = ValueSource::Env;
    }
    if let Some(v) = env_value("HOLDEM_STARTING_STACK")? {
        cfg.starting_stack = v;
        sources.starting_stack = ValueSource::Env;
    }

    validate(&cfg)?;
    Ok(ConfigResolved {
        config: cfg,
        sources,
    })
}

fn env_value<T: std::str::FromStr>(name: &str) -> Result<Option<T>, ConfigError> {
    match std::env::var(name) {
        Ok(raw) if !raw.is_empty() => raw
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| ConfigError::Invalid(format!("Invalid {}: {:?}", name, raw))),
        _ => Ok(None),
    }
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct FileConfig {
    #[serde(default)]
    limit: Option<u32>,
    #[serde(default, alias = "timeout")]
    action_timeout_secs: Option<u64>,
    #[serde(default)]
    seed: Option<u64>,
    #[serde(default)]
    starting_stack: Option<u64>,
}

fn validate(cfg: &Config) -> Result<(), ConfigError> {
    if !KNOWN_TIERS.contains(&cfg.limit) {
        return Err(ConfigError::Invalid(format!(
            "Invalid configuration: limit must be one of {:?}",
            KNOWN_TIERS
        )));
    }
    if cfg.action_timeout_secs == 0 {
        return Err(ConfigError::Invalid(
            "Invalid configuration: action_timeout_secs must be >0".into(),
        ));
    }
    let limit = TableLimit::for_tier(cfg.limit);
    let stack = cfg.starting_stack_units();
    if stack < limit.min_buyin || stack > limit.max_buyin {
        return Err(ConfigError::Invalid(format!(
            "Invalid configuration: starting_stack must be within the buy-in range {}..={} for limit {}",
            format_chips(limit.min_buyin),
            format_chips(limit.max_buyin),
            cfg.limit
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        assert!(validate(&Config::default()).is_ok());
    }

    #[test]
    fn unknown_tier_is_rejected() {
        let cfg = Config {
            limit: 250,
            ..Config::default()
        };
        let msg = validate(&cfg).unwrap_err().to_string();
        assert!(msg.contains("limit"));
    }

    #[test]
    fn starting_stack_must_fit_the_tier_buy_in() {
        let small_table = |starting_stack| Config {
            limit: 100,
            starting_stack,
            ..Config::default()
        };
        assert!(validate(&small_table(10)).is_ok());
        assert!(validate(&small_table(100)).is_ok());
        for bad in [0, 9, 101] {
            let msg = validate(&small_table(bad)).unwrap_err().to_string();
            assert!(msg.contains("10..=100"), "{}", msg);
        }
    }

    #[test]
    fn table_config_prefers_explicit_seed() {
        let cfg = Config {
            seed: Some(1),
            ..Config::default()
        };
        assert_eq!(cfg.table_config(Some(9)).seed, Some(9));
        assert_eq!(cfg.table_config(None).seed, Some(1));
        assert_eq!(cfg.starting_stack_units(), 100_000);
    }
}
