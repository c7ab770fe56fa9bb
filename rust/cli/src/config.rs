//! Layered configuration: built-in defaults, then the TOML file named by
//! `HHREPLAY_CONFIG`, then `HHREPLAY_*` environment variables.

use hhreplay_engine::replay::ParseOptions;
use hhreplay_engine::segment::SegmenterConfig;
use serde::{Deserialize, Serialize};
use std::fs;
use tracing_subscriber::EnvFilter;

pub const CONFIG_ENV: &str = "HHREPLAY_CONFIG";
pub const REQUIRE_HERO_ENV: &str = "HHREPLAY_REQUIRE_HERO";
pub const MIN_BLOCK_LEN_ENV: &str = "HHREPLAY_MIN_BLOCK_LEN";
pub const TIMESTAMP_FALLBACK_ENV: &str = "HHREPLAY_TIMESTAMP_FALLBACK";
pub const LANGUAGE_CHECK_ENV: &str = "HHREPLAY_LANGUAGE_CHECK";
pub const LOG_ENV: &str = "HHREPLAY_LOG";

/// What flat output shows for a hand whose header carries no timestamp.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum TimestampFallback {
    /// The time of the run
    Now,
    /// Leave `date_played` empty
    None,
}

impl TimestampFallback {
    fn parse(s: &str) -> Option<Self> {
        match s.to_ascii_lowercase().as_str() {
            "now" => Some(TimestampFallback::Now),
            "none" => Some(TimestampFallback::None),
            _ => None,
        }
    }

    /// Reads the clock only for [`TimestampFallback::Now`].
    pub fn resolve(self) -> Option<chrono::NaiveDateTime> {
        match self {
            TimestampFallback::Now => Some(chrono::Local::now().naive_local()),
            TimestampFallback::None => None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Config {
    pub require_hero: bool,
    pub min_block_len: usize,
    pub timestamp_fallback: TimestampFallback,
    pub language_check: bool,
    pub log_filter: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            require_hero: false,
            min_block_len: SegmenterConfig::default().min_block_len,
            timestamp_fallback: TimestampFallback::Now,
            language_check: true,
            log_filter: "warn".into(),
        }
    }
}

impl Config {
    pub fn parse_options(&self) -> ParseOptions {
        ParseOptions {
            require_hero: self.require_hero,
        }
    }

    pub fn segmenter(&self) -> SegmenterConfig {
        SegmenterConfig {
            min_block_len: self.min_block_len,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ValueSource {
    Default,
    File,
    Env,
}

#[derive(Debug, Clone, Copy)]
pub struct ConfigSources {
    pub require_hero: ValueSource,
    pub min_block_len: ValueSource,
    pub timestamp_fallback: ValueSource,
    pub language_check: ValueSource,
    pub log_filter: ValueSource,
}

impl Default for ConfigSources {
    fn default() -> Self {
        Self {
            require_hero: ValueSource::Default,
            min_block_len: ValueSource::Default,
            timestamp_fallback: ValueSource::Default,
            language_check: ValueSource::Default,
            log_filter: ValueSource::Default,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ConfigResolved {
    pub config: Config,
    pub sources: ConfigSources,
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

    if let Ok(path) = std::env::var(CONFIG_ENV)
        && !path.is_empty()
    {
        let s = fs::read_to_string(path)?;
        let f: FileConfig = toml::from_str(&s)?;
        if let Some(v) = f.require_hero {
            cfg.require_hero = v;
            sources.require_hero = ValueSource::File;
        }
        if let Some(v) = f.min_block_len {
            cfg.min_block_len = v;
            sources.min_block_len = ValueSource::File;
        }
        if let Some(v) = f.timestamp_fallback {
            cfg.timestamp_fallback = v;
            sources.timestamp_fallback = ValueSource::File;
        }
        if let Some(v) = f.language_check {
            cfg.language_check = v;
            sources.language_check = ValueSource::File;
        }
        if let Some(v) = f.log_filter {
            cfg.log_filter = v;
            sources.log_filter = ValueSource::File;
        }
    }

    if let Ok(v) = std::env::var(REQUIRE_HERO_ENV)
        && !v.is_empty()
    {
        cfg.require_hero =
            parse_bool(&v).ok_or_else(|| ConfigError::Invalid("Invalid require_hero".into()))?;
        sources.require_hero = ValueSource::Env;
    }
    if let Ok(v) = std::env::var(MIN_BLOCK_LEN_ENV)
        && !v.is_empty()
    {
        cfg.min_block_len = v
            .parse()
            .map_err(|_| ConfigError::Invalid("Invalid min_block_len".into()))?;
        sources.min_block_len = ValueSource::Env;
    }
    if let Ok(v) = std::env::var(TIMESTAMP_FALLBACK_ENV)
        && !v.is_empty()
    {
        cfg.timestamp_fallback = TimestampFallback::parse(&v)
            .ok_or_else(|| ConfigError::Invalid("Invalid timestamp_fallback".into()))?;
        sources.timestamp_fallback = ValueSource::Env;
    }
    if let Ok(v) = std::env::var(LANGUAGE_CHECK_ENV)
        && !v.is_empty()
    {
        cfg.language_check =
            parse_bool(&v).ok_or_else(|| ConfigError::Invalid("Invalid language_check".into()))?;
        sources.language_check = ValueSource::Env;
    }
    if let Ok(v) = std::env::var(LOG_ENV)
        && !v.is_empty()
    {
        cfg.log_filter = v;
        sources.log_filter = ValueSource::Env;
    }

    validate(&cfg)?;
    Ok(ConfigResolved {
        config: cfg,
        sources,
    })
}

#[derive(Debug, Deserialize)]
struct FileConfig {
    #[serde(default)]
    require_hero: Option<bool>,
    #[serde(default)]
    min_block_len: Option<usize>,
    #[serde(default)]
    timestamp_fallback: Option<TimestampFallback>,
    #[serde(default)]
    language_check: Option<bool>,
    #[serde(default)]
    log_filter: Option<String>,
}

fn validate(cfg: &Config) -> Result<(), ConfigError> {
    if cfg.min_block_len == 0 {
        return Err(ConfigError::Invalid(
            "min_block_len must be >0".into(),
        ));
    }
    if let Err(e) = EnvFilter::try_new(&cfg.log_filter) {
        return Err(ConfigError::Invalid(format!(
            "Invalid log_filter: {}",
            e
        )));
    }
    Ok(())
}

fn parse_bool(s: &str) -> Option<bool> {
    match s.to_ascii_lowercase().as_str() {
        "1" | "true" | "on" | "yes" => Some(true),
        "0" | "false" | "off" | "no" => Some(false),
        _ => None,
    }
}
