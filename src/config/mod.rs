use anyhow::{Context, Result, bail};
use chrono::FixedOffset;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Offset used to display times when nothing else is configured (US Central
/// standard time)
pub const DEFAULT_UTC_OFFSET: &str = "-06:00";

/// How the report is printed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

fn default_utc_offset() -> String {
    DEFAULT_UTC_OFFSET.to_string()
}

#[derive(Debug, Deserialize)]
pub struct FileConfig {
    #[serde(default)]
    pub lat: Option<f64>,
    #[serde(default)]
    pub lng: Option<f64>,
    #[serde(default)]
    pub kml: Option<PathBuf>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default = "default_utc_offset")]
    pub utc_offset: String,
    #[serde(default)]
    pub format: OutputFormat,
    #[serde(default)]
    pub strict: bool,
    #[serde(default)]
    pub verbose: bool,
    #[serde(default)]
    pub fetch: FetchConfig,
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_max_retries() -> u32 {
    3
}

fn default_retry_delay_secs() -> u64 {
    10
}

#[derive(Debug, Deserialize, Clone)]
pub struct FetchConfig {
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,
    #[serde(default = "default_retry_delay_secs")]
    pub retry_delay_secs: u64,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            timeout_secs: default_timeout_secs(),
            max_retries: default_max_retries(),
            retry_delay_secs: default_retry_delay_secs(),
        }
    }
}

impl Default for FileConfig {
    fn default() -> Self {
        Self {
            lat: None,
            lng: None,
            kml: None,
            url: None,
            utc_offset: default_utc_offset(),
            format: OutputFormat::default(),
            strict: false,
            verbose: false,
            fetch: FetchConfig::default(),
        }
    }
}

impl FileConfig {
    /// Load the first config file found in the usual places
    pub fn load() -> Option<Self> {
        for path in get_config_paths() {
            if !path.exists() {
                continue;
            }
            match Self::load_from(&path) {
                Ok(config) => {
                    debug!("Loaded config from {}", path.display());
                    return Some(config);
                }
                Err(e) => warn!("Failed to load config file {:?}: {:#}", path, e),
            }
        }
        None
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {:?}", path))?;
        toml::from_str(&contents).context("Failed to parse config file")
    }
}

fn get_config_paths() -> Vec<PathBuf> {
    let mut paths = Vec::new();

    paths.push(PathBuf::from("stormcheck.toml"));
    paths.push(PathBuf::from(".stormcheck.toml"));

    if let Some(config_dir) = dirs::config_dir() {
        paths.push(config_dir.join("stormcheck").join("config.toml"));
        paths.push(config_dir.join("stormcheck.toml"));
    }

    if let Some(home) = dirs::home_dir() {
        paths.push(home.join(".stormcheck.toml"));
    }

    paths
}

/// Parse a UTC offset written as `+HH:MM`, `-HH:MM`, `-HHMM`, `-HH` or `Z`
pub fn parse_utc_offset(value: &str) -> Result<FixedOffset> {
    let value = value.trim();
    if value.eq_ignore_ascii_case("z") || value.eq_ignore_ascii_case("utc") {
        return FixedOffset::east_opt(0).context("UTC offset out of range");
    }

    let (sign, rest) = match value.split_at_checked(1) {
        Some(("+", rest)) => (1, rest),
        Some(("-", rest)) => (-1, rest),
        _ => bail!("UTC offset must start with + or -: {:?}", value),
    };

    let digits: String = rest.chars().filter(|c| *c != ':').collect();
    let (hours, minutes) = match digits.len() {
        1 | 2 => (digits.as_str(), "0"),
        4 => digits.split_at(2),
        _ => bail!("Invalid UTC offset: {:?}", value),
    };

    let hours: i32 = hours
        .parse()
        .with_context(|| format!("Invalid hours in UTC offset: {:?}", value))?;
    let minutes: i32 = minutes
        .parse()
        .with_context(|| format!("Invalid minutes in UTC offset: {:?}", value))?;
    if hours > 23 || minutes > 59 {
        bail!("UTC offset out of range: {:?}", value);
    }

    FixedOffset::east_opt(sign * (hours * 3600 + minutes * 60))
        .with_context(|| format!("UTC offset out of range: {:?}", value))
}
