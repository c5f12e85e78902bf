use std::env;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use log::warn;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to parse JSON config: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Failed to parse TOML config: {0}")]
    TomlDe(#[from] toml::de::Error),
    #[error("Failed to serialize config to TOML: {0}")]
    TomlSer(#[from] toml::ser::Error),
    #[error("Unsupported config file format: {0}")]
    UnsupportedFormat(String),
    #[error("Invalid value in environment variable {key}: {value}")]
    Env { key: String, value: String },
    #[error("{0}")]
    Invalid(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LogConfig { pub level: String, pub timestamps: bool, pub colors: bool, pub location: bool }
impl Default for LogConfig { fn default() -> Self { Self { level: "info".into(), timestamps: true, colors: true, location: false } } }

/// Values the demo CLI puts into headers when not given on the command line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HeaderDefaults { pub ip_version: u8, pub header_len: u8, pub ttl: u8, pub tcp_window: u16, pub tcp_data_offset: u8 }
impl Default for HeaderDefaults { fn default() -> Self { Self { ip_version: 4, header_len: 5, ttl: 64, tcp_window: 65535, tcp_data_offset: 6 } } }

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat { Diagram, Hex, Both }

impl FromStr for OutputFormat {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "diagram" => Ok(OutputFormat::Diagram),
            "hex" => Ok(OutputFormat::Hex),
            "both" => Ok(OutputFormat::Both),
            _ => Err(format!("Invalid output format: {}", s)),
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self { OutputFormat::Diagram => "diagram", OutputFormat::Hex => "hex", OutputFormat::Both => "both" };
        f.write_str(s)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig { pub format: OutputFormat }
impl Default for OutputConfig { fn default() -> Self { Self { format: OutputFormat::Both } } }

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PacktConfig {
    pub logging: LogConfig,
    pub defaults: HeaderDefaults,
    pub output: OutputConfig,
}

pub struct ConfigLoader { config_paths: Vec<PathBuf>, env_prefix: String }
impl ConfigLoader {
    pub fn new() -> Self { Self { config_paths: vec![PathBuf::from("packt.toml"), PathBuf::from("packt.json")], env_prefix: "PACKT_".into() } }
    pub fn with_paths(paths: Vec<PathBuf>) -> Self { Self { config_paths: paths, env_prefix: "PACKT_".into() } }
    pub fn with_env_prefix(mut self, prefix: &str) -> Self { self.env_prefix = prefix.to_string(); self }

    /// First readable file wins; environment overrides are applied on top.
    pub fn load(&self) -> Result<PacktConfig, ConfigError> {
        let mut config = PacktConfig::default();
        for path in &self.config_paths {
            if path.exists() {
                match Self::load_from_file(path) {
                    Ok(fc) => { config = fc; break; }
                    Err(e) => warn!("Failed to load config from {:?}: {}", path, e),
                }
            }
        }
        self.apply_env_overrides(&mut config)?;
        Self::validate_config(&config)?;
        Ok(config)
    }

    pub fn load_from_file(path: &Path) -> Result<PacktConfig, ConfigError> {
        let content = fs::read_to_string(path)?;
        match path.extension().and_then(|s| s.to_str()) {
            Some("json") => Ok(serde_json::from_str(&content)?),
            Some("toml") => Ok(toml::from_str(&content)?),
            _ => Err(ConfigError::UnsupportedFormat(path.display().to_string())),
        }
    }

    fn env_var(&self, key: &str) -> Option<(String, String)> {
        let name = format!("{}{}", self.env_prefix, key);
        env::var(&name).ok().map(|v| (name, v))
    }

    fn parse_env<T: FromStr>(&self, key: &str) -> Result<Option<T>, ConfigError> {
        match self.env_var(key) {
            Some((name, value)) => value.parse().map(Some).map_err(|_| ConfigError::Env { key: name, value }),
            None => Ok(None),
        }
    }

    fn apply_env_overrides(&self, config: &mut PacktConfig) -> Result<(), ConfigError> {
        if let Some((_, level)) = self.env_var("LOG_LEVEL") { config.logging.level = level; }
        if let Some(colors) = self.parse_env("LOG_COLORS")? { config.logging.colors = colors; }
        if let Some(ttl) = self.parse_env("TTL")? { config.defaults.ttl = ttl; }
        if let Some(version) = self.parse_env("IP_VERSION")? { config.defaults.ip_version = version; }
        if let Some(window) = self.parse_env("TCP_WINDOW")? { config.defaults.tcp_window = window; }
        if let Some(format) = self.parse_env("OUTPUT")? { config.output.format = format; }
        Ok(())
    }

    fn validate_config(config: &PacktConfig) -> Result<(), ConfigError> {
        match config.logging.level.to_lowercase().as_str() { "trace"|"debug"|"info"|"warn"|"error"|"off" => {}, _ => return Err(ConfigError::Invalid("Invalid log level. Must be one of: trace, debug, info, warn, error, off".into())) }
        // 4-bit header fields
        if config.defaults.ip_version > 0x0F { return Err(ConfigError::Invalid("ip_version must fit in 4 bits".into())); }
        if config.defaults.header_len > 0x0F { return Err(ConfigError::Invalid("header_len must fit in 4 bits".into())); }
        if config.defaults.tcp_data_offset > 0x0F { return Err(ConfigError::Invalid("tcp_data_offset must fit in 4 bits".into())); }
        Ok(())
    }

    pub fn save_config(&self, config: &PacktConfig, path: &Path) -> Result<(), ConfigError> {
        let content = match path.extension().and_then(|s| s.to_str()) {
            Some("json") => serde_json::to_string_pretty(config)?,
            Some("toml") => toml::to_string_pretty(config)?,
            _ => return Err(ConfigError::UnsupportedFormat(path.display().to_string())),
        };
        fs::write(path, content)?;
        Ok(())
    }
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}
