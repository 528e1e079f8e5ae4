use std::fs;
use std::path::PathBuf;
use std::time::Duration;

use prism_protocol::{DEFAULT_API_URL, DEFAULT_MODEL};
use prism_theme::generate::{GeneratorConfig, API_KEY_ENV, DEFAULT_TIMEOUT};
use serde::{Deserialize, Serialize};
use tracing::{warn, Level};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Off,
    Error,
    #[default]
    Warn,
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    pub fn from_str(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "off" => LogLevel::Off,
            "error" => LogLevel::Error,
            "info" => LogLevel::Info,
            "debug" => LogLevel::Debug,
            "trace" => LogLevel::Trace,
            _ => LogLevel::Warn,
        }
    }

    pub fn as_tracing_level(&self) -> Option<Level> {
        match self {
            LogLevel::Off => None,
            LogLevel::Error => Some(Level::ERROR),
            LogLevel::Warn => Some(Level::WARN),
            LogLevel::Info => Some(Level::INFO),
            LogLevel::Debug => Some(Level::DEBUG),
            LogLevel::Trace => Some(Level::TRACE),
        }
    }
}

fn default_timeout() -> String {
    humantime::format_duration(DEFAULT_TIMEOUT).to_string()
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UserConfig {
    pub api_url: String,
    pub model: String,
    /// Request timeout, e.g. "30s" or "1m 30s"
    #[serde(default = "default_timeout")]
    pub timeout: String,
    /// Used only when the environment variable is unset
    pub api_key: Option<String>,
    pub log_level: LogLevel,
    /// Where `prism session` writes the active theme's CSS
    pub css_output: Option<PathBuf>,
}

impl Default for UserConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            model: DEFAULT_MODEL.to_string(),
            timeout: default_timeout(),
            api_key: None,
            log_level: LogLevel::Warn,
            css_output: None,
        }
    }
}

pub fn config_dir() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("~/.config"))
        .join("prism")
}

pub fn runtime_dir() -> PathBuf {
    dirs::runtime_dir()
        .or_else(dirs::cache_dir)
        .unwrap_or_else(|| PathBuf::from("/tmp"))
        .join("prism")
}

pub fn config_path() -> PathBuf {
    config_dir().join("config.toml")
}

pub fn themes_dir() -> PathBuf {
    config_dir().join("themes")
}

pub fn ensure_dirs() -> std::io::Result<()> {
    fs::create_dir_all(config_dir())
}

/// The environment wins over the config file; blank values count as unset.
pub fn resolve_api_key(from_env: Option<String>, from_file: Option<&str>) -> Option<String> {
    from_env
        .filter(|key| !key.trim().is_empty())
        .or_else(|| from_file.map(str::to_string))
        .filter(|key| !key.trim().is_empty())
}

impl UserConfig {
    pub fn load() -> Self {
        let path = config_path();
        if !path.exists() {
            return Self::default();
        }

        match fs::read_to_string(&path) {
            Ok(content) => Self::parse(&content),
            Err(_) => Self::default(),
        }
    }

    pub fn parse(content: &str) -> Self {
        toml::from_str(content).unwrap_or_else(|e| {
            warn!("Ignoring invalid config file: {}", e);
            Self::default()
        })
    }

    pub fn save(&self) -> std::io::Result<()> {
        ensure_dirs()?;
        let content = toml::to_string_pretty(self)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e.to_string()))?;
        fs::write(config_path(), content)
    }

    pub fn timeout(&self) -> Duration {
        humantime::parse_duration(&self.timeout).unwrap_or_else(|e| {
            warn!("Invalid timeout {:?} ({}), using default", self.timeout, e);
            DEFAULT_TIMEOUT
        })
    }

    pub fn generator_config(&self) -> GeneratorConfig {
        GeneratorConfig {
            api_url: self.api_url.clone(),
            model: self.model.clone(),
            api_key: resolve_api_key(std::env::var(API_KEY_ENV).ok(), self.api_key.as_deref()),
            timeout: self.timeout(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_default_round_trips_through_toml() {
        let config = UserConfig::default();
        let content = toml::to_string_pretty(&config).unwrap();
        assert_eq!(UserConfig::parse(&content), config);
        assert_eq!(config.timeout(), Duration::from_secs(30));
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let config = UserConfig::parse("model = \"llama-3.3-70b-versatile\"\nlog_level = \"debug\"\n");
        assert_eq!(config.model, "llama-3.3-70b-versatile");
        assert_eq!(config.log_level, LogLevel::Debug);
        assert_eq!(config.api_url, DEFAULT_API_URL);
        assert_eq!(config.timeout, "30s");
    }

    #[test]
    fn test_invalid_file_uses_defaults() {
        assert_eq!(UserConfig::parse("model = [1, 2"), UserConfig::default());
    }

    #[test]
    fn test_timeout_parsing() {
        let mut config = UserConfig::default();
        config.timeout = "1m 30s".to_string();
        assert_eq!(config.timeout(), Duration::from_secs(90));

        config.timeout = "soon".to_string();
        assert_eq!(config.timeout(), DEFAULT_TIMEOUT);
    }

    #[test]
    fn test_resolve_api_key() {
        assert_eq!(
            resolve_api_key(Some("env".to_string()), Some("file")),
            Some("env".to_string())
        );
        assert_eq!(resolve_api_key(None, Some("file")), Some("file".to_string()));
        assert_eq!(
            resolve_api_key(Some("  ".to_string()), Some("file")),
            Some("file".to_string())
        );
        assert_eq!(resolve_api_key(None, Some("")), None);
        assert_eq!(resolve_api_key(None, None), None);
    }

    #[test]
    fn test_log_level_from_str() {
        assert_eq!(LogLevel::from_str("OFF"), LogLevel::Off);
        assert_eq!(LogLevel::from_str("trace"), LogLevel::Trace);
        assert_eq!(LogLevel::from_str("bogus"), LogLevel::Warn);
        assert_eq!(LogLevel::Off.as_tracing_level(), None);
    }
}
