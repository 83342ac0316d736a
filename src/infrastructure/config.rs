use crate::domain::error::HutirError;
use crate::domain::language::{DEFAULT_LANGUAGE, SUPPORTED_LANGUAGES};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Config {
    /// Application content root; the persistent tree and legacy folders live here
    #[serde(default = "default_content_root")]
    pub content_root: String,
    #[serde(default = "default_persistent_dir")]
    pub persistent_dir: String,
    #[serde(default = "default_language")]
    pub default_language: String,
    #[serde(default = "default_supported_languages")]
    pub supported_languages: Vec<String>,
    #[serde(default)]
    pub cache: CacheSettings,
    #[serde(default)]
    pub logging: Logging,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Logging {
    #[serde(default = "default_enable")]
    pub enable: bool,
    pub path: Option<String>,
    #[serde(default = "default_log_level")]
    pub level: String,
}

/// Cache toggle and per-subject expirations, in seconds.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct CacheSettings {
    #[serde(default = "default_enable")]
    pub enabled: bool,
    #[serde(default = "default_strings_absolute")]
    pub strings_absolute_secs: u64,
    #[serde(default = "default_half_hour")]
    pub strings_sliding_secs: u64,
    #[serde(default = "default_content_absolute")]
    pub content_absolute_secs: u64,
    #[serde(default = "default_half_hour")]
    pub content_sliding_secs: u64,
    #[serde(default = "default_half_hour")]
    pub products_absolute_secs: u64,
    #[serde(default = "default_products_sliding")]
    pub products_sliding_secs: u64,
    #[serde(default = "default_contacts_absolute")]
    pub contacts_absolute_secs: u64,
    #[serde(default = "default_half_hour")]
    pub contacts_sliding_secs: u64,
}

impl Default for Logging {
    fn default() -> Self {
        Self {
            enable: true,
            path: None,
            level: "WARN".to_string(),
        }
    }
}

impl Default for CacheSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            strings_absolute_secs: default_strings_absolute(),
            strings_sliding_secs: default_half_hour(),
            content_absolute_secs: default_content_absolute(),
            content_sliding_secs: default_half_hour(),
            products_absolute_secs: default_half_hour(),
            products_sliding_secs: default_products_sliding(),
            contacts_absolute_secs: default_contacts_absolute(),
            contacts_sliding_secs: default_half_hour(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            content_root: default_content_root(),
            persistent_dir: default_persistent_dir(),
            default_language: default_language(),
            supported_languages: default_supported_languages(),
            cache: CacheSettings::default(),
            logging: Logging::default(),
        }
    }
}

impl Config {
    /// Config rooted at `content_root`, otherwise default.
    pub fn with_content_root(content_root: impl AsRef<Path>) -> Self {
        Self {
            content_root: content_root.as_ref().to_string_lossy().into_owned(),
            ..Self::default()
        }
    }

    pub fn persistent_root(&self) -> PathBuf {
        Path::new(&self.content_root).join(&self.persistent_dir)
    }

    pub fn resources_dir(&self) -> PathBuf {
        self.persistent_root().join("Resources")
    }

    pub fn data_dir(&self) -> PathBuf {
        self.persistent_root().join("Data")
    }

    /// Pre-`Persistent` location of the resource files.
    pub fn legacy_resources_dir(&self) -> PathBuf {
        Path::new(&self.content_root).join("Resources")
    }

    /// Pre-`Persistent` location of the data files.
    pub fn legacy_data_dir(&self) -> PathBuf {
        Path::new(&self.content_root).join("Data")
    }
}

impl CacheSettings {
    pub fn strings(&self) -> (Duration, Duration) {
        secs_pair(self.strings_absolute_secs, self.strings_sliding_secs)
    }

    pub fn content(&self) -> (Duration, Duration) {
        secs_pair(self.content_absolute_secs, self.content_sliding_secs)
    }

    pub fn products(&self) -> (Duration, Duration) {
        secs_pair(self.products_absolute_secs, self.products_sliding_secs)
    }

    pub fn contacts(&self) -> (Duration, Duration) {
        secs_pair(self.contacts_absolute_secs, self.contacts_sliding_secs)
    }
}

fn secs_pair(absolute: u64, sliding: u64) -> (Duration, Duration) {
    (Duration::from_secs(absolute), Duration::from_secs(sliding))
}

// Defaults
fn default_content_root() -> String {
    ".".to_string()
}
fn default_persistent_dir() -> String {
    "Persistent".to_string()
}
fn default_language() -> String {
    DEFAULT_LANGUAGE.to_string()
}
fn default_supported_languages() -> Vec<String> {
    SUPPORTED_LANGUAGES.iter().map(|s| s.to_string()).collect()
}
fn default_enable() -> bool {
    true
}
fn default_log_level() -> String {
    "WARN".to_string()
}
fn default_strings_absolute() -> u64 {
    12 * 60 * 60
}
fn default_content_absolute() -> u64 {
    6 * 60 * 60
}
fn default_contacts_absolute() -> u64 {
    24 * 60 * 60
}
fn default_half_hour() -> u64 {
    30 * 60
}
fn default_products_sliding() -> u64 {
    10 * 60
}

pub fn get_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|p| p.join("hutir").join("config.toml"))
}

/// Load from `explicit` or the default location; a missing file yields defaults.
pub fn load_config(explicit: Option<&Path>) -> Result<Config, HutirError> {
    let config_path = explicit.map(Path::to_path_buf).or_else(get_config_path);

    if let Some(path) = config_path {
        if path.exists() {
            let content = fs::read_to_string(&path)?;
            match parse_config(&content) {
                Ok(config) => return Ok(config),
                // An explicitly requested file must be valid
                Err(e) if explicit.is_some() => return Err(e),
                Err(e) => {
                    eprintln!(
                        "Warning: Failed to parse config file: {}. Using defaults.",
                        e
                    );
                }
            }
        } else if explicit.is_some() {
            return Err(HutirError::Config(format!(
                "Config file not found: {}",
                path.display()
            )));
        }
    }

    Ok(Config::default())
}

pub fn parse_config(content: &str) -> Result<Config, HutirError> {
    let config: Config = toml::from_str(content)?;
    if config.supported_languages.is_empty() {
        return Err(HutirError::Config(
            "supported_languages must not be empty".to_string(),
        ));
    }
    Ok(config)
}

pub fn generate_config_sample() -> Result<(), HutirError> {
    let config_path = get_config_path();

    if let Some(path) = config_path {
        if path.exists() {
            eprintln!("Config file already exists at: {}", path.display());
            return Ok(());
        }

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let sample = Config::default();
        let toml_content = toml::to_string_pretty(&sample)
            .map_err(|e| HutirError::Config(format!("Failed to serialize config: {}", e)))?;
        fs::write(&path, toml_content)
            .map_err(|e| HutirError::Config(format!("Failed to write config file: {}", e)))?;
        println!("Generated config file at: {}", path.display());
    } else {
        return Err(HutirError::Config(
            "Cannot determine config directory".to_string(),
        ));
    }

    Ok(())
}
