use anyhow::{Context, Result};
use directories::ProjectDirs;
use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::constants::{
    ALL_PLACES, DEFAULT_CATEGORIES, DEFAULT_COLLEGE_TYPES, DEFAULT_ENDPOINT_URL, DEFAULT_EXAM_TYPES,
    DEFAULT_PLACES, DEFAULT_STATE, DEFAULT_TYPING_DELAY_MS, HTTP_REQUEST_TIMEOUT_SECS,
};

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Prediction service endpoint
    #[serde(default)]
    pub endpoint: EndpointConfig,

    /// Option enumerations presented at each dialogue step
    #[serde(default)]
    pub options: OptionsConfig,

    /// Chat presentation settings
    #[serde(default)]
    pub chat: ChatConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            endpoint: EndpointConfig::default(),
            options: OptionsConfig::default(),
            chat: ChatConfig::default(),
        }
    }
}

/// Prediction service endpoint settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EndpointConfig {
    /// Base URL of the prediction service
    pub url: String,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl Default for EndpointConfig {
    fn default() -> Self {
        Self {
            url: DEFAULT_ENDPOINT_URL.to_string(),
            timeout_secs: HTTP_REQUEST_TIMEOUT_SECS,
        }
    }
}

/// Allowed values per dialogue field.
///
/// `places` must contain the "All" sentinel meaning no location filter;
/// `state` is the fixed region every prediction is scoped to.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OptionsConfig {
    pub state: String,
    pub places: Vec<String>,
    pub categories: Vec<String>,
    pub college_types: Vec<String>,
    pub exam_types: Vec<String>,
}

impl Default for OptionsConfig {
    fn default() -> Self {
        let owned = |list: &[&str]| list.iter().map(|s| s.to_string()).collect();
        Self {
            state: DEFAULT_STATE.to_string(),
            places: owned(DEFAULT_PLACES),
            categories: owned(DEFAULT_CATEGORIES),
            college_types: owned(DEFAULT_COLLEGE_TYPES),
            exam_types: owned(DEFAULT_EXAM_TYPES),
        }
    }
}

impl OptionsConfig {
    /// Places without the "All" sentinel, for building the place option list
    pub fn filtered_places(&self) -> impl Iterator<Item = &String> {
        self.places.iter().filter(|p| p.as_str() != ALL_PLACES)
    }
}

/// Chat presentation settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatConfig {
    /// Simulated typing delay before each bot reply, in milliseconds (0 disables)
    pub typing_delay_ms: u64,
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self {
            typing_delay_ms: DEFAULT_TYPING_DELAY_MS,
        }
    }
}

/// Load configuration from multiple sources
pub fn load_config() -> Result<Config> {
    let config_dir = get_config_dir()?;
    let global_config = config_dir.join("config.toml");
    let local_config = PathBuf::from(".counselor/config.toml");

    let mut figment = Figment::from(Serialized::defaults(Config::default()));

    if global_config.exists() {
        figment = figment.merge(Toml::file(&global_config));
    }

    if local_config.exists() {
        figment = figment.merge(Toml::file(&local_config));
    }

    // Environment variables (COUNSELOR_ prefix)
    figment = figment.merge(Env::prefixed("COUNSELOR_"));

    figment.extract().context("Failed to load configuration")
}

/// Get the configuration directory
pub fn get_config_dir() -> Result<PathBuf> {
    if let Some(proj_dirs) = ProjectDirs::from("", "", "counselor") {
        let config_dir = proj_dirs.config_dir();
        std::fs::create_dir_all(config_dir)?;
        Ok(config_dir.to_path_buf())
    } else {
        let home = std::env::var("HOME").context("Could not determine home directory")?;
        let config_dir = PathBuf::from(home).join(".config").join("counselor");
        std::fs::create_dir_all(&config_dir)?;
        Ok(config_dir)
    }
}

/// Save configuration to file
pub fn save_config(config: &Config, path: Option<PathBuf>) -> Result<()> {
    let path = if let Some(p) = path {
        p
    } else {
        get_config_dir()?.join("config.toml")
    };

    let toml_string = toml::to_string_pretty(config)?;
    std::fs::write(&path, toml_string)
        .with_context(|| format!("Failed to write config to {}", path.display()))?;

    Ok(())
}

/// Create a default configuration file if it doesn't exist
pub fn init_config() -> Result<()> {
    let config_dir = get_config_dir()?;
    let config_file = config_dir.join("config.toml");

    if !config_file.exists() {
        std::fs::write(&config_file, default_config_contents()?)
            .with_context(|| format!("Failed to write config to {}", config_file.display()))?;
        println!("Created default configuration at: {}", config_file.display());
    } else {
        println!("Configuration already exists at: {}", config_file.display());
    }

    Ok(())
}

/// Default configuration rendered with an explanatory comment header
fn default_config_contents() -> Result<String> {
    let toml_string = toml::to_string_pretty(&Config::default())?;
    Ok(format!(
        "# Counselor configuration\n\
         #\n\
         # [endpoint]  url/timeout of the prediction service\n\
         # [options]   allowed values per dialogue step; keep \"All\" in places\n\
         #             to retain the no-location-filter choice\n\
         # [chat]      typing_delay_ms = 0 disables the simulated typing pause\n\
         #\n\
         # A local .counselor/config.toml and COUNSELOR_-prefixed environment\n\
         # variables override these values.\n\n{toml_string}"
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_options_carry_the_all_sentinel() {
        let options = OptionsConfig::default();
        assert!(options.places.iter().any(|p| p == ALL_PLACES));
        assert_eq!(options.state, DEFAULT_STATE);
    }

    #[test]
    fn test_filtered_places_exclude_sentinel() {
        let options = OptionsConfig::default();
        assert!(options.filtered_places().all(|p| p != ALL_PLACES));
        assert_eq!(
            options.filtered_places().count(),
            options.places.len() - 1
        );
    }

    #[test]
    fn test_default_config_file_is_commented_and_valid() {
        let contents = default_config_contents().unwrap();
        assert!(contents.starts_with("# Counselor configuration"));
        assert!(contents.lines().filter(|l| l.starts_with('#')).count() >= 3);

        // Comments must not break parsing
        let parsed: Config = toml::from_str(&contents).unwrap();
        assert_eq!(parsed.endpoint.url, Config::default().endpoint.url);
    }

    #[test]
    fn test_config_round_trips_through_toml() {
        let config = Config::default();
        let toml_str = toml::to_string_pretty(&config).unwrap();
        let parsed: Config = toml::from_str(&toml_str).unwrap();
        assert_eq!(parsed.endpoint.url, config.endpoint.url);
        assert_eq!(parsed.options.places, config.options.places);
    }
}
