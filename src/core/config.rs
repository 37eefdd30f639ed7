use anyhow::{Context, Result};
use chrono_tz::Tz;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{fs, path::PathBuf};
use tracing::{debug, warn};

pub const DEFAULT_BASE_URL: &str = "https://v6.exchangerate-api.com";
pub const DEFAULT_TIMEZONE: &str = "Asia/Tashkent";

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ExchangeRateApiConfig {
    pub base_url: String,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ProvidersConfig {
    pub exchangerate_api: Option<ExchangeRateApiConfig>,
}

impl Default for ProvidersConfig {
    fn default() -> Self {
        ProvidersConfig {
            exchangerate_api: Some(ExchangeRateApiConfig {
                base_url: DEFAULT_BASE_URL.to_string(),
            }),
        }
    }
}

fn default_timezone() -> String {
    DEFAULT_TIMEZONE.to_string()
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct AppConfig {
    pub api_key: Option<String>,
    #[serde(default)]
    pub providers: ProvidersConfig,
    #[serde(default = "default_timezone")]
    pub timezone: String,
    pub language: Option<String>,
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            api_key: None,
            providers: ProvidersConfig::default(),
            timezone: default_timezone(),
            language: None,
        }
    }
}

impl AppConfig {
    /// Loads the config from the default location, or defaults if none exists yet.
    pub fn load() -> Result<Self> {
        debug!("Loading default config");
        let config_path = Self::default_config_path()?;
        if !config_path.exists() {
            debug!("No config at {}, using defaults", config_path.display());
            return Ok(Self::default());
        }
        Self::load_from_path(&config_path)
    }

    pub fn default_config_path() -> Result<PathBuf> {
        let proj_dirs = ProjectDirs::from("uz", "kurs", "kurs")
            .context("Could not determine project directories")?;
        Ok(proj_dirs.config_dir().join("config.yaml"))
    }

    pub fn load_from_path<P: AsRef<std::path::Path>>(path: P) -> Result<Self> {
        let config_str = fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read config file: {}", path.as_ref().display()))?;

        let config: Self = serde_yaml::from_str(&config_str)
            .with_context(|| format!("Failed to parse config file: {}", path.as_ref().display()))?;
        debug!("Successfully loaded config");
        Ok(config)
    }

    pub fn base_url(&self) -> &str {
        self.providers
            .exchangerate_api
            .as_ref()
            .map_or(DEFAULT_BASE_URL, |p| &p.base_url)
    }

    /// Timezone used to display the last-update time. Unknown names fall back to UTC.
    pub fn timezone(&self) -> Tz {
        self.timezone.parse::<Tz>().unwrap_or_else(|e| {
            warn!(timezone = %self.timezone, error = %e, "Unknown timezone, using UTC");
            Tz::UTC
        })
    }

    /// Picks the API key, preferring an explicit override over the config file.
    pub fn resolve_api_key(&self, overridden: Option<&str>) -> Result<String> {
        overridden
            .or(self.api_key.as_deref())
            .map(str::trim)
            .filter(|k| !k.is_empty())
            .map(str::to_string)
            .context("No API key configured. Run `kurs setup` and set `api_key`, or pass --api-key")
    }
}
