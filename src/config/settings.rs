use anyhow::{Context, Result, bail};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::models::{Language, Preferences, SavedLocation, ScheduleQuery, School, Theme};
use crate::provider::DEFAULT_BASE_URL;
use crate::store::cache::DEFAULT_CAPACITY;

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}
fn default_timeout_secs() -> u64 {
    5
}
fn default_method() -> u8 {
    2
}
fn default_location_name() -> String {
    "Mecca".to_string()
}
fn default_country() -> String {
    "Saudi Arabia".to_string()
}
fn default_latitude() -> f64 {
    21.4225
}
fn default_longitude() -> f64 {
    39.8262
}
fn default_capacity() -> usize {
    DEFAULT_CAPACITY
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    /// Calculation method id, see `waqt methods`.
    #[serde(default = "default_method")]
    pub method: u8,
    #[serde(default)]
    pub school: School,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
            method: default_method(),
            school: School::default(),
        }
    }
}

impl ProviderConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LocationConfig {
    #[serde(default = "default_location_name")]
    pub name: String,
    #[serde(default = "default_country")]
    pub country: String,
    #[serde(default = "default_latitude")]
    pub latitude: f64,
    #[serde(default = "default_longitude")]
    pub longitude: f64,
}

impl Default for LocationConfig {
    fn default() -> Self {
        Self {
            name: default_location_name(),
            country: default_country(),
            latitude: default_latitude(),
            longitude: default_longitude(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheConfig {
    /// Entries kept per cache (daily and monthly each) before LRU eviction.
    #[serde(default = "default_capacity")]
    pub capacity: usize,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            capacity: default_capacity(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct PreferencesConfig {
    #[serde(default)]
    pub theme: Theme,
    #[serde(default)]
    pub language: Language,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub provider: ProviderConfig,
    #[serde(default)]
    pub location: LocationConfig,
    #[serde(default)]
    pub cache: CacheConfig,
    #[serde(default)]
    pub preferences: PreferencesConfig,
}

impl AppConfig {
    fn project_dirs() -> Result<ProjectDirs> {
        ProjectDirs::from("", "", "waqt").context("Could not determine project directories")
    }

    pub fn config_path() -> Result<PathBuf> {
        let dirs = Self::project_dirs()?;
        Ok(dirs.config_dir().join("config.toml"))
    }

    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    /// Defaults when `path` doesn't exist.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content =
            std::fs::read_to_string(path).with_context(|| format!("Reading {:?}", path))?;
        let config: AppConfig = toml::from_str(&content).context("Parsing config.toml")?;
        config.validate()?;
        Ok(config)
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path()?)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self).context("Serializing config")?;
        std::fs::write(path, content).with_context(|| format!("Writing {:?}", path))?;
        Ok(())
    }

    pub fn validate(&self) -> Result<()> {
        if !(1..=30).contains(&self.provider.timeout_secs) {
            bail!(
                "provider.timeout_secs must be between 1 and 30, got {}",
                self.provider.timeout_secs
            );
        }
        self.default_query()
            .validate()
            .context("Invalid [provider]/[location] settings")?;
        Ok(())
    }

    /// Query for the configured location, method and school.
    pub fn default_query(&self) -> ScheduleQuery {
        ScheduleQuery::new(
            self.location.latitude,
            self.location.longitude,
            self.provider.method,
            self.provider.school,
        )
    }

    /// Seed preferences for clients that haven't chosen anything yet.
    pub fn default_preferences(&self) -> Preferences {
        let name = self.location.name.clone();
        Preferences {
            theme: self.preferences.theme,
            language: self.preferences.language,
            location: SavedLocation {
                value: format!("{}-{}", name, self.location.country)
                    .to_lowercase()
                    .replace(' ', "-"),
                name,
                country: self.location.country.clone(),
                latitude: self.location.latitude,
                longitude: self.location.longitude,
            },
        }
    }
}
