//! Configuration management

use crate::voice::LanguageFilter;
use crate::{AxvoiceError, Result};
use ini::Ini;
use log::{debug, info};
use std::path::PathBuf;
use std::time::Duration;

/// Application configuration for the speech front-end
///
/// Manages persistent settings: the chosen voice, rate and pitch
/// multipliers, and the voice menu filter and retry parameters.
pub struct Config {
    /// INI configuration storage
    ini: Ini,

    /// Config file path (~/.axvoice.cfg)
    path: PathBuf,
}

impl Config {
    /// Load configuration from disk or create default
    pub fn load() -> Result<Self> {
        Self::load_from(Self::config_path())
    }

    /// Load configuration from an explicit path, creating defaults if missing
    pub fn load_from(path: PathBuf) -> Result<Self> {
        debug!("Loading config from {:?}", path);

        let ini = if path.exists() {
            Ini::load_from_file(&path)
                .map_err(|e| AxvoiceError::IniParse(format!("Failed to load config: {}", e)))?
        } else {
            info!("Config file not found, creating default");
            let default = Self::default_config();
            default
                .write_to_file(&path)
                .map_err(|e| AxvoiceError::IniParse(format!("Failed to write config: {}", e)))?;
            default
        };

        Ok(Self { ini, path })
    }

    /// Save configuration to disk
    pub fn save(&self) -> Result<()> {
        debug!("Saving config to {:?}", self.path);
        self.ini
            .write_to_file(&self.path)
            .map_err(|e| AxvoiceError::Config(format!("Failed to save config: {}", e)))
    }

    /// Get config file path (~/.axvoice.cfg)
    fn config_path() -> PathBuf {
        let home = dirs::home_dir().unwrap_or_else(|| PathBuf::from("."));
        home.join(".axvoice.cfg")
    }

    /// Expose the config file path for display
    pub fn path(&self) -> &PathBuf {
        &self.path
    }

    /// Create default configuration
    fn default_config() -> Ini {
        let mut ini = Ini::new();

        ini.with_section(Some("speech"))
            .set("voice_uri", "")
            .set("rate", "1.0")
            .set("pitch", "1.0");

        ini.with_section(Some("voices"))
            .set("languages", "en-us,en-gb")
            .set("preferred_region", "us")
            .set("retry_interval_ms", "500")
            .set("retry_max_attempts", "20");

        ini
    }

    /// Get a string value from config
    pub fn get_string(&self, section: &str, key: &str, default: &str) -> String {
        self.ini
            .get_from(Some(section), key)
            .unwrap_or(default)
            .to_string()
    }

    /// Get an integer value from config
    pub fn get_int(&self, section: &str, key: &str, default: i32) -> i32 {
        self.ini
            .get_from(Some(section), key)
            .and_then(|v| v.parse().ok())
            .unwrap_or(default)
    }

    /// Get a float value from config
    pub fn get_float(&self, section: &str, key: &str, default: f32) -> f32 {
        self.ini
            .get_from(Some(section), key)
            .and_then(|v| v.parse().ok())
            .unwrap_or(default)
    }

    /// Set a value in config
    pub fn set(&mut self, section: &str, key: &str, value: &str) {
        self.ini.with_section(Some(section)).set(key, value);
    }

    // Front-end-specific configuration getters

    /// Stable identifier of the chosen voice, empty when none chosen yet
    pub fn voice_uri(&self) -> String {
        self.get_string("speech", "voice_uri", "")
    }

    /// Speech rate multiplier (1.0 = normal speed)
    ///
    /// Out-of-range values fall back to the default
    pub fn rate(&self) -> f32 {
        let rate = self.get_float("speech", "rate", 1.0);
        if (0.1..=10.0).contains(&rate) {
            rate
        } else {
            1.0
        }
    }

    /// Speech pitch multiplier (1.0 = normal pitch)
    pub fn pitch(&self) -> f32 {
        let pitch = self.get_float("speech", "pitch", 1.0);
        if (0.0..=2.0).contains(&pitch) {
            pitch
        } else {
            1.0
        }
    }

    /// Language-tag prefixes shown in the voice menu
    pub fn languages(&self) -> Vec<String> {
        self.get_string("voices", "languages", "en-us,en-gb")
            .split(',')
            .map(|s| s.trim().to_lowercase())
            .filter(|s| !s.is_empty())
            .collect()
    }

    /// Regional marker that sorts matching voices to the top of the menu
    pub fn preferred_region(&self) -> String {
        self.get_string("voices", "preferred_region", "us").to_lowercase()
    }

    /// Menu filter built from the language settings
    pub fn language_filter(&self) -> LanguageFilter {
        LanguageFilter::new(self.languages(), &self.preferred_region())
    }

    /// Delay between empty catalog polls
    pub fn retry_interval(&self) -> Duration {
        let ms = self.get_int("voices", "retry_interval_ms", 500).max(0);
        Duration::from_millis(ms as u64)
    }

    /// Empty polls allowed before reporting voices unavailable
    pub fn retry_max_attempts(&self) -> u32 {
        self.get_int("voices", "retry_max_attempts", 20).max(1) as u32
    }
}
