// config
use once_cell::sync::Lazy;
use std::collections::HashMap;
use std::env;
use std::time::Duration;
use tracing::{info, warn};

pub static CONFIG: Lazy<ConfigManager> = Lazy::new(ConfigManager::from_env);

const DEFAULTS: &[(&str, &str)] = &[
    ("PORT", "3000"),
    ("YTDLP_PATH", "yt-dlp"),
    ("SEARCH_URL", "https://www.youtube.com/results"),
    ("COLLABORATOR_TIMEOUT_SECS", "60"),
];

pub struct ConfigManager {
    settings: HashMap<String, String>,
}

impl ConfigManager {
    fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the settings table, falling back to the default for any key
    /// that is unset or empty.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut settings: HashMap<String, String> = HashMap::new();
        let mut overridden: Vec<&str> = Vec::new();

        for &(key, default) in DEFAULTS {
            match lookup(key).filter(|v| !v.trim().is_empty()) {
                Some(value) => {
                    overridden.push(key);
                    settings.insert(key.to_string(), value.trim().to_string());
                }
                None => {
                    settings.insert(key.to_string(), default.to_string());
                }
            }
        }

        // Key names only
        info!("Settings taken from environment: {:?}", overridden);

        ConfigManager { settings }
    }

    pub fn get(&self, key: &str) -> String {
        self.settings.get(key).cloned().unwrap_or_default()
    }

    pub fn port(&self) -> u16 {
        self.parsed("PORT", 3000)
    }

    pub fn ytdlp_path(&self) -> String {
        self.get("YTDLP_PATH")
    }

    pub fn search_url(&self) -> String {
        self.get("SEARCH_URL")
    }

    /// Upper bound on each call to the metadata or search collaborator.
    pub fn collaborator_timeout(&self) -> Duration {
        Duration::from_secs(self.parsed("COLLABORATOR_TIMEOUT_SECS", 60))
    }

    fn parsed<T: std::str::FromStr>(&self, key: &str, fallback: T) -> T {
        self.get(key).parse().unwrap_or_else(|_| {
            warn!("{} is not a valid value, using the default", key);
            fallback
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config_from(pairs: &[(&str, &str)]) -> ConfigManager {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        ConfigManager::from_lookup(|key| map.get(key).cloned())
    }

    #[test]
    fn defaults_apply_when_environment_is_empty() {
        let config = config_from(&[]);
        assert_eq!(config.port(), 3000);
        assert_eq!(config.ytdlp_path(), "yt-dlp");
        assert_eq!(config.search_url(), "https://www.youtube.com/results");
        assert_eq!(config.collaborator_timeout(), Duration::from_secs(60));
    }

    #[test]
    fn environment_overrides_defaults() {
        let config = config_from(&[
            ("PORT", "8080"),
            ("YTDLP_PATH", "/usr/local/bin/yt-dlp"),
            ("COLLABORATOR_TIMEOUT_SECS", "15"),
        ]);
        assert_eq!(config.port(), 8080);
        assert_eq!(config.ytdlp_path(), "/usr/local/bin/yt-dlp");
        assert_eq!(config.collaborator_timeout(), Duration::from_secs(15));
    }

    #[test]
    fn blank_and_invalid_values_fall_back() {
        let config = config_from(&[("PORT", "  "), ("COLLABORATOR_TIMEOUT_SECS", "soon")]);
        assert_eq!(config.port(), 3000);
        assert_eq!(config.collaborator_timeout(), Duration::from_secs(60));
    }
}
