use std::fs;
use std::path::Path;

use serde::Deserialize;
use tracing::{debug, warn};

pub const DEFAULT_CONFIG_FILE: &str = "shop.toml";

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Base URL of the REST store. Without one, the in-process store is used.
    pub api_url: Option<String>,
    pub channel_buffer: usize,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            api_url: None,
            channel_buffer: 32,
        }
    }
}

/// Loads settings from `shop.toml` (if present) and the environment.
pub fn load_settings() -> Settings {
    let settings = load_settings_file(Path::new(DEFAULT_CONFIG_FILE));
    apply_overrides(settings, |key| std::env::var(key).ok())
}

pub fn load_settings_file(path: &Path) -> Settings {
    let Ok(raw) = fs::read_to_string(path) else {
        debug!(path = %path.display(), "No config file, using defaults");
        return Settings::default();
    };
    match toml::from_str::<Settings>(&raw) {
        Ok(settings) => settings,
        Err(e) => {
            warn!(path = %path.display(), error = %e, "Ignoring malformed config file");
            Settings::default()
        }
    }
}

/// Applies `SHOP_API_URL` and `SHOP_CHANNEL_BUFFER` on top of `settings`.
pub fn apply_overrides(mut settings: Settings, lookup: impl Fn(&str) -> Option<String>) -> Settings {
    if let Some(v) = lookup("SHOP_API_URL") {
        settings.api_url = if v.trim().is_empty() { None } else { Some(v) };
    }
    if let Some(v) = lookup("SHOP_CHANNEL_BUFFER") {
        match v.parse::<usize>() {
            Ok(n) if n > 0 => settings.channel_buffer = n,
            _ => warn!(value = %v, "Ignoring invalid SHOP_CHANNEL_BUFFER"),
        }
    }
    settings
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_file_values_and_defaults() {
        let path = std::env::temp_dir().join(format!("shop-cart-config-{}.toml", std::process::id()));
        fs::write(&path, "api_url = \"http://localhost:3000\"\n").unwrap();

        let settings = load_settings_file(&path);
        fs::remove_file(&path).unwrap();

        assert_eq!(settings.api_url.as_deref(), Some("http://localhost:3000"));
        assert_eq!(settings.channel_buffer, 32);
    }

    #[test]
    fn test_missing_file_gives_defaults() {
        let settings = load_settings_file(Path::new("/nonexistent/shop.toml"));
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn test_env_overrides_file() {
        let env: HashMap<&str, &str> =
            HashMap::from([("SHOP_API_URL", "http://store:8080"), ("SHOP_CHANNEL_BUFFER", "0")]);
        let base = Settings { api_url: Some("http://localhost:3000".into()), channel_buffer: 8 };

        let settings = apply_overrides(base, |key| env.get(key).map(|v| v.to_string()));

        assert_eq!(settings.api_url.as_deref(), Some("http://store:8080"));
        // Zero is not a usable channel size
        assert_eq!(settings.channel_buffer, 8);
    }
}
