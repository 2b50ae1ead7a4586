use std::path::PathBuf;

use log::debug;
use serde::Deserialize;

pub const DEFAULT_SERVER_URL: &str = "http://localhost:8080";

/// Optional on-disk settings, read from the platform config directory.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    pub server_url: Option<String>,
}

impl AppConfig {
    /// Loads `tana/config.toml` if it exists. A missing or unreadable file
    /// is the same as an empty one.
    pub fn load() -> AppConfig {
        let Some(path) = Self::path() else {
            return AppConfig::default();
        };

        match std::fs::read_to_string(&path) {
            Ok(raw) => match toml::from_str(&raw) {
                Ok(config) => config,
                Err(err) => {
                    debug!("ignoring malformed {}: {}", path.display(), err);
                    AppConfig::default()
                }
            },
            Err(_) => AppConfig::default(),
        }
    }

    fn path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("tana").join("config.toml"))
    }
}

/// Command line (or environment) beats the config file, which beats the
/// built-in default.
pub fn resolve_server_url(cli: Option<String>, config: &AppConfig) -> String {
    cli.or_else(|| config.server_url.clone())
        .unwrap_or_else(|| DEFAULT_SERVER_URL.to_owned())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_beats_the_config_file() {
        let config = AppConfig {
            server_url: Some("http://media-box:9000".to_owned()),
        };

        let url = resolve_server_url(Some("http://localhost:3000".to_owned()), &config);

        assert_eq!(url, "http://localhost:3000");
    }

    #[test]
    fn config_file_beats_the_default() {
        let config = AppConfig {
            server_url: Some("http://media-box:9000".to_owned()),
        };

        assert_eq!(resolve_server_url(None, &config), "http://media-box:9000");
    }

    #[test]
    fn default_applies_when_nothing_is_set() {
        assert_eq!(
            resolve_server_url(None, &AppConfig::default()),
            DEFAULT_SERVER_URL
        );
    }
}
