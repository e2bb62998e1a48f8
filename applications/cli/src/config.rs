/// CLI configuration
use crate::error::{CliError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tune_playback::PlayerConfig;
use tune_server_client::ServerConfig;

/// Config file read from the working directory when `--config` is absent
pub const DEFAULT_CONFIG_FILE: &str = "tune.toml";

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct CliConfig {
    #[serde(default)]
    pub server: ServerSettings,

    #[serde(default)]
    pub player: PlayerConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerSettings {
    #[serde(default = "default_url")]
    pub url: String,

    /// Bearer token; anonymous when absent
    #[serde(default)]
    pub access_token: Option<String>,

    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            url: default_url(),
            access_token: None,
            timeout_secs: default_timeout_secs(),
        }
    }
}

fn default_url() -> String {
    "http://localhost:5000".to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

impl CliConfig {
    /// Load configuration from file and environment
    ///
    /// An explicit `path` must exist; the default `tune.toml` is optional.
    /// `TUNE_`-prefixed variables override the file, with `__` between
    /// section and key (`TUNE_SERVER__URL`, `TUNE_PLAYER__VOLUME`).
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut settings = config::Config::builder();

        match path {
            Some(path) => {
                settings = settings.add_source(config::File::from(path.to_path_buf()));
            }
            None => {
                let default_path = PathBuf::from(DEFAULT_CONFIG_FILE);
                if default_path.exists() {
                    settings = settings.add_source(config::File::from(default_path));
                }
            }
        }

        settings = settings.add_source(
            config::Environment::with_prefix("TUNE")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        let config = settings
            .build()
            .map_err(|e| CliError::Config(e.to_string()))?;

        config
            .try_deserialize()
            .map_err(|e| CliError::Config(e.to_string()))
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.server.url.trim().is_empty() {
            return Err(CliError::Config(
                "Server URL is required (set TUNE_SERVER__URL)".to_string(),
            ));
        }

        let url = url::Url::parse(&self.server.url)
            .map_err(|e| CliError::Config(format!("Invalid server URL {}: {e}", self.server.url)))?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(CliError::Config(format!(
                "Server URL must be http or https, got {}",
                url.scheme()
            )));
        }

        if self.player.volume > 100 {
            return Err(CliError::Config(format!(
                "Player volume must be 0-100, got {}",
                self.player.volume
            )));
        }

        if self.server.timeout_secs == 0 {
            return Err(CliError::Config("Request timeout must be positive".to_string()));
        }

        Ok(())
    }

    /// Client configuration for the HTTP gateway
    pub fn server_config(&self) -> ServerConfig {
        let config = match &self.server.access_token {
            Some(token) if !token.is_empty() => {
                ServerConfig::with_token(self.server.url.clone(), token.clone())
            }
            _ => ServerConfig::new(self.server.url.clone()),
        };
        config.timeout(Duration::from_secs(self.server.timeout_secs))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_config(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new()
            .suffix(".toml")
            .tempfile()
            .unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn defaults_are_valid() {
        let config = CliConfig::default();
        assert_eq!(config.server.url, "http://localhost:5000");
        assert_eq!(config.player.volume, 75);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn loads_sections_from_file() {
        let file = write_config(
            r#"
[server]
url = "https://music.example.com"
access_token = "secret"

[player]
volume = 40
top_limit = 5
"#,
        );

        let config = CliConfig::load(Some(file.path())).unwrap();

        assert_eq!(config.server.url, "https://music.example.com");
        assert_eq!(config.server.access_token.as_deref(), Some("secret"));
        assert_eq!(config.player.volume, 40);
        assert_eq!(config.player.top_limit, 5);
        assert_eq!(config.player.suggested_limit, 20);
    }

    #[test]
    fn missing_explicit_file_is_an_error() {
        let result = CliConfig::load(Some(Path::new("/nonexistent/tune.toml")));
        assert!(matches!(result, Err(CliError::Config(_))));
    }

    #[test]
    fn rejects_bad_url() {
        let mut config = CliConfig::default();
        config.server.url = "not a url".into();
        assert!(config.validate().is_err());

        config.server.url = "ftp://music.example.com".into();
        assert!(config.validate().is_err());

        config.server.url = "   ".into();
        assert!(config.validate().is_err());
    }

    #[test]
    fn rejects_out_of_range_volume() {
        let mut config = CliConfig::default();
        config.player.volume = 101;
        assert!(config.validate().is_err());
    }

    #[test]
    fn empty_token_means_anonymous() {
        let mut config = CliConfig::default();
        config.server.access_token = Some(String::new());
        assert!(config.server_config().access_token.is_none());

        config.server.access_token = Some("abc".into());
        assert_eq!(config.server_config().access_token.as_deref(), Some("abc"));
    }
}
