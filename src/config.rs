use anyhow::Context;
use secrecy::SecretString;
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Environment variable that overrides the default config file location.
pub const CONFIG_PATH_ENV: &str = "PASSPORT_CONNECTOR_CONFIG";

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub api: ApiConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ApiConfig {
    /// Base URL of the passport API, e.g. "https://passport.example.com"
    pub base_url: String,
    /// Optional bearer token sent with every request
    pub api_token: Option<SecretString>,
    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    pub level: String,
    pub format: String,
}

fn default_timeout_seconds() -> u64 {
    30
}

impl Config {
    /// Load configuration from `$PASSPORT_CONNECTOR_CONFIG`, falling back to
    /// the platform config directory (e.g. `~/.config/passport-connector/config.toml`).
    pub fn load() -> anyhow::Result<Self> {
        let path = match std::env::var_os(CONFIG_PATH_ENV) {
            Some(path) => PathBuf::from(path),
            None => default_config_path()?,
        };
        Self::from_path(&path)
    }

    pub fn from_path(path: &Path) -> anyhow::Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("reading config file {}", path.display()))?;
        let config: Config = toml::from_str(&raw)
            .with_context(|| format!("parsing config file {}", path.display()))?;
        Ok(config)
    }
}

fn default_config_path() -> anyhow::Result<PathBuf> {
    let dirs = directories::ProjectDirs::from("", "", "passport-connector")
        .context("could not determine platform config directory")?;
    Ok(dirs.config_dir().join("config.toml"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use secrecy::ExposeSecret;
    use std::io::Write;

    const VALID_CONFIG: &str = r#"
        [api]
        base_url = "https://passport.example.com"
        api_token = "secret-token"
        timeout_seconds = 10

        [logging]
        level = "info"
        format = "compact"
    "#;

    #[test]
    fn parses_full_config() {
        let config: Config = toml::from_str(VALID_CONFIG).unwrap();

        assert_eq!(config.api.base_url, "https://passport.example.com");
        assert_eq!(
            config.api.api_token.unwrap().expose_secret(),
            "secret-token"
        );
        assert_eq!(config.api.timeout_seconds, 10);
        assert_eq!(config.logging.level, "info");
        assert_eq!(config.logging.format, "compact");
    }

    #[test]
    fn token_and_timeout_are_optional() {
        let config: Config = toml::from_str(
            r#"
            [api]
            base_url = "http://localhost:3000"

            [logging]
            level = "debug"
            format = "json"
            "#,
        )
        .unwrap();

        assert!(config.api.api_token.is_none());
        assert_eq!(config.api.timeout_seconds, 30);
    }

    #[test]
    fn missing_base_url_is_rejected() {
        let result: Result<Config, _> = toml::from_str(
            r#"
            [api]

            [logging]
            level = "info"
            format = "compact"
            "#,
        );

        assert!(result.is_err());
    }

    #[test]
    fn from_path_reads_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(VALID_CONFIG.as_bytes()).unwrap();

        let config = Config::from_path(file.path()).unwrap();
        assert_eq!(config.api.base_url, "https://passport.example.com");
    }

    #[test]
    fn from_path_missing_file_fails_with_path_in_message() {
        let result = Config::from_path(Path::new("/nonexistent/config.toml"));

        let error = result.unwrap_err();
        assert!(error.to_string().contains("/nonexistent/config.toml"));
    }

    #[test]
    fn secret_token_is_not_debug_printed() {
        let config: Config = toml::from_str(VALID_CONFIG).unwrap();
        let debug_output = format!("{:?}", config);
        assert!(!debug_output.contains("secret-token"));
    }
}
