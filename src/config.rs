use anyhow::{Context, Result};
use log::{debug, info};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

use crate::api::constants::{DEFAULT_CONNECT_TIMEOUT_SECS, DEFAULT_TIMEOUT_SECS};
use crate::cli::GlobalArgs;
use crate::output::OutputFormat;

pub const ENV_URL: &str = "QUARK_URL";
pub const ENV_TOKEN: &str = "QUARK_TOKEN";
pub const ENV_TIMEOUT: &str = "QUARK_TIMEOUT";
pub const ENV_LOG_FILE: &str = "QUARK_LOG_FILE";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Networking service endpoint, e.g. "https://network.example.com:9696/v2.0"
    pub endpoint: Option<String>,
    pub token: Option<String>,
    pub timeout_secs: u64,
    pub connect_timeout_secs: u64,
    pub format: OutputFormat,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            endpoint: None,
            token: None,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            connect_timeout_secs: DEFAULT_CONNECT_TIMEOUT_SECS,
            format: OutputFormat::default(),
        }
    }
}

impl Config {
    pub fn get_config_path() -> Result<PathBuf> {
        let config_dir = if cfg!(target_os = "linux") {
            // Use XDG config directory on Linux
            dirs::config_dir()
                .context("Failed to get XDG config directory")?
                .join("quark-cli")
        } else {
            // Use home directory with dot prefix on Windows/Mac
            dirs::home_dir()
                .context("Failed to get home directory")?
                .join(".quark-cli")
        };

        Ok(config_dir.join("config.toml"))
    }

    /// Load the config file, falling back to defaults when it does not exist
    pub fn load() -> Result<Self> {
        let config_path = Self::get_config_path()?;
        debug!("Loading config from: {:?}", config_path);

        if !config_path.exists() {
            info!("Config file doesn't exist, using defaults");
            return Ok(Self::default());
        }

        let config_content = fs::read_to_string(&config_path)
            .with_context(|| format!("Failed to read config file: {:?}", config_path))?;

        Self::from_toml_str(&config_content)
            .with_context(|| format!("Failed to parse config file: {:?}", config_path))
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        toml::from_str(content).context("Invalid config TOML")
    }

    /// Apply `.env` and process environment overrides
    pub fn apply_env(&mut self) -> Result<()> {
        // Load .env file if it exists
        dotenvy::dotenv().ok();
        self.apply_env_vars(|key| std::env::var(key).ok())
    }

    /// Apply overrides from an environment lookup
    pub fn apply_env_vars(&mut self, lookup: impl Fn(&str) -> Option<String>) -> Result<()> {
        if let Some(url) = lookup(ENV_URL) {
            self.endpoint = Some(url);
        }
        if let Some(token) = lookup(ENV_TOKEN) {
            self.token = Some(token);
        }
        if let Some(timeout) = lookup(ENV_TIMEOUT) {
            self.timeout_secs = timeout
                .trim()
                .parse()
                .with_context(|| format!("{} must be a number of seconds, got '{}'", ENV_TIMEOUT, timeout))?;
        }
        Ok(())
    }

    /// Apply global command-line options, which win over everything else
    pub fn apply_args(&mut self, args: &GlobalArgs) {
        if let Some(url) = &args.os_url {
            self.endpoint = Some(url.clone());
        }
        if let Some(token) = &args.os_token {
            self.token = Some(token.clone());
        }
        if let Some(format) = args.format {
            self.format = format;
        }
        if let Some(timeout) = args.timeout {
            self.timeout_secs = timeout;
        }
    }

    pub fn endpoint(&self) -> Result<&str> {
        self.endpoint
            .as_deref()
            .filter(|endpoint| !endpoint.is_empty())
            .ok_or_else(|| {
                anyhow::anyhow!(
                    "No endpoint configured. Use --os-url, set {} or add 'endpoint' to the config file.",
                    ENV_URL
                )
            })
    }

    pub fn token(&self) -> Result<&str> {
        self.token
            .as_deref()
            .filter(|token| !token.is_empty())
            .ok_or_else(|| {
                anyhow::anyhow!(
                    "No token configured. Use --os-token, set {} or add 'token' to the config file.",
                    ENV_TOKEN
                )
            })
    }
}

/// Log file chosen before the config file is read, so its loading is logged too.
///
/// `--log-file` wins over `QUARK_LOG_FILE`; `None` logs to stderr.
pub fn log_file(args: &GlobalArgs, lookup: impl Fn(&str) -> Option<String>) -> Option<PathBuf> {
    args.log_file.clone().or_else(|| {
        lookup(ENV_LOG_FILE)
            .filter(|path| !path.trim().is_empty())
            .map(PathBuf::from)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn empty_file_gives_defaults() {
        let config = Config::from_toml_str("").unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.timeout_secs, 30);
        assert_eq!(config.format, OutputFormat::Table);
    }

    #[test]
    fn reads_all_fields() {
        let config = Config::from_toml_str(
            r#"
            endpoint = "http://neutron:9696/v2.0"
            token = "secret"
            timeout_secs = 5
            format = "csv"
            "#,
        )
        .unwrap();

        assert_eq!(config.endpoint().unwrap(), "http://neutron:9696/v2.0");
        assert_eq!(config.token().unwrap(), "secret");
        assert_eq!(config.timeout_secs, 5);
        assert_eq!(config.connect_timeout_secs, 10);
        assert_eq!(config.format, OutputFormat::Csv);
    }

    #[test]
    fn unknown_format_is_rejected() {
        assert!(Config::from_toml_str("format = \"yaml\"").is_err());
    }

    #[test]
    fn environment_then_arguments_override_file() {
        let mut config = Config::from_toml_str("endpoint = \"http://file\"\ntoken = \"file\"").unwrap();
        let env: HashMap<&str, &str> = [(ENV_URL, "http://env"), (ENV_TIMEOUT, "12")].into();
        config.apply_env_vars(|key| env.get(key).map(|value| value.to_string())).unwrap();

        assert_eq!(config.endpoint().unwrap(), "http://env");
        assert_eq!(config.token().unwrap(), "file");
        assert_eq!(config.timeout_secs, 12);

        config.apply_args(&GlobalArgs {
            os_token: Some("cli".into()),
            format: Some(OutputFormat::Json),
            ..GlobalArgs::default()
        });
        assert_eq!(config.endpoint().unwrap(), "http://env");
        assert_eq!(config.token().unwrap(), "cli");
        assert_eq!(config.format, OutputFormat::Json);
    }

    #[test]
    fn log_file_argument_wins_over_environment() {
        let env = |key: &str| (key == ENV_LOG_FILE).then(|| "/tmp/env.log".to_string());

        assert_eq!(log_file(&GlobalArgs::default(), env), Some(PathBuf::from("/tmp/env.log")));

        let args = GlobalArgs {
            log_file: Some(PathBuf::from("/tmp/cli.log")),
            ..GlobalArgs::default()
        };
        assert_eq!(log_file(&args, env), Some(PathBuf::from("/tmp/cli.log")));

        assert_eq!(log_file(&GlobalArgs::default(), |_| Some(" ".to_string())), None);
    }

    #[test]
    fn bad_timeout_is_an_error() {
        let mut config = Config::default();
        assert!(config.apply_env_vars(|key| (key == ENV_TIMEOUT).then(|| "soon".to_string())).is_err());
    }

    #[test]
    fn missing_credentials_are_reported() {
        let config = Config::default();
        assert!(config.endpoint().unwrap_err().to_string().contains("--os-url"));
        assert!(config.token().unwrap_err().to_string().contains(ENV_TOKEN));
    }
}
