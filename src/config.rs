//! Run configuration
//!
//! Settings are layered: built-in defaults, then an optional `config.toml`,
//! then [`ConfigOverrides`] taken from the command line. See [`resolve`].
//!
//! ```toml
//! base_url = "http://localhost:5000"
//!
//! [admin]
//! email = "admin@taakra.com"
//! password = "123456"
//!
//! [http]
//! connect_timeout_secs = 10
//! request_timeout_secs = 30
//! ```

use serde::Deserialize;
use std::path::{Path, PathBuf};
use thiserror::Error;

pub const DEFAULT_BASE_URL: &str = "http://localhost:5000";
pub const DEFAULT_ADMIN_EMAIL: &str = "admin@taakra.com";
pub const DEFAULT_ADMIN_PASSWORD: &str = "123456";
pub const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 10;
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

const CONFIG_DIR_NAME: &str = "taakra-smoke";
const CONFIG_FILE_NAME: &str = "config.toml";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("base URL must start with http:// or https://, got '{0}'")]
    InvalidBaseUrl(String),

    #[error("{0} must not be empty")]
    Empty(&'static str),

    #[error("{0} must be greater than zero")]
    ZeroTimeout(&'static str),
}

/// Timeouts for the blocking HTTP client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpConfig {
    pub connect_timeout_secs: u64,
    pub request_timeout_secs: u64,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            connect_timeout_secs: DEFAULT_CONNECT_TIMEOUT_SECS,
            request_timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
        }
    }
}

/// Target service and administrator credentials for one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub base_url: String,
    pub admin_email: String,
    pub admin_password: String,
    pub http: HttpConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            admin_email: DEFAULT_ADMIN_EMAIL.to_string(),
            admin_password: DEFAULT_ADMIN_PASSWORD.to_string(),
            http: HttpConfig::default(),
        }
    }
}

/// On-disk shape; every key is optional.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct ConfigFile {
    base_url: Option<String>,
    #[serde(default)]
    admin: AdminSection,
    #[serde(default)]
    http: HttpSection,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct AdminSection {
    email: Option<String>,
    password: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct HttpSection {
    connect_timeout_secs: Option<u64>,
    request_timeout_secs: Option<u64>,
}

impl Config {
    /// Load a config file, filling missing keys from the defaults.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Load the explicit file if given, otherwise the per-user file when it exists,
    /// otherwise the defaults.
    pub fn discover(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        if let Some(path) = explicit {
            return Self::load(path);
        }
        match default_config_path() {
            Some(path) if path.is_file() => Self::load(&path),
            _ => Ok(Self::default()),
        }
    }

    fn from_toml_str(content: &str) -> Result<Self, toml::de::Error> {
        let file: ConfigFile = toml::from_str(content)?;
        let defaults = Self::default();

        Ok(Self {
            base_url: file.base_url.unwrap_or(defaults.base_url),
            admin_email: file.admin.email.unwrap_or(defaults.admin_email),
            admin_password: file.admin.password.unwrap_or(defaults.admin_password),
            http: HttpConfig {
                connect_timeout_secs: file
                    .http
                    .connect_timeout_secs
                    .unwrap_or(defaults.http.connect_timeout_secs),
                request_timeout_secs: file
                    .http
                    .request_timeout_secs
                    .unwrap_or(defaults.http.request_timeout_secs),
            },
        })
    }

    /// Check invariants and normalize the base URL (no trailing slash).
    pub fn validate(mut self) -> Result<Self, ConfigError> {
        let trimmed = self.base_url.trim().trim_end_matches('/').to_string();
        if !(trimmed.starts_with("http://") || trimmed.starts_with("https://")) {
            return Err(ConfigError::InvalidBaseUrl(self.base_url));
        }
        self.base_url = trimmed;

        if self.admin_email.trim().is_empty() {
            return Err(ConfigError::Empty("admin email"));
        }
        if self.admin_password.is_empty() {
            return Err(ConfigError::Empty("admin password"));
        }
        if self.http.connect_timeout_secs == 0 {
            return Err(ConfigError::ZeroTimeout("connect timeout"));
        }
        if self.http.request_timeout_secs == 0 {
            return Err(ConfigError::ZeroTimeout("request timeout"));
        }

        Ok(self)
    }
}

/// Values given on the command line; each one replaces the file/default value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigOverrides {
    pub base_url: Option<String>,
    pub admin_email: Option<String>,
    pub admin_password: Option<String>,
    pub request_timeout_secs: Option<u64>,
}

impl ConfigOverrides {
    pub fn apply(self, mut config: Config) -> Config {
        if let Some(url) = self.base_url {
            config.base_url = url;
        }
        if let Some(email) = self.admin_email {
            config.admin_email = email;
        }
        if let Some(password) = self.admin_password {
            config.admin_password = password;
        }
        if let Some(secs) = self.request_timeout_secs {
            config.http.request_timeout_secs = secs;
        }
        config
    }
}

/// Defaults, then the config file, then `overrides`; validated.
pub fn resolve(
    config_path: Option<&Path>,
    overrides: ConfigOverrides,
) -> Result<Config, ConfigError> {
    let config = Config::discover(config_path)?;
    overrides.apply(config).validate()
}

/// `<config_dir>/taakra-smoke/config.toml`, if the platform has a config dir.
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join(CONFIG_DIR_NAME).join(CONFIG_FILE_NAME))
}
