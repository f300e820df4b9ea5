//! Configuration management for wpub.
//!
//! Parses the `wordpress_config.json` credentials file with serde. The file is
//! looked up next to the running executable unless an explicit path is given.
//!
//! CLI settings can be applied during load via [`CliSettings`].
//!
//! ## Environment Variable Expansion
//!
//! String configuration values support environment variable expansion:
//!
//! - `${VAR}` - expands to the value of VAR, errors if unset
//! - `${VAR:-default}` - expands to VAR if set, otherwise uses default
//!
//! Expanded fields:
//! - `wordpress_site_url`
//! - `wordpress_user`
//! - `wordpress_pass`

mod expand;

use std::fmt;
use std::path::{Path, PathBuf};

use serde::Deserialize;

/// Configuration filename to search for.
pub const CONFIG_FILENAME: &str = "wordpress_config.json";

/// Local path of the intermediate bitmap when none is configured.
pub const DEFAULT_IMAGE_FILE: &str = "comfyui_output.png";

/// CLI settings that override configuration file values.
///
/// All fields are optional. Only non-None values override the loaded config.
#[derive(Debug, Default)]
pub struct CliSettings {
    /// Override the intermediate bitmap path.
    pub image_file: Option<PathBuf>,
}

/// Raw configuration as parsed from JSON.
///
/// Every field is optional here so that missing and empty values produce
/// the same validation error.
#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct ConfigRaw {
    wordpress_site_url: Option<String>,
    wordpress_user: Option<String>,
    wordpress_pass: Option<String>,
    image_file: Option<String>,
}

/// Basic-auth credentials for the WordPress REST API.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    /// Account name.
    pub user: String,
    /// Account password (usually a WordPress application password).
    pub pass: String,
}

impl Credentials {
    /// Create credentials from a user/password pair.
    #[must_use]
    pub fn new(user: impl Into<String>, pass: impl Into<String>) -> Self {
        Self {
            user: user.into(),
            pass: pass.into(),
        }
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("user", &self.user)
            .field("pass", &"<redacted>")
            .finish()
    }
}

/// Application configuration.
#[derive(Debug)]
pub struct Config {
    /// WordPress site base URL (without the `/wp-json` suffix).
    pub site_url: String,
    /// Credentials used for every API call.
    pub credentials: Credentials,
    /// Where the intermediate bitmap is written before upload.
    pub image_file: PathBuf,
    /// Path to the config file (set after loading).
    pub config_path: Option<PathBuf>,
}

/// Configuration error.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// File not found.
    #[error("wordpress_config.json file not found at: {}", .0.display())]
    NotFound(PathBuf),
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// JSON parsing error.
    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),
    /// Validation error.
    #[error("Configuration error: {0}")]
    Validation(String),
    /// Environment variable error during expansion.
    #[error("Environment variable error in {field}: {message}")]
    EnvVar {
        /// Config field name (e.g., "`wordpress_pass`").
        field: String,
        /// Error message (e.g., "${`WP_PASS`} not set").
        message: String,
    },
}

/// Require a value to be present and non-empty.
fn require_value(value: Option<String>, field: &str) -> Result<String, ConfigError> {
    match value {
        Some(v) if !v.is_empty() => Ok(v),
        _ => Err(ConfigError::Validation(format!(
            "Key '{field}' must have a value in {CONFIG_FILENAME}."
        ))),
    }
}

/// Require a URL field to use http:// or https:// scheme.
fn require_http_url(url: &str, field: &str) -> Result<(), ConfigError> {
    if !url.starts_with("http://") && !url.starts_with("https://") {
        return Err(ConfigError::Validation(format!(
            "{field} must start with http:// or https://"
        )));
    }
    Ok(())
}

impl Config {
    /// Load configuration from file with optional CLI settings.
    ///
    /// If `config_path` is provided, loads from that file.
    /// Otherwise, loads `wordpress_config.json` from the directory of the
    /// running executable.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::NotFound`] if the file does not exist, and
    /// [`ConfigError::Validation`] if a required value is missing or empty.
    pub fn load(
        config_path: Option<&Path>,
        cli_settings: Option<&CliSettings>,
    ) -> Result<Self, ConfigError> {
        let path = match config_path {
            Some(path) => path.to_path_buf(),
            None => Self::default_path()?,
        };
        if !path.exists() {
            return Err(ConfigError::NotFound(path));
        }

        let mut config = Self::load_from_file(&path)?;

        if let Some(settings) = cli_settings {
            config.apply_cli_settings(settings);
        }

        Ok(config)
    }

    /// Default config location: next to the running executable.
    pub fn default_path() -> Result<PathBuf, ConfigError> {
        let exe = std::env::current_exe()?;
        let dir = exe.parent().unwrap_or(Path::new("."));
        Ok(dir.join(CONFIG_FILENAME))
    }

    /// Parse and validate configuration from a JSON string.
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON is malformed, an environment variable
    /// reference cannot be expanded, or validation fails.
    pub fn from_json(content: &str) -> Result<Self, ConfigError> {
        let mut raw: ConfigRaw = serde_json::from_str(content)?;
        raw.expand_env_vars()?;

        let site_url = require_value(raw.wordpress_site_url, "wordpress_site_url")?;
        require_http_url(&site_url, "wordpress_site_url")?;
        let user = require_value(raw.wordpress_user, "wordpress_user")?;
        let pass = require_value(raw.wordpress_pass, "wordpress_pass")?;

        let image_file = raw
            .image_file
            .filter(|f| !f.is_empty())
            .unwrap_or_else(|| DEFAULT_IMAGE_FILE.to_owned());

        Ok(Self {
            site_url,
            credentials: Credentials { user, pass },
            image_file: PathBuf::from(image_file),
            config_path: None,
        })
    }

    /// Load configuration from a specific file.
    fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let mut config = Self::from_json(&content)?;
        config.config_path = Some(path.to_path_buf());
        Ok(config)
    }

    /// Apply CLI settings to the configuration.
    fn apply_cli_settings(&mut self, settings: &CliSettings) {
        if let Some(image_file) = &settings.image_file {
            self.image_file.clone_from(image_file);
        }
    }
}

impl ConfigRaw {
    /// Expand environment variable references in configuration strings.
    fn expand_env_vars(&mut self) -> Result<(), ConfigError> {
        let fields = [
            (&mut self.wordpress_site_url, "wordpress_site_url"),
            (&mut self.wordpress_user, "wordpress_user"),
            (&mut self.wordpress_pass, "wordpress_pass"),
        ];
        for (value, field) in fields {
            if let Some(v) = value {
                *v = expand::expand_env(v, field)?;
            }
        }
        Ok(())
    }
}
