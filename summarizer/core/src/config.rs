//! Client Configuration
//!
//! Layered configuration for the summarizer client. Later layers win:
//!
//! 1. Built-in defaults
//! 2. TOML file (`$XDG_CONFIG_HOME/emotion-summarizer/config.toml`, or an
//!    explicit path)
//! 3. Environment variables
//!
//! Surfaces may apply their own overrides (CLI flags) on top of the result.
//!
//! # File Format
//!
//! ```toml
//! [service]
//! base_url = "http://localhost:8000"
//! probe_timeout_secs = 5
//! request_timeout_secs = 120   # 0 disables the deadline
//!
//! [submission]
//! pending_policy = "reject"    # or "supersede"
//! max_text_chars = 100000   # optional cap, 0 or absent = no cap
//! default_max_length = 150
//! ```
//!
//! # Environment Variables
//!
//! - `SUMMARIZER_API_URL`
//! - `SUMMARIZER_PROBE_TIMEOUT_SECS`
//! - `SUMMARIZER_REQUEST_TIMEOUT_SECS`
//! - `SUMMARIZER_PENDING_POLICY`
//! - `SUMMARIZER_MAX_TEXT_CHARS`

use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::backend::BackendConfig;
use crate::submission::SubmissionLimits;

/// Directory name under the XDG config dir
const APP_DIR: &str = "emotion-summarizer";

/// What `submit` does while a request is already pending
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PendingPolicy {
    /// Refuse the new submission
    #[default]
    Reject,
    /// Start a new generation; the old response is discarded when it lands
    Supersede,
}

impl FromStr for PendingPolicy {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "reject" => Ok(Self::Reject),
            "supersede" => Ok(Self::Supersede),
            _ => Err(ConfigError::InvalidValue {
                key: "pending_policy".to_string(),
                value: s.to_string(),
            }),
        }
    }
}

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Config file could not be read
    #[error("failed to read config file {path}: {source}")]
    Io {
        /// File path
        path: PathBuf,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },

    /// Config file is not valid TOML for this schema
    #[error("failed to parse config file {path}: {source}")]
    Parse {
        /// File path
        path: PathBuf,
        /// Underlying error
        #[source]
        source: toml::de::Error,
    },

    /// A setting has a value outside its domain
    #[error("invalid value for {key}: {value:?}")]
    InvalidValue {
        /// Setting name
        key: String,
        /// Offending value
        value: String,
    },
}

/// `[service]` table
#[derive(Clone, Debug, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct ServiceSection {
    /// Base URL of the summarization API
    pub base_url: Option<String>,
    /// Per-probe deadline in seconds
    pub probe_timeout_secs: Option<u64>,
    /// Per-submission deadline in seconds (0 disables)
    pub request_timeout_secs: Option<u64>,
}

/// `[submission]` table
#[derive(Clone, Debug, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct SubmissionSection {
    /// "reject" or "supersede"
    pub pending_policy: Option<String>,
    /// Maximum text length in characters
    pub max_text_chars: Option<usize>,
    /// Summary length used when none is given
    pub default_max_length: Option<u32>,
}

/// On-disk configuration file
#[derive(Clone, Debug, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct ClientToml {
    /// Service connection settings
    pub service: ServiceSection,
    /// Submission settings
    pub submission: SubmissionSection,
}

/// Resolved client configuration
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ClientConfig {
    /// Base URL of the summarization API
    pub base_url: String,
    /// Deadline for each capability probe
    pub probe_timeout: Option<Duration>,
    /// Deadline for each submission
    pub request_timeout: Option<Duration>,
    /// Behaviour of `submit` while pending
    pub pending_policy: PendingPolicy,
    /// Submission limits
    pub limits: SubmissionLimits,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: BackendConfig::default().base_url,
            probe_timeout: Some(Duration::from_secs(5)),
            request_timeout: Some(Duration::from_secs(120)),
            pending_policy: PendingPolicy::Reject,
            limits: SubmissionLimits::default(),
        }
    }
}

impl ClientConfig {
    /// Create configuration from defaults and environment variables
    #[must_use]
    pub fn from_env() -> Self {
        let mut config = Self::default();
        config.apply_env_with(|key| std::env::var(key).ok());
        config
    }

    /// Backend connection settings derived from this config
    #[must_use]
    pub fn backend(&self) -> BackendConfig {
        BackendConfig::new(self.base_url.clone())
    }

    /// Apply values present in a config file
    pub fn apply_file(&mut self, file: &ClientToml) -> Result<(), ConfigError> {
        if let Some(ref url) = file.service.base_url {
            self.base_url.clone_from(url);
        }
        if let Some(secs) = file.service.probe_timeout_secs {
            self.probe_timeout = timeout_from_secs(secs);
        }
        if let Some(secs) = file.service.request_timeout_secs {
            self.request_timeout = timeout_from_secs(secs);
        }
        if let Some(ref policy) = file.submission.pending_policy {
            self.pending_policy = policy.parse()?;
        }
        if let Some(max) = file.submission.max_text_chars {
            self.limits.max_text_chars = cap_from_chars(max);
        }
        if let Some(len) = file.submission.default_max_length {
            self.limits.default_max_length = len;
        }
        Ok(())
    }

    /// Apply environment overrides read through `lookup`.
    ///
    /// Unparseable values are ignored with a warning and the lower layer wins.
    pub fn apply_env_with<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = lookup("SUMMARIZER_API_URL").filter(|u| !u.trim().is_empty()) {
            self.base_url = url;
        }
        if let Some(secs) = parse_env::<u64>(&lookup, "SUMMARIZER_PROBE_TIMEOUT_SECS") {
            self.probe_timeout = timeout_from_secs(secs);
        }
        if let Some(secs) = parse_env::<u64>(&lookup, "SUMMARIZER_REQUEST_TIMEOUT_SECS") {
            self.request_timeout = timeout_from_secs(secs);
        }
        if let Some(policy) = parse_env::<PendingPolicy>(&lookup, "SUMMARIZER_PENDING_POLICY") {
            self.pending_policy = policy;
        }
        if let Some(max) = parse_env::<usize>(&lookup, "SUMMARIZER_MAX_TEXT_CHARS") {
            self.limits.max_text_chars = cap_from_chars(max);
        }
    }
}

fn timeout_from_secs(secs: u64) -> Option<Duration> {
    (secs > 0).then(|| Duration::from_secs(secs))
}

fn cap_from_chars(max: usize) -> Option<usize> {
    (max > 0).then_some(max)
}

fn parse_env<T: FromStr>(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> Option<T> {
    let raw = lookup(key)?;
    match raw.trim().parse() {
        Ok(value) => Some(value),
        Err(_) => {
            tracing::warn!(key, value = %raw, "Ignoring invalid environment value");
            None
        }
    }
}

/// Default config file location
#[must_use]
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join(APP_DIR).join("config.toml"))
}

/// Read and parse a config file
pub fn load_config_from_path(path: &Path) -> Result<ClientToml, ConfigError> {
    let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    toml::from_str(&contents).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

/// Resolve the full configuration.
///
/// An explicit `path` must exist. Without one, the default location is used
/// only if a file is there.
pub fn load_config(path: Option<&Path>) -> Result<ClientConfig, ConfigError> {
    let mut config = ClientConfig::default();

    let file = match path {
        Some(path) => Some(load_config_from_path(path)?),
        None => match default_config_path().filter(|p| p.is_file()) {
            Some(default_path) => Some(load_config_from_path(&default_path)?),
            None => None,
        },
    };

    if let Some(ref file) = file {
        config.apply_file(file)?;
    }
    config.apply_env_with(|key| std::env::var(key).ok());

    tracing::debug!(
        base_url = %config.base_url,
        policy = ?config.pending_policy,
        "Configuration resolved"
    );
    Ok(config)
}
