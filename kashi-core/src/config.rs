use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct KashiConfig {
    #[serde(default)]
    pub search: SearchConfig,
    #[serde(default)]
    pub http: HttpConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchConfig {
    /// Source priority: sources are tried in order
    #[serde(default = "default_sources")]
    pub sources: Vec<SiteKind>,
    /// Require exact artist equality when a search lists several songs
    #[serde(default)]
    pub strict: bool,
}

fn default_sources() -> Vec<SiteKind> {
    vec![
        SiteKind::JLyric,
        SiteKind::UtaNet,
        SiteKind::PetitLyrics,
        SiteKind::JLyricTitle,
    ]
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            sources: default_sources(),
            strict: false,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SiteKind {
    JLyric,
    UtaNet,
    PetitLyrics,
    JLyricTitle,
}

impl SiteKind {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::JLyric => "j_lyric",
            Self::UtaNet => "uta_net",
            Self::PetitLyrics => "petit_lyrics",
            Self::JLyricTitle => "j_lyric_title",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HttpConfig {
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
    #[serde(default = "default_connect_timeout")]
    pub connect_timeout_secs: u64,
    /// Retries for transient transport failures only
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

const fn default_timeout() -> u64 {
    10
}

const fn default_connect_timeout() -> u64 {
    5
}

const fn default_max_retries() -> u32 {
    3
}

fn default_user_agent() -> String {
    concat!("kashi/", env!("CARGO_PKG_VERSION")).to_string()
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout_secs: default_timeout(),
            connect_timeout_secs: default_connect_timeout(),
            max_retries: default_max_retries(),
            user_agent: default_user_agent(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Directory lyrics files are written to
    #[serde(default = "default_output_dir")]
    pub dir: PathBuf,
    /// Report transport failures per record instead of aborting the batch
    #[serde(default = "default_true")]
    pub continue_on_error: bool,
}

fn default_output_dir() -> PathBuf {
    PathBuf::from("lyrics")
}

const fn default_true() -> bool {
    true
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            dir: default_output_dir(),
            continue_on_error: default_true(),
        }
    }
}

impl KashiConfig {
    /// Get the config file path (~/.config/kashi/config.toml)
    #[must_use]
    pub fn config_path() -> PathBuf {
        crate::paths::config_path()
    }

    /// Parse and validate a config from TOML text.
    ///
    /// # Errors
    ///
    /// Returns an error if the text is not valid TOML or fails validation.
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load config from `path`, or from the default location when `path` is `None`.
    ///
    /// A missing file at the default location yields the default config; a
    /// missing file at an explicit path is an error.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, parsed, or validated.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let (path, explicit) = match path {
            Some(path) => (path.to_path_buf(), true),
            None => (Self::config_path(), false),
        };

        if !explicit && !path.exists() {
            debug!("No config at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&path).map_err(|source| ConfigError::Io {
            path: path.clone(),
            source,
        })?;
        debug!("Loaded config from {}", path.display());
        Self::parse(&content)
    }

    /// Check cross-field constraints.
    ///
    /// # Errors
    ///
    /// Returns an error if no source is configured or a timeout is zero.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.search.sources.is_empty() {
            return Err(ConfigError::Invalid {
                message: "search.sources must list at least one source".to_string(),
            });
        }
        if self.http.timeout_secs == 0 || self.http.connect_timeout_secs == 0 {
            return Err(ConfigError::Invalid {
                message: "http timeouts must be greater than zero".to_string(),
            });
        }
        Ok(())
    }
}
