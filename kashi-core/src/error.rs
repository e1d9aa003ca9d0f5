use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SearchError {
    // Domain outcome, recovered by every fallback layer
    #[error("Lyrics not found for track: {title} by {artist}")]
    NotFound { title: String, artist: String },

    // Descriptor errors
    #[error("Site {site} is unusable: {field} is empty")]
    InvalidDescriptor { site: String, field: &'static str },

    #[error("Site {site} has an invalid selector {selector:?}: {reason}")]
    InvalidSelector {
        site: String,
        selector: String,
        reason: String,
    },

    #[error("Site {site} has an invalid post-processing pattern: {reason}")]
    InvalidPattern { site: String, reason: String },

    // Network errors
    #[error("Network request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Network request failed: {0}")]
    Middleware(#[from] reqwest_middleware::Error),

    // IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl SearchError {
    /// Build a not-found outcome for the given title and artist
    pub fn not_found(title: impl Into<String>, artist: impl Into<String>) -> Self {
        Self::NotFound {
            title: title.into(),
            artist: artist.into(),
        }
    }

    /// Check whether this is the recoverable not-found outcome
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Invalid config: {message}")]
    Invalid { message: String },
}
