//! Path constants for configuration and output files.

use std::path::{Path, PathBuf};

/// The name of the configuration directory under ~/.config/
pub const CONFIG_DIR_NAME: &str = "kashi";

/// The name of the main configuration file
pub const CONFIG_FILE_NAME: &str = "config.toml";

/// Get the configuration directory path (~/.config/kashi/)
#[must_use]
pub fn config_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".config")
        .join(CONFIG_DIR_NAME)
}

/// Get the config file path (~/.config/kashi/config.toml)
#[must_use]
pub fn config_path() -> PathBuf {
    config_dir().join(CONFIG_FILE_NAME)
}

/// File name for a song's lyrics: `<artist>-<title>` with `/` replaced by `_`
#[must_use]
pub fn lyrics_file_name(artist: &str, title: &str) -> String {
    format!("{artist}-{title}").replace('/', "_")
}

/// Get the lyrics file path for a song inside `dir`
#[must_use]
pub fn lyrics_path(dir: &Path, artist: &str, title: &str) -> PathBuf {
    dir.join(lyrics_file_name(artist, title))
}
