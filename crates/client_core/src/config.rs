use std::{
    fs, io,
    path::{Path, PathBuf},
};

use serde::Deserialize;
use thiserror::Error;
use url::Url;

pub const DEFAULT_SERVER_URL: &str = "http://192.168.0.102:5000";
pub const DEFAULT_LOG_FILTER: &str = "info";
pub const CONFIG_FILE_NAME: &str = "contact_book.toml";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file '{}': {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("invalid config file '{}': {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
    #[error("invalid server url '{url}': {reason}")]
    InvalidServerUrl { url: String, reason: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreSettings {
    pub server_url: Url,
    pub log_filter: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct FileSettings {
    server_url: Option<String>,
    log_filter: Option<String>,
}

impl StoreSettings {
    /// Defaults, then the config file, then environment, then `server_url_override`.
    ///
    /// Without `config_path` the file is looked up as `./contact_book.toml` and
    /// then under the platform config directory; a missing file is not an error.
    pub fn load(
        config_path: Option<&Path>,
        server_url_override: Option<&str>,
    ) -> Result<Self, ConfigError> {
        let file = match config_path {
            Some(path) => read_file_settings(path)?,
            None => discover_file_settings()?,
        };
        resolve(file, |name| std::env::var(name).ok(), server_url_override)
    }
}

fn candidate_paths() -> Vec<PathBuf> {
    let mut paths = vec![PathBuf::from(CONFIG_FILE_NAME)];
    if let Some(config_dir) = dirs::config_dir() {
        paths.push(config_dir.join("contact_book").join(CONFIG_FILE_NAME));
    }
    paths
}

fn discover_file_settings() -> Result<FileSettings, ConfigError> {
    for path in candidate_paths() {
        if path.is_file() {
            tracing::debug!(path = %path.display(), "using config file");
            return read_file_settings(&path);
        }
    }
    Ok(FileSettings::default())
}

fn read_file_settings(path: &Path) -> Result<FileSettings, ConfigError> {
    let raw = fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    toml::from_str(&raw).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

fn resolve(
    file: FileSettings,
    env: impl Fn(&str) -> Option<String>,
    server_url_override: Option<&str>,
) -> Result<StoreSettings, ConfigError> {
    let mut server_url = DEFAULT_SERVER_URL.to_string();
    let mut log_filter = DEFAULT_LOG_FILTER.to_string();

    if let Some(v) = file.server_url {
        server_url = v;
    }
    if let Some(v) = file.log_filter {
        log_filter = v;
    }

    if let Some(v) = env("CONTACT_BOOK_SERVER_URL") {
        server_url = v;
    }
    if let Some(v) = env("APP__SERVER_URL") {
        server_url = v;
    }

    if let Some(v) = env("CONTACT_BOOK_LOG") {
        log_filter = v;
    }
    if let Some(v) = env("APP__LOG_FILTER") {
        log_filter = v;
    }

    if let Some(v) = server_url_override {
        server_url = v.to_string();
    }

    Ok(StoreSettings {
        server_url: parse_server_url(&server_url)?,
        log_filter,
    })
}

pub fn parse_server_url(raw: &str) -> Result<Url, ConfigError> {
    let raw = raw.trim();
    let url = Url::parse(raw).map_err(|err| ConfigError::InvalidServerUrl {
        url: raw.to_string(),
        reason: err.to_string(),
    })?;
    check_server_url(url)
}

/// Accepts only http(s) base URLs, which always carry a path that ids can be
/// appended to.
pub fn check_server_url(url: Url) -> Result<Url, ConfigError> {
    if !matches!(url.scheme(), "http" | "https") || url.cannot_be_a_base() {
        return Err(ConfigError::InvalidServerUrl {
            url: url.to_string(),
            reason: "scheme must be http or https".to_string(),
        });
    }
    Ok(url)
}

#[cfg(test)]
#[path = "tests/config_tests.rs"]
mod tests;
