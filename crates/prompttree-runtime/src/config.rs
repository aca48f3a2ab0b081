use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const DEFAULT_API_URL: &str = "http://localhost:8080";
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

pub const PATH_ENV: &str = "PROMPTTREE_PATH";
pub const API_URL_ENV: &str = "PROMPTTREE_API_URL";

/// Where `config.toml` lives.
///
/// Checked in order: `--data-dir`, `PROMPTTREE_PATH`, the platform data
/// directory, then `~/.prompttree`.
pub fn resolve_data_dir(explicit: Option<&str>) -> Result<PathBuf> {
    let from_env = std::env::var(PATH_ENV).ok();
    let home = std::env::var_os("HOME").map(PathBuf::from);
    pick_data_dir(explicit, from_env.as_deref(), dirs::data_dir(), home.as_deref())
}

fn pick_data_dir(
    explicit: Option<&str>,
    from_env: Option<&str>,
    platform: Option<PathBuf>,
    home: Option<&Path>,
) -> Result<PathBuf> {
    let requested = explicit
        .or(from_env)
        .map(str::trim)
        .filter(|p| !p.is_empty());
    if let Some(raw) = requested {
        return Ok(home_relative(raw, home));
    }

    platform
        .map(|dir| dir.join("prompttree"))
        .or_else(|| home.map(|h| h.join(".prompttree")))
        .ok_or_else(|| {
            Error::Config("no data directory: set --data-dir or PROMPTTREE_PATH".to_string())
        })
}

/// `~` and `~/rest` resolve against `home`; anything else is taken as is
fn home_relative(raw: &str, home: Option<&Path>) -> PathBuf {
    match (raw, home) {
        ("~", Some(home)) => home.to_path_buf(),
        (_, Some(home)) if raw.starts_with("~/") => home.join(&raw[2..]),
        _ => PathBuf::from(raw),
    }
}

/// How a successful note creation is reflected locally.
///
/// Structural mutations always refetch the whole tree; notes live outside
/// the tree snapshot, so their strategy is configured separately.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NoteCreateStrategy {
    /// Put the returned note at the top of the in-memory list
    #[default]
    Prepend,
    /// Refetch the prompt's note list
    Refetch,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ConsistencyPolicy {
    #[serde(default)]
    pub note_create: NoteCreateStrategy,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_base_url() -> String {
    DEFAULT_API_URL.to_string()
}

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub consistency: ConsistencyPolicy,
}

impl Config {
    /// Missing file means defaults; a malformed one is an error
    pub fn load_from(path: &Path) -> Result<Self> {
        match std::fs::read_to_string(path) {
            Ok(text) => Ok(toml::from_str(&text)?),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(Self::default()),
            Err(err) => Err(err.into()),
        }
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        std::fs::write(path, toml::to_string_pretty(self)?)?;
        Ok(())
    }

    /// API base URL: explicit override, then PROMPTTREE_API_URL, then the file
    pub fn resolve_api_url(&self, explicit: Option<&str>) -> String {
        if let Some(url) = explicit.filter(|u| !u.trim().is_empty()) {
            return url.trim().to_string();
        }
        if let Ok(url) = std::env::var(API_URL_ENV)
            && !url.trim().is_empty()
        {
            return url.trim().to_string();
        }
        self.api.base_url.clone()
    }
}
