use std::path::{Path, PathBuf};
use std::time::Duration;

use prompttree_engine::SlotGeometry;

use crate::client::HttpStore;
use crate::config::Config;
use crate::coordinator::MutationCoordinator;
use crate::{Error, Result};

pub const CONFIG_FILE: &str = "config.toml";

/// Result of `PromptTree::init`
#[derive(Debug, Clone)]
pub struct InitOutcome {
    pub config_path: PathBuf,
    pub config: Config,
    /// False when an existing file was kept
    pub created: bool,
}

/// Entry point tying config, HTTP store and coordinator together.
pub struct PromptTree {
    data_dir: PathBuf,
    config: Config,
    api_url: String,
    coordinator: MutationCoordinator<HttpStore>,
}

impl PromptTree {
    pub fn init(data_dir: &Path, api_url: Option<&str>, force: bool) -> Result<InitOutcome> {
        let config_path = data_dir.join(CONFIG_FILE);

        if config_path.exists() && !force {
            let config = Config::load_from(&config_path)?;
            return Ok(InitOutcome {
                config_path,
                config,
                created: false,
            });
        }

        let mut config = Config::default();
        if let Some(url) = api_url.map(str::trim).filter(|u| !u.is_empty()) {
            crate::client::parse_base_url(url)?;
            config.api.base_url = url.to_string();
        }
        config.save_to(&config_path)?;
        tracing::info!(path = %config_path.display(), "config written");

        Ok(InitOutcome {
            config_path,
            config,
            created: true,
        })
    }

    pub fn open(data_dir: PathBuf, api_override: Option<&str>, geometry: SlotGeometry) -> Result<Self> {
        let config_path = data_dir.join(CONFIG_FILE);
        let config = Config::load_from(&config_path)?;
        let api_url = config.resolve_api_url(api_override);

        if config.api.timeout_secs == 0 {
            return Err(Error::Config("api.timeout_secs must be positive".to_string()));
        }

        tracing::debug!(
            data_dir = %data_dir.display(),
            api_url = %api_url,
            note_create = ?config.consistency.note_create,
            "workspace opened"
        );

        let store = HttpStore::new(&api_url, Duration::from_secs(config.api.timeout_secs))?;
        let coordinator = MutationCoordinator::with_geometry(store, config.consistency, geometry);

        Ok(Self {
            data_dir,
            config,
            api_url,
            coordinator,
        })
    }

    pub fn coordinator(&self) -> &MutationCoordinator<HttpStore> {
        &self.coordinator
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn api_url(&self) -> &str {
        &self.api_url
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    pub fn config_path(&self) -> PathBuf {
        self.data_dir.join(CONFIG_FILE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::NoteCreateStrategy;
    use tempfile::TempDir;

    #[test]
    fn test_init_writes_config_once() -> Result<()> {
        let dir = TempDir::new()?;

        let first = PromptTree::init(dir.path(), Some("http://trees.test:9000"), false)?;
        assert!(first.created);
        assert!(first.config_path.exists());

        let second = PromptTree::init(dir.path(), Some("http://other.test"), false)?;
        assert!(!second.created);
        assert_eq!(second.config.api.base_url, "http://trees.test:9000");

        Ok(())
    }

    #[test]
    fn test_init_rejects_invalid_url() -> Result<()> {
        let dir = TempDir::new()?;
        let err = PromptTree::init(dir.path(), Some("http://[::1"), false).unwrap_err();
        assert!(matches!(err, Error::Config(_)));
        assert!(!dir.path().join(CONFIG_FILE).exists());
        Ok(())
    }

    #[test]
    fn test_open_uses_override_and_policy() -> Result<()> {
        let dir = TempDir::new()?;
        let mut config = Config::default();
        config.consistency.note_create = NoteCreateStrategy::Refetch;
        config.save_to(&dir.path().join(CONFIG_FILE))?;

        let workspace = PromptTree::open(
            dir.path().to_path_buf(),
            Some("http://override.test:1234"),
            SlotGeometry::TERMINAL,
        )?;

        assert_eq!(workspace.api_url(), "http://override.test:1234");
        assert_eq!(
            workspace.coordinator().policy().note_create,
            NoteCreateStrategy::Refetch
        );
        assert_eq!(
            workspace.coordinator().with_view(|v| v.geometry()),
            SlotGeometry::TERMINAL
        );
        Ok(())
    }
}
