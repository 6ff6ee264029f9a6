//! Data-directory setup.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::{JsonPollStore, JsonStoreError, JsonTokenStore, JsonUserStore};

/// Owns the data directory and hands out the per-entity stores.
pub struct JsonEnv {
    dir: PathBuf,
}

impl JsonEnv {
    /// Open (creating if needed) the data directory at `dir`.
    pub fn open(dir: &Path) -> Result<Self, JsonStoreError> {
        std::fs::create_dir_all(dir)?;
        tracing::debug!(dir = %dir.display(), "opened json store environment");
        Ok(Self {
            dir: dir.to_path_buf(),
        })
    }

    pub fn poll_store(&self) -> Arc<JsonPollStore> {
        Arc::new(JsonPollStore::new(self.dir.join("polls.json")))
    }

    pub fn token_store(&self) -> Arc<JsonTokenStore> {
        Arc::new(JsonTokenStore::new(self.dir.join("tokens.json")))
    }

    pub fn user_store(&self) -> Arc<JsonUserStore> {
        Arc::new(JsonUserStore::new(self.dir.join("users.json")))
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn open_creates_the_directory() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("data").join("vox");
        let env = JsonEnv::open(&nested).unwrap();
        assert!(env.dir().is_dir());
    }
}
