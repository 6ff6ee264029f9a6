//! JSON-file implementation of [`TokenStore`].

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::sync::Mutex;

use vox_store::{StoreError, TokenRecord, TokenStore};

use crate::file::{read_snapshot, write_snapshot};

/// On-disk shape of `tokens.json`.
#[derive(Default, Serialize, Deserialize)]
struct TokensFile {
    tokens: Vec<TokenRecord>,
}

pub struct JsonTokenStore {
    path: PathBuf,
    file_lock: Mutex<()>,
}

impl JsonTokenStore {
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            file_lock: Mutex::new(()),
        }
    }
}

impl TokenStore for JsonTokenStore {
    fn load(&self) -> Result<Vec<TokenRecord>, StoreError> {
        let _guard = self.file_lock.lock().expect("token store lock poisoned");
        let file: TokensFile = read_snapshot(&self.path)?;
        Ok(file.tokens)
    }

    fn save(&self, records: &[TokenRecord]) -> Result<(), StoreError> {
        let _guard = self.file_lock.lock().expect("token store lock poisoned");
        let file = TokensFile {
            tokens: records.to_vec(),
        };
        write_snapshot(&self.path, &file)?;
        Ok(())
    }
}
