//! Backend-specific errors, converted into [`StoreError`] at the trait
//! boundary.

use thiserror::Error;
use vox_store::StoreError;

#[derive(Debug, Error)]
pub enum JsonStoreError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("malformed snapshot {path}: {source}")]
    Malformed {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("serialization error: {0}")]
    Serialization(serde_json::Error),
}

impl From<JsonStoreError> for StoreError {
    fn from(e: JsonStoreError) -> Self {
        match &e {
            JsonStoreError::Io(_) => StoreError::Backend(e.to_string()),
            JsonStoreError::Malformed { .. } => StoreError::Corruption(e.to_string()),
            JsonStoreError::Serialization(_) => StoreError::Serialization(e.to_string()),
        }
    }
}
