//! Snapshot file helpers shared by the per-entity stores.

use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fs;
use std::path::Path;

use crate::JsonStoreError;

/// Read a snapshot file, returning the default (empty) snapshot if the file
/// does not exist yet.
pub(crate) fn read_snapshot<T>(path: &Path) -> Result<T, JsonStoreError>
where
    T: DeserializeOwned + Default,
{
    let contents = match fs::read_to_string(path) {
        Ok(contents) => contents,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(T::default()),
        Err(e) => return Err(e.into()),
    };
    serde_json::from_str(&contents).map_err(|source| JsonStoreError::Malformed {
        path: path.display().to_string(),
        source,
    })
}

/// Write a snapshot file atomically: serialize to a sibling temp file, then
/// rename it over the target so readers never observe a torn snapshot.
pub(crate) fn write_snapshot<T>(path: &Path, snapshot: &T) -> Result<(), JsonStoreError>
where
    T: Serialize,
{
    let json = serde_json::to_string_pretty(snapshot).map_err(JsonStoreError::Serialization)?;
    let tmp = path.with_extension("json.tmp");
    fs::write(&tmp, json)?;
    fs::rename(&tmp, path)?;
    Ok(())
}
