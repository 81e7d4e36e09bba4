use super::{Storage, StorageError};
use async_trait::async_trait;
use serde_json::{Map, Value};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokio::sync::Mutex;
use tracing::{debug, warn};

/// Every slot in one JSON object file: `{ "<key>": "<value>", ... }`.
///
/// A file that is not a JSON object reads as having no slots, and the next
/// write replaces it.
///
/// Writes go to a sibling temp file that is then renamed over the original, so
/// a crash mid-write leaves the previous contents intact. Writers inside this
/// process are serialized; other processes sharing the file are not coordinated.
#[derive(Debug)]
pub struct FileStorage {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl FileStorage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn read_slots(&self) -> Result<Map<String, Value>, StorageError> {
        let raw = match tokio::fs::read_to_string(&self.path).await {
            Ok(raw) => raw,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Map::new()),
            Err(e) => return Err(e.into()),
        };
        if raw.trim().is_empty() {
            return Ok(Map::new());
        }
        match serde_json::from_str(&raw) {
            Ok(slots) => Ok(slots),
            Err(e) => {
                // Rewritten whole by the next set().
                warn!(path = %self.path.display(), error = %e, "Storage file is not a JSON object, reading as empty");
                Ok(Map::new())
            }
        }
    }
}

#[async_trait]
impl Storage for FileStorage {
    async fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let slots = self.read_slots().await?;
        Ok(match slots.get(key) {
            Some(Value::String(value)) => Some(value.clone()),
            // Hand-edited files may hold the value unquoted.
            Some(other) => Some(other.to_string()),
            None => None,
        })
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let _guard = self.write_lock.lock().await;

        let mut slots = self.read_slots().await?;
        slots.insert(key.to_string(), Value::String(value.to_string()));
        let contents = serde_json::to_string_pretty(&slots).map_err(|source| StorageError::Encode {
            path: self.path.clone(),
            source,
        })?;

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent).await?;
            }
        }
        let tmp = self.path.with_extension("tmp");
        tokio::fs::write(&tmp, contents).await?;
        tokio::fs::rename(&tmp, &self.path).await?;
        debug!(path = %self.path.display(), key, bytes = value.len(), "Slot written");
        Ok(())
    }
}
