//! Key/value state persistence.
//!
//! The route store only needs `get`/`set`/`delete` over a handful of named
//! keys. [`JsonFileStore`] keeps them in a single JSON object on disk, the
//! same layout the desktop app's settings file used; [`MemoryStore`] is the
//! in-process equivalent for tests.

use std::collections::HashMap;
use std::path::PathBuf;

use serde_json::{Map, Value};

use super::error::StoreError;

/// Named-key state storage.
///
/// Every mutating call is durable before it returns.
pub trait StateStore {
    /// Read a key, if present.
    fn get(&self, key: &str) -> Option<Value>;

    /// Write a key.
    fn set(&mut self, key: &str, value: Value) -> Result<(), StoreError>;

    /// Remove keys. All of them are removed in one write, or none are.
    fn delete(&mut self, keys: &[&str]) -> Result<(), StoreError>;
}

/// In-memory state store.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    values: HashMap<String, Value>,
    writes: usize,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of mutating calls applied so far.
    pub fn write_count(&self) -> usize {
        self.writes
    }
}

impl StateStore for MemoryStore {
    fn get(&self, key: &str) -> Option<Value> {
        self.values.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: Value) -> Result<(), StoreError> {
        self.values.insert(key.to_string(), value);
        self.writes += 1;
        Ok(())
    }

    fn delete(&mut self, keys: &[&str]) -> Result<(), StoreError> {
        for key in keys {
            self.values.remove(*key);
        }
        self.writes += 1;
        Ok(())
    }
}

/// State store backed by a JSON object file.
///
/// The whole object is rewritten on every mutation. Writes go to a sibling
/// temporary file which is then renamed over the original, so a crash never
/// leaves a half-written file behind.
#[derive(Debug)]
pub struct JsonFileStore {
    path: PathBuf,
    values: Map<String, Value>,
}

impl JsonFileStore {
    /// Open the store at `path`, starting empty if the file does not exist.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let path = path.into();

        let values = match std::fs::read_to_string(&path) {
            Ok(contents) if contents.trim().is_empty() => Map::new(),
            Ok(contents) => match serde_json::from_str::<Value>(&contents)? {
                Value::Object(map) => map,
                _ => return Err(StoreError::NotAnObject { path }),
            },
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Map::new(),
            Err(source) => return Err(StoreError::Read { path, source }),
        };

        tracing::debug!(path = %path.display(), keys = values.len(), "opened state file");

        Ok(Self { path, values })
    }

    fn persist(&self) -> Result<(), StoreError> {
        let write_err = |source| StoreError::Write {
            path: self.path.clone(),
            source,
        };

        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
            && !parent.exists()
        {
            std::fs::create_dir_all(parent).map_err(write_err)?;
        }

        let json = serde_json::to_string_pretty(&self.values)?;

        let mut tmp = self.path.clone().into_os_string();
        tmp.push(".tmp");
        let tmp = PathBuf::from(tmp);

        std::fs::write(&tmp, json).map_err(write_err)?;
        std::fs::rename(&tmp, &self.path).map_err(write_err)?;

        Ok(())
    }
}

impl StateStore for JsonFileStore {
    fn get(&self, key: &str) -> Option<Value> {
        self.values.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: Value) -> Result<(), StoreError> {
        let previous = self.values.insert(key.to_string(), value);
        if let Err(e) = self.persist() {
            // Keep memory in line with what is on disk
            match previous {
                Some(v) => self.values.insert(key.to_string(), v),
                None => self.values.remove(key),
            };
            return Err(e);
        }
        Ok(())
    }

    fn delete(&mut self, keys: &[&str]) -> Result<(), StoreError> {
        let snapshot = self.values.clone();
        for key in keys {
            self.values.remove(*key);
        }
        if let Err(e) = self.persist() {
            self.values = snapshot;
            return Err(e);
        }
        Ok(())
    }
}
