use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tracing::warn;

use super::{ScoreStore, StoreError};

/// Store persisted as a pretty-printed JSON object, rewritten on every `set`
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
    values: BTreeMap<String, u32>,
}

impl JsonFileStore {
    /// Load `path`, starting empty if the file does not exist yet
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let path = path.into();
        let values = match std::fs::read_to_string(&path) {
            Ok(json) => serde_json::from_str(&json).map_err(|source| StoreError::Json {
                path: path.clone(),
                source,
            })?,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => BTreeMap::new(),
            Err(source) => return Err(StoreError::Io { path, source }),
        };
        Ok(Self { path, values })
    }

    /// Like [`open`](Self::open), but with `discard_unreadable` a corrupt
    /// file is replaced by an empty store instead of failing
    ///
    /// The file itself is only rewritten on the next `set`.
    pub fn open_or_reset(
        path: impl Into<PathBuf>,
        discard_unreadable: bool,
    ) -> Result<Self, StoreError> {
        let path = path.into();
        match Self::open(&path) {
            Err(err) if discard_unreadable => {
                warn!(error = %err, "Discarding unreadable best-score file");
                Ok(Self::empty(path))
            }
            result => result,
        }
    }

    /// A store at `path` that ignores whatever the file currently holds
    pub fn empty(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            values: BTreeMap::new(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn flush(&self) -> Result<(), StoreError> {
        let io_err = |source| StoreError::Io {
            path: self.path.clone(),
            source,
        };

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(io_err)?;
        }
        let json = serde_json::to_string_pretty(&self.values).map_err(|source| StoreError::Json {
            path: self.path.clone(),
            source,
        })?;
        std::fs::write(&self.path, json).map_err(io_err)
    }
}

impl ScoreStore for JsonFileStore {
    fn get(&self, key: &str) -> Option<u32> {
        self.values.get(key).copied()
    }

    fn set(&mut self, key: &str, value: u32) -> Result<(), StoreError> {
        self.values.insert(key.to_string(), value);
        self.flush()
    }
}
