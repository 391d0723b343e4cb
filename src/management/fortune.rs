use std::{
    future::Future,
    io::ErrorKind,
    path::PathBuf,
    sync::{Arc, Mutex},
};

use crate::{config, error::StoreError};

/// Key-value slot holding the serialized [`crate::types::StoredFortuneRecord`].
///
/// The cache only ever reads, replaces or clears the whole value.
pub trait FortuneStore {
    fn read(&self) -> impl Future<Output = Result<Option<String>, StoreError>> + Send;

    fn write(&self, raw: &str) -> impl Future<Output = Result<(), StoreError>> + Send;

    fn clear(&self) -> impl Future<Output = Result<(), StoreError>> + Send;
}

/// Stores the fortune as a JSON file in the local data directory.
#[derive(Debug, Clone)]
pub struct FileFortuneStore {
    path: PathBuf,
}

impl FileFortuneStore {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn path(&self) -> &PathBuf {
        &self.path
    }

    fn default_path() -> PathBuf {
        let mut path = config::data_dir();
        path.push("cache/fortune.json");
        path
    }
}

impl Default for FileFortuneStore {
    fn default() -> Self {
        Self::new(Self::default_path())
    }
}

impl FortuneStore for FileFortuneStore {
    async fn read(&self) -> Result<Option<String>, StoreError> {
        match async_fs::read_to_string(&self.path).await {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(StoreError::Io(e)),
        }
    }

    async fn write(&self, raw: &str) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent() {
            async_fs::create_dir_all(parent).await?;
        }
        async_fs::write(&self.path, raw).await?;
        Ok(())
    }

    async fn clear(&self) -> Result<(), StoreError> {
        match async_fs::remove_file(&self.path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(StoreError::Io(e)),
        }
    }
}

/// In-process store, shared between clones.
#[derive(Debug, Clone, Default)]
pub struct MemoryFortuneStore {
    slot: Arc<Mutex<Option<String>>>,
}

impl MemoryFortuneStore {
    pub fn with_raw(raw: impl Into<String>) -> Self {
        Self {
            slot: Arc::new(Mutex::new(Some(raw.into()))),
        }
    }

    pub fn snapshot(&self) -> Option<String> {
        self.slot.lock().map(|s| s.clone()).unwrap_or_default()
    }
}

impl FortuneStore for MemoryFortuneStore {
    async fn read(&self) -> Result<Option<String>, StoreError> {
        Ok(self.snapshot())
    }

    async fn write(&self, raw: &str) -> Result<(), StoreError> {
        if let Ok(mut slot) = self.slot.lock() {
            *slot = Some(raw.to_string());
        }
        Ok(())
    }

    async fn clear(&self) -> Result<(), StoreError> {
        if let Ok(mut slot) = self.slot.lock() {
            *slot = None;
        }
        Ok(())
    }
}
