use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;

use crate::io::lock::StoreLock;
use crate::io::store::{KeyValueStore, PinFuture, StoreError, validate_key};

/// Store keeping each key in `<data_dir>/<key>.json`.
///
/// Reads go straight to the file. Writes and removes take the directory
/// lock and replace the file atomically, so a reader never sees a torn
/// value.
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        FileStore { dir: dir.into() }
    }

    fn key_path(&self, key: &str) -> Result<PathBuf, StoreError> {
        validate_key(key)?;
        Ok(self.dir.join(format!("{}.json", key)))
    }
}

/// Write content to a file atomically: temp file in the same directory,
/// then rename over the target.
pub fn atomic_write(path: &Path, content: &[u8]) -> io::Result<()> {
    let dir = path.parent().unwrap_or(Path::new("."));
    let mut tmp = NamedTempFile::new_in(dir)?;
    tmp.write_all(content)?;
    tmp.flush()?;
    tmp.persist(path).map_err(|e| e.error)?;
    Ok(())
}

fn io_err(path: &Path) -> impl FnOnce(io::Error) -> StoreError + '_ {
    move |source| StoreError::Io {
        path: path.to_path_buf(),
        source,
    }
}

impl KeyValueStore for FileStore {
    fn get<'a>(&'a self, key: &'a str) -> PinFuture<'a, Result<Option<String>, StoreError>> {
        Box::pin(async move {
            let path = self.key_path(key)?;
            match tokio::fs::read_to_string(&path).await {
                Ok(content) => Ok(Some(content)),
                Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
                Err(e) => Err(io_err(&path)(e)),
            }
        })
    }

    fn set<'a>(&'a self, key: &'a str, value: String) -> PinFuture<'a, Result<(), StoreError>> {
        Box::pin(async move {
            let path = self.key_path(key)?;
            let dir = self.dir.clone();
            tokio::task::spawn_blocking(move || -> Result<(), StoreError> {
                fs::create_dir_all(&dir).map_err(io_err(&dir))?;
                let _lock = StoreLock::acquire_default(&dir)?;
                atomic_write(&path, value.as_bytes()).map_err(io_err(&path))
            })
            .await?
        })
    }

    fn remove<'a>(&'a self, key: &'a str) -> PinFuture<'a, Result<(), StoreError>> {
        Box::pin(async move {
            let path = self.key_path(key)?;
            if !self.dir.is_dir() {
                return Ok(());
            }
            let dir = self.dir.clone();
            tokio::task::spawn_blocking(move || -> Result<(), StoreError> {
                let _lock = StoreLock::acquire_default(&dir)?;
                match fs::remove_file(&path) {
                    Ok(()) => Ok(()),
                    Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
                    Err(e) => Err(io_err(&path)(e)),
                }
            })
            .await?
        })
    }
}
