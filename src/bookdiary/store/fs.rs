use super::{DataStore, Snapshot};
use crate::error::{BookDiaryError, Result};
use std::fs;
use std::path::{Path, PathBuf};
use uuid::Uuid;

pub const DEFAULT_DATA_FILE: &str = "book_data.json";

/// JSON file backed store. The whole library lives in one file.
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Creates the parent directory of the data file if it is missing.
    pub fn ensure_parent_dir(&self) -> Result<()> {
        match self.path.parent() {
            Some(dir) if !dir.as_os_str().is_empty() && !dir.exists() => {
                fs::create_dir_all(dir).map_err(BookDiaryError::Io)
            }
            _ => Ok(()),
        }
    }

    fn tmp_path(&self) -> PathBuf {
        let name = self
            .path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| DEFAULT_DATA_FILE.to_string());
        self.path
            .with_file_name(format!(".{}-{}.tmp", name, Uuid::new_v4()))
    }

    fn write_atomic(&self, content: &str) -> Result<()> {
        self.ensure_parent_dir()?;
        let tmp_file = self.tmp_path();
        fs::write(&tmp_file, content).map_err(BookDiaryError::Io)?;
        if let Err(e) = fs::rename(&tmp_file, &self.path) {
            let _ = fs::remove_file(&tmp_file);
            return Err(BookDiaryError::Io(e));
        }
        Ok(())
    }
}

impl DataStore for FileStore {
    fn load(&self) -> Result<Option<Snapshot>> {
        if !self.path.exists() {
            tracing::debug!(path = %self.path.display(), "no data file yet");
            return Ok(None);
        }
        let content = fs::read_to_string(&self.path).map_err(BookDiaryError::Io)?;
        let snapshot: Snapshot =
            serde_json::from_str(&content).map_err(BookDiaryError::Serialization)?;
        tracing::debug!(
            path = %self.path.display(),
            books = snapshot.books.len(),
            "loaded data file"
        );
        Ok(Some(snapshot))
    }

    fn save(&mut self, snapshot: &Snapshot) -> Result<()> {
        let content =
            serde_json::to_string_pretty(snapshot).map_err(BookDiaryError::Serialization)?;
        self.write_atomic(&content)?;
        tracing::debug!(path = %self.path.display(), bytes = content.len(), "saved data file");
        Ok(())
    }
}
