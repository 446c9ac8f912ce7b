use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tally_core::{Snapshot, SnapshotStore, StoreError};
use tempfile::NamedTempFile;
use tracing::debug;

/// JSON file store for the full ledger snapshot.
///
/// Writes go to a sibling temp file first and are renamed over the target,
/// so a reader never observes a partially written snapshot. One process owns
/// the file; cross-process locking is out of scope.
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn dir(&self) -> &Path {
        match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        }
    }
}

impl SnapshotStore for FileStore {
    fn save(&self, snapshot: &Snapshot) -> Result<(), StoreError> {
        let data = serde_json::to_vec_pretty(snapshot)
            .map_err(|err| io::Error::new(io::ErrorKind::InvalidData, err))?;

        // Temp file lives next to the target so the rename stays on one
        // filesystem and is atomic.
        let mut tmp = NamedTempFile::new_in(self.dir())?;
        tmp.write_all(&data)?;
        tmp.persist(&self.path).map_err(|err| err.error)?;

        debug!(path = %self.path.display(), bytes = data.len(), "snapshot written");
        Ok(())
    }

    fn load(&self) -> Result<Snapshot, StoreError> {
        let data = match fs::read(&self.path) {
            Ok(data) => data,
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                return Err(StoreError::NotFound)
            }
            Err(err) => return Err(StoreError::Corrupt(err.to_string())),
        };
        serde_json::from_slice(&data).map_err(|err| StoreError::Corrupt(err.to_string()))
    }
}
