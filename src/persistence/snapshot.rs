//! JSON snapshot file holding the full contents of the student store.

use std::ffi::OsString;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use tokio::io::AsyncWriteExt;

use crate::domain::Student;
use crate::error::GatewayError;

/// Handle to the on-disk snapshot.
///
/// The file is a pretty-printed JSON array of student objects and is
/// rewritten in full on every call to [`SnapshotFile::write`].
#[derive(Debug, Clone)]
pub struct SnapshotFile {
    path: PathBuf,
}

impl SnapshotFile {
    /// Creates a handle for the snapshot at `path`. Nothing is touched on
    /// disk until [`read`](Self::read) or [`write`](Self::write).
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Returns the snapshot path.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads and decodes the snapshot.
    ///
    /// Returns `Ok(None)` when the file does not exist.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::PersistenceError`] if the file exists but
    /// cannot be read or is not a valid JSON array of students.
    pub async fn read(&self) -> Result<Option<Vec<Student>>, GatewayError> {
        let bytes = match tokio::fs::read(&self.path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => {
                return Err(GatewayError::PersistenceError(format!(
                    "failed to read snapshot {}: {e}",
                    self.path.display()
                )));
            }
        };

        serde_json::from_slice(&bytes).map(Some).map_err(|e| {
            GatewayError::PersistenceError(format!(
                "malformed snapshot {}: {e}",
                self.path.display()
            ))
        })
    }

    /// Replaces the snapshot with `students`.
    ///
    /// Writes to a sibling temporary file, fsyncs it and renames it over
    /// the target, so readers never see a partially written snapshot.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::PersistenceError`] if any step fails. The
    /// previous snapshot is left in place in that case.
    pub async fn write(&self, students: &[Student]) -> Result<(), GatewayError> {
        let json = serde_json::to_vec_pretty(students).map_err(|e| {
            GatewayError::PersistenceError(format!("failed to encode snapshot: {e}"))
        })?;

        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| self.io_error("create directory for", &e))?;
        }

        let tmp = self.temp_path();
        let result = write_synced(&tmp, &json).await;
        let result = match result {
            Ok(()) => tokio::fs::rename(&tmp, &self.path).await,
            Err(e) => Err(e),
        };

        if let Err(e) = result {
            let _ = tokio::fs::remove_file(&tmp).await;
            return Err(self.io_error("write", &e));
        }
        Ok(())
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map_or_else(|| OsString::from("students.json"), OsString::from);
        name.push(".tmp");
        self.path.with_file_name(name)
    }

    fn io_error(&self, action: &str, e: &std::io::Error) -> GatewayError {
        GatewayError::PersistenceError(format!(
            "failed to {action} snapshot {}: {e}",
            self.path.display()
        ))
    }
}

async fn write_synced(path: &Path, bytes: &[u8]) -> std::io::Result<()> {
    let mut file = tokio::fs::File::create(path).await?;
    file.write_all(bytes).await?;
    file.sync_all().await
}
