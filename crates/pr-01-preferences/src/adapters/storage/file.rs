use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

#[cfg(feature = "locking")]
use crate::adapters::lock::StoreLock;
use crate::domain::errors::BackendError;
use crate::domain::value::PreferenceMap;
use crate::ports::outbound::PreferenceBackend;

/// Current on-disk document version.
const FORMAT_VERSION: u32 = 1;

/// On-disk layout of a store file.
#[derive(Debug, Serialize, Deserialize)]
struct PreferenceDocument {
    version: u32,
    entries: PreferenceMap,
}

/// File-backed store: one JSON document per named store.
///
/// Layout inside the data directory:
///
/// ```text
/// <name>.json   current document
/// <name>.tmp    in-flight write, renamed over <name>.json
/// <name>.lock   exclusive lock held while the backend is alive
/// ```
pub struct FileBackend {
    path: PathBuf,
    #[cfg(feature = "locking")]
    _lock: StoreLock,
}

impl FileBackend {
    /// Open (or prepare) the store `name` inside `data_dir`.
    ///
    /// Creates the directory if needed. Does not read the document; that
    /// happens on `load`.
    ///
    /// # Errors
    ///
    /// - `InvalidName`: `name` is empty, `.`/`..`, or contains a path separator
    /// - `Io`: the directory cannot be created
    /// - `Locked`: another handle already owns this store
    pub fn open(data_dir: &Path, name: &str) -> Result<Self, BackendError> {
        if !is_plain_name(name) {
            return Err(BackendError::InvalidName {
                name: name.to_string(),
            });
        }
        std::fs::create_dir_all(data_dir)?;

        #[cfg(feature = "locking")]
        let lock = StoreLock::acquire(&data_dir.join(format!("{name}.lock")))?;

        let path = data_dir.join(format!("{name}.json"));
        if let Ok(metadata) = std::fs::metadata(&path) {
            tracing::info!(
                "[pr-01] Found existing preferences file: {} ({} bytes)",
                path.display(),
                metadata.len()
            );
        } else {
            tracing::info!("[pr-01] No existing preferences file at {}", path.display());
        }

        Ok(Self {
            path,
            #[cfg(feature = "locking")]
            _lock: lock,
        })
    }

    /// Path of the JSON document.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// Store names map to files directly inside the data directory.
fn is_plain_name(name: &str) -> bool {
    !name.is_empty() && name != "." && name != ".." && !name.contains(['/', '\\'])
}

impl PreferenceBackend for FileBackend {
    fn load(&self) -> Result<PreferenceMap, BackendError> {
        let raw = match std::fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(PreferenceMap::new()),
            Err(e) => return Err(e.into()),
        };

        let document: PreferenceDocument =
            serde_json::from_str(&raw).map_err(|e| BackendError::Corrupted {
                message: format!("{}: {}", self.path.display(), e),
            })?;

        if document.version != FORMAT_VERSION {
            return Err(BackendError::Corrupted {
                message: format!(
                    "{}: unsupported format version {}",
                    self.path.display(),
                    document.version
                ),
            });
        }

        Ok(document.entries)
    }

    fn persist(&self, entries: &PreferenceMap) -> Result<(), BackendError> {
        use std::io::Write;

        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let document = PreferenceDocument {
            version: FORMAT_VERSION,
            entries: entries.clone(),
        };
        let bytes = serde_json::to_vec_pretty(&document).map_err(|e| BackendError::Io {
            message: format!("failed to encode preferences: {e}"),
        })?;

        // Write atomically via temp file
        let temp_path = self.path.with_extension("tmp");
        let mut file = std::fs::File::create(&temp_path)?;
        file.write_all(&bytes)?;
        file.sync_all()?;
        std::fs::rename(&temp_path, &self.path)?;

        Ok(())
    }

    fn destroy(&self) -> Result<(), BackendError> {
        match std::fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }

    fn location(&self) -> String {
        self.path.display().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::value::PrefValue;

    fn sample() -> PreferenceMap {
        let mut entries = PreferenceMap::new();
        entries.insert("theme".to_string(), PrefValue::from("dark"));
        entries.insert("launches".to_string(), PrefValue::Int(3));
        entries
    }

    #[test]
    fn test_missing_file_loads_empty() {
        let dir = tempfile::tempdir().unwrap();
        let backend = FileBackend::open(dir.path(), "settings").unwrap();
        assert!(backend.load().unwrap().is_empty());
    }

    #[test]
    fn test_persist_survives_reopen() {
        let dir = tempfile::tempdir().unwrap();
        {
            let backend = FileBackend::open(dir.path(), "settings").unwrap();
            backend.persist(&sample()).unwrap();
        }

        let backend = FileBackend::open(dir.path(), "settings").unwrap();
        assert_eq!(backend.load().unwrap(), sample());
        assert!(!backend.path().with_extension("tmp").exists());
    }

    #[test]
    fn test_corrupted_file_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("settings.json"), b"{not json").unwrap();

        let backend = FileBackend::open(dir.path(), "settings").unwrap();
        assert!(matches!(backend.load(), Err(BackendError::Corrupted { .. })));
    }

    #[test]
    fn test_unknown_version_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("settings.json"),
            br#"{"version":99,"entries":{}}"#,
        )
        .unwrap();

        let backend = FileBackend::open(dir.path(), "settings").unwrap();
        assert!(matches!(backend.load(), Err(BackendError::Corrupted { .. })));
    }

    #[test]
    fn test_destroy_removes_document() {
        let dir = tempfile::tempdir().unwrap();
        let backend = FileBackend::open(dir.path(), "settings").unwrap();
        backend.persist(&sample()).unwrap();

        backend.destroy().unwrap();
        assert!(!backend.path().exists());
        // Second destroy is a no-op.
        backend.destroy().unwrap();
    }

    #[cfg(feature = "locking")]
    #[test]
    fn test_second_backend_is_locked_out() {
        let dir = tempfile::tempdir().unwrap();
        let _first = FileBackend::open(dir.path(), "settings").unwrap();

        let second = FileBackend::open(dir.path(), "settings");
        assert!(matches!(second, Err(BackendError::Locked { .. })));

        // Other store names are independent.
        assert!(FileBackend::open(dir.path(), "session").is_ok());
    }

    #[test]
    fn test_names_escaping_data_dir_rejected() {
        let root = tempfile::tempdir().unwrap();
        let data_dir = root.path().join("data");

        for name in ["", ".", "..", "../x", "a/b", "a\\b"] {
            assert!(
                matches!(
                    FileBackend::open(&data_dir, name),
                    Err(BackendError::InvalidName { .. })
                ),
                "name {name:?}"
            );
        }
        assert!(!root.path().join("x.lock").exists());
        assert!(!data_dir.exists());
    }
}
