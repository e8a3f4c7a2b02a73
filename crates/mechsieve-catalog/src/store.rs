//! Catalog file storage with XDG path support.
//!
//! The catalog is stored as JSON at `~/.local/share/msv/catalog.json` on Linux
//! (the platform data directory elsewhere). Writes are atomic: the file is
//! written next to its destination and renamed into place.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use thiserror::Error;
use tracing::{debug, warn};

use crate::Catalog;

/// Default catalog filename.
const CATALOG_FILENAME: &str = "catalog.json";

/// Application qualifier (for XDG paths).
const QUALIFIER: &str = "";

/// Application organization (for XDG paths).
const ORGANIZATION: &str = "";

/// Application name (for XDG paths).
const APPLICATION: &str = "msv";

/// Errors that can occur while reading or writing the catalog file.
#[derive(Debug, Error)]
pub enum CatalogStoreError {
    /// Failed to determine the data directory.
    #[error("failed to determine data directory: no valid home directory found")]
    NoDataDir,

    /// I/O error during file read.
    #[error("failed to read catalog file '{path}': {source}")]
    ReadError {
        /// The path that failed to read.
        path: PathBuf,
        /// The underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// I/O error during file write.
    #[error("failed to write catalog file '{path}': {source}")]
    WriteError {
        /// The path that failed to write.
        path: PathBuf,
        /// The underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// I/O error during directory creation.
    #[error("failed to create data directory '{path}': {source}")]
    CreateDirError {
        /// The directory path that failed to create.
        path: PathBuf,
        /// The underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type for catalog store operations.
pub type Result<T> = std::result::Result<T, CatalogStoreError>;

/// Persistent storage for the unit catalog.
///
/// # Example
///
/// ```no_run
/// use mechsieve_catalog_rs::CatalogStore;
///
/// let store = CatalogStore::new()?;
/// let catalog = store.load_or_default()?;
/// println!("{} units", catalog.units.len());
/// # Ok::<(), mechsieve_catalog_rs::CatalogStoreError>(())
/// ```
#[derive(Debug, Clone)]
pub struct CatalogStore {
    path: PathBuf,
}

impl CatalogStore {
    /// Creates a store at the default XDG data path.
    ///
    /// # Errors
    ///
    /// Returns `CatalogStoreError::NoDataDir` if the home directory cannot be determined.
    pub fn new() -> Result<Self> {
        let path = Self::default_path()?;
        Ok(Self { path })
    }

    /// Creates a store at a custom path.
    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Returns the default catalog path.
    ///
    /// On Linux: `~/.local/share/msv/catalog.json`
    /// On macOS: `~/Library/Application Support/msv/catalog.json`
    /// On Windows: `C:\Users\<User>\AppData\Roaming\msv\data\catalog.json`
    ///
    /// # Errors
    ///
    /// Returns `CatalogStoreError::NoDataDir` if the home directory cannot be determined.
    pub fn default_path() -> Result<PathBuf> {
        let project_dirs = ProjectDirs::from(QUALIFIER, ORGANIZATION, APPLICATION)
            .ok_or(CatalogStoreError::NoDataDir)?;

        Ok(project_dirs.data_dir().join(CATALOG_FILENAME))
    }

    /// Returns the path to the catalog file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Returns true if the catalog file exists on disk.
    pub fn exists(&self) -> bool {
        self.path.exists()
    }

    /// Loads the catalog from disk and rebuilds its lookup indexes.
    ///
    /// # Errors
    ///
    /// - Returns `CatalogStoreError::ReadError` if the file cannot be read.
    /// - Returns `CatalogStoreError::Json` if the file contains invalid JSON.
    pub fn load(&self) -> Result<Catalog> {
        let contents = fs::read_to_string(&self.path).map_err(|e| CatalogStoreError::ReadError {
            path: self.path.clone(),
            source: e,
        })?;
        let mut catalog: Catalog = serde_json::from_str(&contents)?;
        catalog.rebuild_indexes();

        debug!(
            path = %self.path.display(),
            units = catalog.units.len(),
            equipment = catalog.equipment.len(),
            "loaded catalog"
        );
        for (unit, err) in catalog.invalid_inventories() {
            warn!(unit = %unit.display_name(), %err, "catalog unit has a corrupt inventory");
        }

        Ok(catalog)
    }

    /// Loads the catalog, returning an empty one if the file doesn't exist.
    ///
    /// # Errors
    ///
    /// - Returns `CatalogStoreError::ReadError` for I/O errors other than "file not found".
    /// - Returns `CatalogStoreError::Json` if the file contains invalid JSON.
    pub fn load_or_default(&self) -> Result<Catalog> {
        match self.load() {
            Ok(catalog) => Ok(catalog),
            Err(CatalogStoreError::ReadError { ref source, .. })
                if source.kind() == io::ErrorKind::NotFound =>
            {
                debug!(path = %self.path.display(), "no catalog file, using an empty catalog");
                Ok(Catalog::default())
            }
            Err(e) => Err(e),
        }
    }

    /// Saves the catalog to disk atomically as pretty-printed JSON.
    ///
    /// # Errors
    ///
    /// - Returns `CatalogStoreError::CreateDirError` if the directory cannot be created.
    /// - Returns `CatalogStoreError::WriteError` if the file cannot be written.
    /// - Returns `CatalogStoreError::Json` if serialization fails.
    pub fn save(&self, catalog: &Catalog) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(|e| CatalogStoreError::CreateDirError {
                path: parent.to_path_buf(),
                source: e,
            })?;
        }

        let json = serde_json::to_string_pretty(catalog)?;

        let temp_path = self.path.with_extension("tmp");
        fs::write(&temp_path, &json).map_err(|e| CatalogStoreError::WriteError {
            path: temp_path.clone(),
            source: e,
        })?;
        fs::rename(&temp_path, &self.path).map_err(|e| CatalogStoreError::WriteError {
            path: self.path.clone(),
            source: e,
        })?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{EquipmentRecord, Unit};
    use tempfile::tempdir;

    #[test]
    fn test_default_path_ends_with_catalog_json() {
        let path = CatalogStore::default_path().expect("should get default path");
        let path_str = path.to_string_lossy();
        assert!(path_str.contains("msv"), "path should contain msv: {path_str}");
        assert!(path_str.ends_with(CATALOG_FILENAME));
        assert!(path.is_absolute());
    }

    #[test]
    fn test_save_and_load_roundtrip() {
        let dir = tempdir().unwrap();
        let store = CatalogStore::with_path(dir.path().join("nested").join("catalog.json"));

        let catalog = Catalog::new(
            vec![Unit::new("Atlas", "AS7-D").with_equipment("ISAC20", 1)],
            vec![EquipmentRecord::new("ISAC20", "AC/20")],
        );
        store.save(&catalog).unwrap();
        assert!(store.exists());

        let loaded = store.load().unwrap();
        assert_eq!(loaded, catalog);
        assert_eq!(loaded.equipment_name("ISAC20"), "AC/20");
    }

    #[test]
    fn test_load_or_default_missing_file() {
        let dir = tempdir().unwrap();
        let store = CatalogStore::with_path(dir.path().join("missing.json"));

        let catalog = store.load_or_default().unwrap();
        assert!(catalog.is_empty());
    }

    #[test]
    fn test_load_missing_file_is_read_error() {
        let dir = tempdir().unwrap();
        let store = CatalogStore::with_path(dir.path().join("missing.json"));

        assert!(matches!(
            store.load(),
            Err(CatalogStoreError::ReadError { .. })
        ));
    }

    #[test]
    fn test_load_invalid_json() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("catalog.json");
        fs::write(&path, "{ not json").unwrap();

        let store = CatalogStore::with_path(path);
        assert!(matches!(store.load(), Err(CatalogStoreError::Json(_))));
        assert!(matches!(
            store.load_or_default(),
            Err(CatalogStoreError::Json(_))
        ));
    }
}
