//! Level files on disk
//!
//! Levels live as pretty-printed JSON files in a single levels directory.
//! `LevelStore` resolves names to paths and lists what is there; the
//! read/write operations live in `file`.

mod file;

pub use file::{load_level_file, save_level_file, LevelFileError};

use std::path::{Path, PathBuf};

/// Extension appended to level names that lack it
pub const LEVEL_FILE_EXTENSION: &str = "json";

/// Directory of level files
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LevelStore {
    dir: PathBuf,
}

impl LevelStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// File name for a level name, appending `.json` when missing
    pub fn file_name(name: &str) -> Result<String, LevelFileError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(LevelFileError::EmptyName);
        }
        let suffix = format!(".{}", LEVEL_FILE_EXTENSION);
        if name.ends_with(&suffix) {
            Ok(name.to_string())
        } else {
            Ok(format!("{}{}", name, suffix))
        }
    }

    /// Full path of a level in this store
    pub fn path_for(&self, name: &str) -> Result<PathBuf, LevelFileError> {
        Ok(self.dir.join(Self::file_name(name)?))
    }

    pub fn exists(&self, name: &str) -> bool {
        self.path_for(name).map(|path| path.is_file()).unwrap_or(false)
    }

    /// Level file names in the store, sorted. A missing directory lists as empty.
    pub fn list(&self) -> Result<Vec<String>, LevelFileError> {
        if !self.dir.exists() {
            return Ok(Vec::new());
        }
        let entries =
            std::fs::read_dir(&self.dir).map_err(|e| LevelFileError::IoError(e.to_string()))?;

        let mut names: Vec<String> = entries
            .filter_map(|entry| entry.ok())
            .map(|entry| entry.path())
            .filter(|path| {
                path.is_file()
                    && path.extension().and_then(|ext| ext.to_str()) == Some(LEVEL_FILE_EXTENSION)
            })
            .filter_map(|path| {
                path.file_name()
                    .and_then(|name| name.to_str())
                    .map(str::to_string)
            })
            .collect();
        names.sort();
        Ok(names)
    }

    /// The most recently modified level file, if any
    pub fn latest(&self) -> Option<String> {
        let names = self.list().ok()?;
        names
            .into_iter()
            .filter_map(|name| {
                let modified = std::fs::metadata(self.dir.join(&name))
                    .and_then(|meta| meta.modified())
                    .ok()?;
                Some((modified, name))
            })
            .max()
            .map(|(_, name)| name)
    }
}
