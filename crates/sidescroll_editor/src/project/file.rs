//! Level file save/load operations

use super::LevelStore;
use sidescroll_core::{decode_str, encode, DecodeError, Level};
use std::path::{Path, PathBuf};

#[derive(Debug)]
pub enum LevelFileError {
    IoError(String),
    NotFound(PathBuf),
    Decode(DecodeError),
    SerializeError(String),
    EmptyName,
}

impl std::fmt::Display for LevelFileError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LevelFileError::IoError(e) => write!(f, "IO error: {}", e),
            LevelFileError::NotFound(path) => write!(f, "Level file not found: {}", path.display()),
            LevelFileError::Decode(e) => write!(f, "Invalid level file: {}", e),
            LevelFileError::SerializeError(e) => write!(f, "Serialize error: {}", e),
            LevelFileError::EmptyName => write!(f, "Level name is empty"),
        }
    }
}

impl std::error::Error for LevelFileError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            LevelFileError::Decode(e) => Some(e),
            _ => None,
        }
    }
}

impl From<DecodeError> for LevelFileError {
    fn from(e: DecodeError) -> Self {
        LevelFileError::Decode(e)
    }
}

impl LevelStore {
    /// Save a level under `name`, creating the levels directory if needed
    pub fn save(
        &self,
        name: &str,
        level: &Level,
        created_at_tick: u64,
    ) -> Result<PathBuf, LevelFileError> {
        let path = self.path_for(name)?;
        std::fs::create_dir_all(self.dir()).map_err(|e| LevelFileError::IoError(e.to_string()))?;
        save_level_file(&path, level, created_at_tick)?;
        Ok(path)
    }

    /// Load the level stored under `name`
    pub fn load(&self, name: &str) -> Result<Level, LevelFileError> {
        let path = self.path_for(name)?;
        load_level_file(&path)
    }
}

/// Write a level to an explicit path
pub fn save_level_file(
    path: &Path,
    level: &Level,
    created_at_tick: u64,
) -> Result<(), LevelFileError> {
    let content = encode(level, created_at_tick)
        .to_json_pretty()
        .map_err(|e| LevelFileError::SerializeError(e.to_string()))?;

    std::fs::write(path, content).map_err(|e| LevelFileError::IoError(e.to_string()))
}

/// Read a level from an explicit path
pub fn load_level_file(path: &Path) -> Result<Level, LevelFileError> {
    if !path.is_file() {
        return Err(LevelFileError::NotFound(path.to_path_buf()));
    }
    let content =
        std::fs::read_to_string(path).map_err(|e| LevelFileError::IoError(e.to_string()))?;

    Ok(decode_str(&content)?)
}
