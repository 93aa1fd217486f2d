//! Reading and writing `preferences.json`

use std::path::{Path, PathBuf};

use directories::ProjectDirs;

use super::EditorPreferences;

const PREFERENCES_FILE: &str = "preferences.json";
const APP_QUALIFIER: &str = "com";
const APP_ORGANIZATION: &str = "sidescroll_editor";
const APP_NAME: &str = "sidescroll_editor";

/// Failure to read or write the preferences file
#[derive(Debug)]
pub enum PreferencesError {
    Read { path: PathBuf, source: std::io::Error },
    Write { path: PathBuf, source: std::io::Error },
    /// The file exists but is not a valid preferences document
    Parse { path: PathBuf, source: serde_json::Error },
    Serialize(serde_json::Error),
    /// The platform reports no per-user config location
    NoConfigDir,
}

impl std::fmt::Display for PreferencesError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PreferencesError::Read { path, source } => {
                write!(f, "cannot read {}: {}", path.display(), source)
            }
            PreferencesError::Write { path, source } => {
                write!(f, "cannot write {}: {}", path.display(), source)
            }
            PreferencesError::Parse { path, source } => {
                write!(f, "invalid preferences in {}: {}", path.display(), source)
            }
            PreferencesError::Serialize(e) => write!(f, "cannot serialize preferences: {}", e),
            PreferencesError::NoConfigDir => write!(f, "no user config directory available"),
        }
    }
}

impl std::error::Error for PreferencesError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            PreferencesError::Read { source, .. } | PreferencesError::Write { source, .. } => {
                Some(source)
            }
            PreferencesError::Parse { source, .. } | PreferencesError::Serialize(source) => {
                Some(source)
            }
            PreferencesError::NoConfigDir => None,
        }
    }
}

impl EditorPreferences {
    /// `preferences.json` inside the per-user config directory for the editor
    pub fn preferences_path() -> Option<PathBuf> {
        let dirs = ProjectDirs::from(APP_QUALIFIER, APP_ORGANIZATION, APP_NAME)?;
        Some(dirs.config_dir().join(PREFERENCES_FILE))
    }

    /// Load preferences from the config directory, returning defaults on any failure
    pub fn load() -> Self {
        let loaded = Self::preferences_path()
            .ok_or(PreferencesError::NoConfigDir)
            .and_then(|path| Self::load_from_path(&path));
        loaded.unwrap_or_else(|e| {
            bevy::log::warn!("Could not load preferences: {}. Using defaults.", e);
            Self::default()
        })
    }

    /// Load preferences from a file. A missing file yields defaults.
    pub fn load_from_path(path: &Path) -> Result<Self, PreferencesError> {
        let content = match std::fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Self::default()),
            Err(source) => {
                return Err(PreferencesError::Read {
                    path: path.to_path_buf(),
                    source,
                })
            }
        };
        serde_json::from_str(&content).map_err(|source| PreferencesError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Save preferences to the config directory
    pub fn save(&self) -> Result<(), PreferencesError> {
        let path = Self::preferences_path().ok_or(PreferencesError::NoConfigDir)?;
        self.save_to_path(&path)?;
        bevy::log::info!("Saved preferences to {:?}", path);
        Ok(())
    }

    /// Save preferences to a file, creating its directory if needed
    pub fn save_to_path(&self, path: &Path) -> Result<(), PreferencesError> {
        let write_error = |source| PreferencesError::Write {
            path: path.to_path_buf(),
            source,
        };
        if let Some(dir) = path.parent() {
            std::fs::create_dir_all(dir).map_err(write_error)?;
        }
        let content = serde_json::to_string_pretty(self).map_err(PreferencesError::Serialize)?;
        std::fs::write(path, content).map_err(write_error)
    }
}
