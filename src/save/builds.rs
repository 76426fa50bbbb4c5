//! Saved build library
//!
//! Named builds persist as versioned JSON in the platform data directory,
//! so a build survives closing the terminal.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Current library format version for compatibility
const LIBRARY_VERSION: u32 = 1;

/// One saved build: a display name plus the share query that restores it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SavedBuild {
    pub name: String,
    /// Share query (`points=...&collections=...`) as produced by the planner.
    pub query: String,
}

/// Every build the user has saved.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BuildLibrary {
    /// Version for compatibility checking
    pub version: u32,
    pub builds: Vec<SavedBuild>,
}

impl Default for BuildLibrary {
    fn default() -> Self {
        Self {
            version: LIBRARY_VERSION,
            builds: Vec::new(),
        }
    }
}

impl BuildLibrary {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a build under `name`, replacing an earlier one by the same name.
    pub fn upsert(&mut self, name: impl Into<String>, query: impl Into<String>) {
        let name = name.into();
        let query = query.into();
        if let Some(existing) = self.builds.iter_mut().find(|b| b.name == name) {
            existing.query = query;
        } else {
            self.builds.push(SavedBuild { name, query });
        }
    }

    /// Drop the build at `index`, returning it when it existed.
    pub fn remove(&mut self, index: usize) -> Option<SavedBuild> {
        if index < self.builds.len() {
            Some(self.builds.remove(index))
        } else {
            None
        }
    }

    pub fn get(&self, index: usize) -> Option<&SavedBuild> {
        self.builds.get(index)
    }

    pub fn len(&self) -> usize {
        self.builds.len()
    }

    pub fn is_empty(&self) -> bool {
        self.builds.is_empty()
    }
}

#[derive(Debug, Error)]
pub enum LibraryError {
    #[error("failed to access {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to encode build library: {0}")]
    Encode(#[from] serde_json::Error),
}

/// Get the library file path
fn library_path() -> PathBuf {
    use directories::ProjectDirs;

    if let Some(proj_dirs) = ProjectDirs::from("dev", "reelbuild", "Reelbuild") {
        let mut path = proj_dirs.data_local_dir().to_path_buf();
        path.push("builds.json");
        path
    } else {
        PathBuf::from("./builds.json")
    }
}

/// Load a library from `path`, falling back to an empty one on any failure.
pub fn load_library_from(path: &Path) -> BuildLibrary {
    if path.exists() {
        match fs::read_to_string(path) {
            Ok(data) => match serde_json::from_str(&data) {
                Ok(library) => {
                    log::info!("Build library loaded from {:?}", path);
                    return library;
                }
                Err(e) => {
                    log::warn!("Failed to parse build library: {}, starting empty", e);
                }
            },
            Err(e) => {
                log::warn!("Failed to read build library: {}, starting empty", e);
            }
        }
    }
    BuildLibrary::new()
}

/// Load the user's build library.
pub fn load_library() -> BuildLibrary {
    load_library_from(&library_path())
}

/// Save a library to `path`.
pub fn save_library_to(path: &Path, library: &BuildLibrary) -> Result<(), LibraryError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|source| LibraryError::Io {
            path: parent.display().to_string(),
            source,
        })?;
    }

    let json = serde_json::to_string_pretty(library)?;
    fs::write(path, json).map_err(|source| LibraryError::Io {
        path: path.display().to_string(),
        source,
    })?;

    log::info!("Build library saved to {:?}", path);
    Ok(())
}

/// Save the user's build library.
pub fn save_library(library: &BuildLibrary) -> Result<(), LibraryError> {
    save_library_to(&library_path(), library)
}
