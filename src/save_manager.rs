//! Persistence gateway: the whole game state as one JSON blob at a fixed
//! path.

use directories::ProjectDirs;
use std::fs;
use std::io;
use std::path::PathBuf;
use tracing::warn;

use crate::game::GameState;

const SAVE_FILE: &str = "save.json";

/// Loads and stores the game state. Writes are full-blob overwrites; there
/// is exactly one writer, so last-write-wins is enough.
pub struct SaveManager {
    save_path: PathBuf,
}

impl SaveManager {
    /// Gateway at the platform config directory, created if needed.
    pub fn new() -> io::Result<Self> {
        let project_dirs = ProjectDirs::from("", "", "arena").ok_or_else(|| {
            io::Error::new(
                io::ErrorKind::NotFound,
                "Could not determine config directory",
            )
        })?;

        let config_dir = project_dirs.config_dir();
        fs::create_dir_all(config_dir)?;

        Ok(Self {
            save_path: config_dir.join(SAVE_FILE),
        })
    }

    /// Gateway at an explicit path, for tests.
    pub fn with_path(save_path: PathBuf) -> Self {
        Self { save_path }
    }

    /// Loads the saved game. A missing, unreadable or malformed blob is
    /// treated as absent: the caller starts fresh.
    pub fn load(&self) -> Option<GameState> {
        let json = fs::read_to_string(&self.save_path).ok()?;
        match serde_json::from_str(&json) {
            Ok(state) => Some(state),
            Err(e) => {
                warn!(error = %e, path = %self.save_path.display(), "discarding corrupt save");
                None
            }
        }
    }

    pub fn store(&self, state: &GameState) -> io::Result<()> {
        let json = serde_json::to_string_pretty(state)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
        fs::write(&self.save_path, json)
    }

    /// Removes the save file. Already absent is fine.
    pub fn delete(&self) -> io::Result<()> {
        match fs::remove_file(&self.save_path) {
            Err(e) if e.kind() != io::ErrorKind::NotFound => Err(e),
            _ => Ok(()),
        }
    }

    pub fn save_exists(&self) -> bool {
        self.save_path.exists()
    }
}
