//! Snapshot persistence for the shared state document.

use crate::error::{Error, Result};
use crate::state::State;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

/// How [`StateSaver::save`] replaces the snapshot file.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum WriteMode {
    /// Overwrite the file in place. A crash mid-write can leave a truncated
    /// snapshot behind.
    #[default]
    Direct,
    /// Write to a `.tmp` sibling, sync, then rename over the snapshot. If the
    /// process crashes mid-write the old snapshot survives intact.
    Atomic,
}

/// Reads and writes the state snapshot at a fixed path.
///
/// The file is pretty-printed JSON and can be inspected directly:
///
/// ```text
/// $ cat state.json
/// {
///   "isActive": true,
///   "downloads": [
///     {
///       "state": "preparing",
///       "url": "https://example.com/watch?v=1",
///       "log": []
///     }
///   ]
/// }
/// ```
#[derive(Debug, Clone)]
pub struct StateSaver {
    path: PathBuf,
    mode: WriteMode,
}

impl StateSaver {
    /// A saver for `path` using [`WriteMode::Direct`].
    pub fn new(path: impl Into<PathBuf>) -> Self {
        StateSaver {
            path: path.into(),
            mode: WriteMode::default(),
        }
    }

    /// Use `mode` for subsequent saves.
    pub fn with_mode(mut self, mode: WriteMode) -> Self {
        self.mode = mode;
        self
    }

    /// Returns the path of the snapshot file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Returns the write mode.
    pub fn mode(&self) -> WriteMode {
        self.mode
    }

    /// Load the snapshot, or return `default` if there is none.
    ///
    /// # Errors
    ///
    /// A snapshot that exists but does not parse is an error, never replaced
    /// by the default. Any read failure other than a missing file is also
    /// returned.
    pub fn load_or(&self, default: State) -> Result<State> {
        let contents = match fs::read_to_string(&self.path) {
            Ok(c) => c,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(default),
            Err(e) => return Err(e.into()),
        };

        serde_json::from_str(&contents).map_err(|source| Error::Parse {
            path: self.path.clone(),
            source,
        })
    }

    /// Whether a snapshot file is present.
    pub fn exists(&self) -> bool {
        self.path.exists()
    }

    /// Serialize the full state and replace the snapshot file.
    ///
    /// Blocks until the write completes. Creates the parent directory if it
    /// doesn't exist.
    pub fn save(&self, state: &State) -> Result<()> {
        let json = serde_json::to_string_pretty(state)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }

        match self.mode {
            WriteMode::Direct => fs::write(&self.path, json.as_bytes())?,
            WriteMode::Atomic => {
                let tmp_path = self.tmp_path();
                let mut file = fs::File::create(&tmp_path)?;
                file.write_all(json.as_bytes())?;
                file.sync_data()?;
                drop(file);
                fs::rename(&tmp_path, &self.path)?;
            }
        }
        Ok(())
    }

    /// Delete the snapshot file and its `.tmp` file if present.
    ///
    /// Idempotent — does not error if the files don't exist.
    pub fn delete(&self) -> Result<()> {
        remove_if_present(&self.path)?;
        remove_if_present(&self.tmp_path())?;
        Ok(())
    }

    pub(crate) fn tmp_path(&self) -> PathBuf {
        sibling_with_suffix(&self.path, "tmp")
    }
}

/// `state.json` -> `state.json.<suffix>`
pub(crate) fn sibling_with_suffix(path: &Path, suffix: &str) -> PathBuf {
    let mut name = path.as_os_str().to_owned();
    name.push(".");
    name.push(suffix);
    PathBuf::from(name)
}

fn remove_if_present(path: &Path) -> io::Result<()> {
    match fs::remove_file(path) {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
        Err(e) => Err(e),
    }
}
