use crate::error::{Error, Result};
use crate::origin::Origin;
use crate::saver::WriteMode;
use crate::store::LockMode;
use std::env;
use std::path::PathBuf;

/// Environment variable naming the snapshot file.
pub const SNAPSHOT_ENV: &str = "DLQUEUE_SNAPSHOT";

/// Environment variable carrying the process role (`main` or `renderer`).
pub const ROLE_ENV: &str = "DLQUEUE_ROLE";

/// Startup settings for a [`Store`](crate::Store).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub snapshot_path: PathBuf,
    pub origin: Origin,
    pub lock_mode: LockMode,
    pub write_mode: WriteMode,
}

impl Config {
    /// Defaults for a controller process writing to `snapshot_path`.
    pub fn new(snapshot_path: impl Into<PathBuf>) -> Self {
        Config {
            snapshot_path: snapshot_path.into(),
            origin: Origin::Main,
            lock_mode: LockMode::default(),
            write_mode: WriteMode::default(),
        }
    }

    /// Read `DLQUEUE_SNAPSHOT` and `DLQUEUE_ROLE` from the environment.
    ///
    /// The role defaults to `main` when unset.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] if the snapshot path is missing or the role
    /// is not a known origin.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub(crate) fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let snapshot_path = lookup(SNAPSHOT_ENV)
            .filter(|p| !p.trim().is_empty())
            .ok_or_else(|| Error::Config(format!("{SNAPSHOT_ENV} is not set")))?;

        let mut config = Config::new(snapshot_path);
        if let Some(role) = lookup(ROLE_ENV) {
            config.origin = role.parse()?;
        }
        Ok(config)
    }
}
