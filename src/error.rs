use crate::origin::Origin;
use std::io;
use std::path::PathBuf;

/// Errors produced by the action protocol, the store, and snapshot persistence.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
    /// An action was constructed (or received) from a process that may not
    /// originate it.
    #[error("action {action} should only be created in the {required} process")]
    OriginViolation {
        /// Wire tag of the offending action.
        action: &'static str,
        /// The only origin allowed to create it.
        required: Origin,
    },

    /// The snapshot file exists but does not hold a valid state document.
    #[error("failed to parse snapshot {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// A wire message could not be encoded or decoded.
    #[error("malformed action message: {0}")]
    Wire(#[source] serde_json::Error),

    /// Another store already owns the snapshot file.
    #[error("another writer holds the lock on {}", .path.display())]
    Locked { path: PathBuf },

    /// Missing or invalid configuration.
    #[error("invalid configuration: {0}")]
    Config(String),

    #[error(transparent)]
    Io(#[from] io::Error),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
