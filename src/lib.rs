//! Shared-state core of a two-process download manager.
//!
//! A controller process and a renderer process exchange [`Action`]s that
//! deterministically transform one [`State`]: an active flag plus an ordered
//! download queue. [`ActionFactory`] enforces which process may create which
//! action, [`reduce`] is the only function that derives new state, and
//! [`Store`] ties them together with a JSON snapshot written after every
//! dispatch.

mod action;
mod config;
mod error;
mod observer;
mod origin;
mod reducer;
mod saver;
mod state;
mod store;

pub use action::{Action, ActionFactory, ActionKind, VideoInfo};
pub use config::{Config, ROLE_ENV, SNAPSHOT_ENV};
pub use error::{Error, Result};
pub use observer::{LogObserver, Observer};
pub use origin::Origin;
pub use reducer::{reduce, Outcome};
pub use saver::{StateSaver, WriteMode};
pub use state::{Download, DownloadStatus, State};
pub use store::{LockMode, Store, StoreBuilder};
