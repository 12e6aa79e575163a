//! The action protocol: the closed set of messages that may transform the
//! shared state, and the origin rules for who may create them.

use crate::error::{Error, Result};
use crate::origin::Origin;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Opaque video metadata attached to `downloadPrepared`.
///
/// Produced by the download executor; this crate never looks inside it.
pub type VideoInfo = Value;

/// Every state transition or notification the protocol permits.
///
/// Serialized with the tag in a `"type"` field, e.g.
/// `{"type": "enqueueDownload", "url": "http://a"}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
#[non_exhaustive]
pub enum ActionKind {
    /// First-time initialization, run at startup.
    Init,
    /// Bootstrap tag some state containers dispatch before anything else.
    /// Only ever decoded off the wire.
    #[serde(rename = "@@redux/INIT")]
    ReduxInit,
    /// Shut down the app.
    Shutdown,
    /// A message that isn't specific to a particular download.
    Log { message: String },
    /// A message about one download.
    #[serde(rename = "urllog")]
    UrlLog { url: String, message: String },
    /// Add a download to the end of the queue.
    EnqueueDownload { url: String },
    /// Begin downloading a queued url.
    StartDownload { url: String },
    /// A download finished successfully.
    FinishDownload { url: String },
    /// Remove a download from the queue.
    CancelDownload { url: String },
    /// Retry a download that errored.
    RetryDownload { url: String },
    /// Metadata for a download has been retrieved.
    DownloadPrepared {
        url: String,
        #[serde(rename = "videoInfo")]
        video_info: VideoInfo,
    },
    /// Something went wrong while downloading.
    DownloadError { url: String, message: String },
}

impl ActionKind {
    /// The wire `type` of this action.
    pub fn tag(&self) -> &'static str {
        match self {
            ActionKind::Init => "init",
            ActionKind::ReduxInit => "@@redux/INIT",
            ActionKind::Shutdown => "shutdown",
            ActionKind::Log { .. } => "log",
            ActionKind::UrlLog { .. } => "urllog",
            ActionKind::EnqueueDownload { .. } => "enqueueDownload",
            ActionKind::StartDownload { .. } => "startDownload",
            ActionKind::FinishDownload { .. } => "finishDownload",
            ActionKind::CancelDownload { .. } => "cancelDownload",
            ActionKind::RetryDownload { .. } => "retryDownload",
            ActionKind::DownloadPrepared { .. } => "downloadPrepared",
            ActionKind::DownloadError { .. } => "downloadError",
        }
    }

    /// The only origin allowed to create this action, or `None` if any
    /// process may.
    pub fn required_origin(&self) -> Option<Origin> {
        match self {
            ActionKind::Init
            | ActionKind::Shutdown
            | ActionKind::StartDownload { .. }
            | ActionKind::FinishDownload { .. }
            | ActionKind::DownloadPrepared { .. }
            | ActionKind::DownloadError { .. } => Some(Origin::Main),
            ActionKind::ReduxInit
            | ActionKind::Log { .. }
            | ActionKind::UrlLog { .. }
            | ActionKind::EnqueueDownload { .. }
            | ActionKind::CancelDownload { .. }
            | ActionKind::RetryDownload { .. } => None,
        }
    }

    /// The url this action targets, if it targets a single download.
    pub fn url(&self) -> Option<&str> {
        match self {
            ActionKind::UrlLog { url, .. }
            | ActionKind::EnqueueDownload { url }
            | ActionKind::StartDownload { url }
            | ActionKind::FinishDownload { url }
            | ActionKind::CancelDownload { url }
            | ActionKind::RetryDownload { url }
            | ActionKind::DownloadPrepared { url, .. }
            | ActionKind::DownloadError { url, .. } => Some(url),
            ActionKind::Init
            | ActionKind::ReduxInit
            | ActionKind::Shutdown
            | ActionKind::Log { .. } => None,
        }
    }
}

/// An immutable, origin-stamped message.
///
/// Built through an [`ActionFactory`], which stamps the process origin, or
/// decoded off the wire with [`Action::from_json`].
///
/// The wire shape flattens the kind and the origin into one object:
///
/// ```text
/// {"type": "cancelDownload", "url": "http://a", "origin": "renderer"}
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Action {
    #[serde(flatten)]
    pub kind: ActionKind,

    /// Process that created the action. Omitted from the wire when unknown.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub origin: Option<Origin>,
}

impl Action {
    /// Wrap a kind without an origin, as the bootstrap tag arrives.
    pub fn unstamped(kind: ActionKind) -> Self {
        Action { kind, origin: None }
    }

    /// The wire `type` of this action.
    pub fn tag(&self) -> &'static str {
        self.kind.tag()
    }

    /// Verify that the stamped origin is allowed to originate this action.
    ///
    /// Used on actions that crossed the process boundary: a restricted
    /// action must carry exactly the origin it requires.
    ///
    /// # Errors
    ///
    /// Returns [`Error::OriginViolation`] if the action is restricted and its
    /// origin is missing or wrong.
    pub fn check_origin(&self) -> Result<()> {
        match self.kind.required_origin() {
            Some(required) if self.origin != Some(required) => Err(Error::OriginViolation {
                action: self.tag(),
                required,
            }),
            _ => Ok(()),
        }
    }

    /// Encode this action in its wire shape.
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string(self).map_err(Error::Wire)
    }

    /// Decode an action from its wire shape.
    ///
    /// Decoding does not check the origin; call [`Action::check_origin`]
    /// before handing the action to a reducer.
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(Error::Wire)
    }
}

/// Builds origin-stamped actions for one process.
///
/// Create one at process startup with the role of the running process.
/// The origin is fixed for the lifetime of the factory. Constructors for
/// controller-only actions fail immediately when called with the wrong
/// origin, so a misrouted action never reaches a reducer.
///
/// # Examples
///
/// ```
/// use dlqueue::{ActionFactory, Origin};
///
/// let renderer = ActionFactory::new(Origin::Renderer);
/// let action = renderer.enqueue_download("http://a");
/// assert_eq!(action.origin, Some(Origin::Renderer));
///
/// let err = renderer.start_download("http://a").unwrap_err();
/// assert_eq!(
///     err.to_string(),
///     "action startDownload should only be created in the main process"
/// );
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActionFactory {
    origin: Origin,
}

impl ActionFactory {
    /// A factory stamping every action with `origin`.
    pub fn new(origin: Origin) -> Self {
        ActionFactory { origin }
    }

    /// The origin stamped on every action this factory builds.
    pub fn origin(&self) -> Origin {
        self.origin
    }

    /// First-time initialization. Controller only.
    pub fn init(&self) -> Result<Action> {
        self.restricted(ActionKind::Init)
    }

    /// Shut down the app. Controller only.
    pub fn shutdown(&self) -> Result<Action> {
        self.restricted(ActionKind::Shutdown)
    }

    /// Log a message that isn't specific to a particular download.
    pub fn log(&self, message: impl Into<String>) -> Action {
        self.stamp(ActionKind::Log {
            message: message.into(),
        })
    }

    /// Log a message about a particular download (`urllog` on the wire).
    pub fn download_log(&self, url: impl Into<String>, message: impl Into<String>) -> Action {
        self.stamp(ActionKind::UrlLog {
            url: url.into(),
            message: message.into(),
        })
    }

    /// Enqueue a download at the end of the queue.
    pub fn enqueue_download(&self, url: impl Into<String>) -> Action {
        self.stamp(ActionKind::EnqueueDownload { url: url.into() })
    }

    /// Start a download. Controller only.
    pub fn start_download(&self, url: impl Into<String>) -> Result<Action> {
        self.restricted(ActionKind::StartDownload { url: url.into() })
    }

    /// Successfully finish a download. Controller only.
    pub fn finish_download(&self, url: impl Into<String>) -> Result<Action> {
        self.restricted(ActionKind::FinishDownload { url: url.into() })
    }

    /// Cancel a download, removing it from the queue.
    pub fn cancel_download(&self, url: impl Into<String>) -> Action {
        self.stamp(ActionKind::CancelDownload { url: url.into() })
    }

    /// Retry a download that errored.
    pub fn retry_download(&self, url: impl Into<String>) -> Action {
        self.stamp(ActionKind::RetryDownload { url: url.into() })
    }

    /// Signal that a download's metadata has been retrieved. Controller only.
    pub fn download_prepared(&self, url: impl Into<String>, video_info: VideoInfo) -> Result<Action> {
        self.restricted(ActionKind::DownloadPrepared {
            url: url.into(),
            video_info,
        })
    }

    /// Signal that a download failed. Controller only.
    pub fn download_error(&self, url: impl Into<String>, message: impl Into<String>) -> Result<Action> {
        self.restricted(ActionKind::DownloadError {
            url: url.into(),
            message: message.into(),
        })
    }

    fn stamp(&self, kind: ActionKind) -> Action {
        Action {
            kind,
            origin: Some(self.origin),
        }
    }

    fn restricted(&self, kind: ActionKind) -> Result<Action> {
        let action = self.stamp(kind);
        action.check_origin()?;
        Ok(action)
    }
}
