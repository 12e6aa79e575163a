use serde::{Deserialize, Serialize};

/// The shared state document held by the controller.
///
/// Replaced, never mutated, by each reducer call. Serialized as
///
/// ```text
/// {
///   "isActive": true,
///   "downloads": [ { "state": "preparing", "url": "...", "log": [] } ]
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct State {
    /// When false the state is frozen and every action is dropped.
    pub is_active: bool,

    /// The download queue, in insertion order.
    pub downloads: Vec<Download>,
}

impl Default for State {
    fn default() -> Self {
        State {
            is_active: true,
            downloads: Vec::new(),
        }
    }
}

impl State {
    /// Iterate over every queued download with the given url.
    pub fn downloads_for<'a>(&'a self, url: &'a str) -> impl Iterator<Item = &'a Download> + 'a {
        self.downloads.iter().filter(move |d| d.url == url)
    }
}

/// One tracked resource in the queue.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Download {
    #[serde(rename = "state")]
    pub status: DownloadStatus,
    pub url: String,
    /// Append-only diagnostic trail.
    pub log: Vec<String>,
}

impl Download {
    /// A freshly enqueued download: `preparing`, empty log.
    pub fn new(url: impl Into<String>) -> Self {
        Download {
            status: DownloadStatus::Preparing,
            url: url.into(),
            log: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DownloadStatus {
    Preparing,
    Downloading,
    Finished,
    Errored,
}
