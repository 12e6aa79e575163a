use crate::action::{Action, ActionKind};
use crate::state::{Download, State};
use std::sync::Arc;

/// What a call to [`reduce`] did with an action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// A new state value was produced.
    Applied,
    /// The action was handled as a no-op; the input state is returned as is.
    Unchanged,
    /// The state is inactive, so the action was dropped.
    Ignored,
}

/// The state-transition function.
///
/// Pure: it never mutates `state`, performs no I/O and emits no logs. It
/// returns either a clone of the input `Arc` (same allocation) or a freshly
/// built state, together with an [`Outcome`] describing which happened.
///
/// An inactive state freezes the machine: every action is ignored.
///
/// # Examples
///
/// ```
/// use dlqueue::{reduce, ActionFactory, Origin, Outcome, State};
/// use std::sync::Arc;
///
/// let actions = ActionFactory::new(Origin::Main);
/// let state = Arc::new(State::default());
///
/// let (next, outcome) = reduce(&state, &actions.enqueue_download("http://a"));
/// assert_eq!(outcome, Outcome::Applied);
/// assert_eq!(next.downloads.len(), 1);
/// assert!(state.downloads.is_empty());
/// ```
pub fn reduce(state: &Arc<State>, action: &Action) -> (Arc<State>, Outcome) {
    if !state.is_active {
        return (Arc::clone(state), Outcome::Ignored);
    }

    match &action.kind {
        ActionKind::EnqueueDownload { url } => {
            let mut downloads = Vec::with_capacity(state.downloads.len() + 1);
            downloads.extend(state.downloads.iter().cloned());
            downloads.push(Download::new(url.as_str()));
            (with_downloads(state, downloads), Outcome::Applied)
        }
        ActionKind::CancelDownload { url } => {
            // Removes every entry for the url, not just the first.
            let downloads = state
                .downloads
                .iter()
                .filter(|d| d.url != *url)
                .cloned()
                .collect();
            (with_downloads(state, downloads), Outcome::Applied)
        }
        ActionKind::Init
        | ActionKind::ReduxInit
        | ActionKind::Shutdown
        | ActionKind::Log { .. }
        | ActionKind::UrlLog { .. }
        | ActionKind::StartDownload { .. }
        | ActionKind::FinishDownload { .. }
        | ActionKind::RetryDownload { .. }
        | ActionKind::DownloadPrepared { .. }
        | ActionKind::DownloadError { .. } => (Arc::clone(state), Outcome::Unchanged),
    }
}

fn with_downloads(state: &State, downloads: Vec<Download>) -> Arc<State> {
    Arc::new(State {
        is_active: state.is_active,
        downloads,
    })
}
