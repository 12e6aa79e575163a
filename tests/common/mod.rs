#![allow(dead_code)]

use dlqueue::{Action, ActionFactory, Download, DownloadStatus, Origin, Outcome, State};
use std::cell::RefCell;
use std::rc::Rc;
use std::sync::Arc;

pub fn main_actions() -> ActionFactory {
    ActionFactory::new(Origin::Main)
}

pub fn renderer_actions() -> ActionFactory {
    ActionFactory::new(Origin::Renderer)
}

pub fn active_with(urls: &[&str]) -> Arc<State> {
    Arc::new(State {
        is_active: true,
        downloads: urls.iter().map(|u| Download::new(*u)).collect(),
    })
}

pub fn inactive_with(urls: &[&str]) -> Arc<State> {
    Arc::new(State {
        is_active: false,
        downloads: urls.iter().map(|u| Download::new(*u)).collect(),
    })
}

pub fn urls(state: &State) -> Vec<&str> {
    state.downloads.iter().map(|d| d.url.as_str()).collect()
}

/// One action of every kind, all stamped by the controller.
pub fn every_action() -> Vec<Action> {
    let main = main_actions();
    vec![
        main.init().unwrap(),
        Action::unstamped(dlqueue::ActionKind::ReduxInit),
        main.shutdown().unwrap(),
        main.log("hello"),
        main.download_log("http://a", "progress"),
        main.enqueue_download("http://a"),
        main.start_download("http://a").unwrap(),
        main.finish_download("http://a").unwrap(),
        main.cancel_download("http://a"),
        main.retry_download("http://a"),
        main.download_prepared("http://a", serde_json::json!({"title": "A"}))
            .unwrap(),
        main.download_error("http://a", "boom").unwrap(),
    ]
}

pub fn sample_state() -> State {
    State {
        is_active: true,
        downloads: vec![
            Download {
                status: DownloadStatus::Downloading,
                url: "http://a".into(),
                log: vec!["started".into(), "50%".into()],
            },
            Download {
                status: DownloadStatus::Errored,
                url: "http://b".into(),
                log: vec!["404".into()],
            },
            Download::new("http://c"),
        ],
    }
}

/// Observer that records `(tag, outcome, download count)` per dispatch.
#[derive(Clone, Default)]
pub struct Recorder {
    pub seen: Rc<RefCell<Vec<(String, Outcome, usize)>>>,
}

impl dlqueue::Observer for Recorder {
    fn on_dispatch(&mut self, action: &Action, outcome: Outcome, state: &State) {
        self.seen
            .borrow_mut()
            .push((action.tag().to_string(), outcome, state.downloads.len()));
    }
}
