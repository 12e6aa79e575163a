//! A controller and a renderer exchanging wire-encoded actions.
//!
//! The renderer runs on its own thread and only has a channel of JSON
//! strings to the controller, standing in for the real process boundary.

use dlqueue::{Action, ActionFactory, Origin, Store};
use std::sync::mpsc;
use std::thread;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempfile::tempdir()?;
    let mut store = Store::open(dir.path().join("state.json"))?;
    let (tx, rx) = mpsc::channel::<String>();

    let renderer = thread::spawn(move || -> dlqueue::Result<()> {
        let actions = ActionFactory::new(Origin::Renderer);

        tx.send(actions.enqueue_download("https://example.com/v/1").to_json()?)
            .ok();
        tx.send(actions.enqueue_download("https://example.com/v/2").to_json()?)
            .ok();

        // Refused locally: the renderer may not start downloads
        if let Err(e) = actions.start_download("https://example.com/v/1") {
            println!("renderer: {e}");
        }

        // A forged message is refused by the controller instead
        tx.send(r#"{"type":"startDownload","url":"https://example.com/v/1","origin":"renderer"}"#.into())
            .ok();
        tx.send(actions.cancel_download("https://example.com/v/1").to_json()?)
            .ok();
        Ok(())
    });

    // Controller: one message at a time, in arrival order
    for msg in rx {
        let action = Action::from_json(&msg)?;
        match store.dispatch(action) {
            Ok(outcome) => println!("controller: {outcome:?}"),
            Err(e) => println!("controller: rejected: {e}"),
        }
    }
    renderer.join().map_err(|_| "renderer panicked")??;

    let snapshot = std::fs::read_to_string(store.saver().path())?;
    println!("snapshot:\n{snapshot}");
    Ok(())
}
