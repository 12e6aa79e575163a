//! Minimal CLI over a persisted download queue.
//!
//! ```text
//! cargo run --example queue_cli -- state.json enqueue https://example.com/v/1
//! cargo run --example queue_cli -- state.json list
//! cargo run --example queue_cli -- state.json cancel https://example.com/v/1
//! ```

use dlqueue::{Config, Store};
use simplelog::{ColorChoice, Config as LogConfig, LevelFilter, TermLogger, TerminalMode};
use std::env;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    TermLogger::init(
        LevelFilter::Info,
        LogConfig::default(),
        TerminalMode::Mixed,
        ColorChoice::Auto,
    )?;

    let mut args = env::args().skip(1);
    let config = match args.next() {
        Some(path) => Config::new(path),
        None => Config::from_env()?,
    };
    let mut store = Store::from_config(&config)?;
    let actions = store.actions();

    match (args.next().as_deref(), args.next()) {
        (Some("enqueue"), Some(url)) => {
            store.dispatch(actions.enqueue_download(url))?;
        }
        (Some("cancel"), Some(url)) => {
            store.dispatch(actions.cancel_download(url))?;
        }
        (Some("list") | None, _) => {}
        (Some(cmd), _) => return Err(format!("unknown command {cmd:?}").into()),
    }

    let state = store.state();
    println!("active: {}", state.is_active);
    for (i, download) in state.downloads.iter().enumerate() {
        println!("  {i}. [{:?}] {}", download.status, download.url);
    }

    Ok(())
}
