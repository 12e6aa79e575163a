use crate::action::{Action, ActionFactory};
use crate::config::Config;
use crate::error::{Error, Result};
use crate::observer::{LogObserver, Observer};
use crate::origin::Origin;
use crate::reducer::{reduce, Outcome};
use crate::saver::{sibling_with_suffix, StateSaver, WriteMode};
use crate::state::State;
use fs2::FileExt;
use std::fs::{self, File, OpenOptions};
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Whether a [`Store`] takes an exclusive lock on its snapshot.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LockMode {
    /// Hold an advisory lock on `<snapshot>.lock` for the store's lifetime.
    /// A second store on the same snapshot fails to open.
    #[default]
    Exclusive,
    /// No locking. The caller guarantees there is a single writer.
    None,
}

/// The authoritative state holder in the controller process.
///
/// Every action goes through [`Store::dispatch`], one at a time: origin
/// check, reducer, snapshot write, observers. The snapshot on disk always
/// reflects the last dispatched action.
///
/// # Examples
///
/// ```
/// use dlqueue::Store;
///
/// let dir = tempfile::tempdir().unwrap();
/// let mut store = Store::open(dir.path().join("state.json")).unwrap();
///
/// let enqueue = store.actions().enqueue_download("http://a");
/// store.dispatch(enqueue).unwrap();
/// assert_eq!(store.state().downloads[0].url, "http://a");
/// ```
pub struct Store {
    state: Arc<State>,
    saver: StateSaver,
    actions: ActionFactory,
    observers: Vec<Box<dyn Observer>>,
    _lock: Option<File>,
}

impl std::fmt::Debug for Store {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Store")
            .field("state", &self.state)
            .field("snapshot_path", &self.saver.path())
            .field("origin", &self.actions.origin())
            .field("observers", &self.observers.len())
            .finish()
    }
}

impl Store {
    /// Start configuring a store that persists to `snapshot_path`.
    pub fn builder(snapshot_path: impl Into<PathBuf>) -> StoreBuilder {
        StoreBuilder::new(snapshot_path)
    }

    /// Open a controller store with default settings.
    pub fn open(snapshot_path: impl Into<PathBuf>) -> Result<Self> {
        Self::builder(snapshot_path).open()
    }

    /// Open a store from startup configuration.
    pub fn from_config(config: &Config) -> Result<Self> {
        Self::builder(&config.snapshot_path)
            .origin(config.origin)
            .lock_mode(config.lock_mode)
            .write_mode(config.write_mode)
            .open()
    }

    /// Apply one action and persist the result.
    ///
    /// The snapshot is written after every action, including no-ops and
    /// actions dropped because the state is inactive.
    ///
    /// # Errors
    ///
    /// Returns [`Error::OriginViolation`] if the action's origin may not
    /// create it; the reducer is not run and nothing is written. Returns an
    /// I/O error if the snapshot write fails; the reduced state is kept in
    /// memory.
    pub fn dispatch(&mut self, action: Action) -> Result<Outcome> {
        action.check_origin()?;

        let (next, outcome) = reduce(&self.state, &action);
        self.state = next;
        self.saver.save(&self.state)?;

        for observer in &mut self.observers {
            observer.on_dispatch(&action, outcome, &self.state);
        }
        Ok(outcome)
    }

    /// The current state.
    pub fn state(&self) -> &Arc<State> {
        &self.state
    }

    /// Builds actions stamped with this store's process origin.
    pub fn actions(&self) -> ActionFactory {
        self.actions
    }

    /// The persistence handle writing this store's snapshot.
    pub fn saver(&self) -> &StateSaver {
        &self.saver
    }
}

/// Configures and opens a [`Store`].
///
/// ```
/// use dlqueue::{LockMode, State, Store, WriteMode};
///
/// let dir = tempfile::tempdir().unwrap();
/// let store = Store::builder(dir.path().join("state.json"))
///     .default_state(State { is_active: false, downloads: vec![] })
///     .lock_mode(LockMode::None)
///     .write_mode(WriteMode::Atomic)
///     .open()
///     .unwrap();
/// assert!(!store.state().is_active);
/// ```
pub struct StoreBuilder {
    snapshot_path: PathBuf,
    default_state: State,
    origin: Origin,
    lock_mode: LockMode,
    write_mode: WriteMode,
    observers: Option<Vec<Box<dyn Observer>>>,
}

impl StoreBuilder {
    fn new(snapshot_path: impl Into<PathBuf>) -> Self {
        StoreBuilder {
            snapshot_path: snapshot_path.into(),
            default_state: State::default(),
            origin: Origin::Main,
            lock_mode: LockMode::default(),
            write_mode: WriteMode::default(),
            observers: None,
        }
    }

    /// State to start from when no snapshot exists.
    pub fn default_state(mut self, state: State) -> Self {
        self.default_state = state;
        self
    }

    /// Role of the running process, stamped by [`Store::actions`].
    pub fn origin(mut self, origin: Origin) -> Self {
        self.origin = origin;
        self
    }

    /// Whether to take the single-writer lock. Defaults to [`LockMode::Exclusive`].
    pub fn lock_mode(mut self, mode: LockMode) -> Self {
        self.lock_mode = mode;
        self
    }

    /// How snapshots are written. Defaults to [`WriteMode::Direct`].
    pub fn write_mode(mut self, mode: WriteMode) -> Self {
        self.write_mode = mode;
        self
    }

    /// Register an observer. The first call replaces the default
    /// [`LogObserver`]; later calls add more.
    pub fn observer(mut self, observer: impl Observer + 'static) -> Self {
        self.observers
            .get_or_insert_with(Vec::new)
            .push(Box::new(observer));
        self
    }

    /// Take the lock (if any) and load the snapshot.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Locked`] if another store holds the snapshot, or
    /// [`Error::Parse`] if the snapshot exists but is malformed.
    pub fn open(self) -> Result<Store> {
        let saver = StateSaver::new(self.snapshot_path).with_mode(self.write_mode);

        let lock = match self.lock_mode {
            LockMode::Exclusive => Some(acquire_lock(saver.path())?),
            LockMode::None => None,
        };

        let state = if saver.exists() {
            let state = saver.load_or(self.default_state)?;
            log::info!("loaded state from {}", saver.path().display());
            state
        } else {
            log::info!(
                "no snapshot at {}, starting from default state",
                saver.path().display()
            );
            self.default_state
        };

        let observers = match self.observers {
            Some(observers) => observers,
            None => vec![Box::new(LogObserver) as Box<dyn Observer>],
        };

        Ok(Store {
            state: Arc::new(state),
            saver,
            actions: ActionFactory::new(self.origin),
            observers,
            _lock: lock,
        })
    }
}

fn acquire_lock(snapshot_path: &Path) -> Result<File> {
    let lock_path = sibling_with_suffix(snapshot_path, "lock");
    if let Some(parent) = lock_path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }

    let file = OpenOptions::new()
        .create(true)
        .truncate(false)
        .write(true)
        .open(&lock_path)?;

    match file.try_lock_exclusive() {
        Ok(()) => Ok(file),
        Err(e) if e.kind() == fs2::lock_contended_error().kind() => Err(Error::Locked {
            path: snapshot_path.to_path_buf(),
        }),
        Err(e) => Err(e.into()),
    }
}
