use crate::action::Action;
use crate::reducer::Outcome;
use crate::state::State;

/// Notified by the [`Store`](crate::Store) after each action has been
/// reduced and the snapshot written.
///
/// Observers run outside the reducer, so logging and other side effects never
/// influence the state a transition produces.
pub trait Observer {
    fn on_dispatch(&mut self, action: &Action, outcome: Outcome, state: &State);
}

/// The default observer: reports each dispatch through the `log` facade.
///
/// Dropped actions on a frozen state are logged at `warn`.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogObserver;

impl Observer for LogObserver {
    fn on_dispatch(&mut self, action: &Action, outcome: Outcome, state: &State) {
        match outcome {
            Outcome::Ignored => {
                log::warn!("Action {} received while app is inactive.", action.tag());
            }
            Outcome::Applied => {
                log::debug!(
                    "applied {}: {} download(s) queued",
                    action.tag(),
                    state.downloads.len()
                );
            }
            Outcome::Unchanged => {
                log::debug!("{} left the state unchanged", action.tag());
            }
        }
        log::info!("wrote state after {}", action.tag());
    }
}

impl<F> Observer for F
where
    F: FnMut(&Action, Outcome, &State),
{
    fn on_dispatch(&mut self, action: &Action, outcome: Outcome, state: &State) {
        self(action, outcome, state)
    }
}
