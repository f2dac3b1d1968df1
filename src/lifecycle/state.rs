//! Server lifecycle state tracking.
//!
//! ```text
//! Unstarted ──run──▶ Serving ──cancel──▶ ShuttingDown ──joined──▶ Stopped
//! ```

use std::fmt;

use tokio::sync::watch;

/// Lifecycle state of a webhook server, ordered by progression.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum LifecycleState {
    /// Constructed; no port bound.
    Unstarted,
    /// Serving task spawned; waiting for cancellation.
    Serving,
    /// Close issued; waiting for the serving task to finish.
    ShuttingDown,
    /// Close done and serving task joined. Terminal.
    Stopped,
}

impl fmt::Display for LifecycleState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            LifecycleState::Unstarted => "unstarted",
            LifecycleState::Serving => "serving",
            LifecycleState::ShuttingDown => "shutting_down",
            LifecycleState::Stopped => "stopped",
        };
        f.write_str(name)
    }
}

/// Writer side of the lifecycle state, held by the server.
#[derive(Debug)]
pub struct StateTracker {
    tx: watch::Sender<LifecycleState>,
}

impl StateTracker {
    pub fn new() -> Self {
        let (tx, _) = watch::channel(LifecycleState::Unstarted);
        Self { tx }
    }

    /// Move to `next`, logging the transition.
    pub fn advance(&self, next: LifecycleState) {
        let prev = self.tx.send_replace(next);
        tracing::debug!(from = %prev, to = %next, "Lifecycle transition");
    }

    pub fn current(&self) -> LifecycleState {
        *self.tx.borrow()
    }

    /// A receiver that observes every later transition.
    pub fn subscribe(&self) -> watch::Receiver<LifecycleState> {
        self.tx.subscribe()
    }
}

impl Default for StateTracker {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_unstarted() {
        let tracker = StateTracker::new();
        assert_eq!(tracker.current(), LifecycleState::Unstarted);
    }

    #[tokio::test]
    async fn subscribers_see_transitions() {
        let tracker = StateTracker::new();
        let mut rx = tracker.subscribe();

        tracker.advance(LifecycleState::Serving);
        rx.changed().await.unwrap();
        assert_eq!(*rx.borrow_and_update(), LifecycleState::Serving);

        tracker.advance(LifecycleState::ShuttingDown);
        tracker.advance(LifecycleState::Stopped);
        rx.changed().await.unwrap();
        assert_eq!(*rx.borrow_and_update(), LifecycleState::Stopped);
    }

    #[test]
    fn states_are_ordered() {
        assert!(LifecycleState::Unstarted < LifecycleState::Serving);
        assert!(LifecycleState::Serving < LifecycleState::ShuttingDown);
        assert!(LifecycleState::ShuttingDown < LifecycleState::Stopped);
    }

    #[test]
    fn display_names() {
        assert_eq!(LifecycleState::ShuttingDown.to_string(), "shutting_down");
    }
}
