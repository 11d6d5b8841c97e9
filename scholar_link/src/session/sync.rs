//! Cross-process session invalidation.
//!
//! Browser tabs get a `storage` event when another tab clears the token
//! entry; a native client has no such push signal, so this module polls
//! the shared store instead. The watcher only ever reacts to token
//! *removal*; a pair appearing externally never signs this process in.

use super::manager::SessionManager;
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

/// Default poll period for the store watcher.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(500);

/// Spawn a background task that reconciles the session against the
/// shared token store every `poll_interval`.
///
/// The task runs for the life of the runtime; abort the returned handle
/// on application shutdown.
pub fn spawn_store_watcher(manager: SessionManager, poll_interval: Duration) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(poll_interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        loop {
            ticker.tick().await;
            manager.reconcile_with_store();
        }
    })
}
