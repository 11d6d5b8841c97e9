//! Session state machine.
//!
//! Exactly one [`SessionManager`] exists per running client; it owns the
//! [`Session`] and is the only writer. Consumers (guards, views, the
//! store watcher) read published snapshots and never mutate state
//! directly.

pub mod manager;
pub mod state;
pub mod sync;

pub use manager::SessionManager;
pub use state::Session;
pub use sync::spawn_store_watcher;
