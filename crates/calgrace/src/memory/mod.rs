//! In-memory collaborator implementations.
//!
//! Provides the backend, grace period, notification and signal bus used by
//! the CLI and by tests. Nothing here is persisted.

mod backend;
mod grace;
mod notifier;
mod pubsub;

pub use backend::InMemoryBackend;
pub use grace::MemoryGracePeriod;
pub use notifier::{RecordingNotifier, Severity};
pub use pubsub::MemorySignalBus;
