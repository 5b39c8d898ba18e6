//! Delete-with-undo orchestration.

mod service;

pub use service::{DeleteOutcome, GracefulDelete};
