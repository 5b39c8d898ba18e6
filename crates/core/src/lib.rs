//! Pure core for calgrace.
//!
//! - `deletion`: types, state machine, messages and collaborator traits for
//!   the delete-with-undo (grace period) workflow
//! - `dates`: the all-day end date adapter and display formatting

pub mod dates;
pub mod deletion;
