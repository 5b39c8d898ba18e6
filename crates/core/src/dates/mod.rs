mod adapter;
mod error;
mod format;
mod types;

pub use adapter::{to_display, to_storage, AllDayDateAdapter};
pub use error::{DateError, Result};
pub use format::{format_display, parse_display};
pub use types::DateValue;
