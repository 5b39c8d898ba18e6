use chrono::Days;

use super::error::{DateError, Result};
use super::types::DateValue;

/// Converts a stored (exclusive) all-day end into the inclusive day shown to users.
///
/// The `is_all_day` flag governs the shift, not the shape of `stored`: timed
/// events pass through unchanged even if their value looks date-only.
pub fn to_display(stored: DateValue, is_all_day: bool) -> Result<DateValue> {
    if !is_all_day {
        return Ok(stored);
    }

    let date = stored.date();
    date.checked_sub_days(Days::new(1))
        .map(DateValue::Date)
        .ok_or_else(|| DateError::OutOfRange(format!("{date} minus one day")))
}

/// Converts a displayed (inclusive) all-day end back into its stored form.
///
/// A time of day on `displayed` is kept; only `to_display` normalizes.
pub fn to_storage(displayed: DateValue, is_all_day: bool) -> Result<DateValue> {
    if !is_all_day {
        return Ok(displayed);
    }

    let shifted = match displayed {
        DateValue::Date(date) => date.checked_add_days(Days::new(1)).map(DateValue::Date),
        DateValue::DateTime(datetime) => datetime
            .checked_add_days(Days::new(1))
            .map(DateValue::DateTime),
    };
    shifted.ok_or_else(|| DateError::OutOfRange(format!("{} plus one day", displayed.date())))
}

/// End date adapter bound to an event context.
///
/// The all-day flag is read from `is_all_day` on every call, so toggling the
/// event between all-day and timed takes effect immediately.
pub struct AllDayDateAdapter<F>
where
    F: Fn() -> bool,
{
    is_all_day: F,
}

impl<F> AllDayDateAdapter<F>
where
    F: Fn() -> bool,
{
    pub fn new(is_all_day: F) -> Self {
        Self { is_all_day }
    }

    pub fn to_display(&self, stored: DateValue) -> Result<DateValue> {
        to_display(stored, (self.is_all_day)())
    }

    pub fn to_storage(&self, displayed: DateValue) -> Result<DateValue> {
        to_storage(displayed, (self.is_all_day)())
    }
}
