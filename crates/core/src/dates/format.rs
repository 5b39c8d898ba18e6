use chrono::{NaiveDate, NaiveDateTime};

use super::error::{DateError, Result};
use super::types::DateValue;

const DATE_FORMAT: &str = "%Y-%m-%d";
const DATETIME_FORMAT: &str = "%Y-%m-%d %H:%M";

/// Accepted input formats. Slashes are what the calendar views display.
const DATE_INPUTS: [&str; 2] = [DATE_FORMAT, "%Y/%m/%d"];
const DATETIME_INPUTS: [&str; 2] = [DATETIME_FORMAT, "%Y/%m/%d %H:%M"];

/// Parses a user-typed value.
///
/// All-day events take `YYYY-MM-DD`. Timed events take `YYYY-MM-DD HH:MM` and
/// also a bare date, which stays date-only. Both accept `/` as the separator.
pub fn parse_display(text: &str, is_all_day: bool) -> Result<DateValue> {
    let text = text.trim();

    if is_all_day {
        return parse_date(text).ok_or_else(|| DateError::InvalidFormat {
            input: text.to_string(),
            expected: "YYYY-MM-DD",
        });
    }

    DATETIME_INPUTS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(text, format).ok())
        .map(DateValue::DateTime)
        .or_else(|| parse_date(text))
        .ok_or_else(|| DateError::InvalidFormat {
            input: text.to_string(),
            expected: "YYYY-MM-DD HH:MM",
        })
}

fn parse_date(text: &str) -> Option<DateValue> {
    DATE_INPUTS
        .iter()
        .find_map(|format| NaiveDate::parse_from_str(text, format).ok())
        .map(DateValue::Date)
}

/// Renders a value in the same format `parse_display` accepts.
pub fn format_display(value: DateValue) -> String {
    match value {
        DateValue::Date(date) => date.format(DATE_FORMAT).to_string(),
        DateValue::DateTime(datetime) => datetime.format(DATETIME_FORMAT).to_string(),
    }
}
