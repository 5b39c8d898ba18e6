use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// A calendar value bound to an event's start or end.
///
/// All-day events carry date-only values; timed events carry a date and time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DateValue {
    Date(NaiveDate),
    DateTime(NaiveDateTime),
}

impl DateValue {
    /// Returns the calendar date, dropping any time component.
    pub fn date(&self) -> NaiveDate {
        match self {
            DateValue::Date(date) => *date,
            DateValue::DateTime(datetime) => datetime.date(),
        }
    }

    /// Returns true if this value has no time component.
    pub fn is_date_only(&self) -> bool {
        matches!(self, DateValue::Date(_))
    }
}

impl From<NaiveDate> for DateValue {
    fn from(date: NaiveDate) -> Self {
        DateValue::Date(date)
    }
}

impl From<NaiveDateTime> for DateValue {
    fn from(datetime: NaiveDateTime) -> Self {
        DateValue::DateTime(datetime)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_date_of_datetime() {
        let datetime = NaiveDate::from_ymd_opt(2015, 3, 1)
            .unwrap()
            .and_hms_opt(10, 30, 0)
            .unwrap();
        let value = DateValue::from(datetime);

        assert_eq!(value.date(), NaiveDate::from_ymd_opt(2015, 3, 1).unwrap());
        assert!(!value.is_date_only());
    }

    #[test]
    fn test_serializes_as_plain_string() {
        let value = DateValue::from(NaiveDate::from_ymd_opt(2015, 3, 1).unwrap());
        let json = serde_json::to_string(&value).unwrap();
        assert_eq!(json, "\"2015-03-01\"");
    }
}
