//! Date helpers for the board's due-date field.

use chrono::NaiveDate;

/// Date format used by the task source for plain due dates
pub const TODOIST_DATE_FORMAT: &str = "%Y-%m-%d";

/// Parse a date string in YYYY-MM-DD format to NaiveDate
pub fn parse_date(date_str: &str) -> Result<NaiveDate, chrono::ParseError> {
    NaiveDate::parse_from_str(date_str, TODOIST_DATE_FORMAT)
}

/// Turn a plain due date into the ISO-8601 midnight-UTC timestamp the board expects.
///
/// Returns `None` when the input is not a YYYY-MM-DD date.
pub fn board_due_date(date_str: &str) -> Option<String> {
    parse_date(date_str.trim())
        .ok()
        .map(|d| format!("{}T00:00:00Z", d.format(TODOIST_DATE_FORMAT)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn appends_midnight_utc() {
        assert_eq!(board_due_date("2024-05-03").as_deref(), Some("2024-05-03T00:00:00Z"));
    }

    #[test]
    fn rejects_non_dates() {
        assert_eq!(board_due_date("next monday"), None);
        assert_eq!(board_due_date(""), None);
    }
}
