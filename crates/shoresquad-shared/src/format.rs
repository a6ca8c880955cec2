//! Date helpers shared by the store and the renderer.
//!
//! Display dates always use the `en-US` short form ("Jun 1") regardless of
//! the host locale.

use chrono::NaiveDate;

use crate::error::ValidationError;

/// Parse a form date in ISO `YYYY-MM-DD` form.
pub fn parse_iso_date(raw: &str) -> Result<NaiveDate, ValidationError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::MissingField("date"));
    }
    NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
        .map_err(|_| ValidationError::InvalidDate(trimmed.to_string()))
}

/// Short month and day, e.g. `"Jun 1"`.
pub fn short_date(date: NaiveDate) -> String {
    date.format("%b %-d").to_string()
}

/// Today's date in the local timezone, formatted with [`short_date`].
pub fn today_short() -> String {
    short_date(chrono::Local::now().date_naive())
}
