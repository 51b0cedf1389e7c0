//! Timestamp resolution.

use chrono::{DateTime, Duration, FixedOffset, NaiveDate};

use super::error::{ImportError, ImportResult};
use super::schema::TimeStamp;

/// Layout of `ts:date`.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S %z";

/// Layout of `gdate`.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

impl TimeStamp {
    /// Resolves the instant `ts:date + ts:ns`.
    ///
    /// `entity` and `field` only label the error.
    pub fn resolve(&self, entity: &str, field: &str) -> ImportResult<DateTime<FixedOffset>> {
        let invalid = |text: &str, reason: String| ImportError::Format {
            entity: entity.to_string(),
            field: field.to_string(),
            text: text.to_string(),
            reason,
        };

        let base = DateTime::parse_from_str(&self.date, TIMESTAMP_FORMAT)
            .map_err(|e| invalid(&self.date, e.to_string()))?;

        let Some(ns) = self.ns.as_deref() else {
            return Ok(base);
        };
        let nanos: i64 = ns.parse().map_err(|e| invalid(ns, format!("{e}")))?;
        base.checked_add_signed(Duration::nanoseconds(nanos))
            .ok_or_else(|| invalid(ns, "timestamp out of range".to_string()))
    }
}

/// Parses a `gdate` day.
pub(crate) fn parse_date(text: &str) -> Result<NaiveDate, chrono::ParseError> {
    NaiveDate::parse_from_str(text, DATE_FORMAT)
}
