//! Slot decoding.
//!
//! Slots are GnuCash's generic key/value metadata, similar to a JSON
//! object whose values carry an explicit type tag. They are decoded eagerly
//! into a closed set of variants; an unknown tag fails the import instead
//! of being skipped.

use std::collections::BTreeMap;

use chrono::{DateTime, FixedOffset, NaiveDate};
use gncledger_shared::types::{Amount, Guid};

use super::error::{ImportError, ImportResult};
use super::schema::Slot;
use super::timestamp::parse_date;

/// Decoded slots keyed by slot key.
pub type SlotMap = BTreeMap<String, SlotValue>;

/// A typed slot value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SlotValue {
    /// `integer`.
    Integer(i64),
    /// `string`.
    String(String),
    /// `frame`: nested slots.
    Frame(SlotMap),
    /// `gdate`: a calendar day.
    Date(NaiveDate),
    /// `guid`: a reference to another entity.
    Guid(Guid),
    /// `numeric`: an exact rational.
    Numeric(Amount),
    /// `timespec`: an instant.
    Timespec(DateTime<FixedOffset>),
}

impl SlotValue {
    /// Returns the string payload, if this is a `string` slot.
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }
}

/// Decodes a slot sequence. `entity` labels errors.
///
/// Later duplicates of a key replace earlier ones.
pub fn decode(slots: &[Slot], entity: &str) -> ImportResult<SlotMap> {
    decode_frame(slots, entity, "")
}

fn decode_frame(slots: &[Slot], entity: &str, prefix: &str) -> ImportResult<SlotMap> {
    let mut map = SlotMap::new();
    for slot in slots {
        let path = if prefix.is_empty() {
            slot.key.clone()
        } else {
            format!("{prefix}/{}", slot.key)
        };
        let value = decode_value(slot, entity, &path)?;
        map.insert(slot.key.clone(), value);
    }
    Ok(map)
}

fn decode_value(slot: &Slot, entity: &str, path: &str) -> ImportResult<SlotValue> {
    let raw = &slot.value;
    let invalid = |text: &str, reason: String| ImportError::Format {
        entity: entity.to_string(),
        field: format!("slot {path}"),
        text: text.to_string(),
        reason,
    };

    let value = match raw.kind.as_str() {
        "integer" => {
            let text = raw.text.trim();
            SlotValue::Integer(text.parse().map_err(|e| invalid(text, format!("{e}")))?)
        }
        "string" => SlotValue::String(raw.text.clone()),
        "frame" => SlotValue::Frame(decode_frame(&raw.frame, entity, path)?),
        "gdate" => {
            let text = raw.gdate.as_deref().unwrap_or_default();
            SlotValue::Date(parse_date(text).map_err(|e| invalid(text, e.to_string()))?)
        }
        "guid" => {
            let text = raw.text.trim();
            SlotValue::Guid(Guid::parse(text).map_err(|e| invalid(text, e.reason().to_string()))?)
        }
        "numeric" => {
            let text = raw.text.trim();
            SlotValue::Numeric(
                Amount::parse(text).map_err(|e| invalid(text, e.reason().to_string()))?,
            )
        }
        "timespec" => {
            let stamp = raw.timestamp.clone().unwrap_or_default();
            SlotValue::Timespec(stamp.resolve(entity, &format!("slot {path}"))?)
        }
        other => {
            return Err(ImportError::Schema {
                entity: entity.to_string(),
                message: format!("unknown slot type {other:?} for key {path:?}"),
            });
        }
    };
    Ok(value)
}
