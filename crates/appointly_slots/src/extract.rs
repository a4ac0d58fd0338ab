//! Classification of raw booked-time entries returned by the backend.
//!
//! The booked-times endpoint has returned bare strings as well as whole
//! appointment objects under several field names. Entries are tried against
//! [`EXTRACTION_ORDER`] in turn; the first strategy that yields text wins.

use crate::time::TimeSlot;
use serde_json::Value;
use tracing::debug;

/// Field names checked, in priority order, on object entries.
pub const KNOWN_TIME_FIELDS: [&str; 7] = [
    "timeSlot",
    "time",
    "slot",
    "appointmentTime",
    "startTime",
    "appointment_time",
    "start_time",
];

/// One way of pulling a time out of a raw entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Extraction {
    /// The entry itself is a string.
    BareString,
    /// The first non-empty value among [`KNOWN_TIME_FIELDS`].
    KnownField,
    /// The first string-valued field, in document order, that parses as a
    /// time. Strings that do not parse (a status, a name) are skipped.
    FirstTimeLikeField,
}

pub const EXTRACTION_ORDER: [Extraction; 3] = [
    Extraction::BareString,
    Extraction::KnownField,
    Extraction::FirstTimeLikeField,
];

impl Extraction {
    fn apply(self, entry: &Value) -> Option<TimeSlot> {
        match (self, entry) {
            (Extraction::BareString, Value::String(s)) => TimeSlot::normalize(s),
            (Extraction::KnownField, Value::Object(map)) => KNOWN_TIME_FIELDS
                .iter()
                .filter_map(|field| map.get(*field))
                .find_map(non_empty_text)
                .and_then(|text| TimeSlot::normalize(&text)),
            (Extraction::FirstTimeLikeField, Value::Object(map)) => map
                .values()
                .filter_map(Value::as_str)
                .find_map(TimeSlot::normalize),
            _ => None,
        }
    }
}

// Mirrors a truthiness check: null, false, 0 and "" do not count as set.
fn non_empty_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.trim().is_empty() => Some(s.trim().to_string()),
        Value::Number(n) if n.as_f64() != Some(0.0) => Some(n.to_string()),
        _ => None,
    }
}

/// Normalizes one raw entry to a slot, or `None` if nothing recognizable
/// is in it.
///
/// A known field that holds garbage does not fall through to the
/// first-time-like-field strategy: the entry is dropped.
pub fn normalize_entry(entry: &Value) -> Option<TimeSlot> {
    for strategy in EXTRACTION_ORDER {
        let applies = matches!(
            (strategy, entry),
            (Extraction::BareString, Value::String(_))
                | (Extraction::KnownField, Value::Object(_))
                | (Extraction::FirstTimeLikeField, Value::Object(_))
        );
        if !applies {
            continue;
        }
        if strategy == Extraction::KnownField && !has_known_field(entry) {
            continue;
        }
        let slot = strategy.apply(entry);
        debug!("Booked entry {} via {:?} -> {:?}", entry, strategy, slot);
        return slot;
    }
    debug!("Dropping unrecognized booked entry: {}", entry);
    None
}

fn has_known_field(entry: &Value) -> bool {
    entry.as_object().is_some_and(|map| {
        KNOWN_TIME_FIELDS
            .iter()
            .filter_map(|field| map.get(*field))
            .any(|v| non_empty_text(v).is_some())
    })
}
