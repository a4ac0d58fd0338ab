//! Time-of-day values for bookable slots.
//!
//! A [`TimeSlot`] is always whole minutes. Its canonical text form is the
//! 24-hour "HH:MM"; the booking page shows the 12-hour "H:MM AM" form.

use appointly_common::AppointlyError;
use chrono::{NaiveTime, Timelike};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

static TWELVE_HOUR: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)(\d{1,2}):(\d{2})(?::\d{2})?\s*(AM|PM)").expect("valid 12-hour pattern")
});
static MERIDIEM: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)AM|PM").expect("valid AM/PM pattern"));
static TWENTY_FOUR_HOUR: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(\d{1,2}):(\d{2})").expect("valid 24-hour pattern"));
static DISPLAY_FORM: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(?i)(\d{1,2}):(\d{2}) (AM|PM)$").expect("valid display pattern")
});
static CANONICAL_FORM: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(\d{1,2}):(\d{2})(?::(\d{2}))?$").expect("valid canonical pattern"));

/// A bookable time of day, minute precision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TimeSlot(NaiveTime);

impl TimeSlot {
    /// Builds a slot from hour (0..=23) and minute (0..=59).
    pub fn from_hm(hour: u32, minute: u32) -> Option<Self> {
        NaiveTime::from_hms_opt(hour, minute, 0).map(TimeSlot)
    }

    /// Drops seconds and sub-second precision.
    pub fn from_naive(time: NaiveTime) -> Self {
        TimeSlot(NaiveTime::from_hms_opt(time.hour(), time.minute(), 0).unwrap_or(time))
    }

    pub fn as_naive(&self) -> NaiveTime {
        self.0
    }

    pub fn hour(&self) -> u32 {
        self.0.hour()
    }

    pub fn minute(&self) -> u32 {
        self.0.minute()
    }

    /// Minutes since midnight.
    pub fn minutes_of_day(&self) -> u32 {
        self.hour() * 60 + self.minute()
    }

    /// Tolerant parse of server-provided text.
    ///
    /// Text mentioning AM/PM must contain an `H:MM[:SS] AM|PM` time; anything
    /// else is searched for its first `H:MM` (seconds, if present, are
    /// ignored). Out-of-range values and empty text yield `None`.
    pub fn normalize(raw: &str) -> Option<Self> {
        let text = raw.trim();
        if text.is_empty() {
            return None;
        }

        if MERIDIEM.is_match(text) {
            let caps = TWELVE_HOUR.captures(text)?;
            let hour: u32 = caps[1].parse().ok()?;
            let minute: u32 = caps[2].parse().ok()?;
            return Self::from_twelve_hour(hour, minute, &caps[3]);
        }

        let caps = TWENTY_FOUR_HOUR.captures(text)?;
        let hour: u32 = caps[1].parse().ok()?;
        let minute: u32 = caps[2].parse().ok()?;
        Self::from_hm(hour, minute)
    }

    /// 12-hour display form, e.g. "9:00 AM", "12:30 PM".
    pub fn to_display(&self) -> String {
        let (is_pm, hour12) = self.0.hour12();
        format!(
            "{}:{:02} {}",
            hour12,
            self.minute(),
            if is_pm { "PM" } else { "AM" }
        )
    }

    /// Strict inverse of [`TimeSlot::to_display`]: accepts exactly
    /// "H:MM AM" / "HH:MM PM" (meridiem case-insensitive).
    pub fn parse_display(display: &str) -> Option<Self> {
        let caps = DISPLAY_FORM.captures(display.trim())?;
        let hour: u32 = caps[1].parse().ok()?;
        let minute: u32 = caps[2].parse().ok()?;
        Self::from_twelve_hour(hour, minute, &caps[3])
    }

    fn from_twelve_hour(hour: u32, minute: u32, meridiem: &str) -> Option<Self> {
        if !(1..=12).contains(&hour) {
            return None;
        }
        let pm = meridiem.eq_ignore_ascii_case("PM");
        let hour24 = match (pm, hour) {
            (false, 12) => 0,
            (true, 12) => 12,
            (true, h) => h + 12,
            (false, h) => h,
        };
        Self::from_hm(hour24, minute)
    }
}

impl fmt::Display for TimeSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour(), self.minute())
    }
}

/// Parses the 24-hour form "HH:MM" (also "H:MM" and "HH:MM:SS").
impl FromStr for TimeSlot {
    type Err = AppointlyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || AppointlyError::ParseError(format!("Invalid time '{}'", s));
        let caps = CANONICAL_FORM.captures(s.trim()).ok_or_else(invalid)?;
        let hour: u32 = caps[1].parse().map_err(|_| invalid())?;
        let minute: u32 = caps[2].parse().map_err(|_| invalid())?;
        Self::from_hm(hour, minute).ok_or_else(invalid)
    }
}

impl Serialize for TimeSlot {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for TimeSlot {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}
