//! Session cache of booked slots per branch and date.

use crate::logic::compute_available;
use crate::time::TimeSlot;
use std::collections::{HashMap, HashSet};
use std::fmt;

/// One day's availability at one branch.
///
/// Both parts are stored trimmed, so lookups and invalidations built from
/// differently padded input address the same entry.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct BookingKey {
    pub branch: String,
    pub date: String,
}

impl BookingKey {
    pub fn new(branch: &str, date: &str) -> Self {
        Self {
            branch: branch.trim().to_string(),
            date: date.trim().to_string(),
        }
    }

    /// True when either part is blank.
    pub fn is_incomplete(&self) -> bool {
        self.branch.is_empty() || self.date.is_empty()
    }
}

impl fmt::Display for BookingKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}_{}", self.branch, self.date)
    }
}

/// Booked slots as fetched, plus the availability derived from them when
/// the entry was stored.
///
/// `booked` is the source of truth; readers recompute availability from it
/// instead of trusting `available`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheEntry {
    booked: HashSet<TimeSlot>,
    available: Vec<TimeSlot>,
}

impl CacheEntry {
    pub fn new(booked: HashSet<TimeSlot>, grid: &[TimeSlot]) -> Self {
        let available = compute_available(grid, &booked);
        Self { booked, available }
    }

    pub fn booked(&self) -> &HashSet<TimeSlot> {
        &self.booked
    }

    /// Availability as of the time the entry was stored.
    pub fn available(&self) -> &[TimeSlot] {
        &self.available
    }

    pub fn available_for(&self, grid: &[TimeSlot]) -> Vec<TimeSlot> {
        compute_available(grid, &self.booked)
    }
}

/// Owned store of [`CacheEntry`] values. Entries never expire; they live
/// until invalidated or the cache is dropped.
#[derive(Debug, Default)]
pub struct AvailabilityCache {
    entries: HashMap<BookingKey, CacheEntry>,
}

impl AvailabilityCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &BookingKey) -> Option<&CacheEntry> {
        self.entries.get(key)
    }

    /// Stores `entry`, replacing any previous one for the key.
    pub fn put(&mut self, key: BookingKey, entry: CacheEntry) {
        self.entries.insert(key, entry);
    }

    /// Removes the entry, returning whether one was present.
    pub fn invalidate(&mut self, key: &BookingKey) -> bool {
        self.entries.remove(key).is_some()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
