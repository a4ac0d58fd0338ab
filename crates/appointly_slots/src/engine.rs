//! Cache-aware availability lookups.
//!
//! [`SlotEngine`] owns the [`AvailabilityCache`] and the backend service; it
//! is the only thing that writes to the cache.

use crate::cache::{AvailabilityCache, BookingKey, CacheEntry};
use crate::logic::{booked_set, GridSpec};
use crate::time::TimeSlot;
use appointly_common::AppointmentService;
use std::sync::Arc;
use tracing::{debug, warn};

/// Outcome of an availability lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Availability {
    /// Branch or date not chosen yet; slot selection stays disabled.
    SelectionIncomplete,
    /// Free slots in grid order. May be empty when the day is full.
    Slots(Vec<TimeSlot>),
}

impl Availability {
    /// The free slots, empty when the selection is incomplete.
    pub fn slots(&self) -> &[TimeSlot] {
        match self {
            Availability::SelectionIncomplete => &[],
            Availability::Slots(slots) => slots,
        }
    }

    pub fn into_slots(self) -> Vec<TimeSlot> {
        match self {
            Availability::SelectionIncomplete => Vec::new(),
            Availability::Slots(slots) => slots,
        }
    }

    pub fn is_selectable(&self) -> bool {
        matches!(self, Availability::Slots(slots) if !slots.is_empty())
    }
}

pub struct SlotEngine<S: AppointmentService> {
    service: Arc<S>,
    grid: GridSpec,
    cache: AvailabilityCache,
}

impl<S: AppointmentService> SlotEngine<S> {
    pub fn new(service: Arc<S>, grid: GridSpec) -> Self {
        Self {
            service,
            grid,
            cache: AvailabilityCache::new(),
        }
    }

    pub fn service(&self) -> &Arc<S> {
        &self.service
    }

    pub fn grid(&self) -> GridSpec {
        self.grid
    }

    /// Changes the grid parameters. Cached booked sets stay valid; the next
    /// lookup recomputes availability against the new grid.
    pub fn set_grid(&mut self, grid: GridSpec) {
        self.grid = grid;
    }

    pub fn cache(&self) -> &AvailabilityCache {
        &self.cache
    }

    /// Free slots for `branch` on `date`.
    ///
    /// A cached entry is answered without a fetch, recomputed from its
    /// booked set against a freshly generated grid. On a miss the booked
    /// times are fetched, normalized and cached. A failed fetch leaves the
    /// cache untouched and returns the service error. Surrounding whitespace
    /// in `branch` and `date` is ignored.
    pub async fn get_availability(
        &mut self,
        branch: &str,
        date: &str,
    ) -> Result<Availability, S::Error> {
        let key = BookingKey::new(branch, date);
        if key.is_incomplete() {
            return Ok(Availability::SelectionIncomplete);
        }

        let grid = self.grid.generate();

        if let Some(entry) = self.cache.get(&key) {
            debug!("Slot cache hit for {}", key);
            return Ok(Availability::Slots(entry.available_for(&grid)));
        }

        debug!("Slot cache miss for {}, fetching booked times", key);
        let raw = self
            .service
            .fetch_booked_times(&key.branch, &key.date)
            .await
            .inspect_err(|err| warn!("Error loading time slots for {}: {}", key, err))?;

        let booked = booked_set(&raw);
        let entry = CacheEntry::new(booked, &grid);
        let available = entry.available().to_vec();
        self.cache.put(key, entry);
        Ok(Availability::Slots(available))
    }

    /// Drops the cached entry for `branch` on `date` so the next lookup
    /// fetches fresh booked times. Returns whether an entry was removed.
    pub fn invalidate(&mut self, branch: &str, date: &str) -> bool {
        let key = BookingKey::new(branch, date);
        let removed = self.cache.invalidate(&key);
        debug!("Invalidated slot cache for {} (present: {})", key, removed);
        removed
    }
}
