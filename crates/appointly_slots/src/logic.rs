// --- File: crates/appointly_slots/src/logic.rs ---
use crate::extract::normalize_entry;
use crate::time::TimeSlot;
use appointly_common::{config_error, AppointlyError};
use appointly_config::SlotConfig;
use chrono::Duration;
use std::collections::HashSet;
use tracing::debug;

/// Parameters of the slot grid offered to customers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridSpec {
    /// First slot of the day
    pub start: TimeSlot,
    /// Last slot of the day, included when it falls on a step
    pub end: TimeSlot,
    /// Minutes between consecutive slots
    pub interval_minutes: u32,
}

impl Default for GridSpec {
    /// 09:00 to 16:30 every 30 minutes: 16 slots.
    fn default() -> Self {
        Self {
            start: TimeSlot::from_hm(9, 0).expect("09:00 is a valid time"),
            end: TimeSlot::from_hm(16, 30).expect("16:30 is a valid time"),
            interval_minutes: 30,
        }
    }
}

impl TryFrom<&SlotConfig> for GridSpec {
    type Error = AppointlyError;

    fn try_from(config: &SlotConfig) -> Result<Self, Self::Error> {
        if config.interval_minutes == 0 {
            return Err(config_error("slots.interval_minutes must be positive"));
        }
        let start: TimeSlot = config
            .start
            .parse()
            .map_err(|e| config_error(format!("slots.start: {}", e)))?;
        let end: TimeSlot = config
            .end
            .parse()
            .map_err(|e| config_error(format!("slots.end: {}", e)))?;
        if start > end {
            return Err(config_error(format!(
                "slots.start {} is after slots.end {}",
                start, end
            )));
        }
        Ok(Self {
            start,
            end,
            interval_minutes: config.interval_minutes,
        })
    }
}

impl GridSpec {
    pub fn generate(&self) -> Vec<TimeSlot> {
        generate_grid(self.start, self.end, self.interval_minutes)
    }
}

/// Enumerates slots from `start` to `end` inclusive, `interval_minutes`
/// apart.
///
/// Pure: the same arguments always give the same grid. A zero interval or
/// `start > end` gives an empty grid. Never wraps past midnight.
pub fn generate_grid(start: TimeSlot, end: TimeSlot, interval_minutes: u32) -> Vec<TimeSlot> {
    let mut grid = Vec::new();
    if interval_minutes == 0 || start > end {
        return grid;
    }

    let step = Duration::minutes(i64::from(interval_minutes));
    let mut current = start.as_naive();
    while current <= end.as_naive() {
        grid.push(TimeSlot::from_naive(current));
        let (next, wrapped_secs) = current.overflowing_add_signed(step);
        if wrapped_secs != 0 {
            break;
        }
        current = next;
    }
    grid
}

/// Every grid slot not in `booked`, in grid order.
///
/// Booked slots that are not on the grid have nothing to exclude and are
/// ignored.
pub fn compute_available(grid: &[TimeSlot], booked: &HashSet<TimeSlot>) -> Vec<TimeSlot> {
    grid.iter()
        .copied()
        .filter(|slot| !booked.contains(slot))
        .collect()
}

/// Normalizes raw booked entries into a set, dropping the unrecognizable
/// ones.
pub fn booked_set<'a, I>(entries: I) -> HashSet<TimeSlot>
where
    I: IntoIterator<Item = &'a serde_json::Value>,
{
    let mut dropped = 0usize;
    let set: HashSet<TimeSlot> = entries
        .into_iter()
        .filter_map(|entry| {
            let slot = normalize_entry(entry);
            if slot.is_none() {
                dropped += 1;
            }
            slot
        })
        .collect();
    if dropped > 0 {
        debug!("Ignored {} unrecognized booked entries", dropped);
    }
    set
}
