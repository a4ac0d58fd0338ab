// --- File: crates/appointly_slots/src/lib.rs ---
// Declare modules within this crate
pub mod cache;
pub mod engine;
pub mod extract;
#[cfg(test)]
mod extract_test;
pub mod logic;
#[cfg(test)]
mod logic_proptest;
pub mod mock;
pub mod time;

pub use cache::{AvailabilityCache, BookingKey, CacheEntry};
pub use engine::{Availability, SlotEngine};
pub use extract::normalize_entry;
pub use logic::{booked_set, compute_available, generate_grid, GridSpec};
pub use time::TimeSlot;
