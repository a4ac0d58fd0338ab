// --- File: crates/appointly_client/src/lib.rs ---
// Declare modules within this crate
pub mod booking;
pub mod listing;
pub mod messages;
pub mod rest;
pub mod session;

pub use booking::{BookingError, BookingFlow, BookingForm, BookingOutcome};
pub use listing::{appointment_row, AppointmentListing, TABLE_COLUMNS};
pub use messages::friendly_message;
pub use rest::{normalize_date, RestAppointmentService};
pub use session::AdminSession;
