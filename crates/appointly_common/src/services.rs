// --- File: crates/appointly_common/src/services.rs ---
//! Service abstractions for the booking backend.
//!
//! The slot engine and the booking flow only talk to the backend through
//! [`AppointmentService`], so tests can swap in an in-memory implementation.

use serde::{Deserialize, Serialize};
use std::future::Future;
use std::pin::Pin;

/// Type alias for a boxed future that returns a Result
pub type BoxFuture<'a, T, E> = Pin<Box<dyn Future<Output = Result<T, E>> + Send + 'a>>;

/// Backend operations needed to compute availability and place bookings.
pub trait AppointmentService: Send + Sync {
    /// Error type returned by service operations.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Existing bookings for a branch on a date, in whatever shape the
    /// server returns them. Callers normalize the entries themselves.
    fn fetch_booked_times(
        &self,
        branch: &str,
        date: &str,
    ) -> BoxFuture<'_, Vec<serde_json::Value>, Self::Error>;

    /// Create an appointment. A taken slot is reported as a conflict error.
    fn create_appointment(
        &self,
        appointment: NewAppointment,
    ) -> BoxFuture<'_, BookingConfirmation, Self::Error>;
}

/// An appointment as returned by the backend.
///
/// Every field is optional on read; the listing renders missing ones as
/// empty cells.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Appointment {
    pub customer_name: Option<String>,
    pub branch: Option<String>,
    pub date: Option<String>,
    pub time_slot: Option<String>,
    pub confirmation_code: Option<String>,
    pub email: Option<String>,
    pub cellphone: Option<String>,
}

/// Payload sent to create an appointment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewAppointment {
    pub customer_name: String,
    pub branch: String,
    pub date: String,
    /// Canonical "HH:MM".
    pub time_slot: String,
    pub email: String,
    pub cellphone: String,
}

/// Body of a 201 response to a booking.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BookingConfirmation {
    pub confirmation_code: String,
}

/// Opaque bearer token issued by the admin login endpoint.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdminToken(pub String);

impl AdminToken {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

// Keep tokens out of logs.
impl std::fmt::Debug for AdminToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("AdminToken(***)")
    }
}

/// Result of looking up an appointment by confirmation code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LookupOutcome {
    Found(Appointment),
    /// The server answered successfully but with plain text.
    Message(String),
}
