// --- File: crates/appointly_common/src/lib.rs ---

// Declare modules within this crate
pub mod error; // Error handling
pub mod http; // HTTP utilities
pub mod logging; // Logging utilities
pub mod services; // Service abstractions and shared models

// Re-export error types and utilities for easier access
pub use error::{auth_error, config_error, conflict, not_found, validation_error, AppointlyError};

// Re-export HTTP utilities for easier access
pub use http::{client::create_client, read_response, ApiResponse, ResponseBody};

// Re-export logging utilities for easier access
pub use logging::{init, init_with_level, log_result};

pub use services::{
    AdminToken, Appointment, AppointmentService, BookingConfirmation, BoxFuture, LookupOutcome,
    NewAppointment,
};
