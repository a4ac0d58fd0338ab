//! In-memory [`AppointmentService`] for tests and offline use.

use appointly_common::{
    conflict, AppointlyError, AppointmentService, BookingConfirmation, BoxFuture, NewAppointment,
};
use serde_json::{json, Value};
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Mutex;

/// Mock appointment service.
///
/// Booked entries are stored per (branch, date) in whatever raw shape the
/// test seeds. Every fetch is counted; `fail_fetches` makes fetches fail.
#[derive(Default)]
pub struct MockAppointmentService {
    booked: Mutex<HashMap<(String, String), Vec<Value>>>,
    fetches: AtomicUsize,
    fail_fetches: AtomicBool,
    next_code: AtomicUsize,
}

impl MockAppointmentService {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds raw booked entries for a branch and date.
    pub fn with_booked(self, branch: &str, date: &str, entries: Vec<Value>) -> Self {
        self.set_booked(branch, date, entries);
        self
    }

    pub fn set_booked(&self, branch: &str, date: &str, entries: Vec<Value>) {
        if let Ok(mut booked) = self.booked.lock() {
            booked.insert((branch.to_string(), date.to_string()), entries);
        }
    }

    pub fn fetch_count(&self) -> usize {
        self.fetches.load(Ordering::SeqCst)
    }

    pub fn fail_fetches(&self, fail: bool) {
        self.fail_fetches.store(fail, Ordering::SeqCst);
    }
}

impl AppointmentService for MockAppointmentService {
    type Error = AppointlyError;

    fn fetch_booked_times(
        &self,
        branch: &str,
        date: &str,
    ) -> BoxFuture<'_, Vec<Value>, Self::Error> {
        let key = (branch.to_string(), date.to_string());

        Box::pin(async move {
            self.fetches.fetch_add(1, Ordering::SeqCst);
            if self.fail_fetches.load(Ordering::SeqCst) {
                return Err(AppointlyError::HttpError(
                    "Network error: connection refused".to_string(),
                ));
            }
            let booked = self
                .booked
                .lock()
                .map_err(|e| AppointlyError::InternalError(e.to_string()))?;
            Ok(booked.get(&key).cloned().unwrap_or_default())
        })
    }

    fn create_appointment(
        &self,
        appointment: NewAppointment,
    ) -> BoxFuture<'_, BookingConfirmation, Self::Error> {
        Box::pin(async move {
            let key = (appointment.branch.clone(), appointment.date.clone());
            let mut booked = self
                .booked
                .lock()
                .map_err(|e| AppointlyError::InternalError(e.to_string()))?;
            let day = booked.entry(key).or_default();
            let taken = day
                .iter()
                .filter_map(crate::extract::normalize_entry)
                .any(|slot| slot.to_string() == appointment.time_slot);
            if taken {
                return Err(conflict("Time slot already booked"));
            }
            day.push(json!({ "timeSlot": appointment.time_slot }));
            let n = self.next_code.fetch_add(1, Ordering::SeqCst) + 1;
            Ok(BookingConfirmation {
                confirmation_code: format!("CONF-{:04}", n),
            })
        })
    }
}
