//! Booking form validation and the submit flow.

use appointly_common::{
    validation_error, AppointlyError, AppointmentService, BookingConfirmation, NewAppointment,
};
use appointly_slots::{Availability, SlotEngine, TimeSlot};
use thiserror::Error;
use tracing::{info, warn};

#[derive(Error, Debug)]
pub enum BookingError {
    #[error(transparent)]
    Request(#[from] AppointlyError),
    /// The slot was taken in the meantime. `refreshed` holds the fresh
    /// availability, or `None` if reloading it failed too.
    #[error("Conflict: {message}")]
    SlotTaken {
        message: String,
        refreshed: Option<Availability>,
    },
}

/// What the customer typed into the booking form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BookingForm {
    pub customer_name: String,
    pub branch: String,
    pub date: String,
    pub time_slot: String,
    pub email: String,
    pub cellphone: String,
}

impl BookingForm {
    /// True once every field is filled in; gates the submit button.
    pub fn is_complete(&self) -> bool {
        [
            &self.customer_name,
            &self.branch,
            &self.date,
            &self.time_slot,
            &self.email,
            &self.cellphone,
        ]
        .iter()
        .all(|field| !field.trim().is_empty())
    }

    /// Checks the required fields and builds the trimmed request.
    ///
    /// The time slot may be given in either the 24-hour or the 12-hour form;
    /// it is sent in canonical "HH:MM".
    pub fn validate(&self) -> Result<NewAppointment, AppointlyError> {
        let name = self.customer_name.trim();
        let branch = self.branch.trim();
        let date = self.date.trim();
        let time_slot = self.time_slot.trim();
        if name.is_empty() || branch.is_empty() || date.is_empty() || time_slot.is_empty() {
            return Err(validation_error("Please fill in all fields."));
        }
        let slot = TimeSlot::normalize(time_slot)
            .ok_or_else(|| validation_error(format!("Invalid time slot '{}'", time_slot)))?;

        Ok(NewAppointment {
            customer_name: name.to_string(),
            branch: branch.to_string(),
            date: date.to_string(),
            time_slot: slot.to_string(),
            email: self.email.trim().to_string(),
            cellphone: self.cellphone.trim().to_string(),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookingOutcome {
    pub confirmation: BookingConfirmation,
    /// Availability reloaded after the booking; `None` if the reload failed.
    pub refreshed: Option<Availability>,
}

/// Places bookings and keeps the slot cache in step with them.
pub struct BookingFlow<S: AppointmentService<Error = AppointlyError>> {
    engine: SlotEngine<S>,
}

impl<S: AppointmentService<Error = AppointlyError>> BookingFlow<S> {
    pub fn new(engine: SlotEngine<S>) -> Self {
        Self { engine }
    }

    pub fn engine(&self) -> &SlotEngine<S> {
        &self.engine
    }

    pub async fn availability(
        &mut self,
        branch: &str,
        date: &str,
    ) -> Result<Availability, AppointlyError> {
        self.engine.get_availability(branch, date).await
    }

    /// Validates and submits `form`.
    ///
    /// On success the (branch, date) cache entry is invalidated once and
    /// availability reloaded. On a conflict the entry is invalidated as well
    /// so the reload shows the slot as taken.
    pub async fn submit(&mut self, form: &BookingForm) -> Result<BookingOutcome, BookingError> {
        let appointment = form.validate()?;
        let branch = appointment.branch.clone();
        let date = appointment.date.clone();

        match self.engine.service().create_appointment(appointment).await {
            Ok(confirmation) => {
                info!(
                    "Appointment booked successfully, confirmation code {}",
                    confirmation.confirmation_code
                );
                self.engine.invalidate(&branch, &date);
                let refreshed = self.reload(&branch, &date).await;
                Ok(BookingOutcome {
                    confirmation,
                    refreshed,
                })
            }
            Err(AppointlyError::ConflictError(message)) => {
                warn!("Time slot already taken for {} on {}: {}", branch, date, message);
                self.engine.invalidate(&branch, &date);
                let refreshed = self.reload(&branch, &date).await;
                Err(BookingError::SlotTaken { message, refreshed })
            }
            Err(err) => Err(err.into()),
        }
    }

    async fn reload(&mut self, branch: &str, date: &str) -> Option<Availability> {
        self.engine
            .get_availability(branch, date)
            .await
            .inspect_err(|err| warn!("Error reloading time slots: {}", err))
            .ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use appointly_slots::mock::MockAppointmentService;
    use appointly_slots::GridSpec;
    use serde_json::json;
    use std::sync::Arc;

    fn form(time_slot: &str) -> BookingForm {
        BookingForm {
            customer_name: "  Ada Lovelace ".into(),
            branch: "main".into(),
            date: "2024-01-01".into(),
            time_slot: time_slot.into(),
            email: "ada@example.com ".into(),
            cellphone: "0790000000".into(),
        }
    }

    fn flow(service: MockAppointmentService) -> BookingFlow<MockAppointmentService> {
        BookingFlow::new(SlotEngine::new(Arc::new(service), GridSpec::default()))
    }

    #[test]
    fn test_is_complete_requires_every_field() {
        assert!(form("09:00").is_complete());
        let mut missing = form("09:00");
        missing.cellphone = " ".into();
        assert!(!missing.is_complete());
    }

    #[test]
    fn test_validate_trims_and_canonicalizes() {
        let new = form("9:30 AM").validate().unwrap();
        assert_eq!(new.customer_name, "Ada Lovelace");
        assert_eq!(new.email, "ada@example.com");
        assert_eq!(new.time_slot, "09:30");
    }

    #[test]
    fn test_validate_rejects_missing_and_bad_slot() {
        let err = form("").validate().unwrap_err();
        assert_eq!(err.user_message(), "Please fill in all fields.");

        // Email and cellphone are not required to submit.
        let mut partial = form("10:00");
        partial.email.clear();
        assert!(partial.validate().is_ok());

        assert!(form("noonish").validate().is_err());
    }

    #[tokio::test]
    async fn test_submit_invalidates_and_refreshes() {
        let mut flow = flow(MockAppointmentService::new());
        let before = flow.availability("main", "2024-01-01").await.unwrap();
        assert_eq!(before.slots().len(), 16);

        let outcome = flow.submit(&form("09:00")).await.unwrap();
        assert_eq!(outcome.confirmation.confirmation_code, "CONF-0001");

        let refreshed = outcome.refreshed.expect("reload succeeded");
        assert_eq!(refreshed.slots().len(), 15);
        assert_eq!(flow.engine().service().fetch_count(), 2);
    }

    #[tokio::test]
    async fn test_submit_with_padded_branch_invalidates_cached_day() {
        let mut flow = flow(MockAppointmentService::new());
        let before = flow.availability(" main", "2024-01-01").await.unwrap();
        assert_eq!(before.slots().len(), 16);

        let mut padded = form("09:00");
        padded.branch = " main".into();
        flow.submit(&padded).await.unwrap();

        let after = flow.availability(" main", "2024-01-01").await.unwrap();
        assert_eq!(after.slots().len(), 15);
        assert!(!after.slots().contains(&TimeSlot::from_hm(9, 0).unwrap()));
        assert_eq!(flow.engine().cache().len(), 1);
    }

    #[tokio::test]
    async fn test_submit_conflict_reloads_fresh_slots() {
        let service = MockAppointmentService::new();
        let mut flow = flow(service);
        // Prime the cache while the day is still empty.
        flow.availability("main", "2024-01-01").await.unwrap();
        // Someone else books 10:00 behind our back.
        flow.engine()
            .service()
            .set_booked("main", "2024-01-01", vec![json!("10:00")]);

        let err = flow.submit(&form("10:00")).await.unwrap_err();
        match err {
            BookingError::SlotTaken { refreshed, .. } => {
                let slots = refreshed.expect("reload succeeded").into_slots();
                assert_eq!(slots.len(), 15);
                assert!(!slots.contains(&TimeSlot::from_hm(10, 0).unwrap()));
            }
            other => panic!("expected SlotTaken, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_submit_validation_failure_makes_no_request() {
        let mut flow = flow(MockAppointmentService::new());
        let err = flow.submit(&BookingForm::default()).await.unwrap_err();
        assert!(matches!(
            err,
            BookingError::Request(AppointlyError::ValidationError(_))
        ));
        assert_eq!(flow.engine().service().fetch_count(), 0);
    }

    #[tokio::test]
    async fn test_submit_success_with_failing_reload() {
        let service = MockAppointmentService::new();
        service.fail_fetches(true);
        let mut flow = flow(service);

        let outcome = flow.submit(&form("11:00")).await.unwrap();
        assert!(outcome.refreshed.is_none());
        assert!(flow.engine().cache().is_empty());
    }
}
