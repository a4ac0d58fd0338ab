//! reqwest implementation of the booking backend contract.
//!
//! Bodies are decoded by content type (JSON or text). Admin endpoints carry
//! the session's bearer token; a 401 on them clears the session.

use crate::messages::friendly_message;
use crate::session::AdminSession;
use appointly_common::{
    auth_error, conflict, create_client, not_found, read_response, AdminToken, ApiResponse,
    Appointment, AppointlyError, AppointmentService, BookingConfirmation, BoxFuture,
    LookupOutcome, NewAppointment, ResponseBody,
};
use appointly_config::ApiConfig;
use reqwest::{Client, RequestBuilder, Url};
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, info, warn};

#[derive(Serialize)]
struct LoginRequest<'a> {
    password: &'a str,
}

pub struct RestAppointmentService {
    client: Client,
    base_url: Url,
    session: AdminSession,
}

impl RestAppointmentService {
    pub fn new(
        client: Client,
        base_url: &str,
        session: AdminSession,
    ) -> Result<Self, AppointlyError> {
        let base_url = Url::parse(base_url.trim_end_matches('/')).map_err(|e| {
            AppointlyError::ConfigError(format!("api.base_url '{}': {}", base_url, e))
        })?;
        if base_url.cannot_be_a_base() {
            return Err(AppointlyError::ConfigError(format!(
                "api.base_url '{}' cannot be used as a base URL",
                base_url
            )));
        }
        Ok(Self {
            client,
            base_url,
            session,
        })
    }

    pub fn from_config(config: &ApiConfig, session: AdminSession) -> Result<Self, AppointlyError> {
        let client = create_client(config.timeout_secs)?;
        Self::new(client, &config.base_url, session)
    }

    pub fn session(&self) -> &AdminSession {
        &self.session
    }

    /// `base_url` joined with percent-encoded path segments.
    fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        // cannot_be_a_base was rejected in `new`
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    async fn send(&self, request: RequestBuilder) -> Result<ApiResponse, AppointlyError> {
        let response = request.send().await?;
        read_response(response).await
    }

    /// Sends an admin request; 401 expires the session.
    async fn send_as_admin(&self, request: RequestBuilder) -> Result<ApiResponse, AppointlyError> {
        let token = self.session.require_admin()?;
        let response = self.send(request.bearer_auth(token.as_str())).await?;
        if response.status == 401 {
            warn!("Admin token rejected, clearing session");
            return Err(self.session.expire());
        }
        Ok(response)
    }

    /// Branches offered in the booking form. A non-JSON answer means none.
    pub async fn list_branches(&self) -> Result<Vec<String>, AppointlyError> {
        let response = self.send(self.client.get(self.endpoint(&["branches"]))).await?;
        debug!("Branch response status: {}", response.status);
        if !response.is_success() {
            return Err(error_for(&response));
        }
        match response.body {
            ResponseBody::Json(Value::Null) | ResponseBody::Text(_) => Ok(Vec::new()),
            ResponseBody::Json(value) => Ok(serde_json::from_value(value)?),
        }
    }

    /// Raw booked entries for a branch and date.
    pub async fn fetch_booked(
        &self,
        branch: &str,
        date: &str,
    ) -> Result<Vec<Value>, AppointlyError> {
        let request = self
            .client
            .get(self.endpoint(&["appointments"]))
            .query(&[("branch", branch), ("date", date)]);
        let response = self.send(request).await?;
        if !response.is_success() {
            return Err(error_for(&response));
        }
        match json_body(response.body)? {
            Value::Null => Ok(Vec::new()),
            Value::Array(entries) => Ok(entries),
            other => Err(AppointlyError::ParseError(format!(
                "Expected a list of booked times, got {}",
                other
            ))),
        }
    }

    /// Creates an appointment. Only 201 Created counts as booked; 409 is a
    /// conflict carrying the backend's message.
    pub async fn book(
        &self,
        appointment: &NewAppointment,
    ) -> Result<BookingConfirmation, AppointlyError> {
        let mut request = self.client.post(self.endpoint(&["appointments"])).json(appointment);
        if let Some(header) = self.session.auth_header() {
            request = request.header(reqwest::header::AUTHORIZATION, header);
        }
        let response = self.send(request).await?;

        if response.status == 201 {
            let confirmation = match response.body {
                ResponseBody::Json(value) => serde_json::from_value(value).unwrap_or_default(),
                ResponseBody::Text(_) => BookingConfirmation::default(),
            };
            info!(
                "Appointment booked for {} on {} at {}: {}",
                appointment.branch,
                appointment.date,
                appointment.time_slot,
                confirmation.confirmation_code
            );
            return Ok(confirmation);
        }
        if response.status == 401 {
            return Err(self.session.expire());
        }
        Err(error_for(&response))
    }

    /// Looks up one appointment by confirmation code (admin only).
    pub async fn lookup_appointment(&self, code: &str) -> Result<LookupOutcome, AppointlyError> {
        let request = self.client.get(self.endpoint(&["appointments", code.trim()]));
        let response = self.send_as_admin(request).await?;

        if response.is_success() {
            return match response.body {
                ResponseBody::Text(text) => Ok(LookupOutcome::Message(text)),
                ResponseBody::Json(value) => {
                    Ok(LookupOutcome::Found(serde_json::from_value(value)?))
                }
            };
        }

        // A JSON body without a `message` field is shown as-is.
        let message = response.message().unwrap_or_else(|| match &response.body {
            ResponseBody::Json(value) if !value.is_null() => value.to_string(),
            _ => "Lookup failed".to_string(),
        });
        Err(status_error(response.status, message))
    }

    /// Every appointment (admin only).
    pub async fn list_appointments(&self) -> Result<Vec<Appointment>, AppointlyError> {
        let request = self.client.get(self.endpoint(&["appointments"]));
        let response = self.send_as_admin(request).await?;
        if !response.is_success() {
            return Err(error_for(&response));
        }
        match json_body(response.body)? {
            Value::Null => Ok(Vec::new()),
            value => Ok(serde_json::from_value(value)?),
        }
    }

    /// Dates (`YYYY-MM-DD`) on which `branch` has no free slot left.
    pub async fn fully_booked_dates(&self, branch: &str) -> Result<Vec<String>, AppointlyError> {
        let request = self
            .client
            .get(self.endpoint(&["appointments", "fully-booked"]))
            .query(&[("branch", branch)]);
        let response = self.send(request).await?;
        if !response.is_success() {
            return Err(error_for(&response));
        }
        match json_body(response.body)? {
            Value::Array(dates) => Ok(dates.iter().filter_map(normalize_date).collect()),
            Value::Null => Ok(Vec::new()),
            other => Err(AppointlyError::ParseError(format!(
                "Expected a list of dates, got {}",
                other
            ))),
        }
    }

    /// Exchanges the admin password for a token and stores it in the session.
    pub async fn admin_login(&self, password: &str) -> Result<AdminToken, AppointlyError> {
        let request = self
            .client
            .post(self.endpoint(&["admin", "login"]))
            .json(&LoginRequest { password });
        let response = self.send(request).await?;

        if !response.is_success() {
            let message = response.message().unwrap_or_else(|| "Login failed".to_string());
            warn!("Admin login failed: {}", message);
            return Err(auth_error(message));
        }

        let token = match &response.body {
            ResponseBody::Json(value) => value
                .get("token")
                .and_then(Value::as_str)
                .filter(|t| !t.is_empty())
                .map(|t| AdminToken(t.to_string())),
            ResponseBody::Text(_) => None,
        }
        .ok_or_else(|| auth_error("No token returned"))?;

        self.session.set_token(Some(token.clone()));
        info!("Admin login successful");
        Ok(token)
    }

    pub fn logout(&self) {
        self.session.logout();
    }
}

impl AppointmentService for RestAppointmentService {
    type Error = AppointlyError;

    fn fetch_booked_times(
        &self,
        branch: &str,
        date: &str,
    ) -> BoxFuture<'_, Vec<Value>, Self::Error> {
        let branch = branch.to_string();
        let date = date.to_string();
        Box::pin(async move { self.fetch_booked(&branch, &date).await })
    }

    fn create_appointment(
        &self,
        appointment: NewAppointment,
    ) -> BoxFuture<'_, BookingConfirmation, Self::Error> {
        Box::pin(async move { self.book(&appointment).await })
    }
}

/// Cuts an ISO date-time down to its date. Empty and null entries are
/// dropped.
pub fn normalize_date(value: &Value) -> Option<String> {
    let text = match value {
        Value::Null => return None,
        Value::String(s) => s.clone(),
        other => other.to_string(),
    };
    let date = text.split('T').next().unwrap_or_default().trim();
    (!date.is_empty()).then(|| date.to_string())
}

// Some endpoints answer JSON without the content type.
fn json_body(body: ResponseBody) -> Result<Value, AppointlyError> {
    match body {
        ResponseBody::Json(value) => Ok(value),
        ResponseBody::Text(text) if text.trim().is_empty() => Ok(Value::Null),
        ResponseBody::Text(text) => serde_json::from_str(&text).map_err(|_| {
            AppointlyError::ParseError("Invalid JSON response from server".to_string())
        }),
    }
}

fn error_for(response: &ApiResponse) -> AppointlyError {
    let message = response
        .message()
        .unwrap_or_else(|| friendly_message(response.status, None));
    status_error(response.status, message)
}

fn status_error(status: u16, message: String) -> AppointlyError {
    match status {
        401 => auth_error(message),
        404 => not_found(message),
        409 => conflict(message),
        _ => AppointlyError::ApiError { status, message },
    }
}
