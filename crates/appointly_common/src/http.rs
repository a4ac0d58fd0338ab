// --- File: crates/appointly_common/src/http.rs ---
use crate::error::AppointlyError;

// Include the client module
pub mod client;

/// Content types the backend answers with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResponseBody {
    Json(serde_json::Value),
    Text(String),
}

/// A fully read backend response: status plus a body decoded according to
/// its content type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiResponse {
    pub status: u16,
    pub body: ResponseBody,
}

impl ApiResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// The body as text: raw text, or the `message` field of a JSON body.
    pub fn message(&self) -> Option<String> {
        match &self.body {
            ResponseBody::Text(text) if !text.trim().is_empty() => Some(text.clone()),
            ResponseBody::Text(_) => None,
            ResponseBody::Json(value) => value
                .get("message")
                .and_then(|m| m.as_str())
                .map(str::to_string),
        }
    }
}

/// Reads a response, decoding JSON only when the content type says so.
///
/// A JSON content type with an unparsable body is an error rather than a
/// silent fallback to text.
pub async fn read_response(response: reqwest::Response) -> Result<ApiResponse, AppointlyError> {
    let status = response.status().as_u16();
    let is_json = response
        .headers()
        .get(reqwest::header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .map(|ct| ct.to_ascii_lowercase().contains("application/json"))
        .unwrap_or(false);

    let text = response.text().await?;
    let body = if is_json {
        let value = serde_json::from_str(&text).map_err(|err| {
            tracing::error!("JSON parse error: {}, response text: {}", err, text);
            AppointlyError::ParseError("Invalid JSON response from server".to_string())
        })?;
        ResponseBody::Json(value)
    } else {
        ResponseBody::Text(text)
    };

    Ok(ApiResponse { status, body })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_message_from_json_and_text() {
        let json_resp = ApiResponse {
            status: 400,
            body: ResponseBody::Json(json!({ "message": "bad date" })),
        };
        assert_eq!(json_resp.message().as_deref(), Some("bad date"));

        let text_resp = ApiResponse {
            status: 409,
            body: ResponseBody::Text("Time slot already booked".into()),
        };
        assert_eq!(text_resp.message().as_deref(), Some("Time slot already booked"));

        let empty = ApiResponse {
            status: 500,
            body: ResponseBody::Text("  ".into()),
        };
        assert_eq!(empty.message(), None);
        assert!(!empty.is_success());
    }
}
