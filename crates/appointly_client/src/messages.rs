// --- File: crates/appointly_client/src/messages.rs ---

/// User-facing text for a failed backend call.
///
/// `body` is the raw response text, preferred over the generic wording where
/// the backend is expected to explain itself.
pub fn friendly_message(status: u16, body: Option<&str>) -> String {
    let body = body.map(str::trim).filter(|b| !b.is_empty());
    match status {
        404 => "Not found".to_string(),
        401 => "Please login as admin to perform this action".to_string(),
        409 => body
            .unwrap_or("Conflict: resource already exists")
            .to_string(),
        _ => body.unwrap_or("Request failed").to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_friendly_messages() {
        assert_eq!(friendly_message(404, Some("whatever")), "Not found");
        assert_eq!(
            friendly_message(401, None),
            "Please login as admin to perform this action"
        );
        assert_eq!(friendly_message(409, Some("Slot taken")), "Slot taken");
        assert_eq!(
            friendly_message(409, Some("  ")),
            "Conflict: resource already exists"
        );
        assert_eq!(friendly_message(500, None), "Request failed");
        assert_eq!(friendly_message(422, Some("Bad email")), "Bad email");
    }
}
