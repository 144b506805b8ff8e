use thiserror::Error;

/// Failure of a backend call.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ApiError {
    #[error("network error: {0}")]
    Network(String),

    /// Non-2xx reply other than a final 401. `body` is kept raw for
    /// field-level messages.
    #[error("HTTP {status}")]
    Status { status: u16, body: String },

    /// 401 that survived the refresh-and-retry pass.
    #[error("not authorized")]
    Unauthorized,

    /// Refresh failed; credentials are gone and the user is sent to login.
    #[error("session expired: {0}")]
    SessionExpired(String),

    #[error("failed to parse response: {0}")]
    Decode(String),

    #[error("failed to serialize request: {0}")]
    Encode(String),
}

impl ApiError {
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Status { status, .. } => Some(*status),
            ApiError::Unauthorized => Some(401),
            _ => None,
        }
    }

    /// Text for a toast: the server's own messages when the body carries
    /// them, otherwise `fallback`.
    pub fn user_message(&self, fallback: &str) -> String {
        match self {
            ApiError::Status { body, .. } => {
                flatten_error_payload(body).unwrap_or_else(|| fallback.to_string())
            }
            ApiError::SessionExpired(_) => "Session expired. Please log in again.".to_string(),
            _ => fallback.to_string(),
        }
    }

    /// Messages the server attached to one field, e.g. `quantity`.
    pub fn field_message(&self, field: &str) -> Option<String> {
        let ApiError::Status { body, .. } = self else {
            return None;
        };
        let payload: serde_json::Value = serde_json::from_str(body).ok()?;
        let mut parts = Vec::new();
        collect_messages(payload.get(field)?, &mut parts);
        (!parts.is_empty()).then(|| parts.join(" "))
    }
}

/// Flatten a DRF-style error body into one line.
///
/// Handles `{"detail": "..."}`, `{"field": ["msg", ...]}`, nested objects
/// and bare strings. Returns `None` when nothing readable is found.
pub fn flatten_error_payload(body: &str) -> Option<String> {
    let payload: serde_json::Value = serde_json::from_str(body).ok()?;
    let mut parts = Vec::new();
    collect_messages(&payload, &mut parts);
    (!parts.is_empty()).then(|| parts.join(" "))
}

fn collect_messages(value: &serde_json::Value, parts: &mut Vec<String>) {
    match value {
        serde_json::Value::String(s) if !s.trim().is_empty() => parts.push(s.trim().to_string()),
        serde_json::Value::Array(items) => {
            for item in items {
                collect_messages(item, parts);
            }
        }
        serde_json::Value::Object(map) => {
            for item in map.values() {
                collect_messages(item, parts);
            }
        }
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn status(code: u16, body: &str) -> ApiError {
        ApiError::Status {
            status: code,
            body: body.to_string(),
        }
    }

    #[test]
    fn test_flatten_detail() {
        assert_eq!(
            flatten_error_payload(r#"{"detail":"No active account found"}"#).as_deref(),
            Some("No active account found")
        );
    }

    #[test]
    fn test_flatten_field_lists() {
        let flat = flatten_error_payload(
            r#"{"username":["A user with that username already exists."],"password":["Too short.","Too common."]}"#,
        )
        .unwrap();
        assert!(flat.contains("A user with that username already exists."));
        assert!(flat.contains("Too short. Too common."));
    }

    #[test]
    fn test_flatten_non_json() {
        assert!(flatten_error_payload("<html>502</html>").is_none());
        assert!(flatten_error_payload("{}").is_none());
    }

    #[test]
    fn test_user_message_falls_back() {
        assert_eq!(
            status(500, "oops").user_message("Failed to create sale"),
            "Failed to create sale"
        );
        assert_eq!(
            ApiError::Network("offline".into()).user_message("Failed to fetch products"),
            "Failed to fetch products"
        );
        assert_eq!(
            status(400, r#"{"detail":"Bad"}"#).user_message("x"),
            "Bad"
        );
    }

    #[test]
    fn test_field_message() {
        let err = status(400, r#"{"quantity":["Not enough stock. Available: 3"]}"#);
        assert_eq!(
            err.field_message("quantity").as_deref(),
            Some("Not enough stock. Available: 3")
        );
        assert!(err.field_message("product").is_none());
        assert!(ApiError::Unauthorized.field_message("quantity").is_none());
    }
}
