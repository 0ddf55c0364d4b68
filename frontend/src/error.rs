use serde_json::Value;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ApiError {
    #[error("Invalid response from server: {0}")]
    Validation(String),
    #[error("Prediction rejected: {detail}")]
    Rejected { detail: String },
    #[error("Server error: {status}{}", server_suffix(.detail, .body))]
    Server {
        status: u16,
        detail: Option<String>,
        body: String,
    },
    #[error("Network error: {0}")]
    Network(String),
    #[error("Request timed out after {} seconds", .after_ms / 1000)]
    Timeout { after_ms: u32 },
}

impl ApiError {
    /// Builds a `Server` error, lifting `detail` out of a JSON error body when present.
    pub fn server(status: u16, body: String) -> Self {
        let detail = extract_detail(&body);
        ApiError::Server {
            status,
            detail,
            body,
        }
    }

    /// Message supplied by the service itself, if any.
    pub fn server_detail(&self) -> Option<&str> {
        match self {
            ApiError::Server { detail, .. } => detail.as_deref(),
            ApiError::Rejected { detail } => Some(detail.as_str()),
            _ => None,
        }
    }

    /// Display text, or `None` when the underlying cause carried no text.
    pub fn description(&self) -> Option<String> {
        let blank = match self {
            ApiError::Validation(message) | ApiError::Network(message) => message.trim().is_empty(),
            ApiError::Rejected { detail } => detail.trim().is_empty(),
            ApiError::Server { .. } | ApiError::Timeout { .. } => false,
        };
        (!blank).then(|| self.to_string())
    }

    pub fn status_code(&self) -> Option<u16> {
        match self {
            ApiError::Server { status, .. } => Some(*status),
            _ => None,
        }
    }
}

impl From<gloo_net::Error> for ApiError {
    fn from(err: gloo_net::Error) -> Self {
        match err {
            gloo_net::Error::SerdeError(e) => ApiError::Validation(e.to_string()),
            other => ApiError::Network(other.to_string()),
        }
    }
}

/// Non-JSON bodies (proxy error pages and the like) are left out of the message.
fn server_suffix(detail: &Option<String>, body: &str) -> String {
    match detail {
        Some(detail) => format!(" - {}", detail),
        None if serde_json::from_str::<Value>(body).is_ok() => format!(" - {}", body.trim()),
        None => String::new(),
    }
}

/// FastAPI reports errors as `{"detail": "..."}` or, for request validation,
/// `{"detail": [{"msg": "...", ...}]}`.
fn extract_detail(body: &str) -> Option<String> {
    let value: Value = serde_json::from_str(body).ok()?;
    match value.get("detail")? {
        Value::String(detail) if !detail.trim().is_empty() => Some(detail.clone()),
        Value::Array(items) => {
            let messages: Vec<&str> = items
                .iter()
                .filter_map(|item| item.get("msg").and_then(Value::as_str))
                .collect();
            (!messages.is_empty()).then(|| messages.join("; "))
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn string_detail_is_extracted() {
        let err = ApiError::server(422, r#"{"detail": "Invalid file format"}"#.into());
        assert_eq!(err.server_detail(), Some("Invalid file format"));
        assert_eq!(err.status_code(), Some(422));
    }

    #[test]
    fn validation_detail_list_is_joined() {
        let body = r#"{"detail": [
            {"loc": ["body", "flair"], "msg": "field required", "type": "value_error.missing"},
            {"loc": ["body", "t1ce"], "msg": "field required", "type": "value_error.missing"}
        ]}"#;
        let err = ApiError::server(422, body.into());
        assert_eq!(err.server_detail(), Some("field required; field required"));
    }

    #[test]
    fn non_json_body_has_no_detail() {
        let err = ApiError::server(502, "<html>Bad Gateway</html>".into());
        assert_eq!(err.server_detail(), None);
        assert_eq!(err.to_string(), "Server error: 502");
    }

    #[test]
    fn json_body_without_detail_is_shown() {
        let err = ApiError::server(500, r#"{"error": "boom"}"#.into());
        assert_eq!(err.to_string(), r#"Server error: 500 - {"error": "boom"}"#);
    }

    #[test]
    fn rejection_carries_service_detail() {
        let err = ApiError::Rejected {
            detail: "Model not loaded".into(),
        };
        assert_eq!(err.server_detail(), Some("Model not loaded"));
        assert_eq!(err.status_code(), None);
    }

    #[test]
    fn empty_transport_message_has_no_description() {
        assert_eq!(ApiError::Network(String::new()).description(), None);
        assert_eq!(
            ApiError::Network("Failed to fetch".into()).description().as_deref(),
            Some("Network error: Failed to fetch")
        );
    }

    #[test]
    fn timeout_message_names_the_deadline() {
        let err = ApiError::Timeout { after_ms: 600_000 };
        assert_eq!(err.to_string(), "Request timed out after 600 seconds");
        assert_eq!(err.status_code(), None);
    }
}
