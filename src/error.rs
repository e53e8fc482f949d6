use std::fmt;

/// Classified failure from a backend call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// Network-level failure: the backend could not be reached at all.
    Connectivity(String),
    /// 401 family. Stored credentials must not survive this.
    Auth(String),
    /// Any other non-2xx response.
    Api { status: u16, message: String },
}

impl ApiError {
    pub fn message(&self) -> &str {
        match self {
            ApiError::Connectivity(msg) => msg,
            ApiError::Auth(msg) => msg,
            ApiError::Api { message, .. } => message,
        }
    }

    pub fn is_auth(&self) -> bool {
        matches!(self, ApiError::Auth(_))
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

/// Classify a non-2xx response into an [`ApiError`].
///
/// The backend reports failures as `{"error": "..."}`. A JSON body without
/// that field falls back to a generic status string; a body that is not JSON
/// at all additionally carries the HTTP status text.
pub fn classify_failure(status: u16, status_text: &str, body: &str) -> ApiError {
    let message = match serde_json::from_str::<serde_json::Value>(body) {
        Ok(value) => value
            .get("error")
            .and_then(|e| e.as_str())
            .map(str::to_string)
            .unwrap_or_else(|| format!("API request failed: {status}")),
        Err(_) => format!("API request failed: {status} {status_text}"),
    };

    if status == 401 {
        ApiError::Auth(message)
    } else {
        ApiError::Api { status, message }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_field_is_extracted_from_json_body() {
        let err = classify_failure(400, "Bad Request", r#"{"error": "Mood is required"}"#);
        assert_eq!(
            err,
            ApiError::Api {
                status: 400,
                message: "Mood is required".to_string()
            }
        );
    }

    #[test]
    fn json_body_without_error_field_falls_back_to_status() {
        let err = classify_failure(500, "Internal Server Error", r#"{"detail": "boom"}"#);
        assert_eq!(err.message(), "API request failed: 500");
    }

    #[test]
    fn non_json_body_falls_back_to_status_text() {
        let err = classify_failure(502, "Bad Gateway", "<html>upstream died</html>");
        assert_eq!(err.message(), "API request failed: 502 Bad Gateway");
    }

    #[test]
    fn status_401_classifies_as_auth() {
        let err = classify_failure(401, "Unauthorized", r#"{"error": "Token has expired"}"#);
        assert!(err.is_auth());
        assert_eq!(err.message(), "Token has expired");
    }

    #[test]
    fn other_statuses_are_plain_api_errors() {
        let err = classify_failure(404, "Not Found", r#"{"error": "Session not found"}"#);
        assert!(!err.is_auth());
    }
}
