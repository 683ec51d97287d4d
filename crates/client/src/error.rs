use gearcart_core::BackendError;
use thiserror::Error;

/// Failure of a call against the remote service.
///
/// For recommendation and catalog calls this is surfaced to the caller (the
/// view shows a transient message, no retry). For cart/wishlist persistence
/// it is converted into [`BackendError`] and swallowed by the managers.
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("transport failure: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("service responded with status {status}: {message}")]
    Status { status: u16, message: String },
    #[error("could not decode service response: {0}")]
    Decode(String),
}

impl From<ServiceError> for BackendError {
    fn from(error: ServiceError) -> Self {
        match error {
            ServiceError::Transport(inner) => BackendError::Transport(inner.to_string()),
            ServiceError::Status { status, message } => BackendError::Status { status, message },
            ServiceError::Decode(message) => BackendError::Rejected(message),
        }
    }
}

/// Pulls the human-readable message out of an error payload. The service
/// reports failures as `{"detail": ...}` (and some endpoints as
/// `{"message": ...}`).
pub(crate) fn extract_error_message(body: &str) -> Option<String> {
    let value: serde_json::Value = serde_json::from_str(body).ok()?;
    for key in ["detail", "message", "error"] {
        match &value[key] {
            serde_json::Value::String(message) => return Some(message.clone()),
            serde_json::Value::Null => continue,
            other => return Some(other.to_string()),
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use gearcart_core::BackendError;

    use super::{extract_error_message, ServiceError};

    #[test]
    fn detail_message_is_extracted() {
        assert_eq!(
            extract_error_message(r#"{"detail": "budget_min must be less than budget_max"}"#),
            Some("budget_min must be less than budget_max".to_string())
        );
        assert_eq!(
            extract_error_message(r#"{"message": "invalid credentials"}"#),
            Some("invalid credentials".to_string())
        );
        assert_eq!(extract_error_message("not json"), None);
    }

    #[test]
    fn status_errors_keep_their_code_through_backend_conversion() {
        let error = ServiceError::Status { status: 502, message: "bad gateway".to_string() };
        assert_eq!(
            BackendError::from(error),
            BackendError::Status { status: 502, message: "bad gateway".to_string() }
        );
    }
}
