use thiserror::Error;

/// Failure of a remote cart/wishlist persistence call.
///
/// Every variant is recoverable: the managers fall back to the optimistic
/// local mutation and keep going. Nothing here is surfaced to the user as a
/// hard error for a cart or wishlist mutation.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum BackendError {
    #[error("transport failure: {0}")]
    Transport(String),
    #[error("remote store responded with status {status}: {message}")]
    Status { status: u16, message: String },
    #[error("remote store response was not usable: {0}")]
    Rejected(String),
}

#[cfg(test)]
mod tests {
    use super::BackendError;

    #[test]
    fn status_error_carries_code_and_message() {
        let error = BackendError::Status { status: 503, message: "maintenance".to_string() };
        assert_eq!(error.to_string(), "remote store responded with status 503: maintenance");
    }
}
