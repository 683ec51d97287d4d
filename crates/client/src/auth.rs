//! Auth endpoint calls. Token issuance is the service's business; this
//! module just exchanges credentials for a token and identity, which the
//! caller hands to `gearcart_core::AuthSession` for caching.

use gearcart_core::UserIdentity;
use reqwest::Method;
use secrecy::SecretString;

use crate::types::{AuthResponse, LoginRequest, SignupRequest};
use crate::{ApiClient, ServiceError};

#[derive(Clone, Debug)]
pub enum AuthOutcome {
    Authenticated { token: SecretString, identity: UserIdentity },
    /// The service answered but declined (wrong password, taken email, ...).
    Rejected { message: String },
}

impl ApiClient {
    pub async fn login(&self, email: &str, password: &str) -> Result<AuthOutcome, ServiceError> {
        let response: AuthResponse = self
            .execute(
                "auth.login",
                self.request(Method::POST, "/auth/login").json(&LoginRequest { email, password }),
            )
            .await?;
        Ok(outcome(response, email, "login failed"))
    }

    pub async fn signup(
        &self,
        email: &str,
        password: &str,
        full_name: Option<&str>,
        phone: Option<&str>,
    ) -> Result<AuthOutcome, ServiceError> {
        let response: AuthResponse = self
            .execute(
                "auth.signup",
                self.request(Method::POST, "/auth/signup").json(&SignupRequest {
                    email,
                    password,
                    full_name,
                    phone,
                }),
            )
            .await?;
        Ok(outcome(response, email, "signup failed"))
    }
}

fn outcome(response: AuthResponse, requested_email: &str, fallback: &str) -> AuthOutcome {
    match (response.success, response.token) {
        (true, Some(token)) => AuthOutcome::Authenticated {
            token: SecretString::from(token),
            identity: UserIdentity {
                user_id: response.user_id.unwrap_or_default(),
                email: response.email.unwrap_or_else(|| requested_email.to_string()),
                full_name: response.full_name,
            },
        },
        _ => AuthOutcome::Rejected {
            message: response.message.unwrap_or_else(|| fallback.to_string()),
        },
    }
}

#[cfg(test)]
mod tests {
    use crate::types::AuthResponse;

    use super::{outcome, AuthOutcome};

    #[test]
    fn success_without_token_is_rejected() {
        let response: AuthResponse =
            serde_json::from_str(r#"{"success": true, "message": "pending verification"}"#)
                .expect("decode");

        match outcome(response, "a@b.c", "login failed") {
            AuthOutcome::Rejected { message } => assert_eq!(message, "pending verification"),
            AuthOutcome::Authenticated { .. } => panic!("should not authenticate without a token"),
        }
    }

    #[test]
    fn identity_falls_back_to_the_requested_email() {
        let response: AuthResponse =
            serde_json::from_str(r#"{"success": true, "token": "tok-1", "user_id": 7}"#)
                .expect("decode");

        match outcome(response, "driver@example.com", "login failed") {
            AuthOutcome::Authenticated { identity, .. } => {
                assert_eq!(identity.email, "driver@example.com");
                assert_eq!(identity.user_id, 7);
            }
            AuthOutcome::Rejected { .. } => panic!("should authenticate"),
        }
    }
}
