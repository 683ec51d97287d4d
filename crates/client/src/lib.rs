//! HTTP client for the storefront service: recommendation and catalog
//! queries, auth calls, and the remote cart/wishlist backends consumed by
//! the `gearcart-core` managers.

pub mod auth;
pub mod cart;
pub mod catalog;
pub mod error;
pub mod recommend;
pub mod types;
pub mod wishlist;

use std::sync::{Arc, RwLock};
use std::time::Duration;

use gearcart_core::config::ApiConfig;
use reqwest::{Method, RequestBuilder};
use secrecy::{ExposeSecret, SecretString};
use serde::de::DeserializeOwned;
use tracing::{debug, warn};
use uuid::Uuid;

pub use auth::AuthOutcome;
pub use cart::HttpCartBackend;
pub use error::ServiceError;
pub use wishlist::HttpWishlistBackend;

/// Shared client handle. Cloning is cheap and clones share the credential
/// cell, so a login/logout through one handle is visible to all of them.
#[derive(Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    token: Arc<RwLock<Option<SecretString>>>,
}

impl ApiClient {
    pub fn new(config: &ApiConfig) -> Result<Self, ServiceError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;
        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            token: Arc::new(RwLock::new(None)),
        })
    }

    /// Installs the bearer credential; subsequent requests carry it until
    /// [`ApiClient::clear_token`].
    pub fn set_token(&self, token: SecretString) {
        if let Ok(mut guard) = self.token.write() {
            *guard = Some(token);
        }
    }

    pub fn clear_token(&self) {
        if let Ok(mut guard) = self.token.write() {
            *guard = None;
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn bearer_token(&self) -> Option<SecretString> {
        self.token.read().ok().and_then(|guard| guard.clone())
    }

    pub(crate) fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let mut builder = self.http.request(method, format!("{}{}", self.base_url, path));
        if let Some(token) = self.bearer_token() {
            builder = builder.bearer_auth(token.expose_secret());
        }
        builder
    }

    /// Sends the request and decodes a JSON body on 2xx. Non-2xx becomes
    /// [`ServiceError::Status`] with the server's message when one is
    /// parseable.
    pub(crate) async fn execute<T: DeserializeOwned>(
        &self,
        operation: &'static str,
        builder: RequestBuilder,
    ) -> Result<T, ServiceError> {
        let body = self.execute_raw(operation, builder).await?;
        serde_json::from_str(&body).map_err(|error| ServiceError::Decode(error.to_string()))
    }

    /// Sends the request and only checks for a success status; used for the
    /// mutation endpoints whose contract is "2xx means applied".
    pub(crate) async fn execute_unit(
        &self,
        operation: &'static str,
        builder: RequestBuilder,
    ) -> Result<(), ServiceError> {
        self.execute_raw(operation, builder).await.map(|_| ())
    }

    async fn execute_raw(
        &self,
        operation: &'static str,
        builder: RequestBuilder,
    ) -> Result<String, ServiceError> {
        let correlation_id = Uuid::new_v4();
        debug!(event_name = "api.request", operation, %correlation_id, "issuing request");

        let response = builder.send().await?;
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            let message =
                error::extract_error_message(&body).unwrap_or_else(|| status.to_string());
            warn!(
                event_name = "api.request.rejected",
                operation,
                %correlation_id,
                status = status.as_u16(),
                "service rejected the request"
            );
            return Err(ServiceError::Status { status: status.as_u16(), message });
        }

        debug!(event_name = "api.request.ok", operation, %correlation_id, "request succeeded");
        Ok(body)
    }
}

#[cfg(test)]
mod tests {
    use gearcart_core::config::ApiConfig;
    use secrecy::SecretString;

    use super::ApiClient;

    fn client(base_url: &str) -> ApiClient {
        ApiClient::new(&ApiConfig { base_url: base_url.to_string(), timeout_secs: 5 })
            .expect("client")
    }

    #[test]
    fn trailing_slash_is_normalized_away() {
        let client = client("http://localhost:8000/");
        assert_eq!(client.base_url(), "http://localhost:8000");
    }

    #[test]
    fn clones_share_the_credential_cell() {
        let client = client("http://localhost:8000");
        let clone = client.clone();

        client.set_token(SecretString::from("tok-1".to_string()));
        assert!(clone.bearer_token().is_some());

        clone.clear_token();
        assert!(client.bearer_token().is_none());
    }
}
