use crate::config::IdentityConfig;
use crate::error::{AppError, Result};
use reqwest::Client;
use serde::Deserialize;
use serde_json::json;
use std::time::Duration;
use tracing::{info, warn};

/// Fixed user-facing message for connectivity problems; wrong-credential and
/// server-unreachable failures are deliberately not distinguished beyond the
/// message text.
pub const CONNECTION_ERROR_MESSAGE: &str =
    "Connection error. Check your network and try again.";

const REGISTER_FALLBACK_MESSAGE: &str = "Could not create the account. Please try again.";
const SIGN_IN_FALLBACK_MESSAGE: &str = "Incorrect email or password.";

/// Access/refresh token pair returned by the identity service
#[derive(Debug, Clone)]
pub struct TokenPair {
    pub token: String,
    pub refresh_token: String,
}

#[derive(Debug, Deserialize)]
struct AuthEnvelope {
    data: AuthTokens,
}

#[derive(Debug, Deserialize)]
struct AuthTokens {
    token: String,
    #[serde(rename = "refreshToken")]
    refresh_token: String,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: String,
}

/// HTTP client for the remote identity service.
///
/// One fire-and-forget request per user action: no retry, no cancellation.
#[derive(Clone)]
pub struct IdentityClient {
    client: Client,
    base_url: String,
}

impl IdentityClient {
    /// Create a new identity client
    pub fn new(config: &IdentityConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| AppError::Configuration(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Register a new account
    pub async fn register(&self, name: &str, email: &str, password: &str) -> Result<TokenPair> {
        let payload = json!({
            "name": name,
            "email": email,
            "password": password,
        });
        self.post_credentials("/register", &payload, REGISTER_FALLBACK_MESSAGE)
            .await
    }

    /// Sign in with existing credentials
    pub async fn sign_in(&self, email: &str, password: &str) -> Result<TokenPair> {
        let payload = json!({
            "email": email,
            "password": password,
        });
        self.post_credentials("/sign-in", &payload, SIGN_IN_FALLBACK_MESSAGE)
            .await
    }

    async fn post_credentials(
        &self,
        path: &str,
        payload: &serde_json::Value,
        fallback_message: &str,
    ) -> Result<TokenPair> {
        let url = format!("{}{}", self.base_url, path);

        let response = self
            .client
            .post(&url)
            .header("Content-Type", "application/json")
            .json(payload)
            .send()
            .await
            .map_err(|e| {
                warn!(url = %url, error = %e, "Identity request failed");
                AppError::Network(CONNECTION_ERROR_MESSAGE.to_string())
            })?;

        let status = response.status();

        if !status.is_success() {
            // The error body carries a `message` field when the service had
            // something to say; anything unparsable collapses to the fallback.
            let message = response
                .json::<ErrorBody>()
                .await
                .map(|body| body.message)
                .unwrap_or_else(|_| fallback_message.to_string());

            warn!(url = %url, status = status.as_u16(), "Identity service rejected request");
            return Err(AppError::Identity(message));
        }

        let envelope: AuthEnvelope = response.json().await.map_err(|e| {
            warn!(url = %url, error = %e, "Identity response was not the expected shape");
            AppError::Network(CONNECTION_ERROR_MESSAGE.to_string())
        })?;

        info!(url = %url, "Identity request succeeded");

        Ok(TokenPair {
            token: envelope.data.token,
            refresh_token: envelope.data.refresh_token,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config(base_url: &str) -> IdentityConfig {
        IdentityConfig {
            base_url: base_url.to_string(),
            timeout_secs: 5,
            secure_cookies: false,
            token_max_age_secs: 86_400,
            refresh_token_max_age_secs: 259_200,
        }
    }

    #[test]
    fn test_client_creation() {
        let client = IdentityClient::new(&test_config("https://identity.example.com"));
        assert!(client.is_ok());
    }

    #[test]
    fn test_trailing_slash_is_normalized() {
        let client = IdentityClient::new(&test_config("https://identity.example.com/")).unwrap();
        assert_eq!(client.base_url, "https://identity.example.com");
    }

    #[test]
    fn test_envelope_parsing() {
        let envelope: AuthEnvelope = serde_json::from_str(
            r#"{"data":{"token":"abc","refreshToken":"def"}}"#,
        )
        .unwrap();
        assert_eq!(envelope.data.token, "abc");
        assert_eq!(envelope.data.refresh_token, "def");
    }
}
