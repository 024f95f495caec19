//! # Firebase Auth
//!
//! Signs the seeder in as an end user through the Identity Toolkit REST API.
//! The resulting [`Session`] carries the ID token used to authorise writes to
//! Firestore.
//!
//! [`authenticate`] tries an anonymous sign-in first and falls back to a
//! throwaway email/password account when anonymous sign-in is disabled for
//! the project.

use anyhow::Context;
use async_trait::async_trait;
use tracing::instrument;

use crate::error::SeederError;
use crate::utils::get_unix_time;

use self::{error::AuthApiError, models::SignUpResponse};

mod authenticator;
mod error;
mod models;
mod options;

/// This module isn't really supposed to be exposed, but integration tests
/// need the test doubles and they can't reach `#[cfg(test)]` items.
pub mod test_helpers;

pub use authenticator::{authenticate, AuthOutcome, FALLBACK_PASSWORD};
pub use models::Session;
pub use options::AuthClientOptions;

/// The sign-in operations the seeder needs from an identity backend.
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// Creates a new anonymous user and signs in as it.
    async fn sign_in_anonymously(&self) -> Result<Session, SeederError>;

    /// Creates a new email/password user and signs in as it.
    async fn sign_up_with_email_and_password(
        &self,
        email: &str,
        password: &str,
    ) -> Result<Session, SeederError>;
}

pub struct FirebaseAuthClient {
    client: reqwest::Client,
    api_url: String,
}

impl FirebaseAuthClient {
    pub fn new(api_key: &str, options: AuthClientOptions) -> Result<Self, SeederError> {
        let mut default_headers = reqwest::header::HeaderMap::new();

        let mut api_key_header =
            reqwest::header::HeaderValue::from_str(api_key).context("Invalid API key")?;
        api_key_header.set_sensitive(true);
        default_headers.insert("X-goog-api-key", api_key_header);

        let client = reqwest::Client::builder()
            .https_only(options.https_only)
            .default_headers(default_headers)
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            client,
            api_url: options.api_url,
        })
    }

    fn url(&self, path: impl AsRef<str>) -> String {
        format!("{}:{}", self.api_url, path.as_ref())
    }

    async fn sign_up(&self, body: serde_json::Value) -> Result<Session, SeederError> {
        let issued_at = get_unix_time()?;

        let res = self
            .client
            .post(self.url("signUp"))
            .json(&body)
            .send()
            .await
            .context("Failed to send sign-up request")?;

        if res.status().is_success() {
            let new_user: SignUpResponse =
                res.json().await.context("Failed to read response JSON")?;

            new_user.into_session(issued_at)
        } else {
            Err(res
                .json::<AuthApiError>()
                .await
                .context("Failed to read error response JSON")?
                .into())
        }
    }
}

#[async_trait]
impl IdentityProvider for FirebaseAuthClient {
    #[instrument(name = "Sign in anonymously", skip(self))]
    async fn sign_in_anonymously(&self) -> Result<Session, SeederError> {
        self.sign_up(serde_json::json!({ "returnSecureToken": true }))
            .await
    }

    #[instrument(name = "Sign up with email and password", skip(self, password))]
    async fn sign_up_with_email_and_password(
        &self,
        email: &str,
        password: &str,
    ) -> Result<Session, SeederError> {
        self.sign_up(serde_json::json!({
            "email": email,
            "password": password,
            "returnSecureToken": true
        }))
        .await
    }
}
