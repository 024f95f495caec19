use anyhow::Context;
use serde::Deserialize;

use crate::error::SeederError;

/// Body returned by the `accounts:signUp` endpoint, both for anonymous
/// sign-in and for creating an email/password account.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct SignUpResponse {
    #[serde(rename(deserialize = "localId"))]
    user_uid: String,
    #[serde(default)]
    email: Option<String>,
    id_token: String,
    /// Lifetime of the ID token in seconds. The API sends it as a string.
    expires_in: String,
}

/// An authenticated end-user session. Writes to Firestore are authorised with
/// its ID token, so security rules see the seeder as this user.
///
/// `Debug` is implemented by hand to keep the tokens out of logs.
#[derive(Clone)]
pub struct Session {
    pub user_uid: String,
    /// `None` for anonymous sessions.
    pub email: Option<String>,
    pub id_token: String,
    /// Seconds since the UNIX epoch.
    pub expires_at: u64,
}

impl Session {
    pub fn is_anonymous(&self) -> bool {
        self.email.is_none()
    }
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("user_uid", &self.user_uid)
            .field("email", &self.email)
            .field("expires_at", &self.expires_at)
            .finish_non_exhaustive()
    }
}

impl SignUpResponse {
    pub(crate) fn into_session(self, issued_at: u64) -> Result<Session, SeederError> {
        let lifetime: u64 = self
            .expires_in
            .parse()
            .with_context(|| format!("Invalid token lifetime '{}'", self.expires_in))?;

        Ok(Session {
            user_uid: self.user_uid,
            email: self.email.filter(|e| !e.is_empty()),
            id_token: self.id_token,
            expires_at: issued_at + lifetime,
        })
    }
}
