use serde::Deserialize;

use crate::error::SeederError;

#[derive(Debug, Deserialize)]
pub(crate) struct AuthApiError {
    error: AuthApiErrorInfo,
}

#[derive(Debug, Deserialize)]
pub struct AuthApiErrorInfo {
    pub message: String,
    #[serde(default)]
    pub errors: Vec<SpecificAuthApiErrorInfo>,
    pub code: u16,
}

#[derive(Debug, Deserialize)]
pub struct SpecificAuthApiErrorInfo {
    pub domain: String,
    pub message: String,
    pub reason: String,
}

impl AuthApiError {
    /// The error code the API puts at the start of the message. Some messages
    /// carry extra detail after a colon, e.g. `WEAK_PASSWORD : Password
    /// should be at least 6 characters`.
    pub(crate) fn code(&self) -> &str {
        self.error
            .message
            .split_once(" : ")
            .map(|(code, _)| code)
            .unwrap_or(&self.error.message)
            .trim()
    }
}

impl From<AuthApiError> for SeederError {
    fn from(err: AuthApiError) -> Self {
        match err.code() {
            "OPERATION_NOT_ALLOWED" | "ADMIN_ONLY_OPERATION" => {
                SeederError::SignInMethodDisabled(err.code().to_string())
            }
            "EMAIL_EXISTS" => SeederError::EmailAlreadyExists,
            _ => SeederError::AuthenticationFailed(format!(
                "{} (HTTP {})",
                err.error.message, err.error.code
            )),
        }
    }
}
