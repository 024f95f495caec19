use std::sync::Mutex;

use async_trait::async_trait;

use crate::error::SeederError;

use super::{IdentityProvider, Session};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IdentityCall {
    Anonymous,
    SignUp { email: String, password: String },
}

/// An [`IdentityProvider`] whose answers are decided up front. Every sign-in
/// method answers once; a second call to the same method is an error.
pub struct ScriptedIdentity {
    anonymous: Mutex<Option<Result<Session, SeederError>>>,
    sign_up: Mutex<Option<Result<Session, SeederError>>>,
    calls: Mutex<Vec<IdentityCall>>,
}

pub fn session(uid: &str, email: Option<&str>) -> Session {
    Session {
        user_uid: uid.to_string(),
        email: email.map(str::to_string),
        id_token: format!("id-token-for-{uid}"),
        expires_at: u64::MAX,
    }
}

impl ScriptedIdentity {
    fn new(anonymous: Result<Session, SeederError>) -> Self {
        Self {
            anonymous: Mutex::new(Some(anonymous)),
            sign_up: Mutex::new(None),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn anonymous_ok() -> Self {
        Self::new(Ok(session("anonymous-uid", None)))
    }

    /// Anonymous sign-in fails with the given classification and sign-up
    /// succeeds, echoing back whatever email it was given.
    pub fn anonymous_disabled(code: &str) -> Self {
        Self::new(Err(SeederError::SignInMethodDisabled(code.to_string())))
    }

    pub fn anonymous_fails(err: SeederError) -> Self {
        Self::new(Err(err))
    }

    pub fn with_sign_up_error(self, err: SeederError) -> Self {
        *self.sign_up.lock().unwrap() = Some(Err(err));
        self
    }

    pub fn calls(&self) -> Vec<IdentityCall> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl IdentityProvider for ScriptedIdentity {
    async fn sign_in_anonymously(&self) -> Result<Session, SeederError> {
        self.calls.lock().unwrap().push(IdentityCall::Anonymous);
        self.anonymous
            .lock()
            .unwrap()
            .take()
            .unwrap_or_else(|| Err(anyhow::anyhow!("anonymous sign-in called twice").into()))
    }

    async fn sign_up_with_email_and_password(
        &self,
        email: &str,
        password: &str,
    ) -> Result<Session, SeederError> {
        let first_call = !self
            .calls
            .lock()
            .unwrap()
            .iter()
            .any(|c| matches!(c, IdentityCall::SignUp { .. }));

        self.calls.lock().unwrap().push(IdentityCall::SignUp {
            email: email.to_string(),
            password: password.to_string(),
        });

        match self.sign_up.lock().unwrap().take() {
            Some(scripted) => scripted,
            None if first_call => Ok(session("fallback-uid", Some(email))),
            None => Err(anyhow::anyhow!("sign-up called twice").into()),
        }
    }
}
