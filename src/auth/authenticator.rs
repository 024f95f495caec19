use tracing::{error, info, warn};

use crate::error::SeederError;
use crate::utils::get_unix_time_millis;

use super::{IdentityProvider, Session};

/// Password given to the throwaway account created when anonymous sign-in is
/// not available.
pub const FALLBACK_PASSWORD: &str = "password123";

/// How the seeder ended up signed in.
#[derive(Debug, Clone)]
pub enum AuthOutcome {
    Anonymous(Session),
    /// Anonymous sign-in was disabled, so a temporary account was created.
    FallbackAccount(Session),
}

impl AuthOutcome {
    pub fn session(&self) -> &Session {
        match self {
            AuthOutcome::Anonymous(session) | AuthOutcome::FallbackAccount(session) => session,
        }
    }

    pub fn into_session(self) -> Session {
        match self {
            AuthOutcome::Anonymous(session) | AuthOutcome::FallbackAccount(session) => session,
        }
    }

    pub fn used_fallback(&self) -> bool {
        matches!(self, AuthOutcome::FallbackAccount(_))
    }
}

/// Email for the fallback account. Unique per run as long as two runs don't
/// start within the same millisecond.
pub fn fallback_email(unix_millis: u128) -> String {
    format!("seeder_{unix_millis}@example.com")
}

/// Obtains a session before anything is written. Each path is tried exactly
/// once: anonymous sign-in, then (only if that method is disabled) sign-up
/// with a fresh email and [`FALLBACK_PASSWORD`].
pub async fn authenticate<I: IdentityProvider + ?Sized>(
    identity: &I,
) -> Result<AuthOutcome, SeederError> {
    info!("Attempting anonymous auth");

    let err = match identity.sign_in_anonymously().await {
        Ok(session) => {
            info!(uid = %session.user_uid, "Signed in anonymously");
            return Ok(AuthOutcome::Anonymous(session));
        }
        Err(err) if err.is_sign_in_method_disabled() => err,
        Err(err) => return Err(err),
    };

    warn!(reason = %err, "Anonymous auth disabled, creating a temporary seeder user");

    let email = fallback_email(get_unix_time_millis()?);
    match identity
        .sign_up_with_email_and_password(&email, FALLBACK_PASSWORD)
        .await
    {
        Ok(session) => {
            info!(%email, uid = %session.user_uid, "Created and signed in as temporary user");
            Ok(AuthOutcome::FallbackAccount(session))
        }
        Err(err) => {
            error!(
                "Auth failed. Ensure anonymous auth is enabled or email/password sign-up is \
                 allowed in the Firebase console"
            );
            Err(err)
        }
    }
}
