use crate::{auth::Session, error::SeederError, utils::get_unix_time};

/// Refuse to hand out a token this close to its expiry, so it cannot lapse
/// while a request is in flight.
const EXPIRY_BUFFER_SECS: u64 = 5 * 60;

/// Hands out the session's ID token for authorising Firestore requests.
#[derive(Clone)]
pub struct SessionTokenProvider {
    session: Session,
}

impl SessionTokenProvider {
    pub fn new(session: Session) -> Self {
        Self { session }
    }

    pub fn get_token(&self) -> Result<&str, SeederError> {
        let now = get_unix_time()?;
        if now.saturating_add(EXPIRY_BUFFER_SECS) >= self.session.expires_at {
            return Err(SeederError::SessionExpired);
        }
        Ok(&self.session.id_token)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::test_helpers::session;

    #[test]
    fn hands_out_token_while_valid() {
        let mut s = session("uid", None);
        s.expires_at = get_unix_time().unwrap() + 3600;

        let provider = SessionTokenProvider::new(s);

        assert_eq!(provider.get_token().unwrap(), "id-token-for-uid");
    }

    #[test]
    fn refuses_token_close_to_expiry() {
        let mut s = session("uid", None);
        s.expires_at = get_unix_time().unwrap() + 60;

        let provider = SessionTokenProvider::new(s);

        assert!(matches!(
            provider.get_token(),
            Err(SeederError::SessionExpired)
        ));
    }
}
