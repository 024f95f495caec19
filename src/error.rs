use firestore_grpc::tonic;

#[derive(thiserror::Error)]
pub enum SeederError {
    #[error("Sign-in method is disabled for this project: {0}")]
    SignInMethodDisabled(String),

    #[error("Email already exists")]
    EmailAlreadyExists,

    #[error("Authentication failed: {0}")]
    AuthenticationFailed(String),

    #[error("The session has expired")]
    SessionExpired,

    #[error("{0}")]
    DocumentAlreadyExists(String),

    #[error("Failed to seed collection '{collection}'")]
    StageFailed {
        collection: String,
        #[source]
        source: Box<SeederError>,
    },

    #[error("serde: {0}")]
    FirestoreSerdeError(#[from] crate::firestore::serde::Error),

    #[error("grpc: {0}")]
    GrpcError(#[from] tonic::transport::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl SeederError {
    /// Whether an authentication attempt failed because the sign-in method
    /// itself is switched off or restricted to admins, as opposed to failing
    /// for any other reason.
    pub fn is_sign_in_method_disabled(&self) -> bool {
        matches!(self, SeederError::SignInMethodDisabled(_))
    }

    pub(crate) fn in_stage(self, collection: impl Into<String>) -> Self {
        SeederError::StageFailed {
            collection: collection.into(),
            source: Box::new(self),
        }
    }
}

impl std::fmt::Debug for SeederError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        error_chain_fmt(self, f)
    }
}

// Taken from https://www.lpalmieri.com/posts/error-handling-rust/#internal-errors
fn error_chain_fmt(
    e: &impl std::error::Error,
    f: &mut std::fmt::Formatter<'_>,
) -> std::fmt::Result {
    writeln!(f, "{}\n", e)?;
    let mut current = e.source();
    while let Some(cause) = current {
        writeln!(f, "Caused by:\n\t{}", cause)?;
        current = cause.source();
    }
    Ok(())
}
