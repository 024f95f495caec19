//! Runs the seeding stages in order: authenticate, then users, rides, and
//! requests. The first failing stage ends the run; nothing is resumed or
//! rolled back, and every run adds new documents.

use std::future::Future;

use rand::{rngs::StdRng, Rng, SeedableRng};
use tracing::info;

use crate::auth::{authenticate, FirebaseAuthClient, IdentityProvider, Session};
use crate::config::SeederConfig;
use crate::error::SeederError;
use crate::firestore::{client::FirestoreClient, reference::DocumentReference, DocumentStore};
use crate::seed::{requests::seed_requests, rides::seed_rides, users::seed_users};

/// What a successful run created.
#[derive(Debug, Clone)]
pub struct SeedSummary {
    pub user_uid: String,
    /// Whether a temporary email/password account had to be created because
    /// anonymous sign-in is disabled.
    pub used_fallback_account: bool,
    pub users: Vec<DocumentReference>,
    pub rides: Vec<DocumentReference>,
    pub requests: Vec<DocumentReference>,
}

/// Authenticates with `identity`, opens a store for the resulting session
/// with `connect`, then seeds every collection in turn.
///
/// `connect` is only called once authentication has succeeded, so a failed
/// sign-in never reaches the store.
pub async fn run<I, C, Fut, S, R>(
    identity: &I,
    connect: C,
    rng: &mut R,
) -> Result<SeedSummary, SeederError>
where
    I: IdentityProvider + ?Sized,
    C: FnOnce(Session) -> Fut,
    Fut: Future<Output = Result<S, SeederError>>,
    S: DocumentStore,
    R: Rng + ?Sized,
{
    let outcome = authenticate(identity).await?;
    let used_fallback_account = outcome.used_fallback();
    let session = outcome.into_session();
    let user_uid = session.user_uid.clone();

    let store = connect(session).await?;

    let users = seed_users(&store, rng).await?;
    info!(count = users.len(), "Generated users");

    let rides = seed_rides(&store, rng).await?;
    info!(count = rides.len(), "Generated active rides");

    let requests = seed_requests(&store, rng).await?;
    info!(count = requests.len(), "Generated urgent requests");

    Ok(SeedSummary {
        user_uid,
        used_fallback_account,
        users,
        rides,
        requests,
    })
}

/// Seeds the project described by `config` over the network.
pub async fn seed_database(config: SeederConfig) -> Result<SeedSummary, SeederError> {
    info!(?config, "Initialising Firebase clients");

    let auth_client = FirebaseAuthClient::new(&config.api_key, config.auth_options())?;
    let project_id = config.project_id.clone();
    let firestore_options = config.firestore_options();

    let mut rng = StdRng::from_entropy();

    run(
        &auth_client,
        |session| async move {
            FirestoreClient::initialise(&project_id, session, firestore_options).await
        },
        &mut rng,
    )
    .await
}
