//! Synthetic record generators, one per collection.
//!
//! Every generator samples each field independently from fixed tables and
//! ranges using the injected RNG, so a seeded RNG gives reproducible records.
//! Seeding a collection submits all of its records concurrently and succeeds
//! only if every write does.

use futures::future::try_join_all;
use rand::Rng;
use serde::Serialize;
use tracing::info;

use crate::error::SeederError;
use crate::firestore::{collection, reference::DocumentReference, DocumentStore};

pub mod requests;
pub mod rides;
pub mod users;

/// Pick-up and drop-off points on campus.
pub const LOCATIONS: [&str; 6] = [
    "Hostel 1",
    "Hostel 2",
    "Library",
    "Main Gate",
    "Cafeteria",
    "Sports Complex",
];

/// Off-campus ride destinations.
pub const DESTINATIONS: [&str; 4] = ["Airport", "City Centre", "Railway Station", "Mall"];

/// A person embedded in a ride or request. The ID is random and does not
/// refer to any seeded user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PersonRef {
    pub name: String,
    pub id: String,
}

impl PersonRef {
    pub(crate) fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        use fake::{faker::name::en::Name, Fake};

        Self {
            name: Name().fake_with_rng(rng),
            id: random_id(rng),
        }
    }
}

/// Uniform choice from a non-empty table.
pub(crate) fn pick<'a, T, R: Rng + ?Sized>(rng: &mut R, items: &'a [T]) -> &'a T {
    &items[rng.gen_range(0..items.len())]
}

/// A v4 UUID drawn from the given RNG.
pub(crate) fn random_id<R: Rng + ?Sized>(rng: &mut R) -> String {
    uuid::Builder::from_random_bytes(rng.gen())
        .into_uuid()
        .to_string()
}

/// Writes all records to `collection_name` at once and waits for every write.
/// The first failed write fails the whole batch; writes that already landed
/// are left in place.
pub async fn seed_collection<S, T>(
    store: &S,
    collection_name: &str,
    records: &[T],
) -> Result<Vec<DocumentReference>, SeederError>
where
    S: DocumentStore,
    T: Serialize + Sync,
{
    info!(collection = collection_name, count = records.len(), "Seeding collection");

    let collection_ref = collection(collection_name);
    let created = try_join_all(
        records
            .iter()
            .map(|record| store.create_document(&collection_ref, record)),
    )
    .await
    .map_err(|err| err.in_stage(collection_name))?;

    Ok(created)
}
