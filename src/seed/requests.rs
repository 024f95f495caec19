use chrono::{DateTime, Utc};
use fake::{faker::lorem::en::Sentence, Fake};
use rand::Rng;
use serde::Serialize;

use crate::error::SeederError;
use crate::firestore::{reference::DocumentReference, DocumentStore, FirestoreTimestamp};

use super::{pick, seed_collection, PersonRef, LOCATIONS};

pub const REQUESTS_COLLECTION: &str = "requests";
pub const REQUEST_COUNT: usize = 5;

pub const REQUEST_TITLES: [&str; 5] = [
    "Need Paracetamol",
    "Printout needed",
    "Charger needed",
    "Notes needed",
    "Lunch pickup",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Urgency {
    Urgent,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RequestStatus {
    Open,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Request {
    /// Random person; not one of the seeded users.
    pub requester: PersonRef,
    pub title: &'static str,
    pub description: String,
    pub location: &'static str,
    pub urgency: Urgency,
    pub status: RequestStatus,
    pub created_at: FirestoreTimestamp,
}

pub fn generate_request<R: Rng + ?Sized>(rng: &mut R, now: DateTime<Utc>) -> Request {
    Request {
        requester: PersonRef::random(rng),
        title: *pick(rng, &REQUEST_TITLES),
        description: Sentence(3..11).fake_with_rng(rng),
        location: *pick(rng, &LOCATIONS),
        urgency: Urgency::Urgent,
        status: RequestStatus::Open,
        created_at: now.into(),
    }
}

pub fn generate_requests<R: Rng + ?Sized>(rng: &mut R, now: DateTime<Utc>) -> Vec<Request> {
    (0..REQUEST_COUNT)
        .map(|_| generate_request(rng, now))
        .collect()
}

pub async fn seed_requests<S: DocumentStore, R: Rng + ?Sized>(
    store: &S,
    rng: &mut R,
) -> Result<Vec<DocumentReference>, SeederError> {
    let requests = generate_requests(rng, Utc::now());
    seed_collection(store, REQUESTS_COLLECTION, &requests).await
}

#[cfg(test)]
mod tests {
    use firestore_grpc::v1::value::ValueType;
    use rand::{rngs::StdRng, SeedableRng};

    use super::*;
    use crate::firestore::test_helpers::RecordingStore;

    #[test]
    fn generates_five_requests_from_the_tables() {
        let mut rng = StdRng::seed_from_u64(21);

        let requests = generate_requests(&mut rng, Utc::now());

        assert_eq!(requests.len(), REQUEST_COUNT);
        for request in &requests {
            assert!(REQUEST_TITLES.contains(&request.title));
            assert!(LOCATIONS.contains(&request.location));
            assert!(!request.description.trim().is_empty());
            assert!(!request.requester.id.is_empty());
        }
    }

    #[tokio::test]
    async fn urgency_and_status_are_constant_on_the_wire() {
        let store = RecordingStore::new();
        let mut rng = StdRng::seed_from_u64(22);

        seed_requests(&store, &mut rng).await.unwrap();

        let docs = store.documents_in(REQUESTS_COLLECTION);
        assert_eq!(docs.len(), REQUEST_COUNT);
        for doc in &docs {
            assert!(matches!(
                doc.field("urgency"),
                Some(ValueType::StringValue(s)) if s == "Urgent"
            ));
            assert!(matches!(doc.field("status"), Some(ValueType::StringValue(s)) if s == "open"));
            assert!(matches!(doc.field("requester"), Some(ValueType::MapValue(_))));
            assert!(matches!(doc.field("createdAt"), Some(ValueType::TimestampValue(_))));
        }
    }
}
