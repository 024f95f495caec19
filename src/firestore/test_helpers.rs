use std::{collections::HashMap, env, sync::Mutex};

use anyhow::anyhow;
use async_trait::async_trait;
use firestore_grpc::v1::{value::ValueType, Document};
use serde::Serialize;

use crate::auth::{authenticate, AuthClientOptions, FirebaseAuthClient};
use crate::error::SeederError;

use super::client::{FirestoreClient, FirestoreClientOptions};
use super::reference::{CollectionReference, DocumentReference};
use super::serde::serialize_to_document;
use super::store::DocumentStore;

/// A document written to a [`RecordingStore`], kept in the form it would
/// have been sent to Firestore.
#[derive(Debug, Clone)]
pub struct RecordedDocument {
    pub collection: String,
    pub id: String,
    pub document: Document,
}

impl RecordedDocument {
    pub fn field(&self, name: &str) -> Option<&ValueType> {
        self.document
            .fields
            .get(name)
            .and_then(|v| v.value_type.as_ref())
    }
}

/// In-memory [`DocumentStore`] that records every successful write and can
/// be told to fail a specific write.
#[derive(Default)]
pub struct RecordingStore {
    documents: Mutex<Vec<RecordedDocument>>,
    attempts: Mutex<HashMap<String, usize>>,
    failures: Mutex<HashMap<String, usize>>,
}

impl RecordingStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes the `nth` (0-based) write attempted in `collection` fail.
    pub fn failing_on(self, collection: &str, nth: usize) -> Self {
        self.failures
            .lock()
            .unwrap()
            .insert(collection.to_string(), nth);
        self
    }

    pub fn documents(&self) -> Vec<RecordedDocument> {
        self.documents.lock().unwrap().clone()
    }

    pub fn documents_in(&self, collection: &str) -> Vec<RecordedDocument> {
        self.documents()
            .into_iter()
            .filter(|d| d.collection == collection)
            .collect()
    }

    /// Number of writes attempted in `collection`, failed ones included.
    pub fn attempts_in(&self, collection: &str) -> usize {
        self.attempts
            .lock()
            .unwrap()
            .get(collection)
            .copied()
            .unwrap_or_default()
    }
}

#[async_trait]
impl DocumentStore for RecordingStore {
    async fn create_document<T: Serialize + Sync + ?Sized>(
        &self,
        collection_ref: &CollectionReference,
        document: &T,
    ) -> Result<DocumentReference, SeederError> {
        let collection = collection_ref.to_string();
        let attempt = {
            let mut attempts = self.attempts.lock().unwrap();
            let count = attempts.entry(collection.clone()).or_default();
            *count += 1;
            *count - 1
        };

        // Let the other writes of the batch get going before this one lands.
        tokio::task::yield_now().await;

        if self.failures.lock().unwrap().get(&collection) == Some(&attempt) {
            return Err(anyhow!("simulated write failure in '{collection}'").into());
        }

        let document = serialize_to_document(document, String::new())?;
        let mut documents = self.documents.lock().unwrap();
        let id = format!("doc-{}", documents.len());
        documents.push(RecordedDocument {
            collection,
            id: id.clone(),
            document,
        });

        Ok(collection_ref.doc(id))
    }
}

/// Connects to the Firestore and Auth emulators named by
/// `FIRESTORE_EMULATOR_HOST` and `FIREBASE_AUTH_EMULATOR_HOST`, signing in
/// the same way the seeder does.
pub async fn initialise_emulator() -> Result<FirestoreClient, anyhow::Error> {
    let project_id =
        env::var("FIREBASE_PROJECT_ID").unwrap_or_else(|_| "demo-seeder".to_string());
    let firestore_host = env::var("FIRESTORE_EMULATOR_HOST")?;
    let auth_host = env::var("FIREBASE_AUTH_EMULATOR_HOST")?;

    let auth_client = FirebaseAuthClient::new(
        "emulator-api-key",
        AuthClientOptions::default().emulator_host(auth_host),
    )?;
    let session = authenticate(&auth_client).await?.into_session();

    let client = FirestoreClient::initialise(
        &project_id,
        session,
        FirestoreClientOptions::default().emulator_host(firestore_host),
    )
    .await?;

    Ok(client)
}
