use async_trait::async_trait;
use serde::Serialize;

use crate::error::SeederError;

use super::reference::{CollectionReference, DocumentReference};

/// Somewhere seeded records can be written to. Implemented by
/// [`FirestoreClient`](super::client::FirestoreClient); tests use
/// [`RecordingStore`](super::test_helpers::RecordingStore).
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Creates a new document with a store-generated ID in the given
    /// collection. Must be safe to call many times concurrently.
    async fn create_document<T: Serialize + Sync + ?Sized>(
        &self,
        collection_ref: &CollectionReference,
        document: &T,
    ) -> Result<DocumentReference, SeederError>;
}

#[async_trait]
impl<S: DocumentStore> DocumentStore for &S {
    async fn create_document<T: Serialize + Sync + ?Sized>(
        &self,
        collection_ref: &CollectionReference,
        document: &T,
    ) -> Result<DocumentReference, SeederError> {
        (**self).create_document(collection_ref, document).await
    }
}
