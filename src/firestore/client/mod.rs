use anyhow::{anyhow, Context};
use async_trait::async_trait;
use firestore_grpc::tonic;
use firestore_grpc::v1::firestore_client::FirestoreClient as GrpcFirestoreClient;
use firestore_grpc::v1::{CreateDocumentRequest, DocumentMask};
use firestore_grpc::tonic::{
    codegen::InterceptedService, metadata::MetadataValue, service::Interceptor,
    transport::Channel, Request, Status,
};
use serde::Serialize;
use tracing::{debug, instrument};

use crate::auth::Session;
use crate::error::SeederError;

use super::reference::{CollectionReference, DocumentReference};
use super::serde::serialize_to_document;
use super::store::DocumentStore;
use super::token_provider::SessionTokenProvider;

mod options;

pub use options::FirestoreClientOptions;

const SESSION_EXPIRED_MESSAGE: &str = "The seeder session has expired";

/// Adds the session's ID token to every request.
#[derive(Clone)]
struct AuthInterceptor {
    token_provider: SessionTokenProvider,
}

impl Interceptor for AuthInterceptor {
    fn call(&mut self, mut req: Request<()>) -> Result<Request<()>, Status> {
        let token = self.token_provider.get_token().map_err(|err| match err {
            SeederError::SessionExpired => Status::unauthenticated(SESSION_EXPIRED_MESSAGE),
            _ => Status::unauthenticated("Could not get token from token provider"),
        })?;

        let bearer_token = format!("Bearer {token}");
        let mut header_value = MetadataValue::from_str(&bearer_token).map_err(|_| {
            Status::unauthenticated("Failed to construct metadata value for authorization token")
        })?;
        header_value.set_sensitive(true);

        req.metadata_mut().insert("authorization", header_value);

        Ok(req)
    }
}

/// A Firestore client that writes as the signed-in seeder user. Cloning is
/// cheap: clones share the underlying gRPC channel.
#[derive(Clone)]
pub struct FirestoreClient {
    client: GrpcFirestoreClient<InterceptedService<Channel, AuthInterceptor>>,
    root_resource_path: String,
}

impl FirestoreClient {
    /// Connects to Firestore for the given project, authorising every
    /// request with the session's ID token.
    pub async fn initialise(
        project_id: &str,
        session: Session,
        options: FirestoreClientOptions,
    ) -> Result<Self, SeederError> {
        let channel = Channel::from_shared(options.host_url.clone())
            .context("Failed to create gRPC channel")?
            .connect()
            .await?;

        Ok(Self::from_channel(
            channel,
            SessionTokenProvider::new(session),
            project_id,
            &options,
        ))
    }

    fn from_channel(
        channel: Channel,
        token_provider: SessionTokenProvider,
        project_id: &str,
        options: &FirestoreClientOptions,
    ) -> Self {
        let interceptor = AuthInterceptor { token_provider };
        let service = GrpcFirestoreClient::with_interceptor(channel, interceptor);

        Self {
            client: service,
            root_resource_path: root_resource_path(project_id, &options.database_id),
        }
    }

    /// Creates a document in the given collection, letting Firestore generate
    /// its ID. Returns a reference to the created document.
    ///
    /// Takes `&self` so that many writes can be in flight at once; each call
    /// works on its own clone of the gRPC stub.
    #[instrument(skip(self, collection_ref, document), fields(collection = %collection_ref))]
    pub async fn create_document<T: Serialize + ?Sized>(
        &self,
        collection_ref: &CollectionReference,
        document: &T,
    ) -> Result<DocumentReference, SeederError> {
        // We should provide no name or timestamps when creating a document
        // according to Google's Firestore API reference.
        let doc = serialize_to_document(document, String::new())?;

        let request = CreateDocumentRequest {
            parent: self.root_resource_path.clone(),
            collection_id: collection_ref.name().to_string(),
            // Passing an empty string means that Firestore will generate a
            // document ID for us.
            document_id: String::new(),
            document: Some(doc),
            mask: Some(DocumentMask {
                field_paths: vec![],
            }),
        };

        let res = self.client.clone().create_document(request).await;

        match res {
            Ok(r) => {
                let created_doc = r.into_inner();
                let created_doc_id = created_doc
                    .name
                    .rsplit_once('/')
                    .map(|(_, id)| id.to_string())
                    .context("Could not get document ID from resource path")?;
                debug!(id = %created_doc_id, "Created document");
                Ok(collection_ref.doc(created_doc_id))
            }
            Err(err) => Err(status_to_error(err)),
        }
    }
}

#[async_trait]
impl DocumentStore for FirestoreClient {
    async fn create_document<T: Serialize + Sync + ?Sized>(
        &self,
        collection_ref: &CollectionReference,
        document: &T,
    ) -> Result<DocumentReference, SeederError> {
        FirestoreClient::create_document(self, collection_ref, document).await
    }
}

fn root_resource_path(project_id: &str, database_id: &str) -> String {
    format!("projects/{project_id}/databases/{database_id}/documents")
}

fn status_to_error(status: Status) -> SeederError {
    match status.code() {
        tonic::Code::AlreadyExists => {
            SeederError::DocumentAlreadyExists(status.message().to_string())
        }
        tonic::Code::Unauthenticated if status.message() == SESSION_EXPIRED_MESSAGE => {
            SeederError::SessionExpired
        }
        _ => anyhow!(status).into(),
    }
}
