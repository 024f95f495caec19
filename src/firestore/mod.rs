//! # Firestore
//!
//! Writes seeded records to Firestore over gRPC.
//!
//! The seeder only ever creates new documents with generated IDs, so the
//! client exposes exactly that: [`FirestoreClient::create_document`]. The
//! seeding code itself is written against the [`DocumentStore`] trait so it
//! can run against an in-memory store in tests.
//!
//! ```no_run
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! use campus_seeder::{
//!     auth::{authenticate, AuthClientOptions, FirebaseAuthClient},
//!     firestore::{client::{FirestoreClient, FirestoreClientOptions}, collection},
//! };
//!
//! let auth = FirebaseAuthClient::new("my-api-key", AuthClientOptions::default())?;
//! let session = authenticate(&auth).await?.into_session();
//!
//! let client =
//!     FirestoreClient::initialise("my-project", session, FirestoreClientOptions::default())
//!         .await?;
//!
//! let created = client
//!     .create_document(
//!         &collection("greetings"),
//!         &serde_json::json!({ "message": "Hi Mom!" }),
//!     )
//!     .await?;
//!
//! println!("Created {created}");
//! # Ok(())
//! # }
//! ```
//!
//! [`FirestoreClient::create_document`]: client::FirestoreClient::create_document

pub mod client;
pub mod reference;
pub mod serde;
mod store;
mod token_provider;

/// This module isn't really supposed to be exposed, but we are lacking
/// `#[cfg(doctest)]`, and we can't make it private either since integration
/// tests are compiled as a separate crate.
///
/// Relevant rust-lang issue: <https://github.com/rust-lang/rust/issues/67295>
pub mod test_helpers;

pub use reference::collection;
pub use serde::FirestoreTimestamp;
pub use store::DocumentStore;
