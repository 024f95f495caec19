//! Runs against the Firebase emulators. Start them with
//! `firebase emulators:start --only auth,firestore`, export
//! `FIRESTORE_EMULATOR_HOST`, `FIREBASE_AUTH_EMULATOR_HOST`,
//! `FIREBASE_PROJECT_ID`, and `FIREBASE_API_KEY`, then run
//! `cargo test -- --ignored`.

use campus_seeder::{
    firestore::{collection, FirestoreTimestamp},
    seed_database, SeederConfig,
};
use serde::Serialize;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct Smoke {
    label: String,
    created_at: FirestoreTimestamp,
}

#[tokio::test]
#[ignore = "needs the Firebase Auth and Firestore emulators"]
async fn create_document_in_fresh_collection() -> Result<(), Box<dyn std::error::Error>> {
    let client = campus_seeder::firestore::test_helpers::initialise_emulator().await?;

    let collection_ref = collection(format!("smoke-{}", ulid::Ulid::new()));
    let created = client
        .create_document(
            &collection_ref,
            &Smoke {
                label: "emulator".to_string(),
                created_at: FirestoreTimestamp::now(),
            },
        )
        .await?;

    assert_eq!(created.parent(), &collection_ref);
    assert!(!created.id().is_empty());

    Ok(())
}

#[tokio::test]
#[ignore = "needs the Firebase Auth and Firestore emulators"]
async fn full_seed_run_against_emulator() -> Result<(), Box<dyn std::error::Error>> {
    let config = SeederConfig::from_env()?;

    let summary = seed_database(config).await?;

    assert_eq!(summary.users.len(), 20);
    assert_eq!(summary.rides.len(), 10);
    assert_eq!(summary.requests.len(), 5);

    Ok(())
}
