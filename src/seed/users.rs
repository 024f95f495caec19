use chrono::{DateTime, Utc};
use fake::{
    faker::{internet::en::FreeEmail, name::en::Name},
    Fake,
};
use rand::Rng;
use serde::Serialize;

use crate::error::SeederError;
use crate::firestore::{reference::DocumentReference, DocumentStore, FirestoreTimestamp};

use super::{pick, seed_collection};

pub const USERS_COLLECTION: &str = "users";
pub const USER_COUNT: usize = 20;

pub const HOSTELS: [&str; 3] = ["Hostel 1", "Hostel 2", "Hostel 3"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    Student,
    Admin,
}

/// Drawn from uniformly, which makes students three times as likely as admins.
const ROLE_POOL: [UserRole; 4] = [
    UserRole::Student,
    UserRole::Student,
    UserRole::Student,
    UserRole::Admin,
];

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub name: String,
    pub email: String,
    pub role: UserRole,
    pub hostel: &'static str,
    pub created_at: FirestoreTimestamp,
}

pub fn generate_user<R: Rng + ?Sized>(rng: &mut R, now: DateTime<Utc>) -> User {
    User {
        name: Name().fake_with_rng(rng),
        email: FreeEmail().fake_with_rng(rng),
        role: *pick(rng, &ROLE_POOL),
        hostel: *pick(rng, &HOSTELS),
        created_at: now.into(),
    }
}

pub fn generate_users<R: Rng + ?Sized>(rng: &mut R, now: DateTime<Utc>) -> Vec<User> {
    (0..USER_COUNT).map(|_| generate_user(rng, now)).collect()
}

pub async fn seed_users<S: DocumentStore, R: Rng + ?Sized>(
    store: &S,
    rng: &mut R,
) -> Result<Vec<DocumentReference>, SeederError> {
    let users = generate_users(rng, Utc::now());
    seed_collection(store, USERS_COLLECTION, &users).await
}

#[cfg(test)]
mod tests {
    use firestore_grpc::v1::value::ValueType;
    use rand::{rngs::StdRng, SeedableRng};

    use super::*;
    use crate::firestore::test_helpers::RecordingStore;

    #[test]
    fn generates_twenty_users_with_valid_fields() {
        let mut rng = StdRng::seed_from_u64(42);
        let now = Utc::now();

        let users = generate_users(&mut rng, now);

        assert_eq!(users.len(), USER_COUNT);
        for user in &users {
            assert!(!user.name.is_empty());
            assert!(user.email.contains('@'), "not an email: {}", user.email);
            assert!(HOSTELS.contains(&user.hostel));
            assert_eq!(user.created_at.as_datetime(), now);
        }
    }

    #[test]
    fn both_roles_show_up_and_students_dominate() {
        let mut rng = StdRng::seed_from_u64(3);
        let now = Utc::now();

        let roles: Vec<UserRole> = (0..2000)
            .map(|_| generate_user(&mut rng, now).role)
            .collect();
        let admins = roles.iter().filter(|r| **r == UserRole::Admin).count();

        // Expect about 500 admins out of 2000.
        assert!((400..600).contains(&admins), "got {admins} admins");
    }

    #[test]
    fn same_seed_gives_same_users() {
        let now = Utc::now();
        let a = generate_users(&mut StdRng::seed_from_u64(9), now);
        let b = generate_users(&mut StdRng::seed_from_u64(9), now);

        let names = |users: &[User]| users.iter().map(|u| u.name.clone()).collect::<Vec<_>>();
        assert_eq!(names(&a), names(&b));
    }

    #[tokio::test]
    async fn written_documents_use_firestore_field_names_and_types() {
        let store = RecordingStore::new();
        let mut rng = StdRng::seed_from_u64(5);

        let created = seed_users(&store, &mut rng).await.unwrap();

        assert_eq!(created.len(), USER_COUNT);
        let docs = store.documents_in(USERS_COLLECTION);
        assert_eq!(docs.len(), USER_COUNT);
        for doc in &docs {
            assert!(matches!(
                doc.field("role"),
                Some(ValueType::StringValue(role)) if role == "student" || role == "admin"
            ));
            assert!(matches!(doc.field("createdAt"), Some(ValueType::TimestampValue(_))));
            assert!(matches!(doc.field("email"), Some(ValueType::StringValue(_))));
        }
    }
}
