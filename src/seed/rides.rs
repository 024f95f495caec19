use chrono::{DateTime, Duration, Utc};
use rand::Rng;
use serde::Serialize;

use crate::error::SeederError;
use crate::firestore::{reference::DocumentReference, DocumentStore, FirestoreTimestamp};

use super::{pick, seed_collection, PersonRef, DESTINATIONS, LOCATIONS};

pub const RIDES_COLLECTION: &str = "rides";
pub const RIDE_COUNT: usize = 10;

pub const MIN_SEATS: u8 = 1;
pub const MAX_SEATS: u8 = 3;
pub const MIN_PRICE: u32 = 50;
pub const MAX_PRICE: u32 = 200;

const DEPARTURE_WINDOW_MILLIS: i64 = 24 * 60 * 60 * 1000;

/// Seeded rides are always open for booking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RideStatus {
    Active,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Ride {
    /// Random person; not one of the seeded users.
    pub driver: PersonRef,
    pub origin: &'static str,
    pub destination: &'static str,
    pub departure_time: FirestoreTimestamp,
    pub seats_available: u8,
    pub price: u32,
    pub status: RideStatus,
    pub created_at: FirestoreTimestamp,
}

/// The window departures are drawn from: the 24 hours starting one day
/// after `now`.
pub fn departure_window(now: DateTime<Utc>) -> (DateTime<Utc>, DateTime<Utc>) {
    let tomorrow = now + Duration::days(1);
    (tomorrow, tomorrow + Duration::milliseconds(DEPARTURE_WINDOW_MILLIS))
}

/// Departure strictly inside [`departure_window`], at millisecond precision.
fn departure_time<R: Rng + ?Sized>(rng: &mut R, now: DateTime<Utc>) -> DateTime<Utc> {
    let (start, _) = departure_window(now);
    start + Duration::milliseconds(rng.gen_range(1..DEPARTURE_WINDOW_MILLIS))
}

pub fn generate_ride<R: Rng + ?Sized>(rng: &mut R, now: DateTime<Utc>) -> Ride {
    Ride {
        driver: PersonRef::random(rng),
        origin: *pick(rng, &LOCATIONS),
        destination: *pick(rng, &DESTINATIONS),
        departure_time: departure_time(rng, now).into(),
        seats_available: rng.gen_range(MIN_SEATS..=MAX_SEATS),
        price: rng.gen_range(MIN_PRICE..=MAX_PRICE),
        status: RideStatus::Active,
        created_at: now.into(),
    }
}

pub fn generate_rides<R: Rng + ?Sized>(rng: &mut R, now: DateTime<Utc>) -> Vec<Ride> {
    (0..RIDE_COUNT).map(|_| generate_ride(rng, now)).collect()
}

pub async fn seed_rides<S: DocumentStore, R: Rng + ?Sized>(
    store: &S,
    rng: &mut R,
) -> Result<Vec<DocumentReference>, SeederError> {
    let rides = generate_rides(rng, Utc::now());
    seed_collection(store, RIDES_COLLECTION, &rides).await
}

#[cfg(test)]
mod tests {
    use firestore_grpc::v1::value::ValueType;
    use rand::{rngs::StdRng, SeedableRng};

    use super::*;
    use crate::firestore::test_helpers::RecordingStore;

    #[test]
    fn generates_ten_rides_within_ranges() {
        let mut rng = StdRng::seed_from_u64(11);
        let now = Utc::now();

        let rides = generate_rides(&mut rng, now);

        assert_eq!(rides.len(), RIDE_COUNT);
        for ride in &rides {
            assert!((MIN_SEATS..=MAX_SEATS).contains(&ride.seats_available));
            assert!((MIN_PRICE..=MAX_PRICE).contains(&ride.price));
            assert!(LOCATIONS.contains(&ride.origin));
            assert!(DESTINATIONS.contains(&ride.destination));
            assert_eq!(ride.status, RideStatus::Active);
            assert!(!ride.driver.name.is_empty());
        }
    }

    #[test]
    fn departures_fall_strictly_inside_tomorrows_window() {
        let mut rng = StdRng::seed_from_u64(12);
        let now = Utc::now();
        let (start, end) = departure_window(now);

        assert_eq!(end - start, Duration::hours(24));
        assert_eq!(start - now, Duration::days(1));

        for _ in 0..1000 {
            let departure = generate_ride(&mut rng, now).departure_time.as_datetime();
            assert!(start < departure && departure < end, "{departure} outside window");
        }
    }

    #[test]
    fn ranges_are_covered_end_to_end() {
        let mut rng = StdRng::seed_from_u64(13);
        let now = Utc::now();
        let rides: Vec<Ride> = (0..2000).map(|_| generate_ride(&mut rng, now)).collect();

        for seats in MIN_SEATS..=MAX_SEATS {
            assert!(rides.iter().any(|r| r.seats_available == seats));
        }
        assert!(rides.iter().any(|r| r.price == MIN_PRICE));
        assert!(rides.iter().any(|r| r.price == MAX_PRICE));
    }

    #[test]
    fn drivers_get_distinct_placeholder_ids() {
        let mut rng = StdRng::seed_from_u64(14);
        let rides = generate_rides(&mut rng, Utc::now());

        let mut ids: Vec<_> = rides.iter().map(|r| r.driver.id.clone()).collect();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), RIDE_COUNT);
    }

    #[tokio::test]
    async fn written_documents_have_nested_driver_and_native_types() {
        let store = RecordingStore::new();
        let mut rng = StdRng::seed_from_u64(15);

        seed_rides(&store, &mut rng).await.unwrap();

        let docs = store.documents_in(RIDES_COLLECTION);
        assert_eq!(docs.len(), RIDE_COUNT);
        for doc in &docs {
            let Some(ValueType::MapValue(driver)) = doc.field("driver") else {
                panic!("driver is not a map");
            };
            assert!(driver.fields.contains_key("id"));
            assert!(driver.fields.contains_key("name"));
            assert!(matches!(doc.field("departureTime"), Some(ValueType::TimestampValue(_))));
            assert!(matches!(doc.field("seatsAvailable"), Some(ValueType::IntegerValue(1..=3))));
            assert!(matches!(doc.field("price"), Some(ValueType::IntegerValue(50..=200))));
            assert!(matches!(
                doc.field("status"),
                Some(ValueType::StringValue(s)) if s == "active"
            ));
        }
    }
}
