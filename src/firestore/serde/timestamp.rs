use chrono::{DateTime, Utc};
use serde::{Serialize, Serializer};

/// Name of the newtype struct that [`FirestoreTimestamp`] serializes as. The
/// document serializer recognises it and emits a native timestamp value
/// instead of the `(seconds, nanos)` pair it wraps.
pub(crate) const TIMESTAMP_NEWTYPE_NAME: &str = "$__firestore_timestamp";

/// A point in time that is stored as a Firestore timestamp rather than as a
/// string or a number.
///
/// With any serializer other than the Firestore document serializer, this
/// serializes as a `[seconds, nanos]` pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct FirestoreTimestamp(pub DateTime<Utc>);

impl FirestoreTimestamp {
    pub fn now() -> Self {
        Self(Utc::now())
    }

    pub fn as_datetime(&self) -> DateTime<Utc> {
        self.0
    }
}

impl From<DateTime<Utc>> for FirestoreTimestamp {
    fn from(value: DateTime<Utc>) -> Self {
        Self(value)
    }
}

impl Serialize for FirestoreTimestamp {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let seconds_and_nanos = (self.0.timestamp(), self.0.timestamp_subsec_nanos());
        serializer.serialize_newtype_struct(TIMESTAMP_NEWTYPE_NAME, &seconds_and_nanos)
    }
}
