use std::collections::HashMap;

use firestore_grpc::v1::{value::ValueType, ArrayValue, Document, MapValue, Value};
use prost_types::Timestamp;
use serde::{
    ser::{
        Impossible, SerializeMap, SerializeSeq, SerializeStruct, SerializeTuple,
        SerializeTupleStruct,
    },
    Serialize, Serializer,
};

use super::timestamp::TIMESTAMP_NEWTYPE_NAME;
use super::Error;

/// Serializes a value into a Firestore document with the given resource
/// name. Pass an empty name when creating a document whose ID Firestore
/// should generate.
pub fn serialize_to_document<T: ?Sized + Serialize>(
    value: &T,
    name: String,
) -> Result<Document, Error> {
    match serialize(value)? {
        ValueType::MapValue(map_value) => Ok(Document {
            name,
            create_time: None,
            update_time: None,
            fields: map_value.fields,
        }),
        _ => Err(Error::InvalidDocument),
    }
}

fn serialize<T: ?Sized + Serialize>(value: &T) -> Result<ValueType, Error> {
    value.serialize(FirestoreValueSerializer)
}

fn wrap(value_type: ValueType) -> Value {
    Value {
        value_type: Some(value_type),
    }
}

struct FirestoreValueSerializer;

impl Serializer for FirestoreValueSerializer {
    type Ok = ValueType;
    type Error = Error;

    type SerializeSeq = ArraySerializer;
    type SerializeTuple = ArraySerializer;
    type SerializeTupleStruct = ArraySerializer;
    type SerializeTupleVariant = Impossible<ValueType, Error>;
    type SerializeMap = MapSerializer;
    type SerializeStruct = MapSerializer;
    type SerializeStructVariant = Impossible<ValueType, Error>;

    fn serialize_bool(self, v: bool) -> Result<Self::Ok, Self::Error> {
        Ok(ValueType::BooleanValue(v))
    }

    fn serialize_i8(self, v: i8) -> Result<Self::Ok, Self::Error> {
        self.serialize_i64(v as i64)
    }

    fn serialize_i16(self, v: i16) -> Result<Self::Ok, Self::Error> {
        self.serialize_i64(v as i64)
    }

    fn serialize_i32(self, v: i32) -> Result<Self::Ok, Self::Error> {
        self.serialize_i64(v as i64)
    }

    fn serialize_i64(self, v: i64) -> Result<Self::Ok, Self::Error> {
        Ok(ValueType::IntegerValue(v))
    }

    fn serialize_u8(self, v: u8) -> Result<Self::Ok, Self::Error> {
        self.serialize_i64(v as i64)
    }

    fn serialize_u16(self, v: u16) -> Result<Self::Ok, Self::Error> {
        self.serialize_i64(v as i64)
    }

    fn serialize_u32(self, v: u32) -> Result<Self::Ok, Self::Error> {
        self.serialize_i64(v as i64)
    }

    /// Firestore only has signed 64-bit integers, so values above
    /// `i64::MAX` are rejected.
    fn serialize_u64(self, v: u64) -> Result<Self::Ok, Self::Error> {
        i64::try_from(v)
            .map(ValueType::IntegerValue)
            .map_err(|_| Error::Message(format!("integer {v} does not fit in a Firestore integer")))
    }

    fn serialize_f32(self, v: f32) -> Result<Self::Ok, Self::Error> {
        self.serialize_f64(v as f64)
    }

    fn serialize_f64(self, v: f64) -> Result<Self::Ok, Self::Error> {
        Ok(ValueType::DoubleValue(v))
    }

    fn serialize_char(self, v: char) -> Result<Self::Ok, Self::Error> {
        let mut char_str = [0; 4];
        self.serialize_str(v.encode_utf8(&mut char_str))
    }

    fn serialize_str(self, v: &str) -> Result<Self::Ok, Self::Error> {
        Ok(ValueType::StringValue(v.to_string()))
    }

    fn serialize_bytes(self, v: &[u8]) -> Result<Self::Ok, Self::Error> {
        Ok(ValueType::BytesValue(v.to_vec()))
    }

    fn serialize_none(self) -> Result<Self::Ok, Self::Error> {
        self.serialize_unit()
    }

    fn serialize_some<T: ?Sized + Serialize>(self, value: &T) -> Result<Self::Ok, Self::Error> {
        value.serialize(self)
    }

    fn serialize_unit(self) -> Result<Self::Ok, Self::Error> {
        Ok(ValueType::NullValue(0))
    }

    fn serialize_unit_struct(self, _name: &'static str) -> Result<Self::Ok, Self::Error> {
        self.serialize_unit()
    }

    fn serialize_unit_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
    ) -> Result<Self::Ok, Self::Error> {
        self.serialize_str(variant)
    }

    fn serialize_newtype_struct<T: ?Sized + Serialize>(
        self,
        name: &'static str,
        value: &T,
    ) -> Result<Self::Ok, Self::Error> {
        if name == TIMESTAMP_NEWTYPE_NAME {
            return timestamp_value(value.serialize(self)?);
        }
        value.serialize(self)
    }

    fn serialize_newtype_variant<T: ?Sized + Serialize>(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
        value: &T,
    ) -> Result<Self::Ok, Self::Error> {
        let fields = HashMap::from([(variant.to_string(), wrap(serialize(value)?))]);
        Ok(ValueType::MapValue(MapValue { fields }))
    }

    fn serialize_seq(self, len: Option<usize>) -> Result<Self::SerializeSeq, Self::Error> {
        Ok(ArraySerializer::new(len.unwrap_or_default()))
    }

    fn serialize_tuple(self, len: usize) -> Result<Self::SerializeTuple, Self::Error> {
        Ok(ArraySerializer::new(len))
    }

    fn serialize_tuple_struct(
        self,
        _name: &'static str,
        len: usize,
    ) -> Result<Self::SerializeTupleStruct, Self::Error> {
        Ok(ArraySerializer::new(len))
    }

    fn serialize_tuple_variant(
        self,
        name: &'static str,
        _variant_index: u32,
        variant: &'static str,
        _len: usize,
    ) -> Result<Self::SerializeTupleVariant, Self::Error> {
        Err(Error::Message(format!(
            "tuple variant {name}::{variant} cannot be stored in a document"
        )))
    }

    fn serialize_map(self, len: Option<usize>) -> Result<Self::SerializeMap, Self::Error> {
        Ok(MapSerializer::new(len.unwrap_or_default()))
    }

    fn serialize_struct(
        self,
        _name: &'static str,
        len: usize,
    ) -> Result<Self::SerializeStruct, Self::Error> {
        Ok(MapSerializer::new(len))
    }

    fn serialize_struct_variant(
        self,
        name: &'static str,
        _variant_index: u32,
        variant: &'static str,
        _len: usize,
    ) -> Result<Self::SerializeStructVariant, Self::Error> {
        Err(Error::Message(format!(
            "struct variant {name}::{variant} cannot be stored in a document"
        )))
    }
}

/// Turns the `[seconds, nanos]` pair written by `FirestoreTimestamp` into a
/// native timestamp value.
fn timestamp_value(pair: ValueType) -> Result<ValueType, Error> {
    let ValueType::ArrayValue(ArrayValue { values }) = pair else {
        return Err(Error::InvalidTimestamp);
    };

    match values.as_slice() {
        [Value {
            value_type: Some(ValueType::IntegerValue(seconds)),
        }, Value {
            value_type: Some(ValueType::IntegerValue(nanos)),
        }] => Ok(ValueType::TimestampValue(Timestamp {
            seconds: *seconds,
            // Leap seconds are reported as nanos >= 1e9, which Firestore rejects.
            nanos: (*nanos).clamp(0, 999_999_999) as i32,
        })),
        _ => Err(Error::InvalidTimestamp),
    }
}

struct ArraySerializer {
    values: Vec<Value>,
}

impl ArraySerializer {
    fn new(len: usize) -> Self {
        Self {
            values: Vec::with_capacity(len),
        }
    }

    fn push<T: ?Sized + Serialize>(&mut self, value: &T) -> Result<(), Error> {
        self.values.push(wrap(serialize(value)?));
        Ok(())
    }

    fn finish(self) -> ValueType {
        ValueType::ArrayValue(ArrayValue {
            values: self.values,
        })
    }
}

impl SerializeSeq for ArraySerializer {
    type Ok = ValueType;
    type Error = Error;

    fn serialize_element<T: ?Sized + Serialize>(&mut self, value: &T) -> Result<(), Self::Error> {
        self.push(value)
    }

    fn end(self) -> Result<Self::Ok, Self::Error> {
        Ok(self.finish())
    }
}

impl SerializeTuple for ArraySerializer {
    type Ok = ValueType;
    type Error = Error;

    fn serialize_element<T: ?Sized + Serialize>(&mut self, value: &T) -> Result<(), Self::Error> {
        self.push(value)
    }

    fn end(self) -> Result<Self::Ok, Self::Error> {
        Ok(self.finish())
    }
}

impl SerializeTupleStruct for ArraySerializer {
    type Ok = ValueType;
    type Error = Error;

    fn serialize_field<T: ?Sized + Serialize>(&mut self, value: &T) -> Result<(), Self::Error> {
        self.push(value)
    }

    fn end(self) -> Result<Self::Ok, Self::Error> {
        Ok(self.finish())
    }
}

struct MapSerializer {
    fields: HashMap<String, Value>,
    next_key: Option<String>,
}

impl MapSerializer {
    fn new(size: usize) -> Self {
        Self {
            fields: HashMap::with_capacity(size),
            next_key: None,
        }
    }

    fn finish(self) -> ValueType {
        ValueType::MapValue(MapValue {
            fields: self.fields,
        })
    }
}

impl SerializeMap for MapSerializer {
    type Ok = ValueType;
    type Error = Error;

    fn serialize_key<T: ?Sized + Serialize>(&mut self, key: &T) -> Result<(), Self::Error> {
        self.next_key = match serialize(key)? {
            ValueType::StringValue(s) => Some(s),
            _ => return Err(Error::InvalidKey),
        };
        Ok(())
    }

    fn serialize_value<T: ?Sized + Serialize>(&mut self, value: &T) -> Result<(), Self::Error> {
        let key = self.next_key.take().ok_or(Error::InvalidKey)?;
        self.fields.insert(key, wrap(serialize(value)?));
        Ok(())
    }

    fn end(self) -> Result<Self::Ok, Self::Error> {
        Ok(self.finish())
    }
}

impl SerializeStruct for MapSerializer {
    type Ok = ValueType;
    type Error = Error;

    fn serialize_field<T: ?Sized + Serialize>(
        &mut self,
        key: &'static str,
        value: &T,
    ) -> Result<(), Self::Error> {
        self.fields.insert(key.to_string(), wrap(serialize(value)?));
        Ok(())
    }

    fn end(self) -> Result<Self::Ok, Self::Error> {
        Ok(self.finish())
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use chrono::{TimeZone, Utc};
    use firestore_grpc::v1::{value::ValueType, MapValue, Value};
    use prost_types::Timestamp;
    use serde::Serialize;

    use crate::firestore::serde::{serialize_to_document, Error, FirestoreTimestamp};

    fn string(s: &str) -> Value {
        Value {
            value_type: Some(ValueType::StringValue(s.to_string())),
        }
    }

    #[test]
    fn serialize_nested_struct_with_camel_case_fields() {
        #[derive(Serialize)]
        #[serde(rename_all = "camelCase")]
        struct Ride {
            driver: Driver,
            seats_available: u8,
        }

        #[derive(Serialize)]
        struct Driver {
            name: String,
        }

        let ride = Ride {
            driver: Driver {
                name: "Ada Lovelace".to_string(),
            },
            seats_available: 3,
        };

        let doc = serialize_to_document(&ride, String::new()).unwrap();

        assert_eq!(doc.name, "");
        assert_eq!(
            doc.fields,
            HashMap::from([
                (
                    "driver".to_string(),
                    Value {
                        value_type: Some(ValueType::MapValue(MapValue {
                            fields: HashMap::from([("name".to_string(), string("Ada Lovelace"))]),
                        })),
                    },
                ),
                (
                    "seatsAvailable".to_string(),
                    Value {
                        value_type: Some(ValueType::IntegerValue(3)),
                    },
                ),
            ])
        );
    }

    #[test]
    fn serialize_timestamp_as_native_value() {
        #[derive(Serialize)]
        struct Stamped {
            at: FirestoreTimestamp,
        }

        let at = Utc.with_ymd_and_hms(2024, 3, 1, 12, 30, 0).unwrap()
            + chrono::Duration::milliseconds(250);
        let doc = serialize_to_document(&Stamped { at: at.into() }, String::new()).unwrap();

        assert_eq!(
            doc.fields["at"].value_type,
            Some(ValueType::TimestampValue(Timestamp {
                seconds: at.timestamp(),
                nanos: 250_000_000,
            }))
        );
    }

    #[test]
    fn serialize_unit_variant_as_string() {
        #[derive(Serialize)]
        #[serde(rename_all = "lowercase")]
        enum Role {
            Admin,
        }

        let doc =
            serialize_to_document(&serde_json::json!({ "role": "x" }), String::new()).unwrap();
        assert_eq!(doc.fields["role"], string("x"));

        let doc = serialize_to_document(&HashMap::from([("role", Role::Admin)]), String::new())
            .unwrap();
        assert_eq!(doc.fields["role"], string("admin"));
    }

    #[test]
    fn reject_non_map_documents() {
        let result = serialize_to_document(&vec![1, 2, 3], String::new());
        assert!(matches!(result, Err(Error::InvalidDocument)));
    }

    #[test]
    fn reject_non_string_keys() {
        let result = serialize_to_document(&HashMap::from([(1, "one")]), String::new());
        assert!(matches!(result, Err(Error::InvalidKey)));
    }

    #[test]
    fn reject_integers_that_overflow() {
        let result = serialize_to_document(&HashMap::from([("big", u64::MAX)]), String::new());
        assert!(matches!(result, Err(Error::Message(_))));
    }
}
