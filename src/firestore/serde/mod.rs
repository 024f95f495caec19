mod serialize;
mod timestamp;

use std::fmt;

use serde::ser;
pub use serialize::*;
pub use timestamp::FirestoreTimestamp;

#[derive(Debug)]
pub enum Error {
    Message(String),
    /// Only maps and structs can be stored as the top level of a document.
    InvalidDocument,
    /// Map keys must serialize to strings.
    InvalidKey,
    InvalidTimestamp,
}

impl ser::Error for Error {
    fn custom<T: fmt::Display>(msg: T) -> Self {
        Self::Message(msg.to_string())
    }
}

impl fmt::Display for Error {
    fn fmt(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::Message(msg) => formatter.write_str(msg),
            Self::InvalidDocument => formatter.write_str("a document must be a map or a struct"),
            Self::InvalidKey => formatter.write_str("map keys must be strings"),
            Self::InvalidTimestamp => formatter.write_str("malformed timestamp value"),
        }
    }
}

impl std::error::Error for Error {}
