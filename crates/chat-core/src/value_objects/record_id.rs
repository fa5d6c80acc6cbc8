//! Record ID - store-assigned 64-bit row identifier
//!
//! Every persisted entity (user, room, message) is keyed by a `BIGSERIAL`
//! column. `RecordId` wraps that value so ids of different origins cannot be
//! confused with plain integers in signatures.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// Store-assigned row identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct RecordId(i64);

impl RecordId {
    /// Create a new RecordId from a raw i64 value
    #[inline]
    pub const fn new(id: i64) -> Self {
        Self(id)
    }

    /// Get the inner i64 value
    #[inline]
    pub const fn into_inner(self) -> i64 {
        self.0
    }

    /// Check if the id is zero (not yet assigned by the store)
    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Parse from string representation
    pub fn parse(s: &str) -> Result<Self, RecordIdParseError> {
        s.trim()
            .parse::<i64>()
            .ok()
            .filter(|id| *id > 0)
            .map(RecordId)
            .ok_or(RecordIdParseError::InvalidFormat)
    }
}

/// Error when parsing a RecordId from string
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum RecordIdParseError {
    #[error("invalid record id")]
    InvalidFormat,
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i64> for RecordId {
    fn from(id: i64) -> Self {
        Self(id)
    }
}

impl From<RecordId> for i64 {
    fn from(id: RecordId) -> Self {
        id.0
    }
}

impl std::str::FromStr for RecordId {
    type Err = RecordIdParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        RecordId::parse(s)
    }
}

// Serial ids stay well inside the JavaScript safe integer range, so they go out as numbers
impl Serialize for RecordId {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_i64(self.0)
    }
}

// Form posts deliver ids as strings, JSON bodies as numbers
impl<'de> Deserialize<'de> for RecordId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        use serde::de::{self, Visitor};

        struct RecordIdVisitor;

        impl Visitor<'_> for RecordIdVisitor {
            type Value = RecordId;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("a string or integer representing a record id")
            }

            fn visit_i64<E>(self, value: i64) -> Result<RecordId, E>
            where
                E: de::Error,
            {
                Ok(RecordId(value))
            }

            fn visit_u64<E>(self, value: u64) -> Result<RecordId, E>
            where
                E: de::Error,
            {
                i64::try_from(value)
                    .map(RecordId)
                    .map_err(|_| de::Error::custom("record id out of range"))
            }

            fn visit_str<E>(self, value: &str) -> Result<RecordId, E>
            where
                E: de::Error,
            {
                RecordId::parse(value).map_err(|_| de::Error::custom("invalid record id string"))
            }
        }

        deserializer.deserialize_any(RecordIdVisitor)
    }
}
