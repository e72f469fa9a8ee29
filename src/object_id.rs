use std::convert::TryFrom;
use std::fmt;
use std::str::FromStr;

use serde::{
    de::{Deserialize, Deserializer, Error},
    ser::{Serialize, Serializer},
};
use serde_bytes::ByteBuf;

/// A 12-byte object identifier. Compared and ordered bytewise.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ObjectId {
    bytes: [u8; ObjectId::SIZE],
}

impl ObjectId {
    pub const SIZE: usize = 12;

    pub fn from_bytes(bytes: [u8; ObjectId::SIZE]) -> ObjectId {
        ObjectId { bytes }
    }

    /// The all-zero id, lowest in the ordering.
    pub fn zero() -> ObjectId {
        ObjectId {
            bytes: [0u8; ObjectId::SIZE],
        }
    }

    /// The all-ones id, highest in the ordering.
    pub fn max() -> ObjectId {
        ObjectId {
            bytes: [0xffu8; ObjectId::SIZE],
        }
    }

    pub fn bytes(&self) -> &[u8; ObjectId::SIZE] {
        &self.bytes
    }

    pub fn encode_vec(&self, vec: &mut Vec<u8>) {
        vec.extend_from_slice(&self.bytes);
    }
}

impl TryFrom<&[u8]> for ObjectId {
    type Error = String;
    fn try_from(value: &[u8]) -> Result<Self, Self::Error> {
        let bytes = <[u8; ObjectId::SIZE]>::try_from(value)
            .map_err(|_| format!("ObjectId must be 12 bytes, got {}", value.len()))?;
        Ok(ObjectId { bytes })
    }
}

impl fmt::Display for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for b in self.bytes.iter() {
            write!(f, "{:02x}", b)?;
        }
        Ok(())
    }
}

impl FromStr for ObjectId {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.len() != 2 * ObjectId::SIZE || !s.is_ascii() {
            return Err(format!("ObjectId must be 24 hex characters, got {:?}", s));
        }
        let mut bytes = [0u8; ObjectId::SIZE];
        for (i, b) in bytes.iter_mut().enumerate() {
            *b = u8::from_str_radix(&s[2 * i..2 * i + 2], 16)
                .map_err(|e| format!("ObjectId {:?} is not hex: {}", s, e))?;
        }
        Ok(ObjectId { bytes })
    }
}

impl Serialize for ObjectId {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        if serializer.is_human_readable() {
            serializer.collect_str(self)
        } else {
            serializer.serialize_bytes(&self.bytes)
        }
    }
}

impl<'de> Deserialize<'de> for ObjectId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        if deserializer.is_human_readable() {
            let s = String::deserialize(deserializer)?;
            s.parse().map_err(D::Error::custom)
        } else {
            let bytes = ByteBuf::deserialize(deserializer)?;
            ObjectId::try_from(bytes.as_ref()).map_err(D::Error::custom)
        }
    }
}
