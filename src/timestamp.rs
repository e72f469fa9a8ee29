use std::cmp;
use std::convert::TryFrom;
use std::fmt;

use byteorder::{LittleEndian, ReadBytesExt};

use serde::{
    de::{Deserialize, Deserializer, Error, MapAccess, Visitor},
    ser::{Serialize, SerializeStruct, Serializer},
};
use serde_bytes::ByteBuf;

/// Structure for holding an internal replication timestamp: a seconds count paired with an
/// ordinal that distinguishes events within the same second.
///
/// This is not a date. Dates are stored as signed milliseconds since the Unix epoch and have their
/// own tag.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Timestamp {
    secs: u32,
    inc: u32,
}

impl Timestamp {
    pub const SIZE: usize = 8;

    pub fn new(secs: u32, inc: u32) -> Timestamp {
        Timestamp { secs, inc }
    }

    /// The zero timestamp. Sorts below every real timestamp.
    pub fn min_value() -> Timestamp {
        Timestamp { secs: 0, inc: 0 }
    }

    /// Largest timestamp used as an upper scan bound. Both halves are capped at the signed 32-bit
    /// maximum so the bound stays valid for readers that treat the halves as signed.
    pub fn max_value() -> Timestamp {
        Timestamp {
            secs: i32::MAX as u32,
            inc: i32::MAX as u32,
        }
    }

    pub fn secs(&self) -> u32 {
        self.secs
    }

    pub fn inc(&self) -> u32 {
        self.inc
    }

    /// The combined 64-bit value as stored on the wire.
    pub fn as_u64(&self) -> u64 {
        ((self.secs as u64) << 32) | (self.inc as u64)
    }

    pub fn from_u64(v: u64) -> Timestamp {
        Timestamp {
            secs: (v >> 32) as u32,
            inc: v as u32,
        }
    }

    /// Convert into a byte vector. For extending an existing byte vector, see
    /// [`encode_vec`](Self::encode_vec).
    pub fn as_vec(&self) -> Vec<u8> {
        let mut v = Vec::with_capacity(Self::SIZE);
        self.encode_vec(&mut v);
        v
    }

    /// Encode onto a byte vector as a little-endian u64: the ordinal occupies the low word and the
    /// seconds the high word.
    pub fn encode_vec(&self, vec: &mut Vec<u8>) {
        vec.extend_from_slice(&self.as_u64().to_le_bytes());
    }
}

impl cmp::Ord for Timestamp {
    fn cmp(&self, other: &Timestamp) -> cmp::Ordering {
        if self.secs == other.secs {
            self.inc.cmp(&other.inc)
        } else {
            self.secs.cmp(&other.secs)
        }
    }
}

impl cmp::PartialOrd for Timestamp {
    fn partial_cmp(&self, other: &Timestamp) -> Option<cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Timestamp({}, {})", self.secs, self.inc)
    }
}

impl TryFrom<&[u8]> for Timestamp {
    type Error = String;
    fn try_from(value: &[u8]) -> Result<Self, Self::Error> {
        if value.len() != Self::SIZE {
            return Err(format!(
                "not a recognized Timestamp length ({} bytes)",
                value.len()
            ));
        }
        let mut raw = value;
        let v = raw
            .read_u64::<LittleEndian>()
            .map_err(|_| String::from("truncated Timestamp"))?;
        Ok(Timestamp::from_u64(v))
    }
}

impl Serialize for Timestamp {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        if serializer.is_human_readable() {
            let mut st = serializer.serialize_struct("Timestamp", 2)?;
            st.serialize_field("secs", &self.secs)?;
            st.serialize_field("inc", &self.inc)?;
            st.end()
        } else {
            // Use the wire bytes if not human-readable
            serializer.serialize_bytes(&self.as_vec())
        }
    }
}

impl<'de> Deserialize<'de> for Timestamp {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct TimeVisitor;

        impl<'de> Visitor<'de> for TimeVisitor {
            type Value = Timestamp;

            fn expecting(&self, fmt: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(fmt, "timestamp struct")
            }

            fn visit_map<A>(self, mut map: A) -> Result<Self::Value, A::Error>
            where
                A: MapAccess<'de>,
            {
                let mut secs: Option<u32> = None;
                let mut inc: u32 = 0;
                while let Some(key) = map.next_key::<String>()? {
                    match key.as_ref() {
                        "secs" => {
                            secs = Some(map.next_value()?);
                        }
                        "inc" => {
                            inc = map.next_value()?;
                        }
                        _ => return Err(A::Error::unknown_field(key.as_ref(), &["secs", "inc"])),
                    }
                }
                let secs = secs.ok_or_else(|| A::Error::missing_field("secs"))?;
                Ok(Timestamp::new(secs, inc))
            }
        }

        if deserializer.is_human_readable() {
            deserializer.deserialize_struct("Timestamp", &["secs", "inc"], TimeVisitor)
        } else {
            let bytes = ByteBuf::deserialize(deserializer)?;
            Timestamp::try_from(bytes.as_ref()).map_err(D::Error::custom)
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn edge_cases() -> Vec<Timestamp> {
        vec![
            Timestamp::min_value(),
            Timestamp::new(0, 1),
            Timestamp::new(1, 0),
            Timestamp::new(u32::MAX, 0),
            Timestamp::new(0, u32::MAX),
            Timestamp::max_value(),
        ]
    }

    #[test]
    fn roundtrip() {
        for (index, case) in edge_cases().iter().enumerate() {
            println!("Test #{}: '{}'", index, case);
            let mut enc = Vec::new();
            case.encode_vec(&mut enc);
            assert_eq!(enc.len(), Timestamp::SIZE);
            let decoded = Timestamp::try_from(enc.as_ref()).unwrap();
            assert_eq!(&decoded, case);
        }
    }

    #[test]
    fn wire_layout() {
        let enc = Timestamp::new(2, 1).as_vec();
        assert_eq!(enc, &[1, 0, 0, 0, 2, 0, 0, 0]);
    }

    #[test]
    fn wrong_length() {
        for case in edge_cases() {
            let mut enc = case.as_vec();
            enc.push(0u8);
            assert!(Timestamp::try_from(enc.as_ref()).is_err());
            enc.truncate(7);
            assert!(Timestamp::try_from(enc.as_ref()).is_err());
        }
    }

    #[test]
    fn ordering() {
        assert!(Timestamp::new(1, 0) > Timestamp::new(0, u32::MAX));
        assert!(Timestamp::new(1, 2) > Timestamp::new(1, 1));
        assert!(Timestamp::min_value() < Timestamp::new(0, 1));
        assert_eq!(Timestamp::max_value().secs(), i32::MAX as u32);
    }

    #[test]
    fn human_readable_serde() {
        let ts = Timestamp::new(1700000000, 3);
        let json = serde_json::to_string(&ts).unwrap();
        assert_eq!(json, r#"{"secs":1700000000,"inc":3}"#);
        let back: Timestamp = serde_json::from_str(&json).unwrap();
        assert_eq!(back, ts);
    }
}
