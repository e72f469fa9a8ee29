use std::convert::TryFrom;
use std::fmt;

use byteorder::{LittleEndian, ReadBytesExt};

use crate::{
    document::DocRef,
    element::{split_cstr, RawElement},
    error::{Error, Result},
    object_id::ObjectId,
    tag::{BinarySubtype, TypeTag},
    timestamp::Timestamp,
};

/// A decoded element value, borrowing string, binary, and sub-document content from the buffer
/// it was read from.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ValueRef<'a> {
    Double(f64),
    String(&'a str),
    Object(DocRef<'a>),
    Array(DocRef<'a>),
    Binary {
        subtype: BinarySubtype,
        bytes: &'a [u8],
    },
    Undefined,
    ObjectId(ObjectId),
    Bool(bool),
    /// Milliseconds since the Unix epoch.
    Date(i64),
    Null,
    Regex {
        pattern: &'a str,
        flags: &'a str,
    },
    DbRef {
        ns: &'a str,
        id: ObjectId,
    },
    Code(&'a str),
    Symbol(&'a str),
    CodeWScope {
        code: &'a str,
        scope: DocRef<'a>,
    },
    Int32(i32),
    Timestamp(Timestamp),
    Int64(i64),
    MaxKey,
    MinKey,
}

impl<'a> ValueRef<'a> {
    pub fn tag(&self) -> TypeTag {
        match self {
            ValueRef::Double(_) => TypeTag::Double,
            ValueRef::String(_) => TypeTag::String,
            ValueRef::Object(_) => TypeTag::Object,
            ValueRef::Array(_) => TypeTag::Array,
            ValueRef::Binary { .. } => TypeTag::Binary,
            ValueRef::Undefined => TypeTag::Undefined,
            ValueRef::ObjectId(_) => TypeTag::ObjectId,
            ValueRef::Bool(_) => TypeTag::Bool,
            ValueRef::Date(_) => TypeTag::Date,
            ValueRef::Null => TypeTag::Null,
            ValueRef::Regex { .. } => TypeTag::Regex,
            ValueRef::DbRef { .. } => TypeTag::DbRef,
            ValueRef::Code(_) => TypeTag::Code,
            ValueRef::Symbol(_) => TypeTag::Symbol,
            ValueRef::CodeWScope { .. } => TypeTag::CodeWScope,
            ValueRef::Int32(_) => TypeTag::Int32,
            ValueRef::Timestamp(_) => TypeTag::Timestamp,
            ValueRef::Int64(_) => TypeTag::Int64,
            ValueRef::MaxKey => TypeTag::MaxKey,
            ValueRef::MinKey => TypeTag::MinKey,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, ValueRef::Null)
    }

    pub fn is_number(&self) -> bool {
        self.tag().is_number()
    }

    pub fn as_bool(&self) -> Option<bool> {
        if let ValueRef::Bool(v) = *self {
            Some(v)
        } else {
            None
        }
    }

    pub fn as_i32(&self) -> Option<i32> {
        if let ValueRef::Int32(v) = *self {
            Some(v)
        } else {
            None
        }
    }

    /// Returns the value as `i64` if it is an integer of either width.
    pub fn as_i64(&self) -> Option<i64> {
        match *self {
            ValueRef::Int32(v) => Some(v as i64),
            ValueRef::Int64(v) => Some(v),
            _ => None,
        }
    }

    /// Returns any numeric value widened to `f64`.
    pub fn as_f64(&self) -> Option<f64> {
        match *self {
            ValueRef::Double(v) => Some(v),
            ValueRef::Int32(v) => Some(v as f64),
            ValueRef::Int64(v) => Some(v as f64),
            _ => None,
        }
    }

    /// Returns the text of a string or symbol.
    pub fn as_str(&self) -> Option<&'a str> {
        match *self {
            ValueRef::String(v) | ValueRef::Symbol(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_document(&self) -> Option<DocRef<'a>> {
        if let ValueRef::Object(v) = *self {
            Some(v)
        } else {
            None
        }
    }

    pub fn as_array(&self) -> Option<DocRef<'a>> {
        if let ValueRef::Array(v) = *self {
            Some(v)
        } else {
            None
        }
    }

    pub fn as_object_id(&self) -> Option<ObjectId> {
        if let ValueRef::ObjectId(v) = *self {
            Some(v)
        } else {
            None
        }
    }

    pub fn as_date(&self) -> Option<i64> {
        if let ValueRef::Date(v) = *self {
            Some(v)
        } else {
            None
        }
    }

    pub fn as_timestamp(&self) -> Option<Timestamp> {
        if let ValueRef::Timestamp(v) = *self {
            Some(v)
        } else {
            None
        }
    }
}

impl<'a> fmt::Display for ValueRef<'a> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            ValueRef::Double(v) => write!(f, "{:?}", v),
            ValueRef::String(v) => write!(f, "{:?}", v),
            ValueRef::Object(v) => write!(f, "{}", v),
            ValueRef::Array(v) => {
                f.write_str("[")?;
                for (i, e) in v.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    match e.value() {
                        Ok(val) => write!(f, "{}", val)?,
                        Err(_) => f.write_str("?")?,
                    }
                }
                f.write_str("]")
            }
            ValueRef::Binary { subtype, bytes } => {
                write!(f, "BinData({}, {} bytes)", subtype.into_u8(), bytes.len())
            }
            ValueRef::Undefined => f.write_str("undefined"),
            ValueRef::ObjectId(v) => write!(f, "ObjectId(\"{}\")", v),
            ValueRef::Bool(v) => write!(f, "{}", v),
            ValueRef::Date(v) => write!(f, "Date({})", v),
            ValueRef::Null => f.write_str("null"),
            ValueRef::Regex { pattern, flags } => write!(f, "/{}/{}", pattern, flags),
            ValueRef::DbRef { ns, id } => write!(f, "DBRef({:?}, {})", ns, id),
            ValueRef::Code(v) => write!(f, "Code({:?})", v),
            ValueRef::Symbol(v) => write!(f, "Symbol({:?})", v),
            ValueRef::CodeWScope { code, scope } => write!(f, "CodeWScope({:?}, {})", code, scope),
            ValueRef::Int32(v) => write!(f, "{}", v),
            ValueRef::Timestamp(v) => write!(f, "{}", v),
            ValueRef::Int64(v) => write!(f, "NumberLong({})", v),
            ValueRef::MaxKey => f.write_str("MaxKey"),
            ValueRef::MinKey => f.write_str("MinKey"),
        }
    }
}

fn read_str<'a>(payload: &'a [u8], step: &'static str) -> Result<(&'a str, &'a [u8])> {
    let mut raw = payload;
    let len = raw.read_i32::<LittleEndian>().map_err(|_| Error::LengthTooShort {
        step,
        actual: payload.len(),
        expected: 4,
    })? as usize;
    // Boundaries were checked by the parser, so only the content needs checking here.
    let (bytes, rest) = raw.split_at(len);
    let s = std::str::from_utf8(&bytes[..len - 1])
        .map_err(|e| Error::BadEncode(format!("{} is not valid UTF-8: {}", step, e)))?;
    Ok((s, rest))
}

impl<'a> RawElement<'a> {
    /// Decode the payload. Fails on bad UTF-8 or a boolean byte other than 0 or 1. Embedded
    /// documents come back as views; their own elements are checked only by
    /// [`DocRef::from_bytes`].
    pub fn value(&self) -> Result<ValueRef<'a>> {
        let mut payload = self.payload();
        let short = |step| Error::LengthTooShort {
            step,
            actual: self.payload().len(),
            expected: 8,
        };
        Ok(match self.tag() {
            TypeTag::Eoo => {
                return Err(Error::BadEncode(String::from(
                    "End-of-object has no value",
                )))
            }
            TypeTag::Double => {
                ValueRef::Double(payload.read_f64::<LittleEndian>().map_err(|_| short("decode Double"))?)
            }
            TypeTag::String => ValueRef::String(read_str(payload, "decode String")?.0),
            TypeTag::Code => ValueRef::Code(read_str(payload, "decode Code")?.0),
            TypeTag::Symbol => ValueRef::Symbol(read_str(payload, "decode Symbol")?.0),
            TypeTag::Object => ValueRef::Object(DocRef::from_parsed(payload)),
            TypeTag::Array => ValueRef::Array(DocRef::from_parsed(payload)),
            TypeTag::Binary => {
                let subtype = BinarySubtype::from_u8(payload[4]);
                ValueRef::Binary {
                    subtype,
                    bytes: &payload[5..],
                }
            }
            TypeTag::Undefined => ValueRef::Undefined,
            TypeTag::ObjectId => ValueRef::ObjectId(
                ObjectId::try_from(payload).map_err(Error::BadEncode)?,
            ),
            TypeTag::Bool => match payload[0] {
                0 => ValueRef::Bool(false),
                1 => ValueRef::Bool(true),
                v => {
                    return Err(Error::BadEncode(format!(
                        "Got Bool with byte value {}. Only 0 and 1 are allowed.",
                        v
                    )))
                }
            },
            TypeTag::Date => {
                ValueRef::Date(payload.read_i64::<LittleEndian>().map_err(|_| short("decode Date"))?)
            }
            TypeTag::Null => ValueRef::Null,
            TypeTag::Regex => {
                let (pattern, rest) = split_cstr(payload, "regex pattern")?;
                let (flags, _) = split_cstr(rest, "regex flags")?;
                ValueRef::Regex { pattern, flags }
            }
            TypeTag::DbRef => {
                let (ns, rest) = read_str(payload, "decode DBRef namespace")?;
                ValueRef::DbRef {
                    ns,
                    id: ObjectId::try_from(rest).map_err(Error::BadEncode)?,
                }
            }
            TypeTag::CodeWScope => {
                let (code, rest) = read_str(&payload[4..], "decode code with scope")?;
                ValueRef::CodeWScope {
                    code,
                    scope: DocRef::from_parsed(rest),
                }
            }
            TypeTag::Int32 => ValueRef::Int32(payload.read_i32::<LittleEndian>().map_err(|_| {
                Error::LengthTooShort {
                    step: "decode Int32",
                    actual: self.payload().len(),
                    expected: 4,
                }
            })?),
            TypeTag::Timestamp => {
                ValueRef::Timestamp(Timestamp::try_from(payload).map_err(Error::BadEncode)?)
            }
            TypeTag::Int64 => {
                ValueRef::Int64(payload.read_i64::<LittleEndian>().map_err(|_| short("decode Int64"))?)
            }
            TypeTag::MaxKey => ValueRef::MaxKey,
            TypeTag::MinKey => ValueRef::MinKey,
        })
    }
}
