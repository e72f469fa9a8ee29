//! Views over encoded elements and the parser that finds their boundaries.

use crate::{
    error::{Error, Result},
    tag::TypeTag,
};
use byteorder::{LittleEndian, ReadBytesExt};

/// One encoded element: a tag byte, a NUL-terminated field name, and a payload whose shape
/// depends on the tag. Borrows the buffer it was parsed from.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RawElement<'a> {
    tag: TypeTag,
    name: &'a str,
    payload: &'a [u8],
    raw: &'a [u8],
}

impl<'a> RawElement<'a> {
    pub fn tag(&self) -> TypeTag {
        self.tag
    }

    pub fn field_name(&self) -> &'a str {
        self.name
    }

    /// The type-specific payload, without tag or name.
    pub fn payload(&self) -> &'a [u8] {
        self.payload
    }

    /// The complete element, tag byte through the last payload byte.
    pub fn raw(&self) -> &'a [u8] {
        self.raw
    }

    pub fn size(&self) -> usize {
        self.raw.len()
    }
}

/// Split a NUL-terminated string off the front of `data`.
pub(crate) fn split_cstr<'a>(data: &'a [u8], step: &'static str) -> Result<(&'a str, &'a [u8])> {
    let end = data
        .iter()
        .position(|&b| b == 0)
        .ok_or(Error::LengthTooShort {
            step,
            actual: data.len(),
            expected: data.len() + 1,
        })?;
    let s = std::str::from_utf8(&data[..end])
        .map_err(|e| Error::BadEncode(format!("{} is not valid UTF-8: {}", step, e)))?;
    Ok((s, &data[end + 1..]))
}

/// Peek at a little-endian i32 length prefix without consuming it.
fn peek_len(data: &[u8], step: &'static str) -> Result<i32> {
    let mut raw = data;
    raw.read_i32::<LittleEndian>()
        .map_err(|_| Error::LengthTooShort {
            step,
            actual: data.len(),
            expected: 4,
        })
}

fn check_len(data: &[u8], len: usize, step: &'static str) -> Result<()> {
    if len > data.len() {
        Err(Error::LengthTooShort {
            step,
            actual: data.len(),
            expected: len,
        })
    } else {
        Ok(())
    }
}

/// Length of a length-prefixed string payload, prefix included.
fn str_payload_len(data: &[u8], step: &'static str) -> Result<usize> {
    let len = peek_len(data, step)?;
    if len < 1 {
        return Err(Error::BadEncode(format!(
            "{} has length {}, must be at least 1",
            step, len
        )));
    }
    let total = 4 + len as usize;
    check_len(data, total, step)?;
    if data[total - 1] != 0 {
        return Err(Error::BadEncode(format!("{} is not NUL-terminated", step)));
    }
    Ok(total)
}

/// Length of an embedded document payload, prefix and terminator included.
fn doc_payload_len(data: &[u8], step: &'static str) -> Result<usize> {
    let len = peek_len(data, step)?;
    if len < 5 {
        return Err(Error::BadEncode(format!(
            "{} has length {}, must be at least 5",
            step, len
        )));
    }
    let len = len as usize;
    check_len(data, len, step)?;
    if data[len - 1] != 0 {
        return Err(Error::BadEncode(format!("{} is missing its terminator", step)));
    }
    Ok(len)
}

/// Work out how many payload bytes follow the name of an element with the given tag. Only
/// boundaries are checked here; payload contents are checked on decode.
fn payload_len(tag: TypeTag, data: &[u8]) -> Result<usize> {
    use self::TypeTag::*;
    let len = match tag {
        Eoo => {
            return Err(Error::BadEncode(
                "Found end-of-object tag inside element data".to_string(),
            ))
        }
        Double | Date | Timestamp | Int64 => 8,
        Int32 => 4,
        Bool => 1,
        Undefined | Null | MinKey | MaxKey => 0,
        ObjectId => crate::object_id::ObjectId::SIZE,
        String | Code | Symbol => str_payload_len(data, "string payload")?,
        Object | Array => doc_payload_len(data, "embedded document")?,
        Binary => {
            let len = peek_len(data, "binary length")?;
            if len < 0 {
                return Err(Error::BadEncode(format!("Binary length {} is negative", len)));
            }
            4 + 1 + len as usize
        }
        Regex => {
            let (_, rest) = split_cstr(data, "regex pattern")?;
            let (_, rest) = split_cstr(rest, "regex flags")?;
            data.len() - rest.len()
        }
        DbRef => str_payload_len(data, "DBRef namespace")? + crate::object_id::ObjectId::SIZE,
        CodeWScope => {
            let total = peek_len(data, "code with scope length")?;
            if total < 14 {
                return Err(Error::BadEncode(format!(
                    "Code with scope has length {}, must be at least 14",
                    total
                )));
            }
            let total = total as usize;
            check_len(data, total, "code with scope")?;
            let code_len = str_payload_len(&data[4..total], "code with scope code")?;
            let scope_len = doc_payload_len(&data[4 + code_len..total], "code with scope scope")?;
            if 4 + code_len + scope_len != total {
                return Err(Error::BadEncode(
                    "Code with scope length doesn't match its parts".to_string(),
                ));
            }
            total
        }
    };
    check_len(data, len, "element payload")?;
    Ok(len)
}

/// Walks a run of encoded elements (a document's interior, without its length prefix or
/// terminator). Yields an error and stops at the first element that can't be delimited.
#[derive(Clone, Debug)]
pub struct Parser<'a> {
    data: &'a [u8],
    errored: bool,
}

impl<'a> Parser<'a> {
    pub fn new(data: &'a [u8]) -> Parser<'a> {
        Self {
            data,
            errored: false,
        }
    }

    pub fn peek_tag(&self) -> Option<TypeTag> {
        self.data.first().and_then(|n| TypeTag::from_u8(*n))
    }

    // Parse the element at the front of the remaining data. Does not set the errored flag; that's
    // up to the caller.
    fn parse_element(&mut self) -> Result<RawElement<'a>> {
        let start = self.data;
        let (&tag_byte, data) = start.split_first().ok_or(Error::LengthTooShort {
            step: "get element tag",
            actual: 0,
            expected: 1,
        })?;
        let tag = TypeTag::from_u8(tag_byte).ok_or_else(|| {
            Error::BadEncode(format!("Got unrecognized type tag 0x{:02x}.", tag_byte))
        })?;
        let (name, data) = split_cstr(data, "field name")?;
        let len = payload_len(tag, data)?;
        let (payload, rest) = data.split_at(len);
        self.data = rest;
        let raw = &start[..start.len() - rest.len()];
        Ok(RawElement {
            tag,
            name,
            payload,
            raw,
        })
    }
}

impl<'a> std::iter::Iterator for Parser<'a> {
    type Item = Result<RawElement<'a>>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.errored || self.data.is_empty() {
            return None;
        }
        let result = self.parse_element();
        if result.is_err() {
            self.errored = true;
        }
        Some(result)
    }
}

/// Forward-only iterator over elements that are already known to be well-formed: the interior of
/// a validated [`Document`][crate::Document] or the content a builder has written so far.
///
/// The iterator covers exactly the bytes present when it was created. Because it borrows its
/// source, nothing can be appended through the same builder while it is alive.
#[derive(Clone, Debug)]
pub struct ElementIter<'a> {
    parser: Parser<'a>,
}

impl<'a> ElementIter<'a> {
    pub(crate) fn new(data: &'a [u8]) -> Self {
        Self {
            parser: Parser::new(data),
        }
    }

    /// True if at least one more element remains.
    pub fn more(&self) -> bool {
        !self.parser.errored && !self.parser.data.is_empty()
    }
}

impl<'a> std::iter::Iterator for ElementIter<'a> {
    type Item = RawElement<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        // Validated content never fails to parse; a failure just ends the walk.
        self.parser.next().and_then(|r| r.ok())
    }
}

impl<'a> std::iter::FusedIterator for ElementIter<'a> {}
