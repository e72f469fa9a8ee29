//! Encoded documents.
//!
//! A document is a 4-byte little-endian length (counting itself and the terminator), a run of
//! elements, and a single `0x00` terminator. [`Document`] owns such a byte sequence and
//! [`DocRef`] borrows one; both are only constructed from bytes that have been checked, or from a
//! builder that wrote them.

use std::fmt;

use byteorder::{LittleEndian, ReadBytesExt};

use crate::{
    element::{ElementIter, Parser, RawElement},
    error::{Error, Result},
    tag::TypeTag,
    MAX_DEPTH, MAX_DOC_SIZE,
};

/// Bytes of an empty document: length 5, no elements, terminator.
pub const EMPTY_DOC: [u8; 5] = [5, 0, 0, 0, 0];

/// Check the outer frame of a document: the length prefix must match the byte count and the last
/// byte must be the terminator.
fn check_frame(data: &[u8]) -> Result<()> {
    let mut raw = data;
    let len = raw
        .read_i32::<LittleEndian>()
        .map_err(|_| Error::LengthTooShort {
            step: "decode document length",
            actual: data.len(),
            expected: 4,
        })?;
    if len < 5 {
        return Err(Error::BadEncode(format!(
            "Document length {} is below the minimum of 5",
            len
        )));
    }
    let len = len as usize;
    if len > MAX_DOC_SIZE {
        return Err(Error::LengthTooLong {
            max: MAX_DOC_SIZE,
            actual: len,
        });
    }
    if len != data.len() {
        return Err(Error::BadEncode(format!(
            "Document length prefix says {} bytes, but got {}",
            len,
            data.len()
        )));
    }
    if data[len - 1] != 0 {
        return Err(Error::BadEncode(String::from(
            "Document is missing its terminator",
        )));
    }
    Ok(())
}

/// Walk every element of a framed document, descending into sub-documents.
fn validate(data: &[u8], depth: usize) -> Result<()> {
    if depth > MAX_DEPTH {
        return Err(Error::BadEncode(String::from("Depth limit exceeded")));
    }
    check_frame(data)?;
    for elem in Parser::new(&data[4..data.len() - 1]) {
        let elem = elem?;
        match elem.value()? {
            crate::ValueRef::Object(sub) | crate::ValueRef::Array(sub) => {
                validate(sub.as_bytes(), depth + 1)?
            }
            crate::ValueRef::CodeWScope { scope, .. } => validate(scope.as_bytes(), depth + 1)?,
            _ => (),
        }
    }
    Ok(())
}

/// A borrowed, well-formed encoded document.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DocRef<'a> {
    data: &'a [u8],
}

impl<'a> DocRef<'a> {
    /// Check a complete document, including every nested element, and borrow it.
    pub fn from_bytes(data: &'a [u8]) -> Result<DocRef<'a>> {
        validate(data, 0)?;
        Ok(DocRef { data })
    }

    /// Wrap bytes whose frame the element parser has already delimited.
    pub(crate) fn from_parsed(data: &'a [u8]) -> DocRef<'a> {
        DocRef { data }
    }

    pub fn empty() -> DocRef<'static> {
        DocRef { data: &EMPTY_DOC }
    }

    pub fn as_bytes(&self) -> &'a [u8] {
        self.data
    }

    /// Total encoded size, length prefix and terminator included.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// True if the document holds no elements.
    pub fn is_empty(&self) -> bool {
        self.data.len() <= EMPTY_DOC.len()
    }

    /// The element bytes between the length prefix and the terminator.
    pub fn interior(&self) -> &'a [u8] {
        &self.data[4..self.data.len() - 1]
    }

    pub fn iter(&self) -> ElementIter<'a> {
        ElementIter::new(self.interior())
    }

    /// Number of top-level elements.
    pub fn n_fields(&self) -> usize {
        self.iter().count()
    }

    /// First top-level element with the given name.
    pub fn get(&self, name: &str) -> Option<RawElement<'a>> {
        self.iter().find(|e| e.field_name() == name)
    }

    pub fn to_owned(&self) -> Document {
        Document {
            buf: self.data.to_vec(),
        }
    }
}

impl<'a> fmt::Display for DocRef<'a> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if self.is_empty() {
            return f.write_str("{}");
        }
        f.write_str("{ ")?;
        for (i, e) in self.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{}: ", e.field_name())?;
            match e.value() {
                Ok(v) => write!(f, "{}", v)?,
                Err(_) => write!(f, "<bad {}>", e.tag().name())?,
            }
        }
        f.write_str(" }")
    }
}

impl<'a> IntoIterator for DocRef<'a> {
    type Item = RawElement<'a>;
    type IntoIter = ElementIter<'a>;
    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// An owned, well-formed encoded document.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Document {
    buf: Vec<u8>,
}

impl Document {
    /// Take ownership of an encoded document after checking it completely.
    pub fn from_bytes(buf: Vec<u8>) -> Result<Document> {
        validate(&buf, 0)?;
        Ok(Document { buf })
    }

    /// Wrap bytes a builder just finished writing.
    pub(crate) fn from_builder(buf: Vec<u8>) -> Document {
        debug_assert!(check_frame(&buf).is_ok());
        Document { buf }
    }

    pub fn empty() -> Document {
        Document {
            buf: EMPTY_DOC.to_vec(),
        }
    }

    pub fn as_doc_ref(&self) -> DocRef<'_> {
        DocRef { data: &self.buf }
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.buf
    }

    pub fn into_vec(self) -> Vec<u8> {
        self.buf
    }

    pub fn len(&self) -> usize {
        self.buf.len()
    }

    pub fn is_empty(&self) -> bool {
        self.as_doc_ref().is_empty()
    }

    pub fn iter(&self) -> ElementIter<'_> {
        self.as_doc_ref().iter()
    }

    pub fn n_fields(&self) -> usize {
        self.as_doc_ref().n_fields()
    }

    pub fn get(&self, name: &str) -> Option<RawElement<'_>> {
        self.as_doc_ref().get(name)
    }

    /// Tag of the named field, if present.
    pub fn field_tag(&self, name: &str) -> Option<TypeTag> {
        self.get(name).map(|e| e.tag())
    }
}

impl Default for Document {
    fn default() -> Self {
        Document::empty()
    }
}

impl fmt::Display for Document {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        fmt::Display::fmt(&self.as_doc_ref(), f)
    }
}

impl<'a> IntoIterator for &'a Document {
    type Item = RawElement<'a>;
    type IntoIter = ElementIter<'a>;
    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl AsRef<[u8]> for Document {
    fn as_ref(&self) -> &[u8] {
        &self.buf
    }
}
