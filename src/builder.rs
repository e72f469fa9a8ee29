//! Incremental document construction.
//!
//! A [`DocBuilder`] owns a buffer and remembers the offset where its document starts. Elements are
//! appended one at a time; [`DocBuilder::done`] writes the length prefix and terminator and hands
//! back the finished [`Document`]. Finishing consumes the builder, so nothing can be appended to a
//! completed document.
//!
//! An append that would take the finished document past [`MAX_DOC_SIZE`] fails with
//! [`Error::LengthTooLong`] and leaves the builder as it was.

use crate::{
    buffer::BufBuilder,
    document::{DocRef, Document},
    element::RawElement,
    error::{Error, Result},
    object_id::ObjectId,
    tag::{BinarySubtype, TypeTag},
    timestamp::Timestamp,
    MAX_DOC_SIZE,
};

use once_cell::sync::OnceCell;

const EMPTY_DOC_LEN: usize = 5;

/// Encoded size of a length-prefixed string.
fn str_size(s: &str) -> usize {
    s.len().saturating_add(5)
}

fn check_cstr(s: &str) -> Result<()> {
    if bytecount::count(s.as_bytes(), 0) != 0 {
        Err(Error::BadFieldName(s.to_string()))
    } else {
        Ok(())
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct DocBuilder {
    buf: BufBuilder,
    offset: usize,
}

impl Default for DocBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl DocBuilder {
    pub fn new() -> Self {
        Self::with_buffer(BufBuilder::with_capacity(64))
    }

    /// Start a document at the current end of `buf`. Whatever the buffer already holds is left
    /// alone and is not part of this document.
    pub fn with_buffer(mut buf: BufBuilder) -> Self {
        let offset = buf.reserve_len();
        Self { buf, offset }
    }

    /// Byte position in the buffer where this document starts.
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// Bytes written for this document so far, including the reserved length prefix.
    pub fn len(&self) -> usize {
        self.buf.len() - self.offset
    }

    /// True if no element has been appended yet.
    pub fn is_empty(&self) -> bool {
        self.len() == 4
    }

    /// The elements written so far.
    pub(crate) fn content(&self) -> &[u8] {
        self.buf.range(self.offset + 4, self.buf.len())
    }

    pub(crate) fn buf_mut(&mut self) -> &mut BufBuilder {
        &mut self.buf
    }

    /// Fail if `extra` more bytes would push the finished document past [`MAX_DOC_SIZE`]. The
    /// terminator is counted.
    pub(crate) fn check_room(&self, extra: usize) -> Result<()> {
        let total = self.len().saturating_add(extra).saturating_add(1);
        if total > MAX_DOC_SIZE {
            return Err(Error::LengthTooLong {
                max: MAX_DOC_SIZE,
                actual: total,
            });
        }
        Ok(())
    }

    /// Write a tag byte and field name, after checking there is room for them and a payload of
    /// `payload` bytes. Nothing is written on failure.
    fn field(&mut self, tag: TypeTag, name: &str, payload: usize) -> Result<()> {
        check_cstr(name)?;
        self.check_room((name.len() + 2).saturating_add(payload))?;
        self.buf.append_u8(tag.into());
        self.buf.append_cstr(name);
        Ok(())
    }

    pub fn append_f64(&mut self, name: &str, v: f64) -> Result<&mut Self> {
        self.field(TypeTag::Double, name, 8)?;
        self.buf.append_f64(v);
        Ok(self)
    }

    pub fn append_i32(&mut self, name: &str, v: i32) -> Result<&mut Self> {
        self.field(TypeTag::Int32, name, 4)?;
        self.buf.append_i32(v);
        Ok(self)
    }

    pub fn append_i64(&mut self, name: &str, v: i64) -> Result<&mut Self> {
        self.field(TypeTag::Int64, name, 8)?;
        self.buf.append_i64(v);
        Ok(self)
    }

    pub fn append_str(&mut self, name: &str, v: &str) -> Result<&mut Self> {
        self.field(TypeTag::String, name, str_size(v))?;
        self.buf.append_str(v);
        Ok(self)
    }

    pub fn append_symbol(&mut self, name: &str, v: &str) -> Result<&mut Self> {
        self.field(TypeTag::Symbol, name, str_size(v))?;
        self.buf.append_str(v);
        Ok(self)
    }

    pub fn append_code(&mut self, name: &str, code: &str) -> Result<&mut Self> {
        self.field(TypeTag::Code, name, str_size(code))?;
        self.buf.append_str(code);
        Ok(self)
    }

    pub fn append_code_w_scope(
        &mut self,
        name: &str,
        code: &str,
        scope: DocRef<'_>,
    ) -> Result<&mut Self> {
        let total = (4 + str_size(code)).saturating_add(scope.len());
        self.field(TypeTag::CodeWScope, name, total)?;
        self.buf.append_i32(total as i32);
        self.buf.append_str(code);
        self.buf.append_raw(scope.as_bytes());
        Ok(self)
    }

    pub fn append_document(&mut self, name: &str, doc: DocRef<'_>) -> Result<&mut Self> {
        self.field(TypeTag::Object, name, doc.len())?;
        self.buf.append_raw(doc.as_bytes());
        Ok(self)
    }

    /// Append an already-encoded array. The field names inside `arr` are taken as-is.
    pub fn append_array(&mut self, name: &str, arr: DocRef<'_>) -> Result<&mut Self> {
        self.field(TypeTag::Array, name, arr.len())?;
        self.buf.append_raw(arr.as_bytes());
        Ok(self)
    }

    pub fn append_binary(
        &mut self,
        name: &str,
        subtype: BinarySubtype,
        bytes: &[u8],
    ) -> Result<&mut Self> {
        self.field(TypeTag::Binary, name, 5usize.saturating_add(bytes.len()))?;
        self.buf.append_i32(bytes.len() as i32);
        self.buf.append_u8(subtype.into());
        self.buf.append_raw(bytes);
        Ok(self)
    }

    pub fn append_undefined(&mut self, name: &str) -> Result<&mut Self> {
        self.field(TypeTag::Undefined, name, 0)?;
        Ok(self)
    }

    pub fn append_null(&mut self, name: &str) -> Result<&mut Self> {
        self.field(TypeTag::Null, name, 0)?;
        Ok(self)
    }

    pub fn append_min_key(&mut self, name: &str) -> Result<&mut Self> {
        self.field(TypeTag::MinKey, name, 0)?;
        Ok(self)
    }

    pub fn append_max_key(&mut self, name: &str) -> Result<&mut Self> {
        self.field(TypeTag::MaxKey, name, 0)?;
        Ok(self)
    }

    pub fn append_object_id(&mut self, name: &str, id: &ObjectId) -> Result<&mut Self> {
        self.field(TypeTag::ObjectId, name, ObjectId::SIZE)?;
        self.buf.append_raw(id.bytes());
        Ok(self)
    }

    pub fn append_bool(&mut self, name: &str, v: bool) -> Result<&mut Self> {
        self.field(TypeTag::Bool, name, 1)?;
        self.buf.append_u8(v as u8);
        Ok(self)
    }

    /// Append a date given as milliseconds since the Unix epoch.
    pub fn append_date(&mut self, name: &str, millis: i64) -> Result<&mut Self> {
        if cfg!(debug_assertions) && millis > 0 && millis <= 0xffff_ffff {
            static TINY_DATE: OnceCell<()> = OnceCell::new();
            TINY_DATE.get_or_init(|| {
                tracing::warn!(
                    field = name,
                    millis,
                    "append_date called with a tiny but nonzero date, possibly seconds instead of milliseconds"
                )
            });
        }
        self.field(TypeTag::Date, name, 8)?;
        self.buf.append_i64(millis);
        Ok(self)
    }

    pub fn append_timestamp(&mut self, name: &str, ts: Timestamp) -> Result<&mut Self> {
        self.field(TypeTag::Timestamp, name, Timestamp::SIZE)?;
        self.buf.append_raw(&ts.as_u64().to_le_bytes());
        Ok(self)
    }

    pub fn append_regex(&mut self, name: &str, pattern: &str, flags: &str) -> Result<&mut Self> {
        check_cstr(pattern)?;
        check_cstr(flags)?;
        self.field(TypeTag::Regex, name, pattern.len() + flags.len() + 2)?;
        self.buf.append_cstr(pattern);
        self.buf.append_cstr(flags);
        Ok(self)
    }

    pub fn append_dbref(&mut self, name: &str, ns: &str, id: &ObjectId) -> Result<&mut Self> {
        self.field(TypeTag::DbRef, name, str_size(ns) + ObjectId::SIZE)?;
        self.buf.append_str(ns);
        self.buf.append_raw(id.bytes());
        Ok(self)
    }

    /// Copy an element, keeping its name.
    pub fn append_element(&mut self, elem: &RawElement<'_>) -> Result<&mut Self> {
        self.check_room(elem.size())?;
        self.buf.append_raw(elem.raw());
        Ok(self)
    }

    /// Copy an element's value under a different name.
    pub fn append_as(&mut self, elem: &RawElement<'_>, name: &str) -> Result<&mut Self> {
        self.field(elem.tag(), name, elem.payload().len())?;
        self.buf.append_raw(elem.payload());
        Ok(self)
    }

    /// Build a sub-document in place. The closure gets a builder that writes into this builder's
    /// buffer; if it fails, the partial field is rolled back and the error returned.
    pub fn append_document_with<F>(&mut self, name: &str, f: F) -> Result<&mut Self>
    where
        F: FnOnce(&mut DocBuilder) -> Result<()>,
    {
        self.nested(TypeTag::Object, name, f)
    }

    pub(crate) fn nested<F>(&mut self, tag: TypeTag, name: &str, f: F) -> Result<&mut Self>
    where
        F: FnOnce(&mut DocBuilder) -> Result<()>,
    {
        let start = self.buf.len();
        self.field(tag, name, EMPTY_DOC_LEN)?;
        let mut sub = DocBuilder::with_buffer(std::mem::take(&mut self.buf));
        let res = f(&mut sub);
        self.buf = sub.finish_in_place();
        // The child only checks its own size, so the parent total is checked here.
        let res = res.and_then(|()| self.check_room(0));
        if let Err(e) = res {
            self.buf.truncate(start);
            return Err(e);
        }
        Ok(self)
    }

    /// Append the terminator and patch the length prefix, returning the whole buffer.
    fn finish_in_place(mut self) -> BufBuilder {
        self.buf.append_u8(0);
        self.buf.patch_len(self.offset);
        self.buf
    }

    /// Finish the document. If the buffer held other bytes before this document started, only
    /// this document's bytes are returned.
    pub fn done(self) -> Document {
        let offset = self.offset;
        let buf = self.finish_in_place();
        if offset == 0 {
            Document::from_builder(buf.into_vec())
        } else {
            Document::from_builder(buf.as_bytes()[offset..].to_vec())
        }
    }

    /// Finish the document and return the underlying buffer, including anything that preceded
    /// the document.
    pub fn into_buffer(self) -> BufBuilder {
        self.finish_in_place()
    }
}
