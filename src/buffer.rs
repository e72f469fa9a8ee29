//! The growable byte store underneath every builder.

use byteorder::{ByteOrder, LittleEndian};

/// Append-only byte buffer with raw read access.
///
/// Everything written is little-endian. The only in-place mutation allowed is patching a 4-byte
/// length prefix that was reserved earlier.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct BufBuilder {
    buf: Vec<u8>,
}

impl BufBuilder {
    pub fn new() -> Self {
        Self { buf: Vec::new() }
    }

    pub fn with_capacity(cap: usize) -> Self {
        Self {
            buf: Vec::with_capacity(cap),
        }
    }

    /// Wrap an existing vector. New content lands after whatever it already holds.
    pub fn from_vec(buf: Vec<u8>) -> Self {
        Self { buf }
    }

    pub fn len(&self) -> usize {
        self.buf.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.buf
    }

    /// Read back a range of bytes already appended.
    pub fn range(&self, start: usize, end: usize) -> &[u8] {
        &self.buf[start..end]
    }

    pub fn append_raw(&mut self, bytes: &[u8]) {
        self.buf.extend_from_slice(bytes);
    }

    pub fn append_u8(&mut self, v: u8) {
        self.buf.push(v);
    }

    pub fn append_i32(&mut self, v: i32) {
        self.buf.extend_from_slice(&v.to_le_bytes());
    }

    pub fn append_i64(&mut self, v: i64) {
        self.buf.extend_from_slice(&v.to_le_bytes());
    }

    pub fn append_f64(&mut self, v: f64) {
        self.buf.extend_from_slice(&v.to_bits().to_le_bytes());
    }

    /// Append the bytes followed by a NUL. The caller guarantees there is no interior NUL.
    pub fn append_cstr(&mut self, s: &str) {
        self.buf.extend_from_slice(s.as_bytes());
        self.buf.push(0);
    }

    /// Append a length-prefixed string: the i32 length counts the trailing NUL.
    pub fn append_str(&mut self, s: &str) {
        self.append_i32((s.len() + 1) as i32);
        self.append_cstr(s);
    }

    /// Reserve a 4-byte length slot and return its position.
    pub fn reserve_len(&mut self) -> usize {
        let pos = self.buf.len();
        self.buf.extend_from_slice(&[0u8; 4]);
        pos
    }

    /// Patch the 4-byte length slot at `pos` with the byte count from `pos` to the current end.
    pub fn patch_len(&mut self, pos: usize) {
        let len = (self.buf.len() - pos) as i32;
        LittleEndian::write_i32(&mut self.buf[pos..pos + 4], len);
    }

    /// Drop everything from `len` onward. Only used to roll back a failed nested build.
    pub(crate) fn truncate(&mut self, len: usize) {
        self.buf.truncate(len);
    }

    pub fn into_vec(self) -> Vec<u8> {
        self.buf
    }
}
