//! Arrays are documents whose field names are the element indices in decimal.

use std::borrow::Cow;

use crate::{
    builder::DocBuilder,
    document::{DocRef, Document},
    error::Result,
    num_strs::num_str,
    tag::TypeTag,
};

/// Field name for array index `i`. Small indices come from the shared table.
pub fn index_name(i: usize) -> Cow<'static, str> {
    match num_str(i) {
        Some(s) => Cow::Borrowed(s),
        None => Cow::Owned(i.to_string()),
    }
}

/// Builds an array document, naming each pushed element after its position.
#[derive(Clone, Debug, Default)]
pub struct ArrayBuilder {
    inner: DocBuilder,
    next: usize,
}

impl ArrayBuilder {
    pub fn new() -> Self {
        Self {
            inner: DocBuilder::new(),
            next: 0,
        }
    }

    fn wrap(inner: DocBuilder) -> Self {
        Self { inner, next: 0 }
    }

    /// Number of elements pushed so far.
    pub fn len(&self) -> usize {
        self.next
    }

    pub fn is_empty(&self) -> bool {
        self.next == 0
    }

    /// Reserve the next index and return its field name.
    fn next_name(&mut self) -> Cow<'static, str> {
        let name = index_name(self.next);
        self.next += 1;
        name
    }

    /// Push one element through any [`DocBuilder`] append method. The closure receives the
    /// builder and the field name to use.
    pub fn push_with<F>(&mut self, f: F) -> Result<&mut Self>
    where
        F: FnOnce(&mut DocBuilder, &str) -> Result<()>,
    {
        let name = index_name(self.next);
        f(&mut self.inner, &name)?;
        self.next += 1;
        Ok(self)
    }

    pub fn push_i32(&mut self, v: i32) -> Result<&mut Self> {
        let name = self.next_name();
        self.inner.append_i32(&name, v)?;
        Ok(self)
    }

    pub fn push_i64(&mut self, v: i64) -> Result<&mut Self> {
        let name = self.next_name();
        self.inner.append_i64(&name, v)?;
        Ok(self)
    }

    pub fn push_f64(&mut self, v: f64) -> Result<&mut Self> {
        let name = self.next_name();
        self.inner.append_f64(&name, v)?;
        Ok(self)
    }

    pub fn push_str(&mut self, v: &str) -> Result<&mut Self> {
        let name = self.next_name();
        self.inner.append_str(&name, v)?;
        Ok(self)
    }

    pub fn push_null(&mut self) -> Result<&mut Self> {
        let name = self.next_name();
        self.inner.append_null(&name)?;
        Ok(self)
    }

    pub fn push_document(&mut self, doc: DocRef<'_>) -> Result<&mut Self> {
        let name = self.next_name();
        self.inner.append_document(&name, doc)?;
        Ok(self)
    }

    pub fn done(self) -> Document {
        self.inner.done()
    }
}

impl DocBuilder {
    /// Build an array field in place, element names assigned by position.
    pub fn append_array_with<F>(&mut self, name: &str, f: F) -> Result<&mut Self>
    where
        F: FnOnce(&mut ArrayBuilder) -> Result<()>,
    {
        self.nested(TypeTag::Array, name, |sub| {
            let mut arr = ArrayBuilder::wrap(std::mem::take(sub));
            let res = f(&mut arr);
            *sub = arr.inner;
            res
        })
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn names_follow_positions() {
        let mut arr = ArrayBuilder::new();
        arr.push_i32(10).unwrap().push_str("b").unwrap().push_null().unwrap();
        assert_eq!(arr.len(), 3);
        let doc = arr.done();
        let names: Vec<_> = doc.iter().map(|e| e.field_name()).collect();
        assert_eq!(names, ["0", "1", "2"]);
    }

    #[test]
    fn past_the_cache() {
        assert_eq!(index_name(5), Cow::Borrowed("5"));
        assert!(matches!(index_name(5), Cow::Borrowed(_)));
        assert!(matches!(index_name(5000), Cow::Owned(_)));

        let mut arr = ArrayBuilder::new();
        for i in 0..1030 {
            arr.push_i64(i).unwrap();
        }
        let doc = arr.done();
        assert_eq!(doc.n_fields(), 1030);
        assert_eq!(doc.get("1029").unwrap().value().unwrap().as_i64(), Some(1029));
    }

    #[test]
    fn nested_array_field() {
        let mut b = DocBuilder::new();
        b.append_array_with("xs", |arr| {
            arr.push_f64(1.5)?.push_with(|b, name| {
                b.append_bool(name, true)?;
                Ok(())
            })?;
            Ok(())
        })
        .unwrap();
        let doc = crate::Document::from_bytes(b.done().into_vec()).unwrap();
        let xs = doc.get("xs").unwrap().value().unwrap().as_array().unwrap();
        assert_eq!(xs.n_fields(), 2);
        assert_eq!(xs.get("1").unwrap().value().unwrap().as_bool(), Some(true));
        assert_eq!(doc.to_string(), "{ xs: [1.5, true] }");
    }
}
