//! Operations that work directly on encoded bytes: merging whole documents, merging without
//! duplicate names, rekeying values by position, and looking back over what a builder has
//! written so far.

use std::collections::HashSet;

use crate::{
    builder::DocBuilder,
    document::DocRef,
    element::{ElementIter, RawElement},
    error::{Error, Result},
};

impl DocBuilder {
    /// Append every top-level element of `other`. The element bytes are copied in one block; no
    /// element is decoded. Fails without appending anything if the result would be too large.
    pub fn append_elements(&mut self, other: DocRef<'_>) -> Result<&mut Self> {
        if !other.is_empty() {
            self.check_room(other.interior().len())?;
            self.buf_mut().append_raw(other.interior());
        }
        Ok(self)
    }

    /// Append the elements of `other` whose names are not already in this builder. Names are
    /// collected once, before anything is appended, so duplicate names within `other` are all
    /// kept. Existing fields are never rewritten. Fails without appending anything if the result
    /// would be too large.
    pub fn append_elements_unique(&mut self, other: DocRef<'_>) -> Result<&mut Self> {
        let have: HashSet<&str> = self.iter().map(|e| e.field_name()).collect();
        let fresh: Vec<RawElement<'_>> = other
            .iter()
            .filter(|e| !have.contains(e.field_name()))
            .collect();
        self.check_room(fresh.iter().map(|e| e.size()).sum())?;
        for elem in fresh {
            self.append_element(&elem)?;
        }
        Ok(self)
    }

    /// Append the values of `values` renamed, by position, to the field names of `pattern`.
    ///
    /// Both documents must have the same number of elements. If they don't, nothing is appended
    /// and [`Error::KeyCountMismatch`] is returned; callers should treat it as a bug.
    pub fn append_keys(&mut self, pattern: DocRef<'_>, values: DocRef<'_>) -> Result<&mut Self> {
        let (n_pattern, n_values) = (pattern.n_fields(), values.n_fields());
        if n_pattern != n_values {
            tracing::error!(
                pattern = n_pattern,
                values = n_values,
                "key pattern and values have different field counts"
            );
            return Err(Error::KeyCountMismatch {
                pattern: n_pattern,
                values: n_values,
            });
        }
        for (key, val) in pattern.iter().zip(values.iter()) {
            self.append_as(&val, key.field_name())?;
        }
        Ok(self)
    }

    /// True if an element with exactly this name has already been appended.
    pub fn has_field(&self, name: &str) -> bool {
        self.iter().any(|e| e.field_name() == name)
    }

    /// Iterate over the elements appended so far. The builder stays borrowed for as long as the
    /// iterator lives, so it always sees a fixed snapshot.
    pub fn iter(&self) -> ElementIter<'_> {
        ElementIter::new(self.content())
    }
}
