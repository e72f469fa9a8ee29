//! Minimum and maximum sentinel values for each type, for building index scan bounds.
//!
//! `append_max_for_type(t)` writes exactly the bytes `append_min_for_type` writes for the type
//! after `t` whenever the canonical order chains them, so the ranges for adjacent types meet
//! without a gap.

use crate::{
    builder::DocBuilder,
    document::DocRef,
    error::{Error, Result, MAX_FOR_TYPE_CODE, MIN_FOR_TYPE_CODE},
    object_id::ObjectId,
    order::{max_sentinel, min_sentinel, Sentinel},
    tag::{BinarySubtype, TypeTag},
    timestamp::Timestamp,
};

impl DocBuilder {
    /// Append a single sentinel value.
    pub fn append_sentinel(&mut self, name: &str, sentinel: Sentinel) -> Result<&mut Self> {
        match sentinel {
            Sentinel::MinKey => self.append_min_key(name),
            Sentinel::MaxKey => self.append_max_key(name),
            Sentinel::Undefined => self.append_undefined(name),
            Sentinel::Null => self.append_null(name),
            Sentinel::LowestDouble => self.append_f64(name, -f64::MAX),
            Sentinel::HighestDouble => self.append_f64(name, f64::MAX),
            Sentinel::EmptyString => self.append_str(name, ""),
            Sentinel::EmptyObject => self.append_document(name, DocRef::empty()),
            Sentinel::EmptyArray => self.append_array(name, DocRef::empty()),
            Sentinel::EmptyBinary => self.append_binary(name, BinarySubtype::General, &[]),
            Sentinel::ZeroObjectId => self.append_object_id(name, &ObjectId::zero()),
            Sentinel::MaxObjectId => self.append_object_id(name, &ObjectId::max()),
            Sentinel::Bool(v) => self.append_bool(name, v),
            Sentinel::MaxDate => self.append_date(name, i64::MAX),
            Sentinel::ZeroTimestamp => self.append_timestamp(name, Timestamp::min_value()),
            Sentinel::MaxTimestamp => self.append_timestamp(name, Timestamp::max_value()),
            Sentinel::EmptyRegex => self.append_regex(name, "", ""),
            Sentinel::EmptyDbRef => self.append_dbref(name, "", &ObjectId::zero()),
            Sentinel::EmptyCode => self.append_code(name, ""),
            Sentinel::EmptyCodeWScope => self.append_code_w_scope(name, "", DocRef::empty()),
        }
    }

    /// Append the smallest value of type `tag` in the canonical order.
    ///
    /// Fails with [`Error::UnsupportedType`] if `tag` has no place in the order. That is a bug
    /// in the caller and the builder is left untouched.
    pub fn append_min_for_type(&mut self, name: &str, tag: TypeTag) -> Result<&mut Self> {
        match min_sentinel(tag) {
            Some(s) => self.append_sentinel(name, s),
            None => Err(unsupported("append_min_for_type", MIN_FOR_TYPE_CODE, tag)),
        }
    }

    /// Append the largest value of type `tag` in the canonical order. For types that chain to
    /// the next slot this is that slot's minimum.
    ///
    /// Fails with [`Error::UnsupportedType`] under the same conditions as
    /// [`append_min_for_type`](Self::append_min_for_type).
    pub fn append_max_for_type(&mut self, name: &str, tag: TypeTag) -> Result<&mut Self> {
        match max_sentinel(tag) {
            Some(s) => self.append_sentinel(name, s),
            None => Err(unsupported("append_max_for_type", MAX_FOR_TYPE_CODE, tag)),
        }
    }
}

fn unsupported(op: &'static str, code: u32, tag: TypeTag) -> Error {
    tracing::error!(code, tag = tag.name(), "type not supported for {}", op);
    Error::UnsupportedType { op, code, tag }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::value::ValueRef;
    use crate::Document;

    fn min_doc(tag: TypeTag) -> Document {
        let mut b = DocBuilder::new();
        b.append_min_for_type("f", tag).unwrap();
        b.done()
    }

    fn max_doc(tag: TypeTag) -> Document {
        let mut b = DocBuilder::new();
        b.append_max_for_type("f", tag).unwrap();
        b.done()
    }

    fn value_of(doc: &Document) -> ValueRef<'_> {
        doc.get("f").unwrap().value().unwrap()
    }

    #[test]
    fn supported_tags_parse() {
        for tag in TypeTag::ALL.iter().filter(|t| **t != TypeTag::Eoo) {
            let lo = Document::from_bytes(min_doc(*tag).into_vec());
            let hi = Document::from_bytes(max_doc(*tag).into_vec());
            assert!(lo.is_ok(), "min for {}", tag);
            assert!(hi.is_ok(), "max for {}", tag);
        }
    }

    #[test]
    fn numeric_bounds() {
        for tag in [TypeTag::Int32, TypeTag::Int64, TypeTag::Double] {
            assert_eq!(value_of(&min_doc(tag)), ValueRef::Double(-f64::MAX));
            assert_eq!(value_of(&max_doc(tag)), ValueRef::Double(f64::MAX));
        }
    }

    #[test]
    fn fixed_minimums() {
        assert_eq!(value_of(&min_doc(TypeTag::String)), ValueRef::String(""));
        assert_eq!(value_of(&min_doc(TypeTag::Symbol)), ValueRef::String(""));
        assert_eq!(value_of(&min_doc(TypeTag::Date)), ValueRef::Bool(true));
        assert_eq!(
            value_of(&min_doc(TypeTag::Timestamp)),
            ValueRef::Timestamp(Timestamp::new(0, 0))
        );
        assert_eq!(value_of(&min_doc(TypeTag::Undefined)), ValueRef::Undefined);
        assert_eq!(value_of(&min_doc(TypeTag::MinKey)), ValueRef::MinKey);
        assert_eq!(value_of(&min_doc(TypeTag::MaxKey)), ValueRef::MaxKey);
        assert_eq!(
            value_of(&min_doc(TypeTag::ObjectId)),
            ValueRef::ObjectId(ObjectId::zero())
        );
        assert_eq!(value_of(&min_doc(TypeTag::Bool)), ValueRef::Bool(false));
        assert_eq!(value_of(&min_doc(TypeTag::Null)), ValueRef::Null);
        assert!(value_of(&min_doc(TypeTag::Object)).as_document().unwrap().is_empty());
        assert!(value_of(&min_doc(TypeTag::Array)).as_array().unwrap().is_empty());
        assert_eq!(
            value_of(&min_doc(TypeTag::Binary)),
            ValueRef::Binary {
                subtype: BinarySubtype::General,
                bytes: &[]
            }
        );
        assert_eq!(
            value_of(&min_doc(TypeTag::Regex)),
            ValueRef::Regex {
                pattern: "",
                flags: ""
            }
        );
        assert_eq!(
            value_of(&min_doc(TypeTag::DbRef)),
            ValueRef::DbRef {
                ns: "",
                id: ObjectId::zero()
            }
        );
        assert_eq!(value_of(&min_doc(TypeTag::Code)), ValueRef::Code(""));
        match value_of(&min_doc(TypeTag::CodeWScope)) {
            ValueRef::CodeWScope { code, scope } => {
                assert_eq!(code, "");
                assert!(scope.is_empty());
            }
            other => panic!("expected code with scope, got {:?}", other),
        }
    }

    #[test]
    fn fixed_maximums() {
        assert_eq!(value_of(&max_doc(TypeTag::Date)), ValueRef::Date(i64::MAX));
        assert_eq!(
            value_of(&max_doc(TypeTag::Timestamp)),
            ValueRef::Timestamp(Timestamp::new(i32::MAX as u32, i32::MAX as u32))
        );
        assert_eq!(
            value_of(&max_doc(TypeTag::ObjectId)),
            ValueRef::ObjectId(ObjectId::max())
        );
        assert_eq!(value_of(&max_doc(TypeTag::Bool)), ValueRef::Bool(true));
        assert_eq!(value_of(&max_doc(TypeTag::Null)), ValueRef::Null);
        assert_eq!(value_of(&max_doc(TypeTag::Undefined)), ValueRef::Undefined);
        assert_eq!(value_of(&max_doc(TypeTag::MinKey)), ValueRef::MinKey);
        assert_eq!(value_of(&max_doc(TypeTag::MaxKey)), ValueRef::MaxKey);
    }

    #[test]
    fn max_is_min_of_successor() {
        let chain = [
            (TypeTag::String, TypeTag::Object),
            (TypeTag::Symbol, TypeTag::Object),
            (TypeTag::Object, TypeTag::Array),
            (TypeTag::Array, TypeTag::Binary),
            (TypeTag::Binary, TypeTag::ObjectId),
            (TypeTag::Regex, TypeTag::DbRef),
            (TypeTag::DbRef, TypeTag::Code),
            (TypeTag::Code, TypeTag::CodeWScope),
            (TypeTag::CodeWScope, TypeTag::MaxKey),
        ];
        for (tag, next) in chain {
            assert_eq!(
                max_doc(tag).as_bytes(),
                min_doc(next).as_bytes(),
                "max of {} should equal min of {}",
                tag,
                next
            );
        }
    }

    #[test]
    fn unsupported_tag() {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();
        let mut b = DocBuilder::new();
        let err = b.append_min_for_type("f", TypeTag::Eoo).unwrap_err();
        assert!(err.is_fatal());
        assert_eq!(
            err,
            Error::UnsupportedType {
                op: "append_min_for_type",
                code: 10061,
                tag: TypeTag::Eoo
            }
        );
        let err = b.append_max_for_type("f", TypeTag::Eoo).unwrap_err();
        assert!(matches!(err, Error::UnsupportedType { code: 14853, .. }));
        assert!(b.is_empty());
    }
}
