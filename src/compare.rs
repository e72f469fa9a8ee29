//! Comparison under the canonical cross-type order.
//!
//! Values compare by [`canonical_rank`] first. Within a rank, numbers compare numerically across
//! all three widths (NaN sorts lowest), strings and symbols bytewise, documents element by
//! element, and the remaining types by their natural orders.

use std::cmp::Ordering;

use crate::{
    document::DocRef,
    element::RawElement,
    error::Result,
    order::canonical_rank,
    value::ValueRef,
};

/// 2^63 as a double: the first double above every i64.
const I64_END: f64 = 9_223_372_036_854_775_808.0;

/// Compare an integer against a double that is not NaN, without rounding the integer.
fn compare_int_double(i: i64, d: f64) -> Ordering {
    if d >= I64_END {
        return Ordering::Less;
    }
    if d < -I64_END {
        return Ordering::Greater;
    }
    // In range, so the integral part converts exactly.
    let whole = d.trunc();
    match i.cmp(&(whole as i64)) {
        Ordering::Equal => 0.0f64.partial_cmp(&(d - whole)).unwrap_or(Ordering::Equal),
        ord => ord,
    }
}

fn compare_numbers(a: &ValueRef<'_>, b: &ValueRef<'_>) -> Ordering {
    match (a.as_i64(), b.as_i64()) {
        (Some(x), Some(y)) => return x.cmp(&y),
        (Some(x), None) => {
            let y = b.as_f64().unwrap_or(f64::NAN);
            return if y.is_nan() {
                Ordering::Greater
            } else {
                compare_int_double(x, y)
            };
        }
        (None, Some(y)) => {
            let x = a.as_f64().unwrap_or(f64::NAN);
            return if x.is_nan() {
                Ordering::Less
            } else {
                compare_int_double(y, x).reverse()
            };
        }
        (None, None) => (),
    }
    let x = a.as_f64().unwrap_or(f64::NAN);
    let y = b.as_f64().unwrap_or(f64::NAN);
    match (x.is_nan(), y.is_nan()) {
        (true, true) => Ordering::Equal,
        (true, false) => Ordering::Less,
        (false, true) => Ordering::Greater,
        (false, false) => x.partial_cmp(&y).unwrap_or(Ordering::Equal),
    }
}

/// Compare two values. Sub-documents are decoded as needed, which is where the error can come
/// from.
pub fn compare_values(a: &ValueRef<'_>, b: &ValueRef<'_>) -> Result<Ordering> {
    let rank = canonical_rank(a.tag()).cmp(&canonical_rank(b.tag()));
    if rank != Ordering::Equal {
        return Ok(rank);
    }
    use self::ValueRef::*;
    Ok(match (*a, *b) {
        _ if a.is_number() => compare_numbers(a, b),
        (String(x) | Symbol(x), String(y) | Symbol(y)) => x.as_bytes().cmp(y.as_bytes()),
        (Object(x), Object(y)) | (Array(x), Array(y)) => compare_docs(x, y)?,
        (
            Binary {
                subtype: sx,
                bytes: x,
            },
            Binary {
                subtype: sy,
                bytes: y,
            },
        ) => x
            .len()
            .cmp(&y.len())
            .then(sx.into_u8().cmp(&sy.into_u8()))
            .then_with(|| x.cmp(y)),
        (ObjectId(x), ObjectId(y)) => x.cmp(&y),
        (Bool(x), Bool(y)) => x.cmp(&y),
        (Date(x), Date(y)) => x.cmp(&y),
        (Timestamp(x), Timestamp(y)) => x.cmp(&y),
        (
            Regex {
                pattern: px,
                flags: fx,
            },
            Regex {
                pattern: py,
                flags: fy,
            },
        ) => px
            .as_bytes()
            .cmp(py.as_bytes())
            .then_with(|| fx.as_bytes().cmp(fy.as_bytes())),
        (DbRef { ns: nx, id: ix }, DbRef { ns: ny, id: iy }) => nx
            .len()
            .cmp(&ny.len())
            .then_with(|| nx.as_bytes().cmp(ny.as_bytes()))
            .then(ix.cmp(&iy)),
        (Code(x), Code(y)) => x.as_bytes().cmp(y.as_bytes()),
        (
            CodeWScope {
                code: cx,
                scope: sx,
            },
            CodeWScope {
                code: cy,
                scope: sy,
            },
        ) => match cx.as_bytes().cmp(cy.as_bytes()) {
            Ordering::Equal => compare_docs(sx, sy)?,
            ord => ord,
        },
        // Singleton kinds: MinKey, MaxKey, Null, Undefined.
        _ => Ordering::Equal,
    })
}

/// Compare two elements by rank, then name, then value.
pub fn compare_elements(a: &RawElement<'_>, b: &RawElement<'_>) -> Result<Ordering> {
    let rank = canonical_rank(a.tag()).cmp(&canonical_rank(b.tag()));
    if rank != Ordering::Equal {
        return Ok(rank);
    }
    let name = a.field_name().as_bytes().cmp(b.field_name().as_bytes());
    if name != Ordering::Equal {
        return Ok(name);
    }
    compare_values(&a.value()?, &b.value()?)
}

/// Compare documents element by element. A document that is a prefix of the other sorts first.
pub fn compare_docs(a: DocRef<'_>, b: DocRef<'_>) -> Result<Ordering> {
    let mut ia = a.iter();
    let mut ib = b.iter();
    loop {
        match (ia.next(), ib.next()) {
            (None, None) => return Ok(Ordering::Equal),
            (None, Some(_)) => return Ok(Ordering::Less),
            (Some(_), None) => return Ok(Ordering::Greater),
            (Some(x), Some(y)) => match compare_elements(&x, &y)? {
                Ordering::Equal => (),
                ord => return Ok(ord),
            },
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::{
        builder::DocBuilder,
        object_id::ObjectId,
        tag::{BinarySubtype, TypeTag},
        timestamp::Timestamp,
        Document,
    };

    fn one<F>(f: F) -> Document
    where
        F: FnOnce(&mut DocBuilder) -> Result<()>,
    {
        let mut b = DocBuilder::new();
        f(&mut b).unwrap();
        b.done()
    }

    fn cmp(a: &Document, b: &Document) -> Ordering {
        let x = a.iter().next().unwrap().value().unwrap();
        let y = b.iter().next().unwrap().value().unwrap();
        compare_values(&x, &y).unwrap()
    }

    /// Legal values of each bounded type, one document per value, field "f".
    fn samples(tag: TypeTag) -> Vec<Document> {
        let id: ObjectId = "507f1f77bcf86cd799439011".parse().unwrap();
        let inner = one(|b| {
            b.append_i32("a", 1)?;
            Ok(())
        });
        let mut out = Vec::new();
        match tag {
            TypeTag::Double | TypeTag::Int32 | TypeTag::Int64 => {
                for v in [-1e300, -1.5, 0.0, 7.25, 1e300] {
                    out.push(one(|b| {
                        b.append_f64("f", v)?;
                        Ok(())
                    }));
                }
                for v in [i32::MIN, 0, i32::MAX] {
                    out.push(one(|b| {
                        b.append_i32("f", v)?;
                        Ok(())
                    }));
                }
                for v in [i64::MIN, i64::MAX] {
                    out.push(one(|b| {
                        b.append_i64("f", v)?;
                        Ok(())
                    }));
                }
            }
            TypeTag::String | TypeTag::Symbol => {
                for s in ["a", "zzz", "\u{10ffff}"] {
                    out.push(one(|b| {
                        b.append_str("f", s)?.append_symbol("g", s)?;
                        Ok(())
                    }));
                }
            }
            TypeTag::Object => out.push(one(|b| {
                b.append_document("f", inner.as_doc_ref())?;
                Ok(())
            })),
            TypeTag::Array => out.push(one(|b| {
                b.append_array("f", inner.as_doc_ref())?;
                Ok(())
            })),
            TypeTag::Binary => out.push(one(|b| {
                b.append_binary("f", BinarySubtype::Uuid, &[0xff; 16])?;
                Ok(())
            })),
            TypeTag::ObjectId => out.push(one(|b| {
                b.append_object_id("f", &id)?;
                Ok(())
            })),
            TypeTag::Bool => out.push(one(|b| {
                b.append_bool("f", true)?;
                Ok(())
            })),
            TypeTag::Date => {
                for v in [i64::MIN, 0, 1_700_000_000_000] {
                    out.push(one(|b| {
                        b.append_date("f", v)?;
                        Ok(())
                    }));
                }
            }
            TypeTag::Timestamp => out.push(one(|b| {
                b.append_timestamp("f", Timestamp::new(1_700_000_000, 4))?;
                Ok(())
            })),
            TypeTag::Regex => out.push(one(|b| {
                b.append_regex("f", "^a.*", "im")?;
                Ok(())
            })),
            TypeTag::DbRef => out.push(one(|b| {
                b.append_dbref("f", "db.coll", &id)?;
                Ok(())
            })),
            TypeTag::Code => out.push(one(|b| {
                b.append_code("f", "function() {}")?;
                Ok(())
            })),
            TypeTag::CodeWScope => out.push(one(|b| {
                b.append_code_w_scope("f", "x", inner.as_doc_ref())?;
                Ok(())
            })),
            TypeTag::Null => out.push(one(|b| {
                b.append_null("f")?;
                Ok(())
            })),
            TypeTag::Undefined => out.push(one(|b| {
                b.append_undefined("f")?;
                Ok(())
            })),
            TypeTag::MinKey => out.push(one(|b| {
                b.append_min_key("f")?;
                Ok(())
            })),
            TypeTag::MaxKey => out.push(one(|b| {
                b.append_max_key("f")?;
                Ok(())
            })),
            TypeTag::Eoo => (),
        }
        out
    }

    #[test]
    fn bounds_enclose_samples() {
        for tag in TypeTag::ALL.iter().copied().filter(|t| *t != TypeTag::Eoo) {
            let lo = one(|b| {
                b.append_min_for_type("f", tag)?;
                Ok(())
            });
            let hi = one(|b| {
                b.append_max_for_type("f", tag)?;
                Ok(())
            });
            for v in samples(tag) {
                assert_ne!(cmp(&lo, &v), Ordering::Greater, "min of {} vs {}", tag, v);
                assert_ne!(cmp(&hi, &v), Ordering::Less, "max of {} vs {}", tag, v);
            }
        }
    }

    #[test]
    fn bounds_strict_where_chained() {
        let strict = [
            TypeTag::String,
            TypeTag::Object,
            TypeTag::Array,
            TypeTag::Binary,
            TypeTag::ObjectId,
            TypeTag::Date,
            TypeTag::Regex,
            TypeTag::DbRef,
            TypeTag::Code,
            TypeTag::CodeWScope,
        ];
        for tag in strict {
            let lo = one(|b| {
                b.append_min_for_type("f", tag)?;
                Ok(())
            });
            let hi = one(|b| {
                b.append_max_for_type("f", tag)?;
                Ok(())
            });
            for v in samples(tag) {
                assert_eq!(cmp(&lo, &v), Ordering::Less, "min of {} vs {}", tag, v);
                assert_eq!(cmp(&hi, &v), Ordering::Greater, "max of {} vs {}", tag, v);
            }
        }
    }

    #[test]
    fn numbers_across_widths() {
        let a = one(|b| {
            b.append_i32("f", 3)?;
            Ok(())
        });
        let c = one(|b| {
            b.append_i64("f", 3)?;
            Ok(())
        });
        let d = one(|b| {
            b.append_f64("f", 3.5)?;
            Ok(())
        });
        let nan = one(|b| {
            b.append_f64("f", f64::NAN)?;
            Ok(())
        });
        assert_eq!(cmp(&a, &c), Ordering::Equal);
        assert_eq!(cmp(&a, &d), Ordering::Less);
        assert_eq!(cmp(&nan, &a), Ordering::Less);
        assert_eq!(cmp(&nan, &nan), Ordering::Equal);
    }

    #[test]
    fn large_integers_against_doubles() {
        let cmp_num = |a: ValueRef<'static>, b: ValueRef<'static>| compare_values(&a, &b).unwrap();
        let two_53 = 9_007_199_254_740_992i64;
        assert_eq!(
            cmp_num(ValueRef::Int64(i64::MAX), ValueRef::Double(9_223_372_036_854_775_808.0)),
            Ordering::Less
        );
        assert_eq!(
            cmp_num(ValueRef::Int64(two_53 + 1), ValueRef::Double(two_53 as f64)),
            Ordering::Greater
        );
        assert_eq!(
            cmp_num(ValueRef::Double(two_53 as f64), ValueRef::Int64(two_53 + 1)),
            Ordering::Less
        );
        assert_eq!(
            cmp_num(ValueRef::Int64(two_53), ValueRef::Double(two_53 as f64)),
            Ordering::Equal
        );
        assert_eq!(
            cmp_num(ValueRef::Int64(i64::MIN), ValueRef::Double(-9_223_372_036_854_775_808.0)),
            Ordering::Equal
        );
        assert_eq!(
            cmp_num(ValueRef::Int64(i64::MIN), ValueRef::Double(f64::NEG_INFINITY)),
            Ordering::Greater
        );
        assert_eq!(
            cmp_num(ValueRef::Int32(-2), ValueRef::Double(-1.5)),
            Ordering::Less
        );
        assert_eq!(
            cmp_num(ValueRef::Int32(-1), ValueRef::Double(-1.5)),
            Ordering::Greater
        );
        assert_eq!(
            cmp_num(ValueRef::Int32(1), ValueRef::Double(1.25)),
            Ordering::Less
        );
        assert_eq!(
            cmp_num(ValueRef::Int64(0), ValueRef::Double(f64::NAN)),
            Ordering::Greater
        );
    }

    #[test]
    fn cross_type_rank() {
        let n = one(|b| {
            b.append_null("f")?;
            Ok(())
        });
        let s = one(|b| {
            b.append_str("f", "")?;
            Ok(())
        });
        let big = one(|b| {
            b.append_f64("f", f64::INFINITY)?;
            Ok(())
        });
        assert_eq!(cmp(&n, &big), Ordering::Less);
        assert_eq!(cmp(&big, &s), Ordering::Less);
    }

    #[test]
    fn documents_by_element() {
        let a = one(|b| {
            b.append_i32("x", 1)?;
            Ok(())
        });
        let ab = one(|b| {
            b.append_i32("x", 1)?.append_i32("y", 0)?;
            Ok(())
        });
        let b2 = one(|b| {
            b.append_i32("x", 2)?;
            Ok(())
        });
        let named = one(|b| {
            b.append_i32("w", 9)?;
            Ok(())
        });
        assert_eq!(compare_docs(a.as_doc_ref(), ab.as_doc_ref()).unwrap(), Ordering::Less);
        assert_eq!(compare_docs(ab.as_doc_ref(), b2.as_doc_ref()).unwrap(), Ordering::Less);
        assert_eq!(compare_docs(named.as_doc_ref(), a.as_doc_ref()).unwrap(), Ordering::Less);
        assert_eq!(compare_docs(a.as_doc_ref(), a.as_doc_ref()).unwrap(), Ordering::Equal);
    }
}
