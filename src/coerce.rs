//! Best-effort conversion of free-form text into numeric fields.

use crate::{builder::DocBuilder, SHORT_NUMBER_LEN};

/// What a piece of text looks like as a number.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum NumberText {
    /// Has a decimal point.
    Float(f64),
    /// Short enough that it always fits in 32 bits.
    Int32(i32),
    Int64(i64),
}

/// Check that `text` is a plain decimal numeral: an optional leading `-`, digits, and at most one
/// `.`. No exponents, no hex, no digit grouping, no leading `+`.
fn is_plain_decimal(text: &str) -> Option<bool> {
    if text.is_empty() || text == "-" || text == "." {
        return None;
    }
    let digits = text.strip_prefix('-').unwrap_or(text);
    let mut has_dec = false;
    for b in digits.bytes() {
        match b {
            b'0'..=b'9' => (),
            b'.' if !has_dec => has_dec = true,
            _ => return None,
        }
    }
    Some(has_dec)
}

/// Classify `text` as a number, or `None` if it isn't one this heuristic accepts.
pub fn parse_number_text(text: &str) -> Option<NumberText> {
    let has_dec = is_plain_decimal(text)?;
    if has_dec {
        // A point with no digits around it reads as a signed zero.
        let zero = if text.starts_with('-') { -0.0 } else { 0.0 };
        return Some(NumberText::Float(text.parse::<f64>().unwrap_or(zero)));
    }
    if text.len() < SHORT_NUMBER_LEN {
        // At most 7 characters, so this can't overflow.
        return text.parse::<i32>().ok().map(NumberText::Int32);
    }
    text.parse::<i64>().ok().map(NumberText::Int64)
}

impl DocBuilder {
    /// Append `text` as a numeric field if it is a clean decimal numeral. Returns whether a field
    /// was appended; on `false` the builder is unchanged.
    ///
    /// Text with a decimal point becomes a double. Integers shorter than 8 characters become
    /// 32-bit, longer ones 64-bit; integers that overflow 64 bits are rejected.
    pub fn append_as_number(&mut self, name: &str, text: &str) -> bool {
        let num = match parse_number_text(text) {
            Some(num) => num,
            None => {
                tracing::trace!(field = name, text, "text is not a plain decimal number");
                return false;
            }
        };
        let res = match num {
            NumberText::Float(v) => self.append_f64(name, v),
            NumberText::Int32(v) => self.append_i32(name, v),
            NumberText::Int64(v) => self.append_i64(name, v),
        };
        res.is_ok()
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::value::ValueRef;
    use rand::Rng;

    /// Run `text` through a fresh builder and read back what was appended.
    fn coerce(text: &str) -> Option<NumberText> {
        let mut b = DocBuilder::new();
        let appended = b.append_as_number("f", text);
        let doc = b.done();
        if !appended {
            assert!(doc.is_empty(), "{:?} left a field behind", text);
            return None;
        }
        assert_eq!(doc.n_fields(), 1);
        match doc.get("f").unwrap().value().unwrap() {
            ValueRef::Double(v) => Some(NumberText::Float(v)),
            ValueRef::Int32(v) => Some(NumberText::Int32(v)),
            ValueRef::Int64(v) => Some(NumberText::Int64(v)),
            other => panic!("{:?} appended a non-number: {:?}", text, other),
        }
    }

    #[test]
    fn small_integer() {
        assert_eq!(coerce("123"), Some(NumberText::Int32(123)));
        assert_eq!(coerce("-123"), Some(NumberText::Int32(-123)));
        assert_eq!(coerce("0"), Some(NumberText::Int32(0)));
        assert_eq!(coerce("9999999"), Some(NumberText::Int32(9999999)));
        assert_eq!(coerce("-999999"), Some(NumberText::Int32(-999999)));
    }

    #[test]
    fn long_integer() {
        assert_eq!(coerce("12345678"), Some(NumberText::Int64(12345678)));
        assert_eq!(coerce("-1234567"), Some(NumberText::Int64(-1234567)));
        assert_eq!(
            coerce("9223372036854775807"),
            Some(NumberText::Int64(i64::MAX))
        );
        assert_eq!(
            coerce("-9223372036854775808"),
            Some(NumberText::Int64(i64::MIN))
        );
    }

    #[test]
    fn floating() {
        assert_eq!(coerce("-123.5"), Some(NumberText::Float(-123.5)));
        assert_eq!(coerce("1."), Some(NumberText::Float(1.0)));
        assert_eq!(coerce(".25"), Some(NumberText::Float(0.25)));
        match coerce("-.") {
            Some(NumberText::Float(v)) => assert!(v == 0.0 && v.is_sign_negative()),
            other => panic!("\"-.\" gave {:?}", other),
        }
        assert_eq!(
            coerce("99999999999999999999.5"),
            Some(NumberText::Float(99999999999999999999.5))
        );
    }

    #[test]
    fn rejected() {
        for text in [
            "", "-", ".", "12a", "1.2.3", "--1", "1-2", "+1", "1e5", "0x10", "1,000", " 1",
        ] {
            assert_eq!(coerce(text), None, "{:?} should be rejected", text);
        }
    }

    #[test]
    fn overflow_rejected() {
        assert_eq!(coerce("99999999999999999999"), None);
        assert_eq!(coerce("9223372036854775808"), None);
        assert_eq!(coerce("-9223372036854775809"), None);
    }

    #[test]
    fn bad_name_reports_false() {
        let mut b = DocBuilder::new();
        assert!(!b.append_as_number("a\0", "1"));
        assert!(b.is_empty());
    }

    #[test]
    fn random_integers() {
        let mut rng = rand::thread_rng();
        for _ in 0..1000 {
            let v: i64 = rng.gen();
            let text = v.to_string();
            match parse_number_text(&text) {
                Some(NumberText::Int32(n)) => {
                    assert!(text.len() < SHORT_NUMBER_LEN);
                    assert_eq!(n as i64, v);
                }
                Some(NumberText::Int64(n)) => {
                    assert!(text.len() >= SHORT_NUMBER_LEN);
                    assert_eq!(n, v);
                }
                other => panic!("{} parsed as {:?}", text, other),
            }
        }
    }
}
