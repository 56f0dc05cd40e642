use std::collections::BTreeMap;

use serde::ser::Error as _;
use serde::{Serialize, Serializer};
use tracing::debug;

use crate::element::{read_str, read_value, serialize_str, serialize_value};
use crate::error::{Error, Result};
use crate::query::QueryCommon;
use crate::value::Value;

/// The field name and value shared by every term-equality query.
///
/// Text values are stored as their UTF-8 bytes, never as a `Value::Str`. A term built from a
/// string and a term decoded from the byte stream (where the value arrives as a byte sequence)
/// therefore hold identical values, and compare and hash identically. Every other kind is stored
/// as given.
///
/// Identity is the field name plus the stored value. Nothing else, including the boost and query
/// name a concrete query carries, takes part in equality or hashing.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct BaseTerm {
    field_name: String,
    value: Value,
}

impl BaseTerm {
    /// Create a new term. Fails with [`Error::InvalidArgument`] if the field name is empty or the
    /// value is [`Value::Null`].
    pub fn new(field_name: impl Into<String>, value: impl Into<Value>) -> Result<Self> {
        let field_name = field_name.into();
        if field_name.is_empty() {
            debug!(target: "term_query", "Rejected term with empty field name");
            return Err(Error::InvalidArgument(String::from(
                "field name is null or empty",
            )));
        }
        let value: Value = value.into();
        let value = match value {
            Value::Null => {
                debug!(target: "term_query", field = %field_name, "Rejected term with null value");
                return Err(Error::InvalidArgument(String::from("value cannot be null")));
            }
            Value::Str(v) => Value::Bin(v.into_bytes()),
            v => v,
        };
        Ok(Self { field_name, value })
    }

    /// Returns the field name used in this term.
    pub fn field_name(&self) -> &str {
        &self.field_name
    }

    /// Returns the value used in this term. Byte sequences are turned back into strings, with
    /// invalid UTF-8 replaced by U+FFFD.
    pub fn value(&self) -> Value {
        match self.value {
            Value::Bin(ref v) => Value::Str(String::from_utf8_lossy(v).into_owned()),
            ref v => v.clone(),
        }
    }

    /// Returns the value as stored, which is what equality and hashing operate on.
    pub fn canonical_value(&self) -> &Value {
        &self.value
    }

    /// Encode the field name followed by the stored value.
    pub fn write_to(&self, buf: &mut Vec<u8>) -> Result<()> {
        serialize_str(buf, &self.field_name)?;
        serialize_value(buf, &self.value)
    }

    /// Decode a term written by [`write_to`][BaseTerm::write_to].
    pub fn read_from(raw: &mut &[u8]) -> Result<Self> {
        let (field_name, value) = read_parts(raw)?;
        Self::new(field_name, value)
    }

    /// Render as `{name: {field: {"value": .., "boost": .., "_name": ..}}}`.
    pub(crate) fn render<S: Serializer>(
        &self,
        name: &'static str,
        common: &QueryCommon,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        let finite = match self.value {
            Value::F32(v) => v.is_finite(),
            Value::F64(v) => v.is_finite(),
            _ => true,
        };
        if !finite || !common.boost.is_finite() {
            return Err(S::Error::custom(format!(
                "cannot render non-finite number in term on field {}",
                self.field_name
            )));
        }

        #[derive(Serialize)]
        struct Body<'a> {
            value: Value,
            #[serde(skip_serializing_if = "Option::is_none")]
            boost: Option<f32>,
            #[serde(rename = "_name", skip_serializing_if = "Option::is_none")]
            name: Option<&'a str>,
        }

        let body = Body {
            value: self.value(),
            boost: common.rendered_boost(),
            name: common.query_name.as_deref(),
        };
        let mut field = BTreeMap::new();
        field.insert(self.field_name.as_str(), body);
        let mut outer = BTreeMap::new();
        outer.insert(name, field);
        outer.serialize(serializer)
    }
}

/// Read the raw field name and value, without checking them.
pub(crate) fn read_parts(raw: &mut &[u8]) -> Result<(String, Value)> {
    let field_name = read_str(raw)?;
    let value = read_value(raw)?;
    Ok((field_name, value))
}

#[cfg(test)]
mod test {
    use super::*;
    use std::collections::hash_map::DefaultHasher;
    use std::hash::{Hash, Hasher};

    fn hash_of(term: &BaseTerm) -> u64 {
        let mut hasher = DefaultHasher::new();
        term.hash(&mut hasher);
        hasher.finish()
    }

    fn all_kinds() -> Vec<Value> {
        vec![
            Value::from("abc"),
            Value::from(""),
            Value::I32(0),
            Value::I32(-17),
            Value::I64(0),
            Value::I64(i64::MIN),
            Value::F32(0.0),
            Value::F32(-0.0),
            Value::F64(0.0),
            Value::F64(-0.0),
            Value::Bool(true),
            Value::Bool(false),
        ]
    }

    #[test]
    fn construct_all_kinds() {
        for value in all_kinds() {
            let term = BaseTerm::new("user.id", value.clone()).unwrap();
            assert_eq!(term.field_name(), "user.id");
            assert_eq!(term.value(), value);
        }
    }

    #[test]
    fn empty_field_name() {
        for value in all_kinds() {
            let result = BaseTerm::new("", value);
            assert!(matches!(result, Err(Error::InvalidArgument(_))));
        }
    }

    #[test]
    fn null_value() {
        for field in ["a", "user.id", " "] {
            let result = BaseTerm::new(field, Value::Null);
            assert!(matches!(result, Err(Error::InvalidArgument(_))));
            let result = BaseTerm::new(field, None::<&str>);
            assert!(matches!(result, Err(Error::InvalidArgument(_))));
        }
    }

    #[test]
    fn text_is_stored_as_bytes() {
        let term = BaseTerm::new("f", "abc").unwrap();
        assert_eq!(term.canonical_value(), &Value::Bin(b"abc".to_vec()));
        assert_eq!(term.value(), Value::from("abc"));
    }

    #[test]
    fn text_and_bytes_are_the_same_term() {
        let from_str = BaseTerm::new("f", "abc").unwrap();
        let from_bin = BaseTerm::new("f", b"abc".to_vec()).unwrap();
        assert_eq!(from_str, from_bin);
        assert_eq!(hash_of(&from_str), hash_of(&from_bin));
    }

    #[test]
    fn non_text_is_stored_as_given() {
        let term = BaseTerm::new("f", 5i64).unwrap();
        assert_eq!(term.canonical_value(), &Value::I64(5));
    }

    #[test]
    fn integer_width_matters() {
        let a = BaseTerm::new("f", 5i32).unwrap();
        let b = BaseTerm::new("f", 5i64).unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn roundtrip_all_kinds() {
        for value in all_kinds() {
            let term = BaseTerm::new("user.id", value).unwrap();
            let mut enc = Vec::new();
            term.write_to(&mut enc).unwrap();
            let mut raw = &enc[..];
            let decoded = BaseTerm::read_from(&mut raw).unwrap();
            assert!(raw.is_empty());
            assert_eq!(decoded, term);
            assert_eq!(hash_of(&decoded), hash_of(&term));
        }
    }

    #[test]
    fn text_travels_as_bytes() {
        let term = BaseTerm::new("f", "abc").unwrap();
        let mut enc = Vec::new();
        term.write_to(&mut enc).unwrap();
        assert_eq!(enc, &[0xa1, b'f', 0xc4, 0x03, b'a', b'b', b'c']);
    }

    #[test]
    fn decoded_null_is_rejected() {
        let mut enc = Vec::new();
        serialize_str(&mut enc, "f").unwrap();
        serialize_value(&mut enc, &Value::Null).unwrap();
        let result = BaseTerm::read_from(&mut &enc[..]);
        assert!(matches!(result, Err(Error::InvalidArgument(_))));
    }

    #[test]
    fn decode_errors_pass_through() {
        let data = [0xa1, b'f', 0xc1];
        let result = BaseTerm::read_from(&mut &data[..]);
        assert!(matches!(result, Err(Error::BadEncode(_))));
        let data = [0xa1, b'f'];
        let result = BaseTerm::read_from(&mut &data[..]);
        assert!(matches!(result, Err(Error::LengthTooShort { .. })));
    }

    #[test]
    fn lossy_value_for_invalid_utf8() {
        let term = BaseTerm::new("f", vec![0x61u8, 0xff]).unwrap();
        assert_eq!(term.value(), Value::from("a\u{FFFD}"));
    }
}
