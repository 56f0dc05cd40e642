use educe::Educe;
use serde::{Serialize, Serializer};

use crate::error::Result;
use crate::query::{QueryCommon, TermQuery};
use crate::term::BaseTerm;
use crate::value::Value;

/// A query matching documents whose field contains exactly the given term.
///
/// ```
/// use term_query::{Query, TermQueryBuilder};
///
/// let query = TermQueryBuilder::new("user.id", "abc").unwrap();
/// assert_eq!(
///     query.to_json().unwrap().to_string(),
///     r#"{"term":{"user.id":{"value":"abc"}}}"#
/// );
/// ```
#[derive(Educe, Clone, Debug)]
#[educe(PartialEq, Eq, Hash)]
pub struct TermQueryBuilder {
    term: BaseTerm,
    #[educe(PartialEq(ignore), Hash(ignore))]
    common: QueryCommon,
}

impl TermQueryBuilder {
    pub fn new(field_name: impl Into<String>, value: impl Into<Value>) -> Result<Self> {
        Ok(Self {
            term: BaseTerm::new(field_name, value)?,
            common: QueryCommon::default(),
        })
    }
}

impl TermQuery for TermQueryBuilder {
    const NAME: &'static str = "term";

    fn create_builder(field_name: String, value: Value) -> Result<Self> {
        Self::new(field_name, value)
    }

    fn term(&self) -> &BaseTerm {
        &self.term
    }

    fn common(&self) -> &QueryCommon {
        &self.common
    }

    fn common_mut(&mut self) -> &mut QueryCommon {
        &mut self.common
    }
}

impl Serialize for TermQueryBuilder {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.term.render(Self::NAME, &self.common, serializer)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::error::Error;
    use crate::query::Query;
    use serde_json::json;

    #[test]
    fn render_text() {
        let query = TermQueryBuilder::new("user.id", "abc").unwrap();
        assert_eq!(
            query.to_json().unwrap(),
            json!({"term": {"user.id": {"value": "abc"}}})
        );
    }

    #[test]
    fn render_boost_and_name() {
        let query = TermQueryBuilder::new("age", 42i32)
            .unwrap()
            .with_boost(2.0)
            .with_query_name("by_age");
        assert_eq!(
            query.to_json().unwrap(),
            json!({"term": {"age": {"value": 42, "boost": 2.0, "_name": "by_age"}}})
        );
    }

    #[test]
    fn render_other_kinds() {
        let cases = vec![
            (Value::Bool(false), json!(false)),
            (Value::I64(-9), json!(-9)),
            (Value::F64(0.5), json!(0.5)),
            (Value::F32(1.5), json!(1.5)),
        ];
        for (value, expected) in cases {
            let query = TermQueryBuilder::new("f", value).unwrap();
            assert_eq!(query.to_json().unwrap(), json!({"term": {"f": {"value": expected}}}));
        }
    }

    #[test]
    fn render_f32_shortest() {
        let query = TermQueryBuilder::new("f", 0.1f32).unwrap().with_boost(0.1);
        assert_eq!(
            query.to_json().unwrap(),
            json!({"term": {"f": {"value": 0.1, "boost": 0.1}}})
        );
        assert_eq!(
            serde_json::to_string(&query).unwrap(),
            r#"{"term":{"f":{"value":0.1,"boost":0.1}}}"#
        );
    }

    #[test]
    fn render_rejects_non_finite() {
        let values = vec![
            Value::F32(f32::NAN),
            Value::F32(f32::INFINITY),
            Value::F64(f64::NAN),
            Value::F64(f64::NEG_INFINITY),
        ];
        for value in values {
            let query = TermQueryBuilder::new("f", value.clone()).unwrap();
            assert!(
                matches!(query.to_json(), Err(Error::SerdeFail(_))),
                "Rendering {:?}",
                value
            );
            assert!(serde_json::to_string(&query).is_err());
        }
        let query = TermQueryBuilder::new("f", 1i32).unwrap().with_boost(f32::NAN);
        assert!(matches!(query.to_json(), Err(Error::SerdeFail(_))));
    }

    #[test]
    fn boost_and_name_are_not_identity() {
        let plain = TermQueryBuilder::new("user.id", "abc").unwrap();
        let decorated = plain.clone().with_boost(3.0).with_query_name("q");
        assert_eq!(plain, decorated);
    }

    #[test]
    fn roundtrip_with_common() {
        let query = TermQueryBuilder::new("user.id", "abc")
            .unwrap()
            .with_boost(0.25)
            .with_query_name("q");
        let mut enc = Vec::new();
        query.write_to(&mut enc).unwrap();
        let mut raw = &enc[..];
        let decoded = TermQueryBuilder::read_from(&mut raw).unwrap();
        assert!(raw.is_empty());
        assert_eq!(decoded, query);
        assert_eq!(decoded.boost(), 0.25);
        assert_eq!(decoded.query_name(), Some("q"));
    }

    #[test]
    fn empty_field() {
        assert!(matches!(
            TermQueryBuilder::new("", 1i32),
            Err(Error::InvalidArgument(_))
        ));
    }
}
