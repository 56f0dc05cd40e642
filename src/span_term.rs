use educe::Educe;
use serde::{Serialize, Serializer};

use crate::error::Result;
use crate::query::{QueryCommon, TermQuery};
use crate::term::BaseTerm;
use crate::value::Value;

/// Span query matching spans that contain a term. Same shape as a
/// [`TermQueryBuilder`][crate::TermQueryBuilder], but a distinct query: the two never compare
/// equal.
#[derive(Educe, Clone, Debug)]
#[educe(PartialEq, Eq, Hash)]
pub struct SpanTermQueryBuilder {
    term: BaseTerm,
    #[educe(PartialEq(ignore), Hash(ignore))]
    common: QueryCommon,
}

impl SpanTermQueryBuilder {
    pub fn new(field_name: impl Into<String>, value: impl Into<Value>) -> Result<Self> {
        Ok(Self {
            term: BaseTerm::new(field_name, value)?,
            common: QueryCommon::default(),
        })
    }
}

impl TermQuery for SpanTermQueryBuilder {
    const NAME: &'static str = "span_term";

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

impl Serialize for SpanTermQueryBuilder {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.term.render(Self::NAME, &self.common, serializer)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::query::Query;
    use crate::TermQueryBuilder;
    use serde_json::json;

    #[test]
    fn render() {
        let query = SpanTermQueryBuilder::new("user", "kimchy").unwrap().with_boost(2.0);
        assert_eq!(
            query.to_json().unwrap(),
            json!({"span_term": {"user": {"value": "kimchy", "boost": 2.0}}})
        );
    }

    #[test]
    fn distinct_from_term() {
        let span: Box<dyn Query> = Box::new(SpanTermQueryBuilder::new("user", "kimchy").unwrap());
        let term: Box<dyn Query> = Box::new(TermQueryBuilder::new("user", "kimchy").unwrap());
        assert!(&span != &term);
        assert!(!span.dyn_eq(term.as_ref()));
    }

    #[test]
    fn roundtrip() {
        let query = SpanTermQueryBuilder::new("user", 12i64).unwrap();
        let mut enc = Vec::new();
        query.write_to(&mut enc).unwrap();
        let decoded = SpanTermQueryBuilder::read_from(&mut &enc[..]).unwrap();
        assert_eq!(decoded, query);
        assert_eq!(decoded.value(), Value::I64(12));
    }
}
