use std::collections::BTreeMap;
use std::fmt;

use tracing::trace;

use crate::element::{read_str, serialize_str};
use crate::error::{Error, Result};
use crate::query::{Query, TermQuery};
use crate::span_term::SpanTermQueryBuilder;
use crate::term_query::TermQueryBuilder;

type ReadFn = fn(&mut &[u8]) -> Result<Box<dyn Query>>;

fn read_boxed<Q: TermQuery>(raw: &mut &[u8]) -> Result<Box<dyn Query>> {
    Ok(Box::new(Q::read_from(raw)?))
}

/// Maps query type names to decoders, for reading queries whose type isn't known ahead of time.
///
/// The [`Default`] registry knows every query kind in this crate. Use
/// [`new`][QueryRegistry::new] for an empty one.
#[derive(Clone)]
pub struct QueryRegistry {
    readers: BTreeMap<&'static str, ReadFn>,
}

impl QueryRegistry {
    pub fn new() -> Self {
        Self {
            readers: BTreeMap::new(),
        }
    }

    /// Register a query kind under its type name, replacing any previous reader for that name.
    pub fn register<Q: TermQuery>(&mut self) {
        self.readers.insert(Q::NAME, read_boxed::<Q>);
    }

    pub fn contains(&self, name: &str) -> bool {
        self.readers.contains_key(name)
    }

    /// Decode a query written by [`write_named`]. The type name is read first and picks the
    /// decoder; an unregistered name fails with [`Error::UnknownQuery`].
    pub fn read_named(&self, raw: &mut &[u8]) -> Result<Box<dyn Query>> {
        let name = read_str(raw)?;
        let reader = match self.readers.get(name.as_str()) {
            Some(reader) => reader,
            None => return Err(Error::UnknownQuery(name)),
        };
        trace!(target: "term_query", query = %name, "Reading named query");
        reader(raw)
    }
}

impl Default for QueryRegistry {
    fn default() -> Self {
        let mut registry = Self::new();
        registry.register::<TermQueryBuilder>();
        registry.register::<SpanTermQueryBuilder>();
        registry
    }
}

impl fmt::Debug for QueryRegistry {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_set().entries(self.readers.keys()).finish()
    }
}

/// Encode a query preceded by its type name, so [`QueryRegistry::read_named`] can decode it
/// without knowing its type.
pub fn write_named(buf: &mut Vec<u8>, query: &dyn Query) -> Result<()> {
    trace!(target: "term_query", query = query.name(), "Writing named query");
    serialize_str(buf, query.name())?;
    query.write_to(buf)
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::value::Value;

    #[test]
    fn default_knows_all_kinds() {
        let registry = QueryRegistry::default();
        assert!(registry.contains("term"));
        assert!(registry.contains("span_term"));
        assert!(!QueryRegistry::new().contains("term"));
    }

    #[test]
    fn named_roundtrip() {
        let registry = QueryRegistry::default();
        let queries: Vec<Box<dyn Query>> = vec![
            Box::new(TermQueryBuilder::new("user.id", "abc").unwrap()),
            Box::new(SpanTermQueryBuilder::new("user.id", "abc").unwrap().with_boost(4.0)),
            Box::new(TermQueryBuilder::new("count", 3i32).unwrap().with_query_name("c")),
        ];
        let mut enc = Vec::new();
        for query in queries.iter() {
            write_named(&mut enc, query.as_ref()).unwrap();
        }
        let mut raw = &enc[..];
        for query in queries.iter() {
            let decoded = registry.read_named(&mut raw).unwrap();
            assert_eq!(&decoded, query);
            assert_eq!(decoded.name(), query.name());
            assert_eq!(decoded.boost(), query.boost());
            assert_eq!(decoded.query_name(), query.query_name());
        }
        assert!(raw.is_empty());
    }

    #[test]
    fn unknown_name() {
        let mut enc = Vec::new();
        write_named(&mut enc, &TermQueryBuilder::new("f", true).unwrap()).unwrap();
        let result = QueryRegistry::new().read_named(&mut &enc[..]);
        assert_eq!(result.unwrap_err(), Error::UnknownQuery(String::from("term")));
    }

    #[test]
    fn decoded_value_kind_survives() {
        let mut enc = Vec::new();
        write_named(&mut enc, &TermQueryBuilder::new("f", 9i32).unwrap()).unwrap();
        let decoded = QueryRegistry::default().read_named(&mut &enc[..]).unwrap();
        let decoded = decoded
            .as_any()
            .downcast_ref::<TermQueryBuilder>()
            .unwrap();
        assert_eq!(decoded.value(), Value::I32(9));
    }
}
