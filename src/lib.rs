//! term-query provides term-equality query builders for a document search DSL: queries asking
//! whether a field contains exactly a given value.
//!
//! Query execution happens elsewhere. What this crate pins down is the query's identity and its
//! two serialized forms:
//!
//! - A canonical value form. A term built from a string and the same term decoded off the wire
//! 	hold byte-identical values, so they compare and hash the same.
//! - A JSON rendering, `{"term": {"<field>": {"value": ..}}}`, which always shows the logical
//! 	value.
//! - A compact binary encoding built on a small tagged-value codec. Every value has exactly one
//! 	encoding, and integer and float widths survive a round trip.
//! - Equality and hashing defined by the query kind, the field name, and the value alone. Boost
//! 	and query name are carried and encoded, but never compared.
//!
//! ```
//! use term_query::{Query, QueryRegistry, TermQuery, TermQueryBuilder, write_named};
//!
//! let query = TermQueryBuilder::new("user.id", "abc").unwrap().with_boost(2.0);
//!
//! let mut buf = Vec::new();
//! write_named(&mut buf, &query).unwrap();
//! let decoded = QueryRegistry::default().read_named(&mut &buf[..]).unwrap();
//!
//! let original: Box<dyn Query> = Box::new(query);
//! assert!(&decoded == &original);
//! assert_eq!(decoded.boost(), 2.0);
//! ```
//!
//! See the [`format`] module for the byte layout.

mod element;
mod error;
mod marker;
mod query;
mod registry;
mod span_term;
mod term;
mod term_query;
mod value;

pub mod format;

pub use self::element::{read_value, serialize_value};
pub use self::error::{Error, Result};
pub use self::query::{Query, QueryCommon, TermQuery};
pub use self::registry::{write_named, QueryRegistry};
pub use self::span_term::SpanTermQueryBuilder;
pub use self::term::BaseTerm;
pub use self::term_query::TermQueryBuilder;
pub use self::value::Value;

/// The maximum allowed size of a single string or byte sequence payload is 1 MiB. Encoding a
/// larger one fails, as does decoding a length prefix larger than this.
pub const MAX_VALUE_SIZE: usize = 1usize << 20; // 1 MiB

/// The boost a query has unless one is set. It is left out of rendered JSON.
pub const DEFAULT_BOOST: f32 = 1.0;
