use std::any::{Any, TypeId};
use std::fmt;
use std::hash::{Hash, Hasher};

use educe::Educe;
use serde::Serialize;

use crate::element::{read_f32, read_optional_str, serialize_str, serialize_value};
use crate::error::{Error, Result};
use crate::term::{read_parts, BaseTerm};
use crate::value::Value;
use crate::DEFAULT_BOOST;

/// Fields every query carries: a boost factor and an optional name. Neither affects a query's
/// identity.
#[derive(Educe, Clone, Debug, PartialEq)]
#[educe(Default)]
pub struct QueryCommon {
    #[educe(Default(expression = DEFAULT_BOOST))]
    pub boost: f32,
    pub query_name: Option<String>,
}

impl QueryCommon {
    /// Encode the boost as an F32 value, then the query name as a Str or Null value.
    pub fn write_to(&self, buf: &mut Vec<u8>) -> Result<()> {
        serialize_value(buf, &Value::F32(self.boost))?;
        match self.query_name {
            Some(ref name) => serialize_str(buf, name),
            None => serialize_value(buf, &Value::Null),
        }
    }

    pub fn read_from(raw: &mut &[u8]) -> Result<Self> {
        let boost = read_f32(raw)?;
        let query_name = read_optional_str(raw)?;
        Ok(Self { boost, query_name })
    }

    /// The boost, if it should appear in rendered output.
    pub(crate) fn rendered_boost(&self) -> Option<f32> {
        if self.boost == DEFAULT_BOOST {
            None
        } else {
            Some(self.boost)
        }
    }
}

/// Object-safe view of a query: type name, common fields, encoding, rendering, and identity.
///
/// This is implemented for every [`TermQuery`]; equality and hashing through it can't be
/// overridden, and only look at the concrete type, the field name, and the stored value.
pub trait Query: fmt::Debug + Send + Sync + 'static {
    /// The query's type name, used as the outer key when rendering and as the tag for named
    /// encoding.
    fn name(&self) -> &'static str;
    fn boost(&self) -> f32;
    fn query_name(&self) -> Option<&str>;
    /// Encode the query body followed by the common fields.
    fn write_to(&self, buf: &mut Vec<u8>) -> Result<()>;
    /// Render the query into its JSON form. Fails with [`Error::SerdeFail`] if the value or
    /// boost is NaN or infinite, as JSON has no way to write them.
    fn to_json(&self) -> Result<serde_json::Value>;
    fn as_any(&self) -> &dyn Any;
    /// True if `other` is the same concrete type with an equal field name and value.
    fn dyn_eq(&self, other: &dyn Query) -> bool;
    fn dyn_hash(&self, state: &mut dyn Hasher);
}

/// A concrete term-equality query kind.
///
/// Implementors hold a [`BaseTerm`] and a [`QueryCommon`], and supply
/// [`create_builder`][TermQuery::create_builder] so that decoding returns the concrete type.
pub trait TermQuery:
    Serialize + Clone + fmt::Debug + Eq + Hash + Send + Sync + Sized + 'static
{
    const NAME: &'static str;

    /// Build a query of this kind from a decoded field name and value.
    fn create_builder(field_name: String, value: Value) -> Result<Self>;

    fn term(&self) -> &BaseTerm;

    fn common(&self) -> &QueryCommon;

    fn common_mut(&mut self) -> &mut QueryCommon;

    fn field_name(&self) -> &str {
        self.term().field_name()
    }

    /// The logical value; see [`BaseTerm::value`].
    fn value(&self) -> Value {
        self.term().value()
    }

    fn with_boost(mut self, boost: f32) -> Self {
        self.common_mut().boost = boost;
        self
    }

    fn with_query_name(mut self, query_name: impl Into<String>) -> Self {
        self.common_mut().query_name = Some(query_name.into());
        self
    }

    /// Decode a query written by [`Query::write_to`].
    fn read_from(raw: &mut &[u8]) -> Result<Self> {
        let (field_name, value) = read_parts(raw)?;
        let mut query = Self::create_builder(field_name, value)?;
        *query.common_mut() = QueryCommon::read_from(raw)?;
        Ok(query)
    }
}

impl<T: TermQuery> Query for T {
    fn name(&self) -> &'static str {
        T::NAME
    }

    fn boost(&self) -> f32 {
        self.common().boost
    }

    fn query_name(&self) -> Option<&str> {
        self.common().query_name.as_deref()
    }

    fn write_to(&self, buf: &mut Vec<u8>) -> Result<()> {
        self.term().write_to(buf)?;
        self.common().write_to(buf)
    }

    fn to_json(&self) -> Result<serde_json::Value> {
        // Going through text keeps F32 values at their shortest decimal form, instead of the
        // widened f64 that `to_value` would produce.
        let text = serde_json::to_string(self)?;
        serde_json::from_str(&text).map_err(Error::from)
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn dyn_eq(&self, other: &dyn Query) -> bool {
        other
            .as_any()
            .downcast_ref::<T>()
            .map_or(false, |other| self.term() == other.term())
    }

    fn dyn_hash(&self, mut state: &mut dyn Hasher) {
        TypeId::of::<T>().hash(&mut state);
        self.term().hash(&mut state);
    }
}

impl PartialEq for dyn Query {
    fn eq(&self, other: &dyn Query) -> bool {
        self.dyn_eq(other)
    }
}

impl Eq for dyn Query {}

impl Hash for dyn Query {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.dyn_hash(state)
    }
}
