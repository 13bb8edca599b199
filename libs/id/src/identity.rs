//! Parsed identities and the traits that expose them.

use std::any::Any;
use std::fmt;
use std::sync::Arc;

use serde::ser::SerializeMap;

use crate::error::IdError;
use crate::formatter;
use crate::parser;
use crate::schema::IdSchema;

/// The field values recovered from an identifier, in schema declaration order.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ParsedId {
    type_name: String,
    values: Vec<(String, String)>,
}

impl ParsedId {
    /// Creates a parsed identity from ordered `(segment, value)` pairs.
    ///
    /// Only the parser, `IdSchema::build` and typed records create these, so
    /// every declared value is present.
    #[must_use]
    pub(crate) fn new(type_name: impl Into<String>, values: Vec<(String, String)>) -> Self {
        Self {
            type_name: type_name.into(),
            values,
        }
    }

    /// The resource type this identity was produced for.
    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    /// Returns the value of the named segment.
    pub fn get(&self, segment: &str) -> Option<&str> {
        self.values
            .iter()
            .find(|(name, _)| name == segment)
            .map(|(_, value)| value.as_str())
    }

    /// Returns the value of the named segment, or `MissingSegmentValue`.
    pub fn value(&self, segment: &str) -> Result<&str, IdError> {
        self.get(segment)
            .filter(|value| !value.is_empty())
            .ok_or_else(|| IdError::missing(segment))
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.values
            .iter()
            .map(|(name, value)| (name.as_str(), value.as_str()))
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn into_values(self) -> Vec<(String, String)> {
        self.values
    }
}

/// Serialises as a map from segment name to value, in declaration order.
impl serde::Serialize for ParsedId {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        let mut map = serializer.serialize_map(Some(self.values.len()))?;
        for (name, value) in &self.values {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}

/// A strongly typed identifier record backed by a static schema.
///
/// Implementations are generated by the `define_resource_id!` macro.
pub trait ResourceId: Sized {
    /// The schema shared by every value of this type.
    fn schema() -> &'static IdSchema;

    /// Builds the record from a parsed identity.
    fn from_parsed(parsed: &ParsedId) -> Result<Self, IdError>;

    /// Converts the record back into ordered segment values.
    fn to_parsed(&self) -> ParsedId;

    /// Parses `input` into this type.
    fn parse_id(input: &str) -> Result<Self, IdError> {
        let parsed = parser::parse(Self::schema(), input)?;
        Self::from_parsed(&parsed)
    }

    /// The canonical identifier string.
    fn format_id(&self) -> String {
        formatter::format(Self::schema(), &self.to_parsed())
    }
}

/// A type-erased identity, as returned by the registry.
pub trait ResourceIdentity: fmt::Debug + fmt::Display + Send + Sync + Any {
    /// The registered type name.
    fn type_name(&self) -> &str;

    /// The canonical identifier string.
    fn id(&self) -> String;

    /// The identity's segment values.
    fn values(&self) -> ParsedId;

    /// Supports downcasting to the concrete record.
    fn as_any(&self) -> &dyn Any;
}

impl<T> ResourceIdentity for T
where
    T: ResourceId + fmt::Debug + fmt::Display + Send + Sync + 'static,
{
    fn type_name(&self) -> &str {
        T::schema().type_name()
    }

    fn id(&self) -> String {
        self.format_id()
    }

    fn values(&self) -> ParsedId {
        self.to_parsed()
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// An identity of a schema registered without a typed record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchemaIdentity {
    schema: Arc<IdSchema>,
    parsed: ParsedId,
}

impl SchemaIdentity {
    pub fn new(schema: Arc<IdSchema>, parsed: ParsedId) -> Self {
        Self { schema, parsed }
    }

    pub fn schema(&self) -> &IdSchema {
        &self.schema
    }

    pub fn parsed(&self) -> &ParsedId {
        &self.parsed
    }
}

impl fmt::Display for SchemaIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&formatter::describe(&self.schema, &self.parsed))
    }
}

impl ResourceIdentity for SchemaIdentity {
    fn type_name(&self) -> &str {
        self.schema.type_name()
    }

    fn id(&self) -> String {
        formatter::format(&self.schema, &self.parsed)
    }

    fn values(&self) -> ParsedId {
        self.parsed.clone()
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}
