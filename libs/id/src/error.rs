//! Error types for identifier parsing, validation, and registration.

use thiserror::Error;

/// Errors that can occur when parsing or building a resource identifier.
///
/// Every variant is a deterministic function of the input and the schema;
/// none of them is transient.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum IdError {
    /// A required path component is absent or empty.
    #[error("missing value for segment '{segment}'")]
    MissingSegmentValue { segment: String },

    /// A literal key component does not match the schema.
    #[error("unexpected segment: expected '{expected}', got '{actual}'")]
    UnexpectedSegment { expected: String, actual: String },

    /// Components remain after every schema segment was matched.
    #[error("too many segments: unexpected trailing '{remainder}'")]
    TooManySegments { remainder: String },

    /// A constant segment holds a value outside its permitted set.
    #[error("invalid value '{value}' for segment '{segment}': expected one of {allowed:?}")]
    InvalidConstantValue {
        segment: String,
        value: String,
        allowed: Vec<String>,
    },

    /// A value cannot be represented as a single path component.
    #[error("invalid value '{value}' for segment '{segment}': {reason}")]
    InvalidSegmentValue {
        segment: String,
        value: String,
        reason: &'static str,
    },

    /// The whole identifier was upper-cased, destroying the casing of its values.
    #[error(
        "value '{value}' for segment '{segment}' is case-folded: the identifier was upper-cased and the original casing cannot be recovered"
    )]
    CaseFoldedValue { segment: String, value: String },
}

impl IdError {
    /// Returns the name of the segment this error is attributed to, if any.
    pub fn segment(&self) -> Option<&str> {
        match self {
            IdError::MissingSegmentValue { segment }
            | IdError::InvalidConstantValue { segment, .. }
            | IdError::InvalidSegmentValue { segment, .. }
            | IdError::CaseFoldedValue { segment, .. } => Some(segment),
            IdError::UnexpectedSegment { .. } | IdError::TooManySegments { .. } => None,
        }
    }

    /// Returns true if this error indicates a missing or empty component.
    pub fn is_missing(&self) -> bool {
        matches!(self, IdError::MissingSegmentValue { .. })
    }

    pub(crate) fn missing(segment: &str) -> Self {
        IdError::MissingSegmentValue {
            segment: segment.to_string(),
        }
    }
}

/// Errors raised while constructing segments and schemas.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SchemaError {
    /// The schema declares no segments.
    #[error("schema '{type_name}' declares no segments")]
    Empty { type_name: String },

    /// A constant segment was declared without any permitted values.
    #[error("constant segment '{segment}' has no allowed values")]
    EmptyConstantValues { segment: String },

    /// A literal segment has an empty fixed value.
    #[error("literal segment '{segment}' has an empty value")]
    EmptyLiteral { segment: String },

    /// Two value segments share a name.
    #[error("duplicate value segment name '{segment}'")]
    DuplicateSegmentName { segment: String },

    /// A value segment is not introduced by a literal key.
    #[error("value segment '{segment}' must be preceded by a literal key segment")]
    MissingKeySegment { segment: String },

    /// The subscription segment is not introduced by `subscriptions`.
    #[error("subscription segment '{segment}' must be preceded by the literal 'subscriptions'")]
    SubscriptionKey { segment: String },

    /// More than one scope segment was declared.
    #[error("schema declares more than one scope segment ('{first}', '{second}')")]
    MultipleScopes { first: String, second: String },

    /// A path template could not be interpreted.
    #[error("invalid template '{template}': {message}")]
    InvalidTemplate { template: String, message: String },
}

/// A configuration-time validation failure attributed to a field.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("{field}: {error}")]
pub struct ValidationError {
    /// The configuration field the input came from.
    pub field: String,

    /// The underlying parse failure.
    pub error: IdError,
}

/// Errors from building or querying an identity registry.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RegistryError {
    /// No schema is registered under this type name.
    #[error("unknown resource type '{0}'")]
    UnknownType(String),

    /// The type name is registered twice.
    #[error("resource type '{0}' is already registered")]
    DuplicateType(String),

    /// Two types share the same literal shape.
    #[error("resource types '{existing}' and '{duplicate}' share the shape '{shape}'")]
    DuplicateShape {
        existing: String,
        duplicate: String,
        shape: String,
    },

    /// No registered schema accepts the identifier.
    #[error("no registered resource type matches '{0}'")]
    NoMatch(String),

    #[error(transparent)]
    Id(#[from] IdError),

    #[error(transparent)]
    Schema(#[from] SchemaError),
}

impl RegistryError {
    /// Returns the identifier error wrapped by this error, if any.
    pub fn id_error(&self) -> Option<&IdError> {
        match self {
            RegistryError::Id(err) => Some(err),
            _ => None,
        }
    }
}
