//! Identifier schemas: the ordered segment shape of one resource type.

use std::borrow::Borrow;
use std::collections::{BTreeMap, HashSet};

use crate::error::{IdError, SchemaError};
use crate::formatter;
use crate::identity::ParsedId;
use crate::parser;
use crate::segment::{literal_label, Segment, SegmentKind};

/// An immutable description of one resource type's identifier shape.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdSchema {
    type_name: String,
    display_name: String,
    segments: Vec<Segment>,
}

impl IdSchema {
    /// Creates a schema after checking its structural invariants.
    ///
    /// - at least one segment, and no literal with an empty value
    /// - value segment names are unique
    /// - at most one scope segment
    /// - every non-scope value segment directly follows a literal key, and
    ///   subscription segments follow `subscriptions`
    pub fn new(
        type_name: impl Into<String>,
        display_name: impl Into<String>,
        segments: Vec<Segment>,
    ) -> Result<Self, SchemaError> {
        let type_name = type_name.into();
        if segments.is_empty() {
            return Err(SchemaError::Empty { type_name });
        }

        let mut names = HashSet::new();
        let mut scope: Option<&str> = None;
        for (index, segment) in segments.iter().enumerate() {
            if segment.is_literal() {
                if segment.fixed_value().is_none_or(str::is_empty) {
                    return Err(SchemaError::EmptyLiteral {
                        segment: segment.name().to_string(),
                    });
                }
                continue;
            }

            if !names.insert(segment.name()) {
                return Err(SchemaError::DuplicateSegmentName {
                    segment: segment.name().to_string(),
                });
            }

            if segment.kind() == SegmentKind::Scope {
                if let Some(first) = scope {
                    return Err(SchemaError::MultipleScopes {
                        first: first.to_string(),
                        second: segment.name().to_string(),
                    });
                }
                scope = Some(segment.name());
                continue;
            }

            let key = index.checked_sub(1).map(|i| &segments[i]);
            let Some(key) = key.filter(|key| key.is_literal()) else {
                return Err(SchemaError::MissingKeySegment {
                    segment: segment.name().to_string(),
                });
            };

            if segment.kind() == SegmentKind::Subscription && !key.matches_literal("subscriptions")
            {
                return Err(SchemaError::SubscriptionKey {
                    segment: segment.name().to_string(),
                });
            }
        }

        Ok(Self {
            type_name,
            display_name: display_name.into(),
            segments,
        })
    }

    /// Creates a schema from a path template.
    ///
    /// `{name}` declares a value segment whose kind follows from the key in
    /// front of it (`subscriptions`, `resourceGroups`, anything else is a
    /// user-specified name). `{name:A|B}` declares a constant and `{*name}` a
    /// scope. The literal after `providers` is a resource provider namespace.
    ///
    /// ```
    /// use armid::IdSchema;
    ///
    /// let schema = IdSchema::from_template(
    ///     "PublicIpPrefixId",
    ///     "Public IP Prefix",
    ///     "/subscriptions/{subscriptionId}/resourceGroups/{resourceGroupName}/providers/Microsoft.Network/publicIPPrefixes/{publicIpPrefixName}",
    /// )?;
    /// assert_eq!(schema.value_segment_names(), ["subscriptionId", "resourceGroupName", "publicIpPrefixName"]);
    /// # Ok::<(), armid::SchemaError>(())
    /// ```
    pub fn from_template(
        type_name: impl Into<String>,
        display_name: impl Into<String>,
        template: &str,
    ) -> Result<Self, SchemaError> {
        let invalid = |message: String| SchemaError::InvalidTemplate {
            template: template.to_string(),
            message,
        };

        let body = template.strip_prefix('/').unwrap_or(template);
        let body = body.strip_suffix('/').unwrap_or(body);
        if body.is_empty() {
            return Err(invalid("template is empty".to_string()));
        }

        let mut segments: Vec<Segment> = Vec::new();
        for component in body.split('/') {
            let previous = segments.last();
            let segment = if let Some(inner) = component.strip_prefix('{') {
                let inner = inner
                    .strip_suffix('}')
                    .ok_or_else(|| invalid(format!("unterminated placeholder '{component}'")))?;
                placeholder(inner, previous).map_err(invalid)?
            } else {
                if component.is_empty() {
                    return Err(invalid("empty component".to_string()));
                }
                if component.contains(['{', '}']) {
                    return Err(invalid(format!("stray brace in '{component}'")));
                }
                if previous.is_some_and(|p| p.matches_literal("providers")) {
                    Segment::resource_provider(literal_label(component), component)
                } else {
                    Segment::static_literal(component)
                }
            };
            segments.push(segment);
        }

        Self::new(type_name, display_name, segments)
    }

    /// The resource type's name, used as its registry key.
    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    /// Human readable name, used in descriptions.
    pub fn display_name(&self) -> &str {
        &self.display_name
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Value segments in declaration order.
    pub fn value_segments(&self) -> impl Iterator<Item = &Segment> {
        self.segments.iter().filter(|s| s.is_value())
    }

    pub fn value_segment_names(&self) -> Vec<&str> {
        self.value_segments().map(Segment::name).collect()
    }

    /// Looks up a segment by name.
    pub fn segment(&self, name: &str) -> Option<&Segment> {
        self.segments.iter().find(|s| s.name() == name)
    }

    /// Builds a parsed identity from named values.
    ///
    /// Keys that do not name a value segment are ignored. Scope values are
    /// normalised to a single leading `/` without a trailing one.
    pub fn build<K, V>(&self, values: &BTreeMap<K, V>) -> Result<ParsedId, IdError>
    where
        K: Borrow<str> + Ord,
        V: AsRef<str>,
    {
        let mut parsed = Vec::new();
        for segment in self.value_segments() {
            let value = values
                .get(segment.name())
                .map(|v| v.as_ref())
                .filter(|v| !v.is_empty())
                .ok_or_else(|| IdError::missing(segment.name()))?;

            let value = match segment.kind() {
                SegmentKind::Scope => normalize_scope(segment, value)?,
                SegmentKind::ConstantValue => {
                    if !segment.allows(value) {
                        return Err(IdError::InvalidConstantValue {
                            segment: segment.name().to_string(),
                            value: value.to_string(),
                            allowed: segment.allowed_values().to_vec(),
                        });
                    }
                    value.to_string()
                }
                _ => {
                    if value.contains('/') {
                        return Err(IdError::InvalidSegmentValue {
                            segment: segment.name().to_string(),
                            value: value.to_string(),
                            reason: "values cannot contain '/'",
                        });
                    }
                    value.to_string()
                }
            };
            parsed.push((segment.name().to_string(), value));
        }

        Ok(ParsedId::new(self.type_name.clone(), parsed))
    }

    /// Parses `input` against this schema.
    pub fn parse(&self, input: &str) -> Result<ParsedId, IdError> {
        parser::parse(self, input)
    }

    /// Renders the canonical identifier for `id`.
    pub fn format(&self, id: &ParsedId) -> String {
        formatter::format(self, id)
    }

    /// The literal shape of this schema with key casing normalised.
    ///
    /// Two schemas with the same discriminator accept exactly the same inputs.
    pub fn discriminator(&self) -> String {
        let mut shape = String::new();
        for segment in &self.segments {
            shape.push('/');
            match segment.kind() {
                SegmentKind::StaticLiteral | SegmentKind::ResourceProviderLiteral => {
                    shape.push_str(&segment.fixed_value().unwrap_or_default().to_ascii_lowercase());
                }
                SegmentKind::ConstantValue => {
                    let mut allowed = segment.allowed_values().to_vec();
                    allowed.sort();
                    shape.push('{');
                    shape.push_str(&allowed.join("|"));
                    shape.push('}');
                }
                SegmentKind::Scope => shape.push_str("{*}"),
                _ => shape.push_str("{}"),
            }
        }
        shape
    }

    /// The template notation of this schema.
    pub fn template(&self) -> String {
        self.segments
            .iter()
            .map(|segment| format!("/{segment}"))
            .collect()
    }

    /// An example identifier for this shape, for error messages and help output.
    pub fn example_id(&self) -> String {
        formatter::format_example(self)
    }
}

fn placeholder(inner: &str, previous: Option<&Segment>) -> Result<Segment, String> {
    if let Some(name) = inner.strip_prefix('*') {
        return named(name).map(Segment::scope);
    }

    if let Some((name, allowed)) = inner.split_once(':') {
        let name = named(name)?;
        let values = allowed.split('|').filter(|v| !v.is_empty());
        return Segment::constant(name, values).map_err(|err| err.to_string());
    }

    let name = named(inner)?;
    let segment = match previous {
        Some(key) if key.matches_literal("subscriptions") => Segment::subscription_id(name),
        Some(key) if key.matches_literal("resourceGroups") => Segment::resource_group(name),
        _ => Segment::user_specified(name),
    };
    Ok(segment)
}

fn named(name: &str) -> Result<&str, String> {
    if name.is_empty() || name.contains(['{', '}', '*', ':', '|']) {
        return Err(format!("invalid placeholder name '{name}'"));
    }
    Ok(name)
}

fn normalize_scope(segment: &Segment, value: &str) -> Result<String, IdError> {
    let trimmed = value.trim_matches('/');
    if trimmed.is_empty() {
        return Err(IdError::missing(segment.name()));
    }
    if trimmed.split('/').any(str::is_empty) {
        return Err(IdError::InvalidSegmentValue {
            segment: segment.name().to_string(),
            value: value.to_string(),
            reason: "scopes cannot contain empty components",
        });
    }
    Ok(format!("/{trimmed}"))
}
