//! Segment model: the typed building blocks of an identifier path.

use std::fmt;

use crate::error::SchemaError;

/// Example subscription used when rendering example identifiers.
pub(crate) const EXAMPLE_SUBSCRIPTION: &str = "12345678-1234-9876-4563-123456789012";

/// The kind of a segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SegmentKind {
    /// A fixed key such as `subscriptions` or `resourceGroups`.
    StaticLiteral,
    /// A provider namespace such as `Microsoft.DocumentDB`.
    ResourceProviderLiteral,
    /// The subscription value.
    Subscription,
    /// The resource group value.
    ResourceGroup,
    /// A user-chosen resource name.
    UserSpecifiedName,
    /// A value restricted to a fixed set.
    ConstantValue,
    /// An embedded identifier spanning any number of components.
    Scope,
}

impl SegmentKind {
    /// Returns true for kinds matched against a fixed literal.
    pub fn is_literal(&self) -> bool {
        matches!(self, Self::StaticLiteral | Self::ResourceProviderLiteral)
    }

    /// Returns true for kinds that carry a value into the parsed identity.
    pub fn is_value(&self) -> bool {
        !self.is_literal()
    }
}

/// One schema-declared unit of an identifier path.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Segment {
    name: String,
    kind: SegmentKind,
    fixed_value: Option<String>,
    allowed_values: Vec<String>,
}

impl Segment {
    fn value(name: impl Into<String>, kind: SegmentKind) -> Self {
        Self {
            name: name.into(),
            kind,
            fixed_value: None,
            allowed_values: Vec::new(),
        }
    }

    fn literal(name: impl Into<String>, kind: SegmentKind, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind,
            fixed_value: Some(value.into()),
            allowed_values: Vec::new(),
        }
    }

    /// A static key, labelled `static` followed by the capitalised value
    /// (`resourceGroups` becomes `staticResourceGroups`).
    #[must_use]
    pub fn static_literal(value: impl Into<String>) -> Self {
        let value = value.into();
        Self::literal(literal_label(&value), SegmentKind::StaticLiteral, value)
    }

    /// A static key with an explicit label.
    #[must_use]
    pub fn named_static(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self::literal(name, SegmentKind::StaticLiteral, value)
    }

    /// A provider namespace literal such as `Microsoft.PolicyInsights`.
    #[must_use]
    pub fn resource_provider(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self::literal(name, SegmentKind::ResourceProviderLiteral, value)
    }

    #[must_use]
    pub fn subscription_id(name: impl Into<String>) -> Self {
        Self::value(name, SegmentKind::Subscription)
    }

    #[must_use]
    pub fn resource_group(name: impl Into<String>) -> Self {
        Self::value(name, SegmentKind::ResourceGroup)
    }

    #[must_use]
    pub fn user_specified(name: impl Into<String>) -> Self {
        Self::value(name, SegmentKind::UserSpecifiedName)
    }

    #[must_use]
    pub fn scope(name: impl Into<String>) -> Self {
        Self::value(name, SegmentKind::Scope)
    }

    /// A constant segment. Fails if `allowed` is empty.
    ///
    /// Allowed values keep their declaration order; duplicates are dropped.
    pub fn constant<I, S>(name: impl Into<String>, allowed: I) -> Result<Self, SchemaError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let name = name.into();
        let mut allowed_values: Vec<String> = Vec::new();
        for value in allowed {
            let value = value.into();
            if !allowed_values.contains(&value) {
                allowed_values.push(value);
            }
        }

        if allowed_values.is_empty() {
            return Err(SchemaError::EmptyConstantValues { segment: name });
        }

        Ok(Self {
            name,
            kind: SegmentKind::ConstantValue,
            fixed_value: None,
            allowed_values,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> SegmentKind {
        self.kind
    }

    /// The canonical literal for literal segments.
    pub fn fixed_value(&self) -> Option<&str> {
        self.fixed_value.as_deref()
    }

    /// The permitted values of a constant segment; empty for other kinds.
    pub fn allowed_values(&self) -> &[String] {
        &self.allowed_values
    }

    pub fn is_literal(&self) -> bool {
        self.kind.is_literal()
    }

    pub fn is_value(&self) -> bool {
        self.kind.is_value()
    }

    /// Case-insensitive comparison of a component against this literal.
    pub fn matches_literal(&self, component: &str) -> bool {
        self.fixed_value
            .as_deref()
            .is_some_and(|expected| expected.eq_ignore_ascii_case(component))
    }

    /// Case-sensitive membership check for constant segments.
    pub fn allows(&self, value: &str) -> bool {
        self.allowed_values.iter().any(|allowed| allowed == value)
    }

    /// A representative value for example identifiers.
    pub fn example_value(&self) -> String {
        match self.kind {
            SegmentKind::StaticLiteral | SegmentKind::ResourceProviderLiteral => {
                self.fixed_value.clone().unwrap_or_default()
            }
            SegmentKind::Subscription => EXAMPLE_SUBSCRIPTION.to_string(),
            SegmentKind::ResourceGroup => "example-resource-group".to_string(),
            SegmentKind::UserSpecifiedName => format!("{}Value", self.name),
            SegmentKind::ConstantValue => self.allowed_values.first().cloned().unwrap_or_default(),
            SegmentKind::Scope => {
                format!("/subscriptions/{EXAMPLE_SUBSCRIPTION}/resourceGroups/some-resource-group")
            }
        }
    }
}

/// Renders the segment in template notation.
impl fmt::Display for Segment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            SegmentKind::StaticLiteral | SegmentKind::ResourceProviderLiteral => {
                f.write_str(self.fixed_value.as_deref().unwrap_or_default())
            }
            SegmentKind::ConstantValue => {
                write!(f, "{{{}:{}}}", self.name, self.allowed_values.join("|"))
            }
            SegmentKind::Scope => write!(f, "{{*{}}}", self.name),
            _ => write!(f, "{{{}}}", self.name),
        }
    }
}

/// `static` followed by the value with dots removed and the first letter upper-cased.
pub(crate) fn literal_label(value: &str) -> String {
    let mut label = String::from("static");
    let mut chars = value.chars().filter(|c| *c != '.');
    if let Some(first) = chars.next() {
        label.extend(first.to_uppercase());
        label.extend(chars);
    }
    label
}
