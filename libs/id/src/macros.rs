//! Macros for defining typed resource identifiers.

/// Macro to define a typed resource identifier from a path template.
///
/// This generates a struct with one `String` field per value segment, plus:
/// - a `TEMPLATE` constant and a lazily built, shared [`IdSchema`](crate::IdSchema)
/// - `new()` taking the field values in declaration order, unchecked
/// - `try_new()` building the values through the schema
/// - `id()` to format, `parse()` to parse, `validate()` for config input
/// - `Display` (a human description) and `FromStr`
/// - `Serialize` and `Deserialize` as the canonical identifier string
/// - the [`ResourceId`](crate::ResourceId) trait
///
/// # Example
///
/// ```ignore
/// define_resource_id!(
///     ResourceGroupId,
///     "Resource Group",
///     "/subscriptions/{subscriptionId}/resourceGroups/{resourceGroupName}",
///     { subscription_id => "subscriptionId", resource_group => "resourceGroupName" }
/// );
///
/// let id = ResourceGroupId::try_new("12345678-1234-9876-4563-123456789012", "rg1")?;
/// let parsed: ResourceGroupId = id.id().parse()?;
/// ```
macro_rules! define_resource_id {
    (
        $(#[$meta:meta])*
        $name:ident,
        $display:literal,
        $template:literal,
        { $($field:ident => $segment:literal),+ $(,)? }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
        pub struct $name {
            $(pub $field: String,)+
        }

        impl $name {
            /// The path template this identifier is parsed against.
            pub const TEMPLATE: &'static str = $template;

            /// Creates an identifier from its segment values as given.
            ///
            /// Nothing is validated or normalised: an empty value, a `/` in a
            /// non-scope value or a scope without its leading `/` produce an
            /// identifier that does not survive `parse(id())`. Use
            /// [`try_new`](Self::try_new) for untrusted input.
            #[must_use]
            pub fn new($($field: impl Into<String>),+) -> Self {
                Self {
                    $($field: $field.into(),)+
                }
            }

            /// Creates an identifier after checking each value against the schema.
            ///
            /// Scope values are normalised to a single leading `/`.
            pub fn try_new($($field: impl Into<String>),+) -> Result<Self, $crate::IdError> {
                let values: std::collections::BTreeMap<&str, String> =
                    [$(($segment, Into::<String>::into($field)),)+].into_iter().collect();
                let parsed = <Self as $crate::ResourceId>::schema().build(&values)?;
                <Self as $crate::ResourceId>::from_parsed(&parsed)
            }

            /// Formats the canonical identifier string.
            #[must_use]
            pub fn id(&self) -> String {
                <Self as $crate::ResourceId>::format_id(self)
            }

            /// Parses an identifier string.
            pub fn parse(input: &str) -> Result<Self, $crate::IdError> {
                <Self as $crate::ResourceId>::parse_id(input)
            }

            /// Validates configuration input for `field`.
            #[must_use]
            pub fn validate(input: &str, field: &str) -> Vec<$crate::ValidationError> {
                $crate::validate_id(<Self as $crate::ResourceId>::schema(), input, field)
            }
        }

        impl $crate::ResourceId for $name {
            fn schema() -> &'static $crate::IdSchema {
                static SCHEMA: std::sync::LazyLock<$crate::IdSchema> = std::sync::LazyLock::new(|| {
                    $crate::IdSchema::from_template(stringify!($name), $display, $template)
                        .expect(concat!("invalid identifier template for ", stringify!($name)))
                });
                &SCHEMA
            }

            fn from_parsed(parsed: &$crate::ParsedId) -> Result<Self, $crate::IdError> {
                Ok(Self {
                    $($field: parsed.value($segment)?.to_string(),)+
                })
            }

            fn to_parsed(&self) -> $crate::ParsedId {
                $crate::ParsedId::new(
                    stringify!($name),
                    vec![$(($segment.to_string(), self.$field.clone()),)+],
                )
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                let schema = <Self as $crate::ResourceId>::schema();
                let parsed = <Self as $crate::ResourceId>::to_parsed(self);
                f.write_str(&$crate::formatter::describe(schema, &parsed))
            }
        }

        impl std::str::FromStr for $name {
            type Err = $crate::IdError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Self::parse(s)
            }
        }

        impl serde::Serialize for $name {
            fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
            where
                S: serde::Serializer,
            {
                serializer.serialize_str(&self.id())
            }
        }

        impl<'de> serde::Deserialize<'de> for $name {
            fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
            where
                D: serde::Deserializer<'de>,
            {
                let s = <String as serde::Deserialize>::deserialize(deserializer)?;
                Self::parse(&s).map_err(serde::de::Error::custom)
            }
        }
    };
}

pub(crate) use define_resource_id;
