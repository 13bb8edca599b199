//! Rendering identities back into canonical identifier strings.

use crate::identity::ParsedId;
use crate::schema::IdSchema;
use crate::segment::{Segment, SegmentKind};

/// Renders the canonical identifier for `id`.
///
/// Literal keys use the schema's casing, values are emitted unmodified and
/// scopes are spliced in without their own leading slash. Values are looked
/// up by segment name; a name absent from `id` renders as an empty component.
pub fn format(schema: &IdSchema, id: &ParsedId) -> String {
    render(schema, |segment| id.get(segment.name()).unwrap_or_default().to_string())
}

/// Renders an example identifier from each segment's example value.
pub fn format_example(schema: &IdSchema) -> String {
    render(schema, Segment::example_value)
}

/// A human readable description, e.g.
/// `Resource Group (Subscription: "sub1", Resource Group Name: "rg1")`.
pub fn describe(schema: &IdSchema, id: &ParsedId) -> String {
    let fields: Vec<String> = schema
        .value_segments()
        .map(|segment| {
            let value = id.get(segment.name()).unwrap_or_default();
            format!("{}: {value:?}", label(segment))
        })
        .collect();
    format!("{} ({})", schema.display_name(), fields.join(", "))
}

fn render<F>(schema: &IdSchema, value_of: F) -> String
where
    F: Fn(&Segment) -> String,
{
    let mut out = String::new();
    for segment in schema.segments() {
        out.push('/');
        match segment.kind() {
            SegmentKind::StaticLiteral | SegmentKind::ResourceProviderLiteral => {
                out.push_str(segment.fixed_value().unwrap_or_default());
            }
            SegmentKind::Scope => out.push_str(value_of(segment).trim_matches('/')),
            _ => out.push_str(&value_of(segment)),
        }
    }
    out
}

/// `resourceGroupName` becomes `Resource Group Name`; subscription segments
/// are always labelled `Subscription`.
fn label(segment: &Segment) -> String {
    if segment.kind() == SegmentKind::Subscription {
        return "Subscription".to_string();
    }

    let mut out = String::new();
    for (i, c) in segment.name().chars().enumerate() {
        if i == 0 {
            out.extend(c.to_uppercase());
        } else if c.is_uppercase() {
            out.push(' ');
            out.push(c);
        } else {
            out.push(c);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse;

    fn remediation() -> IdSchema {
        IdSchema::from_template(
            "ResourceGroupPolicyRemediationId",
            "Resource Group Policy Remediation",
            "/subscriptions/{subscriptionId}/resourceGroups/{resourceGroupName}/providers/Microsoft.PolicyInsights/remediations/{remediationName}",
        )
        .unwrap()
    }

    #[test]
    fn test_format_uses_canonical_key_casing() {
        let input = "/SUBSCRIPTIONS/12345678-1234-9876-4563-123456789012/resourcegroups/resGroup1/Providers/microsoft.policyinsights/REMEDIATIONS/remediation1/";
        let parsed = parse(&remediation(), input).unwrap();
        assert_eq!(
            format(&remediation(), &parsed),
            "/subscriptions/12345678-1234-9876-4563-123456789012/resourceGroups/resGroup1/providers/Microsoft.PolicyInsights/remediations/remediation1"
        );
    }

    #[test]
    fn test_format_scope() {
        let schema = IdSchema::from_template(
            "ScopedLockId",
            "Scoped Lock",
            "/{*scope}/providers/Microsoft.Authorization/locks/{lockName}",
        )
        .unwrap();
        let id = ParsedId::new(
            "ScopedLockId",
            vec![
                ("scope".to_string(), "/subscriptions/sub1".to_string()),
                ("lockName".to_string(), "lock1".to_string()),
            ],
        );
        assert_eq!(
            format(&schema, &id),
            "/subscriptions/sub1/providers/Microsoft.Authorization/locks/lock1"
        );
    }

    #[test]
    fn test_describe() {
        let parsed = parse(
            &remediation(),
            "/subscriptions/sub1/resourceGroups/resGroup1/providers/Microsoft.PolicyInsights/remediations/remediation1",
        )
        .unwrap();
        assert_eq!(
            describe(&remediation(), &parsed),
            r#"Resource Group Policy Remediation (Subscription: "sub1", Resource Group Name: "resGroup1", Remediation Name: "remediation1")"#
        );
    }

    #[test]
    fn test_example() {
        assert_eq!(
            format_example(&remediation()),
            "/subscriptions/12345678-1234-9876-4563-123456789012/resourceGroups/example-resource-group/providers/Microsoft.PolicyInsights/remediations/remediationNameValue"
        );
    }
}
