//! Parsing identifier strings against a schema.
//!
//! The parser walks the schema's segments and the path components in
//! lock-step and stops at the first failure. Literal keys compare
//! case-insensitively; values are kept byte-for-byte. The input is never
//! case-normalised as a whole.

use crate::error::IdError;
use crate::identity::ParsedId;
use crate::schema::IdSchema;
use crate::segment::{Segment, SegmentKind};

/// Parses `input` into the values declared by `schema`.
pub fn parse(schema: &IdSchema, input: &str) -> Result<ParsedId, IdError> {
    let components = split_components(input);
    let segments = schema.segments();

    let mut values = Vec::with_capacity(segments.len() / 2 + 1);
    let mut folded_key = false;
    let mut position = 0;

    for (index, segment) in segments.iter().enumerate() {
        match segment.kind() {
            SegmentKind::StaticLiteral | SegmentKind::ResourceProviderLiteral => {
                let component = components
                    .get(position)
                    .filter(|c| !c.is_empty())
                    .ok_or_else(|| missing_from(segments, index))?;
                let expected = segment.fixed_value().unwrap_or_default();
                if !segment.matches_literal(component) {
                    return Err(IdError::UnexpectedSegment {
                        expected: expected.to_string(),
                        actual: component.to_string(),
                    });
                }
                folded_key |= *component != expected;
                position += 1;
            }
            SegmentKind::Scope => {
                let end = scope_end(&components, position, &segments[index + 1..]);
                let span = &components[position.min(end)..end];
                if span.is_empty() || span.iter().any(|c| c.is_empty()) {
                    return Err(IdError::missing(segment.name()));
                }
                values.push((segment.name().to_string(), format!("/{}", span.join("/"))));
                position = end;
            }
            _ => {
                let component = components
                    .get(position)
                    .filter(|c| !c.is_empty())
                    .ok_or_else(|| IdError::missing(segment.name()))?;
                if segment.kind() == SegmentKind::ConstantValue && !segment.allows(component) {
                    return Err(IdError::InvalidConstantValue {
                        segment: segment.name().to_string(),
                        value: component.to_string(),
                        allowed: segment.allowed_values().to_vec(),
                    });
                }
                values.push((segment.name().to_string(), component.to_string()));
                position += 1;
            }
        }
    }

    if position < components.len() {
        return Err(IdError::TooManySegments {
            remainder: format!("/{}", components[position..].join("/")),
        });
    }

    if folded_key && !input.chars().any(char::is_lowercase) {
        if let Some((segment, value)) = values
            .iter()
            .find(|(_, value)| value.chars().any(char::is_uppercase))
        {
            return Err(IdError::CaseFoldedValue {
                segment: segment.clone(),
                value: value.clone(),
            });
        }
    }

    Ok(ParsedId::new(schema.type_name(), values))
}

/// Splits on `/` after removing one leading and one trailing slash.
///
/// Interior empty components are kept so they can be reported against the
/// segment that should have occupied them.
fn split_components(input: &str) -> Vec<&str> {
    let trimmed = input.strip_prefix('/').unwrap_or(input);
    let trimmed = trimmed.strip_suffix('/').unwrap_or(trimmed);
    if trimmed.is_empty() {
        return Vec::new();
    }
    trimmed.split('/').collect()
}

/// A missing literal key is reported against the value it introduces.
fn missing_from(segments: &[Segment], index: usize) -> IdError {
    let segment = segments[index..]
        .iter()
        .find(|s| s.is_value())
        .unwrap_or(&segments[index]);
    IdError::missing(segment.name())
}

/// Finds where a scope starting at `start` ends.
///
/// The scope stops at the next expected literal key: the last occurrence of
/// it that still leaves room for the remaining segments, else its last
/// occurrence at all. A scope closing the schema takes everything left.
/// An end equal to `start` means the scope is empty.
fn scope_end(components: &[&str], start: usize, rest: &[Segment]) -> usize {
    let Some(next) = rest.first().filter(|s| s.is_literal()) else {
        return components.len();
    };

    let room = components.len().saturating_sub(rest.len());
    let candidates: Vec<usize> = (start..components.len())
        .filter(|&i| next.matches_literal(components[i]))
        .collect();

    candidates
        .iter()
        .rev()
        .find(|&&i| i <= room)
        .or_else(|| candidates.last())
        .copied()
        .unwrap_or(components.len())
}
