//! Validation of configuration input.
//!
//! Validators wrap the parser and never touch the input: no normalisation,
//! no logging, no I/O.

use crate::error::{IdError, ValidationError};
use crate::parser;
use crate::schema::IdSchema;

/// Returns the parse failure for `input`, if any.
pub fn validate_kinds(schema: &IdSchema, input: &str) -> Vec<IdError> {
    match parser::parse(schema, input) {
        Ok(_) => Vec::new(),
        Err(err) => vec![err],
    }
}

/// Validates `input` for the configuration field `field`.
///
/// Returns no errors when `input` parses, otherwise exactly one.
pub fn validate_id(schema: &IdSchema, input: &str, field: &str) -> Vec<ValidationError> {
    validate_kinds(schema, input)
        .into_iter()
        .map(|error| ValidationError {
            field: field.to_string(),
            error,
        })
        .collect()
}
