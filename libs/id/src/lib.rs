//! # armid
//!
//! Schemas, parsing, formatting, and validation for Azure Resource Manager
//! resource identifiers.
//!
//! ## Design Principles
//!
//! - Schemas are data: one engine serves every resource type
//! - Literal keys match case-insensitively; values are opaque and kept verbatim
//! - Identifiers round-trip (format → parse → format) in canonical key casing
//! - Typed records prevent mixing identifiers of different resource types
//!
//! ## ID Format
//!
//! Identifiers are slash-delimited paths of alternating keys and values:
//!
//! ```text
//! /subscriptions/{subscriptionId}
//!     /resourceGroups/{resourceGroupName}
//!     /providers/{namespace}/{collection}/{name}[/{childCollection}/{childName}...]
//! ```
//!
//! Examples:
//! - `/subscriptions/12345678-1234-9876-4563-123456789012`
//! - `/subscriptions/12345678-1234-9876-4563-123456789012/resourceGroups/rg1/providers/Microsoft.Network/publicIPPrefixes/prefix1`
//! - `/providers/Microsoft.Management/managementGroups/group1/providers/Microsoft.Authorization/roleAssignments/ra1`
//!
//! An identifier that was upper-cased as a whole is rejected: once the
//! values lost their casing there is no way to recover them.

mod definitions;
mod error;
pub mod formatter;
mod identity;
mod import;
mod macros;
pub mod parser;
mod registry;
mod schema;
mod segment;
mod types;
mod validate;

#[cfg(test)]
mod proptests;

pub use definitions::{DefinitionError, SchemaDefinition, SchemaDefinitions};
pub use error::{IdError, RegistryError, SchemaError, ValidationError};
pub use identity::{ParsedId, ResourceId, ResourceIdentity, SchemaIdentity};
pub use import::{ImportError, ImportSource, Importer};
pub use registry::{IdRegistry, IdRegistryBuilder, RegistryEntry};
pub use schema::IdSchema;
pub use segment::{Segment, SegmentKind};
pub use types::*;
pub use validate::{validate_id, validate_kinds};
