//! Importing existing resources by identifier.
//!
//! An import supplies either an identifier string or the identity data the
//! identifier is built from. Either way the result is validated against the
//! registered schema before anything else happens.

use std::collections::BTreeMap;
use std::fmt;

use thiserror::Error;
use tracing::debug;

use crate::error::{IdError, RegistryError};
use crate::identity::ResourceIdentity;
use crate::registry::IdRegistry;

/// What an import was given.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImportSource {
    /// A raw identifier string.
    Id(String),
    /// Segment values keyed by segment name.
    Identity(BTreeMap<String, String>),
}

/// Errors from importing a resource.
#[derive(Debug, Error)]
pub enum ImportError {
    /// The identifier did not parse as the requested type.
    #[error("importing '{input}': {source}")]
    Parse {
        input: String,
        #[source]
        source: IdError,
    },

    /// Identity data did not build an identifier of the requested type.
    #[error("importing {resource_type} from identity data: {source}")]
    Identity {
        resource_type: String,
        #[source]
        source: IdError,
    },

    /// Neither an identifier nor any identity values were supplied.
    #[error("nothing to import: the identifier and identity data are both empty")]
    EmptySource,

    #[error(transparent)]
    Registry(RegistryError),

    /// The post-import step refused the identity.
    #[error("import rejected: {0}")]
    Rejected(String),
}

impl ImportError {
    /// The identifier error behind this failure, if any.
    pub fn id_error(&self) -> Option<&IdError> {
        match self {
            ImportError::Parse { source, .. } | ImportError::Identity { source, .. } => {
                Some(source)
            }
            ImportError::Registry(err) => err.id_error(),
            ImportError::EmptySource | ImportError::Rejected(_) => None,
        }
    }
}

/// Type-directed importer over a registry.
pub struct Importer<'a> {
    registry: &'a IdRegistry,
}

impl fmt::Debug for Importer<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Importer")
            .field("types", &self.registry.len())
            .finish()
    }
}

impl<'a> Importer<'a> {
    pub fn new(registry: &'a IdRegistry) -> Self {
        Self { registry }
    }

    /// Parses `raw_id` as `type_name`.
    pub fn import(
        &self,
        type_name: &str,
        raw_id: &str,
    ) -> Result<Box<dyn ResourceIdentity>, ImportError> {
        debug!(resource_type = type_name, id = raw_id, "Importing resource - parsing");

        let entry = self
            .registry
            .entry(type_name)
            .ok_or_else(|| ImportError::Registry(RegistryError::UnknownType(type_name.to_string())))?;

        entry.parse(raw_id).map_err(|source| ImportError::Parse {
            input: raw_id.to_string(),
            source,
        })
    }

    /// Imports `raw_id`, then hands the validated identity to `then`.
    ///
    /// `then` never runs for an identifier that fails to parse.
    pub fn import_then<T, E, F>(&self, type_name: &str, raw_id: &str, then: F) -> Result<T, ImportError>
    where
        F: FnOnce(&dyn ResourceIdentity) -> Result<T, E>,
        E: fmt::Display,
    {
        let identity = self.import(type_name, raw_id)?;
        then(identity.as_ref()).map_err(|err| ImportError::Rejected(err.to_string()))
    }

    /// Imports from either an identifier string or identity data.
    pub fn import_identity(
        &self,
        type_name: &str,
        source: &ImportSource,
    ) -> Result<Box<dyn ResourceIdentity>, ImportError> {
        match source {
            ImportSource::Id(raw_id) if raw_id.is_empty() => Err(ImportError::EmptySource),
            ImportSource::Id(raw_id) => self.import(type_name, raw_id),
            ImportSource::Identity(values) if values.is_empty() => Err(ImportError::EmptySource),
            ImportSource::Identity(values) => {
                debug!(
                    resource_type = type_name,
                    fields = values.len(),
                    "Importing resource - building from identity"
                );
                self.registry
                    .build(type_name, values)
                    .map_err(|err| match err {
                        RegistryError::Id(source) => ImportError::Identity {
                            resource_type: type_name.to_string(),
                            source,
                        },
                        other => ImportError::Registry(other),
                    })
            }
        }
    }
}
