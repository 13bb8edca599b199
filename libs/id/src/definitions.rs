//! Schema definitions loaded from TOML.
//!
//! Resource types that have no typed record can still be registered from a
//! definitions document:
//!
//! ```toml
//! [[resource]]
//! type_name = "ScopedLockId"
//! display_name = "Scoped Lock"
//! template = "/{*scope}/providers/Microsoft.Authorization/locks/{lockName}"
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::error::SchemaError;
use crate::schema::IdSchema;

/// Errors from loading schema definitions.
#[derive(Debug, Error)]
pub enum DefinitionError {
    #[error("failed to read definitions from {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse definitions: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("invalid definition for '{type_name}': {source}")]
    Schema {
        type_name: String,
        #[source]
        source: SchemaError,
    },
}

/// One resource type declared by template.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchemaDefinition {
    pub type_name: String,

    /// Defaults to the type name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,

    pub template: String,
}

impl SchemaDefinition {
    pub fn to_schema(&self) -> Result<IdSchema, DefinitionError> {
        let display_name = self.display_name.as_deref().unwrap_or(&self.type_name);
        IdSchema::from_template(&self.type_name, display_name, &self.template).map_err(|source| {
            DefinitionError::Schema {
                type_name: self.type_name.clone(),
                source,
            }
        })
    }
}

/// A definitions document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchemaDefinitions {
    #[serde(default, rename = "resource")]
    pub resources: Vec<SchemaDefinition>,
}

impl SchemaDefinitions {
    pub fn from_toml_str(content: &str) -> Result<Self, DefinitionError> {
        Ok(toml::from_str(content)?)
    }

    /// Loads definitions from a file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, DefinitionError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| DefinitionError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&content)
    }

    pub fn len(&self) -> usize {
        self.resources.len()
    }

    pub fn is_empty(&self) -> bool {
        self.resources.is_empty()
    }

    /// Converts every definition, failing on the first invalid template.
    pub fn to_schemas(&self) -> Result<Vec<IdSchema>, DefinitionError> {
        self.resources.iter().map(SchemaDefinition::to_schema).collect()
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;
    use crate::registry::IdRegistry;

    const LOCKS: &str = r#"
[[resource]]
type_name = "ScopedLockId"
display_name = "Scoped Lock"
template = "/{*scope}/providers/Microsoft.Authorization/locks/{lockName}"

[[resource]]
type_name = "KeyVaultId"
template = "/subscriptions/{subscriptionId}/resourceGroups/{resourceGroupName}/providers/Microsoft.KeyVault/vaults/{vaultName}"
"#;

    #[test]
    fn test_parse_document() {
        let defs = SchemaDefinitions::from_toml_str(LOCKS).unwrap();
        assert_eq!(defs.len(), 2);
        assert_eq!(defs.resources[1].display_name, None);

        let schemas = defs.to_schemas().unwrap();
        assert_eq!(schemas[0].display_name(), "Scoped Lock");
        assert_eq!(schemas[1].display_name(), "KeyVaultId");
    }

    #[test]
    fn test_empty_document() {
        let defs = SchemaDefinitions::from_toml_str("").unwrap();
        assert!(defs.is_empty());
    }

    #[test]
    fn test_invalid_template() {
        let defs = SchemaDefinitions::from_toml_str(
            r#"
[[resource]]
type_name = "BrokenId"
template = "/subscriptions/{subscriptionId"
"#,
        )
        .unwrap();
        let err = defs.to_schemas().unwrap_err();
        assert!(matches!(err, DefinitionError::Schema { ref type_name, .. } if type_name == "BrokenId"));
    }

    #[test]
    fn test_malformed_toml() {
        let err = SchemaDefinitions::from_toml_str("[[resource]\n").unwrap_err();
        assert!(matches!(err, DefinitionError::Toml(_)));
    }

    #[test]
    fn test_load_from_file_into_registry() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(LOCKS.as_bytes()).unwrap();

        let defs = SchemaDefinitions::load(file.path()).unwrap();
        let registry = IdRegistry::builder()
            .with_builtin_types()
            .with_definitions(&defs)
            .unwrap()
            .build()
            .unwrap();
        assert_eq!(registry.len(), 10);

        let identity = registry
            .identify("/subscriptions/sub1/resourceGroups/rg1/providers/Microsoft.Authorization/locks/lock1")
            .unwrap();
        assert_eq!(identity.type_name(), "ScopedLockId");
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = SchemaDefinitions::load(dir.path().join("missing.toml")).unwrap_err();
        assert!(matches!(err, DefinitionError::Io { .. }));
    }
}
