//! The identity registry: schemas and constructors keyed by resource type.
//!
//! A registry is assembled once through [`IdRegistryBuilder`] and is
//! read-only afterwards. Components that need type-directed parsing (an
//! importer, a CLI) borrow it; there is no process-wide table.

use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

use tracing::debug;

use crate::definitions::{DefinitionError, SchemaDefinitions};
use crate::error::{IdError, RegistryError, ValidationError};
use crate::identity::{ParsedId, ResourceId, ResourceIdentity, SchemaIdentity};
use crate::schema::IdSchema;
use crate::types::{
    ManagedPrivateEndpointId, MongodbDatabaseId, PublicIpPrefixId, ResourceGroupId,
    ResourceGroupPolicyRemediationId, ScopedRoleAssignmentId, SitePublishingCredentialsPolicyId,
    SubscriptionId,
};
use crate::{parser, validate};

type Constructor = fn(&Arc<IdSchema>, &ParsedId) -> Result<Box<dyn ResourceIdentity>, IdError>;

/// One registered resource type.
#[derive(Debug, Clone)]
pub struct RegistryEntry {
    schema: Arc<IdSchema>,
    construct: Constructor,
}

impl RegistryEntry {
    pub fn schema(&self) -> &IdSchema {
        &self.schema
    }

    pub fn type_name(&self) -> &str {
        self.schema.type_name()
    }

    /// Builds this type's identity record from parsed values.
    pub fn construct(&self, parsed: &ParsedId) -> Result<Box<dyn ResourceIdentity>, IdError> {
        (self.construct)(&self.schema, parsed)
    }

    /// Parses `input` and builds the identity record.
    pub fn parse(&self, input: &str) -> Result<Box<dyn ResourceIdentity>, IdError> {
        let parsed = parser::parse(&self.schema, input)?;
        self.construct(&parsed)
    }
}

fn construct_typed<T>(
    _schema: &Arc<IdSchema>,
    parsed: &ParsedId,
) -> Result<Box<dyn ResourceIdentity>, IdError>
where
    T: ResourceId + ResourceIdentity,
{
    Ok(Box::new(T::from_parsed(parsed)?))
}

fn construct_generic(
    schema: &Arc<IdSchema>,
    parsed: &ParsedId,
) -> Result<Box<dyn ResourceIdentity>, IdError> {
    Ok(Box::new(SchemaIdentity::new(Arc::clone(schema), parsed.clone())))
}

/// Collects schemas before the registry is frozen.
#[derive(Debug, Default)]
pub struct IdRegistryBuilder {
    entries: Vec<RegistryEntry>,
}

impl IdRegistryBuilder {
    /// Registers a typed record; parses of this type yield `T`.
    #[must_use]
    pub fn with_type<T>(mut self) -> Self
    where
        T: ResourceId + ResourceIdentity,
    {
        self.entries.push(RegistryEntry {
            schema: Arc::new(T::schema().clone()),
            construct: construct_typed::<T>,
        });
        self
    }

    /// Registers a schema without a typed record; parses yield a [`SchemaIdentity`].
    #[must_use]
    pub fn with_schema(mut self, schema: IdSchema) -> Self {
        self.entries.push(RegistryEntry {
            schema: Arc::new(schema),
            construct: construct_generic,
        });
        self
    }

    /// Registers every schema in a definitions document.
    pub fn with_definitions(self, definitions: &SchemaDefinitions) -> Result<Self, DefinitionError> {
        let schemas = definitions.to_schemas()?;
        Ok(schemas
            .into_iter()
            .fold(self, |builder, schema| builder.with_schema(schema)))
    }

    /// Registers the typed records shipped with this crate.
    #[must_use]
    pub fn with_builtin_types(self) -> Self {
        self.with_type::<SubscriptionId>()
            .with_type::<ResourceGroupId>()
            .with_type::<ScopedRoleAssignmentId>()
            .with_type::<ResourceGroupPolicyRemediationId>()
            .with_type::<MongodbDatabaseId>()
            .with_type::<ManagedPrivateEndpointId>()
            .with_type::<PublicIpPrefixId>()
            .with_type::<SitePublishingCredentialsPolicyId>()
    }

    /// Freezes the registry, rejecting duplicate type names and shapes.
    pub fn build(self) -> Result<IdRegistry, RegistryError> {
        let mut by_name = HashMap::with_capacity(self.entries.len());
        let mut by_shape: HashMap<String, usize> = HashMap::with_capacity(self.entries.len());

        for (index, entry) in self.entries.iter().enumerate() {
            let type_name = entry.type_name();
            if by_name.insert(type_name.to_string(), index).is_some() {
                return Err(RegistryError::DuplicateType(type_name.to_string()));
            }

            let shape = entry.schema.discriminator();
            if let Some(&existing) = by_shape.get(&shape) {
                return Err(RegistryError::DuplicateShape {
                    existing: self.entries[existing].type_name().to_string(),
                    duplicate: type_name.to_string(),
                    shape,
                });
            }
            by_shape.insert(shape, index);
        }

        debug!(types = self.entries.len(), "identity registry built");

        Ok(IdRegistry {
            entries: self.entries,
            by_name,
        })
    }
}

/// A read-only mapping from resource type names to schemas and constructors.
#[derive(Debug, Clone)]
pub struct IdRegistry {
    entries: Vec<RegistryEntry>,
    by_name: HashMap<String, usize>,
}

impl IdRegistry {
    pub fn builder() -> IdRegistryBuilder {
        IdRegistryBuilder::default()
    }

    /// A registry holding the typed records shipped with this crate.
    pub fn builtin() -> Result<Self, RegistryError> {
        Self::builder().with_builtin_types().build()
    }

    pub fn entry(&self, type_name: &str) -> Option<&RegistryEntry> {
        self.by_name.get(type_name).map(|&index| &self.entries[index])
    }

    pub fn get(&self, type_name: &str) -> Option<&IdSchema> {
        self.entry(type_name).map(RegistryEntry::schema)
    }

    fn require(&self, type_name: &str) -> Result<&RegistryEntry, RegistryError> {
        self.entry(type_name)
            .ok_or_else(|| RegistryError::UnknownType(type_name.to_string()))
    }

    /// Parses `input` as `type_name`.
    pub fn parse(
        &self,
        type_name: &str,
        input: &str,
    ) -> Result<Box<dyn ResourceIdentity>, RegistryError> {
        Ok(self.require(type_name)?.parse(input)?)
    }

    /// Parses `input` as `type_name`, returning the raw segment values.
    pub fn parse_values(&self, type_name: &str, input: &str) -> Result<ParsedId, RegistryError> {
        let entry = self.require(type_name)?;
        Ok(parser::parse(entry.schema(), input)?)
    }

    /// Builds an identity of `type_name` from named values.
    pub fn build(
        &self,
        type_name: &str,
        values: &BTreeMap<String, String>,
    ) -> Result<Box<dyn ResourceIdentity>, RegistryError> {
        let entry = self.require(type_name)?;
        let parsed = entry.schema().build(values)?;
        Ok(entry.construct(&parsed)?)
    }

    /// Validates `input` as `type_name` for the configuration field `field`.
    pub fn validate(
        &self,
        type_name: &str,
        input: &str,
        field: &str,
    ) -> Result<Vec<ValidationError>, RegistryError> {
        let entry = self.require(type_name)?;
        Ok(validate::validate_id(entry.schema(), input, field))
    }

    /// Finds the registered type that accepts `input`, in registration order.
    pub fn identify(&self, input: &str) -> Result<Box<dyn ResourceIdentity>, RegistryError> {
        for entry in &self.entries {
            if let Ok(parsed) = parser::parse(entry.schema(), input) {
                debug!(resource_type = entry.type_name(), "identifier matched registered type");
                return Ok(entry.construct(&parsed)?);
            }
        }
        Err(RegistryError::NoMatch(input.to_string()))
    }

    /// Registered schemas, in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &IdSchema> {
        self.entries.iter().map(RegistryEntry::schema)
    }

    pub fn type_names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(RegistryEntry::type_name)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SUB: &str = "12345678-1234-9876-4563-123456789012";

    fn lock_schema() -> IdSchema {
        IdSchema::from_template(
            "ScopedLockId",
            "Scoped Lock",
            "/{*scope}/providers/Microsoft.Authorization/locks/{lockName}",
        )
        .unwrap()
    }

    #[test]
    fn test_builtin_registry() {
        let registry = IdRegistry::builtin().unwrap();
        assert_eq!(registry.len(), 8);
        assert!(registry.get("MongodbDatabaseId").is_some());
        assert!(registry.get("mongodbdatabaseid").is_none());
    }

    #[test]
    fn test_parse_yields_typed_record() {
        let registry = IdRegistry::builtin().unwrap();
        let input = format!("/subscriptions/{SUB}/resourceGroups/resGroup1/providers/Microsoft.DocumentDB/databaseAccounts/acc1/mongodbDatabases/db1");
        let identity = registry.parse("MongodbDatabaseId", &input).unwrap();
        let typed = identity
            .as_any()
            .downcast_ref::<MongodbDatabaseId>()
            .unwrap();
        assert_eq!(typed.database_account_name, "acc1");
        assert_eq!(identity.id(), input);
    }

    #[test]
    fn test_unknown_type() {
        let registry = IdRegistry::builtin().unwrap();
        let err = registry.parse("NopeId", "/subscriptions/sub1").unwrap_err();
        assert_eq!(err, RegistryError::UnknownType("NopeId".to_string()));
    }

    #[test]
    fn test_parse_error_is_wrapped() {
        let registry = IdRegistry::builtin().unwrap();
        let err = registry.parse("ResourceGroupId", "").unwrap_err();
        assert_eq!(err.id_error(), Some(&IdError::missing("subscriptionId")));
    }

    #[test]
    fn test_duplicate_type_name() {
        let err = IdRegistry::builder()
            .with_builtin_types()
            .with_type::<ResourceGroupId>()
            .build()
            .unwrap_err();
        assert_eq!(err, RegistryError::DuplicateType("ResourceGroupId".to_string()));
    }

    #[test]
    fn test_duplicate_shape() {
        let alias = IdSchema::from_template(
            "ResourceGroupAliasId",
            "Resource Group Alias",
            "/SUBSCRIPTIONS/{sub}/RESOURCEGROUPS/{rg}",
        )
        .unwrap();
        let err = IdRegistry::builder()
            .with_builtin_types()
            .with_schema(alias)
            .build()
            .unwrap_err();
        assert!(matches!(
            err,
            RegistryError::DuplicateShape { ref existing, ref duplicate, .. }
                if existing == "ResourceGroupId" && duplicate == "ResourceGroupAliasId"
        ));
    }

    #[test]
    fn test_generic_schema_registration() {
        let registry = IdRegistry::builder()
            .with_schema(lock_schema())
            .build()
            .unwrap();
        let input = format!("/subscriptions/{SUB}/providers/Microsoft.Authorization/locks/lock1");
        let identity = registry.parse("ScopedLockId", &input).unwrap();
        let generic = identity.as_any().downcast_ref::<SchemaIdentity>().unwrap();
        assert_eq!(generic.parsed().get("lockName"), Some("lock1"));
        assert_eq!(identity.id(), input);
    }

    #[test]
    fn test_identify() {
        let registry = IdRegistry::builtin().unwrap();
        let identity = registry
            .identify(&format!("/subscriptions/{SUB}/resourceGroups/resGroup1"))
            .unwrap();
        assert_eq!(identity.type_name(), "ResourceGroupId");

        let identity = registry
            .identify(&format!(
                "/subscriptions/{SUB}/resourceGroups/resGroup1/providers/Microsoft.Authorization/roleAssignments/ra1"
            ))
            .unwrap();
        assert_eq!(identity.type_name(), "ScopedRoleAssignmentId");

        let err = registry.identify("/tenants/t1").unwrap_err();
        assert!(matches!(err, RegistryError::NoMatch(_)));
    }

    #[test]
    fn test_build_and_validate() {
        let registry = IdRegistry::builtin().unwrap();
        let values: BTreeMap<String, String> = [
            ("subscriptionId", SUB),
            ("resourceGroupName", "resGroup1"),
            ("publicIpPrefixName", "prefix1"),
        ]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
        let identity = registry.build("PublicIpPrefixId", &values).unwrap();
        assert!(registry
            .validate("PublicIpPrefixId", &identity.id(), "id")
            .unwrap()
            .is_empty());
        assert_eq!(
            registry
                .validate("PublicIpPrefixId", "/subscriptions/", "id")
                .unwrap()
                .len(),
            1
        );
    }

    #[test]
    fn test_registry_is_shareable() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<IdRegistry>();
        assert_send_sync::<IdSchema>();
    }
}
