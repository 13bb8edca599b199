//! Typed identifier definitions for the supported resource types.
//!
//! Each type is a template registered once; parsing, formatting and
//! validation all run through the shared engine.

use crate::macros::define_resource_id;

// =============================================================================
// Resource Manager
// =============================================================================

define_resource_id!(
    /// A subscription.
    SubscriptionId,
    "Subscription",
    "/subscriptions/{subscriptionId}",
    { subscription_id => "subscriptionId" }
);

define_resource_id!(
    /// A resource group.
    ResourceGroupId,
    "Resource Group",
    "/subscriptions/{subscriptionId}/resourceGroups/{resourceGroupName}",
    { subscription_id => "subscriptionId", resource_group => "resourceGroupName" }
);

// =============================================================================
// Authorization
// =============================================================================

define_resource_id!(
    /// A role assignment at any scope: a subscription, a resource group,
    /// a management group or an individual resource.
    ScopedRoleAssignmentId,
    "Scoped Role Assignment",
    "/{*scope}/providers/Microsoft.Authorization/roleAssignments/{roleAssignmentName}",
    { scope => "scope", role_assignment_name => "roleAssignmentName" }
);

// =============================================================================
// Policy
// =============================================================================

define_resource_id!(
    /// A policy remediation scoped to a resource group.
    ResourceGroupPolicyRemediationId,
    "Resource Group Policy Remediation",
    "/subscriptions/{subscriptionId}/resourceGroups/{resourceGroupName}/providers/Microsoft.PolicyInsights/remediations/{remediationName}",
    {
        subscription_id => "subscriptionId",
        resource_group => "resourceGroupName",
        remediation_name => "remediationName",
    }
);

// =============================================================================
// Cosmos DB
// =============================================================================

define_resource_id!(
    MongodbDatabaseId,
    "Mongodb Database",
    "/subscriptions/{subscriptionId}/resourceGroups/{resourceGroupName}/providers/Microsoft.DocumentDB/databaseAccounts/{databaseAccountName}/mongodbDatabases/{name}",
    {
        subscription_id => "subscriptionId",
        resource_group => "resourceGroupName",
        database_account_name => "databaseAccountName",
        name => "name",
    }
);

// =============================================================================
// Data Factory
// =============================================================================

define_resource_id!(
    ManagedPrivateEndpointId,
    "Managed Private Endpoint",
    "/subscriptions/{subscriptionId}/resourceGroups/{resourceGroupName}/providers/Microsoft.DataFactory/factories/{factoryName}/managedVirtualNetworks/{managedVirtualNetworkName}/managedPrivateEndpoints/{name}",
    {
        subscription_id => "subscriptionId",
        resource_group => "resourceGroupName",
        factory_name => "factoryName",
        managed_virtual_network_name => "managedVirtualNetworkName",
        name => "name",
    }
);

// =============================================================================
// Network
// =============================================================================

define_resource_id!(
    PublicIpPrefixId,
    "Public IP Prefix",
    "/subscriptions/{subscriptionId}/resourceGroups/{resourceGroupName}/providers/Microsoft.Network/publicIPPrefixes/{publicIpPrefixName}",
    {
        subscription_id => "subscriptionId",
        resource_group => "resourceGroupName",
        public_ip_prefix_name => "publicIpPrefixName",
    }
);

// =============================================================================
// App Service
// =============================================================================

define_resource_id!(
    /// The FTP or SCM basic publishing credentials policy of a web app.
    /// The policy name is a fixed, case-sensitive constant.
    SitePublishingCredentialsPolicyId,
    "Site Publishing Credentials Policy",
    "/subscriptions/{subscriptionId}/resourceGroups/{resourceGroupName}/providers/Microsoft.Web/sites/{siteName}/basicPublishingCredentialsPolicies/{policyName:ftp|scm}",
    {
        subscription_id => "subscriptionId",
        resource_group => "resourceGroupName",
        site_name => "siteName",
        policy_name => "policyName",
    }
);

// =============================================================================
// Tests
// =============================================================================
