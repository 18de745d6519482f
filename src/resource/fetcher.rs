//! Resource Fetcher
//!
//! Fetches resource documents from ARM list endpoints, following `nextLink`
//! pagination, and exposes the [`Fetch`] seam the query dispatcher runs
//! against so it can be tested without the network.

use super::registry::ResourceType;
use crate::azure::client::AzureClient;
use anyhow::Result;
use serde_json::Value;

/// Boundary of a query: the whole subscription or one resource group
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Scope {
    Subscription,
    ResourceGroup(String),
}

impl Scope {
    /// The resource group this scope is bound to, if any
    pub fn resource_group(&self) -> Option<&str> {
        match self {
            Scope::Subscription => None,
            Scope::ResourceGroup(rg) => Some(rg),
        }
    }
}

/// Source of resource documents for one canonical type under a scope
#[allow(async_fn_in_trait)]
pub trait Fetch {
    async fn fetch(
        &self,
        resource_type: &'static ResourceType,
        scope: &Scope,
    ) -> Result<Vec<Value>>;
}

/// Production fetcher backed by ARM
pub struct ArmFetcher {
    client: AzureClient,
}

impl ArmFetcher {
    pub fn new(client: AzureClient) -> Self {
        Self { client }
    }
}

impl Fetch for ArmFetcher {
    async fn fetch(
        &self,
        resource_type: &'static ResourceType,
        scope: &Scope,
    ) -> Result<Vec<Value>> {
        fetch_resources(&self.client, resource_type, scope).await
    }
}

/// Fetch all resources of one type under the given scope (auto-paginate)
pub async fn fetch_resources(
    client: &AzureClient,
    resource_type: &ResourceType,
    scope: &Scope,
) -> Result<Vec<Value>> {
    let mut url = client.list_url(
        resource_type.canonical,
        resource_type.api_version,
        scope.resource_group(),
    );
    let mut all_items = Vec::new();

    loop {
        let response = client.get(&url).await?;
        all_items.extend(extract_items(&response));

        // ARM pagination: follow nextLink until it disappears
        match response.get("nextLink").and_then(|v| v.as_str()) {
            Some(next) => url = next.to_string(),
            None => break,
        }
    }

    tracing::debug!(
        "Fetched {} {} resources",
        all_items.len(),
        resource_type.canonical
    );

    Ok(all_items)
}

/// Fetch a single named resource within a resource group
pub async fn fetch_named(
    client: &AzureClient,
    resource_type: &ResourceType,
    resource_group: &str,
    name: &str,
) -> Result<Value> {
    let url = client.resource_url(
        resource_type.canonical,
        resource_type.api_version,
        resource_group,
        name,
    );
    client.get(&url).await
}

/// Extract the document list from an ARM list response body
fn extract_items(response: &Value) -> Vec<Value> {
    response
        .get("value")
        .and_then(|v| v.as_array())
        .cloned()
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn extract_items_reads_value_array() {
        let response = json!({
            "value": [
                {"name": "vm-1"},
                {"name": "vm-2"}
            ]
        });
        let items = extract_items(&response);
        assert_eq!(items.len(), 2);
        assert_eq!(items[0]["name"], "vm-1");
    }

    #[test]
    fn extract_items_handles_missing_or_malformed_value() {
        assert!(extract_items(&json!({})).is_empty());
        assert!(extract_items(&json!({"value": "not-an-array"})).is_empty());
        assert!(extract_items(&Value::Null).is_empty());
    }

    #[test]
    fn scope_exposes_resource_group() {
        assert_eq!(Scope::Subscription.resource_group(), None);
        assert_eq!(
            Scope::ResourceGroup("prod-rg".to_string()).resource_group(),
            Some("prod-rg")
        );
    }
}
