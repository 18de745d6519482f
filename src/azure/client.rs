//! Azure Client
//!
//! Main client for interacting with ARM APIs, combining authentication,
//! HTTP functionality, and URL building for the two query scopes.

use super::auth::AzureCredentials;
use super::http::AzureHttpClient;
use anyhow::{Context, Result};
use serde_json::Value;

/// Base endpoint for Azure Resource Manager
pub const ARM_ENDPOINT: &str = "https://management.azure.com";

/// Main Azure client, bound to one subscription
#[derive(Clone)]
pub struct AzureClient {
    pub credentials: AzureCredentials,
    pub http: AzureHttpClient,
    pub subscription_id: String,
}

impl AzureClient {
    /// Create a new Azure client and verify credentials are usable
    pub async fn new(subscription_id: &str) -> Result<Self> {
        let credentials = AzureCredentials::new();

        // Fail fast if the CLI login is missing rather than on the first query
        credentials
            .get_token()
            .await
            .context("Failed to authenticate with Azure")?;

        let http = AzureHttpClient::new()?;

        Ok(Self {
            credentials,
            http,
            subscription_id: subscription_id.to_string(),
        })
    }

    /// Get the current access token
    pub async fn get_token(&self) -> Result<String> {
        self.credentials.get_token().await
    }

    /// Make a GET request to an ARM API
    pub async fn get(&self, url: &str) -> Result<Value> {
        let token = self.get_token().await?;
        self.http.get(url, &token).await
    }

    /// Build the list URL for a provider type, optionally scoped to a resource group
    pub fn list_url(
        &self,
        provider_type: &str,
        api_version: &str,
        resource_group: Option<&str>,
    ) -> String {
        match resource_group {
            Some(rg) => format!(
                "{}/subscriptions/{}/resourceGroups/{}/providers/{}?api-version={}",
                ARM_ENDPOINT,
                self.subscription_id,
                urlencoding::encode(rg),
                provider_type,
                api_version
            ),
            None => format!(
                "{}/subscriptions/{}/providers/{}?api-version={}",
                ARM_ENDPOINT, self.subscription_id, provider_type, api_version
            ),
        }
    }

    /// Build the URL for a single named resource within a resource group
    pub fn resource_url(
        &self,
        provider_type: &str,
        api_version: &str,
        resource_group: &str,
        name: &str,
    ) -> String {
        format!(
            "{}/subscriptions/{}/resourceGroups/{}/providers/{}/{}?api-version={}",
            ARM_ENDPOINT,
            self.subscription_id,
            urlencoding::encode(resource_group),
            provider_type,
            urlencoding::encode(name),
            api_version
        )
    }
}

/// Format an ARM API error for display
pub fn format_azure_error(error: &anyhow::Error) -> String {
    super::http::format_azure_error(error)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_client() -> AzureClient {
        AzureClient {
            credentials: AzureCredentials::new(),
            http: AzureHttpClient::default(),
            subscription_id: "sub-123".to_string(),
        }
    }

    #[test]
    fn list_url_subscription_scope() {
        let client = test_client();
        let url = client.list_url("Microsoft.Network/virtualNetworks", "2023-05-01", None);
        assert_eq!(
            url,
            "https://management.azure.com/subscriptions/sub-123/providers/Microsoft.Network/virtualNetworks?api-version=2023-05-01"
        );
    }

    #[test]
    fn list_url_resource_group_scope() {
        let client = test_client();
        let url = client.list_url(
            "Microsoft.Compute/virtualMachines",
            "2023-03-01",
            Some("my-rg"),
        );
        assert_eq!(
            url,
            "https://management.azure.com/subscriptions/sub-123/resourceGroups/my-rg/providers/Microsoft.Compute/virtualMachines?api-version=2023-03-01"
        );
    }

    #[test]
    fn resource_group_names_are_percent_encoded() {
        let client = test_client();
        let url = client.list_url(
            "Microsoft.Compute/virtualMachines",
            "2023-03-01",
            Some("rg with spaces"),
        );
        assert!(url.contains("resourceGroups/rg%20with%20spaces/"));
    }

    #[test]
    fn resource_url_includes_name() {
        let client = test_client();
        let url = client.resource_url(
            "Microsoft.Network/virtualNetworks",
            "2023-05-01",
            "prod-rg",
            "web-vnet",
        );
        assert_eq!(
            url,
            "https://management.azure.com/subscriptions/sub-123/resourceGroups/prod-rg/providers/Microsoft.Network/virtualNetworks/web-vnet?api-version=2023-05-01"
        );
    }
}
