//! Azure Authentication
//!
//! Obtains ARM access tokens from the Azure CLI (`az account get-access-token`),
//! so azq works with whatever login the user already has (`az login`, managed
//! identity through the CLI, etc.).

use anyhow::{Context, Result};
use serde::Deserialize;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::RwLock;

/// Token expiry buffer - refresh tokens this much before they actually expire
/// This prevents using tokens that are about to expire during a request
const TOKEN_EXPIRY_BUFFER: Duration = Duration::from_secs(60);

/// Default token TTL if we can't determine expiry (conservative: 30 minutes)
const DEFAULT_TOKEN_TTL: Duration = Duration::from_secs(30 * 60);

/// Azure credentials holder with token caching
#[derive(Clone, Default)]
pub struct AzureCredentials {
    token_cache: Arc<RwLock<Option<CachedToken>>>,
}

#[derive(Clone)]
struct CachedToken {
    token: String,
    /// When this token expires (with buffer applied)
    expires_at: Instant,
}

impl CachedToken {
    /// Check if this cached token is still valid
    fn is_valid(&self) -> bool {
        Instant::now() < self.expires_at
    }
}

/// Relevant subset of `az account get-access-token` output
#[derive(Deserialize)]
struct AccessTokenResponse {
    #[serde(rename = "accessToken")]
    access_token: String,
}

impl AzureCredentials {
    /// Create an empty credentials holder (no token fetched yet)
    pub fn new() -> Self {
        Self {
            token_cache: Arc::new(RwLock::new(None)),
        }
    }

    /// Get an access token for ARM API calls
    /// Security: Checks token expiry before returning cached token
    pub async fn get_token(&self) -> Result<String> {
        // Check cache first - but only return if token is still valid
        {
            let cache = self.token_cache.read().await;
            if let Some(cached) = cache.as_ref() {
                if cached.is_valid() {
                    return Ok(cached.token.clone());
                }
                // Token expired or about to expire, will fetch new one
                tracing::debug!("Cached token expired, fetching new token");
            }
        }

        let token_str = fetch_cli_token().await?;

        // The CLI reports expiry in local-time text; a conservative TTL with a
        // buffer avoids parsing it and never serves a stale token
        let expires_at = Instant::now() + DEFAULT_TOKEN_TTL - TOKEN_EXPIRY_BUFFER;

        {
            let mut cache = self.token_cache.write().await;
            *cache = Some(CachedToken {
                token: token_str.clone(),
                expires_at,
            });
        }

        tracing::debug!(
            "New token cached, expires in ~{} minutes",
            (DEFAULT_TOKEN_TTL - TOKEN_EXPIRY_BUFFER).as_secs() / 60
        );

        Ok(token_str)
    }
}

/// Fetch a fresh token by shelling out to the Azure CLI
async fn fetch_cli_token() -> Result<String> {
    for cmd in az_command_candidates() {
        let output = tokio::process::Command::new(cmd)
            .args(["account", "get-access-token", "--output", "json"])
            .output()
            .await;

        match output {
            Ok(output) if output.status.success() => {
                let parsed: AccessTokenResponse = serde_json::from_slice(&output.stdout)
                    .context("Failed to parse 'az account get-access-token' output")?;
                return Ok(parsed.access_token);
            }
            Ok(output) => {
                tracing::debug!(
                    "'{}' failed: {}",
                    cmd,
                    String::from_utf8_lossy(&output.stderr).trim()
                );
            }
            Err(e) => {
                tracing::debug!("Failed to execute '{}': {}", cmd, e);
            }
        }
    }

    Err(anyhow::anyhow!(
        "Could not get an access token from the Azure CLI. Run 'az login' first."
    ))
}

/// Command names to try for the Azure CLI, in order
fn az_command_candidates() -> &'static [&'static str] {
    if cfg!(windows) {
        // On Windows the CLI installs as a .cmd shim
        &["az.cmd", "az", "az.exe"]
    } else {
        &["az"]
    }
}

/// Get the default subscription ID from the Azure CLI, if one is selected
pub fn get_default_subscription() -> Option<String> {
    for cmd in az_command_candidates() {
        let output = std::process::Command::new(cmd)
            .args(["account", "show", "--output", "json"])
            .output();

        if let Ok(output) = output {
            if output.status.success() {
                let account: serde_json::Value = serde_json::from_slice(&output.stdout).ok()?;
                return account
                    .get("id")
                    .and_then(|v| v.as_str())
                    .map(|s| s.to_string());
            }
        }
    }
    None
}
