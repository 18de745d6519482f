//! Azure Resource Manager interaction module
//!
//! This module provides the core functionality for talking to Azure Resource
//! Manager (ARM), including authentication, the HTTP client, and URL building.
//!
//! # Module Structure
//!
//! - [`auth`] - Azure authentication via the `az` CLI token flow
//! - [`client`] - Main ARM client for making API requests
//! - [`http`] - HTTP utilities for REST API calls
//!
//! # Example
//!
//! ```ignore
//! use crate::azure::client::AzureClient;
//!
//! async fn example() -> anyhow::Result<()> {
//!     let client = AzureClient::new("00000000-0000-0000-0000-000000000000").await?;
//!     let url = client.list_url("Microsoft.Compute/virtualMachines", "2023-03-01", None);
//!     let vms = client.get(&url).await?;
//!     Ok(())
//! }
//! ```

pub mod auth;
pub mod client;
pub mod http;
