//! Resource abstraction layer
//!
//! Knows which Azure resource types azq understands and how to fetch their
//! documents from ARM.
//!
//! - [`registry`] - Static alias table mapping user tokens to canonical ARM types
//! - [`fetcher`] - Fetches resource documents with `nextLink` pagination

pub mod fetcher;
pub mod registry;

pub use fetcher::{fetch_named, fetch_resources, ArmFetcher, Fetch, Scope};
pub use registry::{Category, ResourceType};
