//! azq - command-line explorer for Azure resources
//!
//! Lists resources across a subscription (or one resource group) and searches
//! every fetched document for a case-insensitive substring, either returning
//! whole matching records (`search`) or the individual key/value pairs that
//! matched (`subsearch`).

pub mod azure;
pub mod config;
pub mod output;
pub mod query;
pub mod resource;
