//! Query engine
//!
//! The part of azq that answers questions about fetched resource documents:
//!
//! - [`matcher`] - Depth-first substring matching over nested JSON documents
//! - [`path`] - Resolves dotted/bracketed paths back to a single value
//! - [`dispatcher`] - Maps CLI commands to fetches and matcher runs

pub mod dispatcher;
pub mod matcher;
pub mod path;

pub use dispatcher::{dispatch, Command, DispatchOutcome, QueryError, Record, TypeFailure};
pub use matcher::{match_document, FieldMatch, MatchMode, MatchResult, Predicate};
pub use path::{resolve_path, PathError};
