//! Query Dispatcher
//!
//! Turns a CLI-level command into fetcher calls and matcher invocations, and
//! assembles an ordered result set. Multi-type commands fan out one fetch per
//! registered type; fetches run concurrently but results are merged back in
//! canonical registry order, so output is deterministic regardless of which
//! fetch finishes first.
//!
//! A fetch failure for one type does not abort a multi-type command: the
//! remaining types are still processed and the failure is reported alongside
//! the partial results.

use crate::query::matcher::{match_document, FieldMatch, MatchMode, MatchResult, Predicate};
use crate::resource::fetcher::{Fetch, Scope};
use crate::resource::registry::{self, ResourceType};
use serde_json::Value;
use thiserror::Error;

/// The five query commands
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Every resource of every registered type
    ListAll,
    /// Registered types that actually have resources in the scope
    ListTypes,
    /// Resources of one resolved type only
    ListTypesForResource(String),
    /// Full-document search across every type
    Search(String),
    /// Key/value sub-search across every type
    SubSearch(String),
}

/// Errors a dispatch can fail with before any fetch is issued
#[derive(Debug, Error, PartialEq, Eq)]
pub enum QueryError {
    #[error("unknown resource type '{0}'. Run 'azq aliases' to see available types")]
    UnknownResourceType(String),
}

/// One entry in a dispatch result set
#[derive(Debug, Clone, PartialEq)]
pub enum Record {
    /// A listed resource document
    Resource {
        resource_type: &'static str,
        document: Value,
    },
    /// A type present in the scope, with its resource count
    TypeCount {
        resource_type: &'static str,
        count: usize,
    },
    /// A whole document that contained the search term
    DocumentHit {
        resource_type: &'static str,
        document: Value,
    },
    /// A single key/value pair that contained the search term
    FieldHit {
        resource_type: &'static str,
        field: FieldMatch,
    },
}

/// A fetch that failed for one resource type
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeFailure {
    pub resource_type: &'static str,
    pub error: String,
}

/// Ordered records plus the types whose fetch failed
#[derive(Debug, Default)]
pub struct DispatchOutcome {
    pub records: Vec<Record>,
    pub failures: Vec<TypeFailure>,
}

/// Execute a command under the given scope against a fetcher
pub async fn dispatch<F: Fetch>(
    fetcher: &F,
    command: Command,
    scope: &Scope,
) -> Result<DispatchOutcome, QueryError> {
    match command {
        Command::ListAll => Ok(fan_out(fetcher, scope, |rt, documents, records| {
            for document in documents {
                records.push(Record::Resource {
                    resource_type: rt.canonical,
                    document,
                });
            }
        })
        .await),

        Command::ListTypes => Ok(fan_out(fetcher, scope, |rt, documents, records| {
            if !documents.is_empty() {
                records.push(Record::TypeCount {
                    resource_type: rt.canonical,
                    count: documents.len(),
                });
            }
        })
        .await),

        Command::ListTypesForResource(token) => {
            let resource_type = registry::resolve(&token)
                .ok_or_else(|| QueryError::UnknownResourceType(token.clone()))?;

            let mut outcome = DispatchOutcome::default();
            match fetcher.fetch(resource_type, scope).await {
                Ok(documents) => {
                    for document in documents {
                        outcome.records.push(Record::Resource {
                            resource_type: resource_type.canonical,
                            document,
                        });
                    }
                }
                Err(e) => outcome.failures.push(TypeFailure {
                    resource_type: resource_type.canonical,
                    error: e.to_string(),
                }),
            }
            Ok(outcome)
        }

        Command::Search(term) => {
            let predicate = Predicate::new(&term);
            Ok(fan_out(fetcher, scope, |rt, documents, records| {
                for document in &documents {
                    for result in match_document(document, &predicate, MatchMode::Document) {
                        if let MatchResult::Document(document) = result {
                            records.push(Record::DocumentHit {
                                resource_type: rt.canonical,
                                document,
                            });
                        }
                    }
                }
            })
            .await)
        }

        Command::SubSearch(term) => {
            let predicate = Predicate::new(&term);
            Ok(fan_out(fetcher, scope, |rt, documents, records| {
                for document in &documents {
                    for result in match_document(document, &predicate, MatchMode::Field) {
                        if let MatchResult::Field(field) = result {
                            records.push(Record::FieldHit {
                                resource_type: rt.canonical,
                                field,
                            });
                        }
                    }
                }
            })
            .await)
        }
    }
}

/// Fetch every registered type concurrently and fold the per-type results
/// into records in registry order.
///
/// `join_all` returns results in the order the futures were supplied, which
/// is what keeps the merge deterministic without shared mutable accumulation.
async fn fan_out<F, PerType>(fetcher: &F, scope: &Scope, mut per_type: PerType) -> DispatchOutcome
where
    F: Fetch,
    PerType: FnMut(&'static ResourceType, Vec<Value>, &mut Vec<Record>),
{
    let types = registry::all();
    let fetched =
        futures::future::join_all(types.iter().map(|rt| fetcher.fetch(rt, scope))).await;

    let mut outcome = DispatchOutcome::default();
    for (resource_type, result) in types.iter().zip(fetched) {
        match result {
            Ok(documents) => per_type(resource_type, documents, &mut outcome.records),
            Err(e) => {
                tracing::warn!("Fetch failed for {}: {}", resource_type.canonical, e);
                outcome.failures.push(TypeFailure {
                    resource_type: resource_type.canonical,
                    error: e.to_string(),
                });
            }
        }
    }
    outcome
}
