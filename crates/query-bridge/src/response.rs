use crate::Value;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FailureKind {
    /// No handler is registered under the requested name.
    UnimplementedQuery,
    InvalidArguments,
    /// The host could not produce the fact.
    HostUnavailable,
    /// The channel payload could not be decoded into a query.
    MalformedCall,
}

impl FailureKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            FailureKind::UnimplementedQuery => "UnimplementedQuery",
            FailureKind::InvalidArguments => "InvalidArguments",
            FailureKind::HostUnavailable => "HostUnavailable",
            FailureKind::MalformedCall => "MalformedCall",
        }
    }
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryFailure {
    pub kind: FailureKind,
    pub message: String,
    /// The requested query name, echoed verbatim.
    pub query: String,
}

impl QueryFailure {
    pub fn unimplemented(query: &str) -> Self {
        Self {
            kind: FailureKind::UnimplementedQuery,
            message: format!("Query not implemented: {query}"),
            query: query.to_string(),
        }
    }

    pub fn invalid_arguments(query: &str, reason: impl fmt::Display) -> Self {
        Self {
            kind: FailureKind::InvalidArguments,
            message: format!("Invalid arguments for {query}: {reason}"),
            query: query.to_string(),
        }
    }

    pub fn host_unavailable(query: &str, reason: impl fmt::Display) -> Self {
        Self {
            kind: FailureKind::HostUnavailable,
            message: format!("Host fact unavailable for {query}: {reason}"),
            query: query.to_string(),
        }
    }
}

impl fmt::Display for QueryFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.kind, self.message)
    }
}

/// Outcome of a single query round trip.
#[derive(Debug, Clone, PartialEq)]
pub enum Response {
    Success(Value),
    Failure(QueryFailure),
}

impl Response {
    pub fn is_success(&self) -> bool {
        matches!(self, Response::Success(_))
    }

    pub fn value(&self) -> Option<&Value> {
        match self {
            Response::Success(v) => Some(v),
            Response::Failure(_) => None,
        }
    }

    pub fn failure(&self) -> Option<&QueryFailure> {
        match self {
            Response::Success(_) => None,
            Response::Failure(f) => Some(f),
        }
    }

    /// `"Success"` or the failure kind, for logs.
    pub fn outcome(&self) -> &'static str {
        match self {
            Response::Success(_) => "Success",
            Response::Failure(f) => f.kind.as_str(),
        }
    }
}
