//! Error types for loading, querying and consuming the roster API.
//!
//! # Design
//! `QueryError` is the client-caused failure of a list request and carries
//! the offending parameter value so the HTTP layer can echo it back.
//! `LoadError` only happens before the first request is served. `ApiError`
//! belongs to `RosterClient` and mirrors the statuses the server produces.

use std::path::PathBuf;

/// A query parameter value outside the domain of its stage.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum QueryError {
    /// The value is not one of the accepted literals for `key`.
    #[error("Specified {key} '{value}' is not a valid value")]
    InvalidValue { key: &'static str, value: String },

    /// The value for `key` must be an integer.
    #[error("Specified {key} '{value}' can't be parsed to an integer")]
    NotAnInteger { key: &'static str, value: String },

    /// `orderBy` named a field the resource cannot be sorted by.
    #[error("Specified order '{0}' is not a sortable attribute")]
    UnknownSortKey(String),

    #[error("Specified limit '{0}' must not be negative")]
    NegativeLimit(i64),
}

impl QueryError {
    /// Name of the query parameter that was rejected.
    pub fn key(&self) -> &str {
        match self {
            QueryError::InvalidValue { key, .. } | QueryError::NotAnInteger { key, .. } => key,
            QueryError::UnknownSortKey(_) => crate::query::ORDER_BY,
            QueryError::NegativeLimit(_) => crate::query::LIMIT,
        }
    }
}

/// Failure to build a `RecordStore` from its backing JSON.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed {kind} data: {source}")]
    Json {
        kind: &'static str,
        #[source]
        source: serde_json::Error,
    },

    /// Two records share an identifier.
    #[error("duplicate {kind} identifier '{id}'")]
    DuplicateId { kind: &'static str, id: String },
}

/// Errors returned by `RosterClient` build and parse methods.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// The server returned 404: the requested record does not exist.
    #[error("resource not found")]
    NotFound,

    /// The server returned 400; carries the server's description of the
    /// rejected parameter.
    #[error("bad request: {0}")]
    BadRequest(String),

    /// The server returned any other non-200 status.
    #[error("HTTP {status}: {body}")]
    HttpError { status: u16, body: String },

    #[error("deserialization failed: {0}")]
    DeserializationError(String),

    /// The query could not be encoded into a URL.
    #[error("serialization failed: {0}")]
    SerializationError(String),
}
