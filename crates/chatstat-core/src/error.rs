use std::io;

use thiserror::Error;

use crate::query::ContextKey;

pub type Result<T> = std::result::Result<T, AnalyticsError>;

/// Failures of loading, configuring or running analytics queries.
#[derive(Debug, Error)]
pub enum AnalyticsError {
    #[error("malformed input: {0}")]
    MalformedInput(String),
    #[error("query '{query_id}' received no records")]
    EmptyInput { query_id: String },
    #[error("query '{query_id}' requires context key '{key}' which was not provided")]
    MissingContext { query_id: String, key: ContextKey },
    #[error("unknown query '{requested}' (expected an index below {available} or a registered query id)")]
    UnknownQueryId { requested: String, available: usize },
    #[error("query '{query_id}' requires a concrete user id, got 'all'")]
    RootUserRequired { query_id: String },
    #[error("configuration error: {0}")]
    InvalidConfig(String),
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error(transparent)]
    Json(#[from] serde_json::Error),
    #[error(transparent)]
    Csv(#[from] csv::Error),
}
