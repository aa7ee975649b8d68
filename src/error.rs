use std::path::PathBuf;
use thiserror::Error;

/// Fatal inspection failures. None of these are retried.
#[derive(Debug, Error)]
pub enum InspectError {
    #[error("failed to open database {}", path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: rusqlite::Error,
    },
    #[error("query failed: {what}")]
    Query {
        what: &'static str,
        #[source]
        source: rusqlite::Error,
    },
    #[error("failed to close database")]
    Close(#[source] rusqlite::Error),
    #[error("failed to write report")]
    Output(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, InspectError>;

pub(crate) fn query(what: &'static str) -> impl FnOnce(rusqlite::Error) -> InspectError {
    move |source| InspectError::Query { what, source }
}
