use http::StatusCode;
use thiserror::Error;

use crate::store::StoreError;

/// Everything that can go wrong while serving a user request.
///
/// The display text is what callers see in the `error` field of a failed
/// response, so it stays fixed; the underlying cause is kept as the source.
#[derive(Debug, Error)]
pub enum UserError {
    #[error("invalid user data")]
    InvalidInput(#[source] serde_json::Error),
    #[error("invalid email")]
    InvalidEmail,
    #[error("user already exists")]
    AlreadyExists,
    #[error("user does not exist")]
    NotFound,
    #[error("failed to fetch record")]
    FetchFailed(#[source] StoreError),
    #[error("failed to unmarshal record")]
    UnmarshalFailed(#[source] serde_json::Error),
    #[error("could not put item")]
    WriteFailed(#[source] StoreError),
    #[error("could not delete item")]
    DeleteFailed(#[source] StoreError),
    #[error("could not marshal item")]
    MarshalFailed(String),
    #[error("method not allowed")]
    MethodNotAllowed,
}

impl UserError {
    /// Status code reported for this error. Only an unknown method gets
    /// something other than 400.
    pub fn status(&self) -> StatusCode {
        match self {
            Self::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            _ => StatusCode::BAD_REQUEST,
        }
    }
}
