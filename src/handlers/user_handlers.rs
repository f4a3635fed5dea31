use http::StatusCode;
use tracing::{info, instrument, warn};

use super::request::Request;
use super::response::{build_response, error_response, Response};
use crate::clients::UserClient;
use crate::error::UserError;

/// GET: one user when `email` is given, every user otherwise.
///
/// A lookup for an email with no record answers 200 with an all-empty user.
#[instrument(skip_all)]
pub async fn get_user(request: &Request, users: &UserClient) -> Response {
    match request.query_param("email") {
        Some(email) => match users.fetch_user(email).await {
            Ok(fetched) => build_response(StatusCode::OK, &fetched.user),
            Err(e) => failure(e),
        },
        None => match users.fetch_users().await {
            Ok(all) => build_response(StatusCode::OK, &all),
            Err(e) => failure(e),
        },
    }
}

#[instrument(skip_all)]
pub async fn create_user(request: &Request, users: &UserClient) -> Response {
    match users.create_user(request.body_bytes()).await {
        Ok(user) => build_response(StatusCode::CREATED, &user),
        Err(e) => failure(e),
    }
}

#[instrument(skip_all)]
pub async fn update_user(request: &Request, users: &UserClient) -> Response {
    match users.update_user(request.body_bytes()).await {
        Ok(user) => build_response(StatusCode::OK, &user),
        Err(e) => failure(e),
    }
}

#[instrument(skip_all)]
pub async fn delete_user(request: &Request, users: &UserClient) -> Response {
    let email = request.query_param("email").unwrap_or_default();
    match users.delete_user(email).await {
        Ok(()) => build_response(StatusCode::OK, &()),
        Err(e) => failure(e),
    }
}

pub fn unhandled_method(method: &str) -> Response {
    info!(method, "Rejected unsupported method");
    let err = UserError::MethodNotAllowed;
    build_response(err.status(), &err.to_string())
}

fn failure(err: UserError) -> Response {
    match std::error::Error::source(&err) {
        Some(cause) => warn!(error = %err, cause = %cause, "Request failed"),
        None => warn!(error = %err, "Request failed"),
    }
    error_response(&err)
}
