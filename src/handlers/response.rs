use http::StatusCode;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::error;

use crate::domain::ErrorBody;
use crate::error::UserError;

pub const CONTENT_TYPE: &str = "Content-Type";
pub const APPLICATION_JSON: &str = "application/json";

/// The uniform envelope every request is answered with.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Response {
    pub status_code: u16,
    pub headers: BTreeMap<String, String>,
    pub body: String,
}

#[cfg(test)]
impl Response {
    pub fn status(&self) -> StatusCode {
        StatusCode::from_u16(self.status_code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    }
}

/// Serializes `payload` as the JSON body of a response with `status`.
///
/// `()` and `None` become the literal `null`. A payload that refuses to
/// serialize is logged and turned into a 500 carrying an error body; this
/// function itself never fails.
pub fn build_response<T: Serialize + ?Sized>(status: StatusCode, payload: &T) -> Response {
    match serde_json::to_string(payload) {
        Ok(body) => envelope(status, body),
        Err(e) => {
            error!(error = %e, status = status.as_u16(), "Could not marshal response");
            let body = serde_json::to_string(&ErrorBody::new("could not marshal response"))
                .unwrap_or_default();
            envelope(StatusCode::INTERNAL_SERVER_ERROR, body)
        }
    }
}

/// Response for a failed operation: `{"error": <message>}` with the error's
/// status.
pub fn error_response(err: &UserError) -> Response {
    build_response(err.status(), &ErrorBody::new(err.to_string()))
}

fn envelope(status: StatusCode, body: String) -> Response {
    let mut headers = BTreeMap::new();
    headers.insert(CONTENT_TYPE.to_string(), APPLICATION_JSON.to_string());
    Response {
        status_code: status.as_u16(),
        headers,
        body,
    }
}
