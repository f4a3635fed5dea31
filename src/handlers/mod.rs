//! Request dispatch: method tag in, response envelope out.

pub mod request;
pub mod response;
pub mod user_handlers;

pub use request::*;
pub use response::*;

use http::Method;
use tracing::{debug, instrument};

use crate::clients::UserClient;

/// Routes each request to the handler for its method.
#[derive(Clone)]
pub struct Router {
    users: UserClient,
}

impl Router {
    pub fn new(users: UserClient) -> Self {
        Self { users }
    }

    #[instrument(name = "dispatch", skip(self, request), fields(method = %request.http_method))]
    pub async fn handle(&self, request: &Request) -> Response {
        debug!("Dispatching request");
        let Ok(method) = Method::from_bytes(request.http_method.as_bytes()) else {
            return user_handlers::unhandled_method(&request.http_method);
        };

        if method == Method::GET {
            user_handlers::get_user(request, &self.users).await
        } else if method == Method::POST {
            user_handlers::create_user(request, &self.users).await
        } else if method == Method::PUT {
            user_handlers::update_user(request, &self.users).await
        } else if method == Method::DELETE {
            user_handlers::delete_user(request, &self.users).await
        } else {
            user_handlers::unhandled_method(method.as_str())
        }
    }
}
