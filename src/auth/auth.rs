use crate::error::ApiError;
use actix_web::{FromRequest, HttpMessage, HttpRequest, dev::Payload};
use futures::future::{Ready, ready};

/// Verified admin identity, inserted into the request extensions by
/// `auth_middleware`.
#[derive(Clone)]
pub struct AuthAdmin {
    pub admin_id: u64,
    pub email: String,
}

impl FromRequest for AuthAdmin {
    type Error = actix_web::Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        match req.extensions().get::<AuthAdmin>() {
            Some(admin) => ready(Ok(admin.clone())),
            // Only reachable on a route that skipped the middleware.
            None => ready(Err(ApiError::MissingToken.into())),
        }
    }
}
