use actix_web::Error;
use actix_web::{FromRequest, HttpMessage};
use application::auth::Claims;
use application::Caller;
use futures::future::{ready, Ready};

/// Authenticated identity, populated by the auth middleware.
///
/// Extraction fails with 401 when the request carried no valid token.
pub struct AuthUser(pub Claims);

impl AuthUser {
    /// The identity use cases operate on behalf of.
    pub fn caller(&self) -> Caller {
        Caller::new(self.0.sub, self.0.role)
    }
}

impl FromRequest for AuthUser {
    type Error = Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(
        req: &actix_web::HttpRequest,
        _payload: &mut actix_web::dev::Payload,
    ) -> Self::Future {
        match req.extensions().get::<Claims>() {
            Some(claims) => ready(Ok(AuthUser(claims.clone()))),
            None => ready(Err(actix_web::error::ErrorUnauthorized("Unauthorized"))),
        }
    }
}

impl std::ops::Deref for AuthUser {
    type Target = Claims;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}
