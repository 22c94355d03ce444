//! Bearer-token authentication.
//!
//! This service verifies tokens, it never mints them; issuance belongs to the
//! account service that shares the signing secret.

use std::future::{Ready, ready};

use actix_web::dev::Payload;
use actix_web::{FromRequest, HttpRequest, error::ErrorUnauthorized, web};
use jsonwebtoken::{Algorithm, DecodingKey, Validation, decode};
use serde::{Deserialize, Serialize};

use crate::domain::types::UserId;
use crate::models::config::ServerConfig;
use crate::services::ServiceError;

/// Claims carried by a verified bearer token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthenticatedUser {
    /// Subject: the user id as a decimal string.
    pub sub: String,
    pub username: String,
    pub exp: usize,
}

impl AuthenticatedUser {
    /// The authenticated user id, parsed from the token subject.
    pub fn user_id(&self) -> Result<UserId, ServiceError> {
        self.sub
            .parse::<i32>()
            .ok()
            .and_then(|id| UserId::new(id).ok())
            .ok_or(ServiceError::Unauthorized)
    }
}

fn bearer_token(req: &HttpRequest) -> Option<&str> {
    req.headers()
        .get(actix_web::http::header::AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
}

impl FromRequest for AuthenticatedUser {
    type Error = actix_web::Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let result = (|| {
            let config = req
                .app_data::<web::Data<ServerConfig>>()
                .ok_or_else(|| ErrorUnauthorized("missing server configuration"))?;
            let token =
                bearer_token(req).ok_or_else(|| ErrorUnauthorized("missing bearer token"))?;

            decode::<AuthenticatedUser>(
                token,
                &DecodingKey::from_secret(config.jwt_secret.as_bytes()),
                &Validation::new(Algorithm::HS256),
            )
            .map(|data| data.claims)
            .map_err(|_| ErrorUnauthorized("invalid bearer token"))
        })();

        ready(result)
    }
}
