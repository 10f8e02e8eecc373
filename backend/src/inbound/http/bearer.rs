//! Bearer token extraction from the `Authorization` header.

use actix_web::dev::Payload;
use actix_web::http::header::AUTHORIZATION;
use actix_web::{FromRequest, HttpRequest};
use futures_util::future::{Ready, ready};

/// Raw bearer token carried by a request, if any.
///
/// Extraction never fails: a missing, malformed, or non-bearer
/// `Authorization` header simply yields no token. The authorization
/// guard decides whether that matters for the operation at hand, so
/// public endpoints stay reachable without a header.
#[derive(Debug, Clone, Default)]
pub struct BearerToken(Option<String>);

impl BearerToken {
    /// The raw token string, when a well-formed header was present.
    pub fn token(&self) -> Option<&str> {
        self.0.as_deref()
    }

    fn parse(req: &HttpRequest) -> Self {
        let Some(value) = req
            .headers()
            .get(AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
        else {
            return Self(None);
        };
        let mut parts = value.splitn(2, ' ');
        match (parts.next(), parts.next()) {
            (Some(scheme), Some(token))
                if scheme.eq_ignore_ascii_case("bearer") && !token.is_empty() =>
            {
                Self(Some(token.to_owned()))
            }
            _ => Self(None),
        }
    }
}

impl FromRequest for BearerToken {
    type Error = actix_web::Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        ready(Ok(Self::parse(req)))
    }
}
