//! Origin used to make song URLs absolute
use crate::{error::ServerError, state::AppState};
use axum::{
    extract::{FromRequestParts, Host},
    http::request::Parts,
};

const FORWARDED_PROTO: &str = "x-forwarded-proto";

/// Base URL for the current request
///
/// The configured public base URL wins. Otherwise the origin is rebuilt
/// from the request: scheme from `X-Forwarded-Proto` (default `http`),
/// authority from the `Host` header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestBase(pub String);

impl RequestBase {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[axum::async_trait]
impl FromRequestParts<AppState> for RequestBase {
    type Rejection = ServerError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        if let Some(base) = &state.public_base_url {
            return Ok(Self(base.clone()));
        }

        let Host(host) = Host::from_request_parts(parts, state)
            .await
            .map_err(|_| ServerError::BadRequest("Missing Host header".to_string()))?;

        let scheme = parts
            .headers
            .get(FORWARDED_PROTO)
            .and_then(|value| value.to_str().ok())
            .and_then(|value| value.split(',').next())
            .map(str::trim)
            .filter(|value| !value.is_empty())
            .unwrap_or("http");

        Ok(Self(format!("{}://{}", scheme, host)))
    }
}
