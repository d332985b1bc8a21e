//! Extractors that reject malformed requests with a 422 JSON error.
//!
//! Axum's own [Json] and [Query] extractors answer with plain-text 400/415
//! responses for some failures, these wrappers report all of them as
//! [Error::InvalidRequest].

use axum::{
    Json,
    extract::{FromRequest, FromRequestParts, Query, Request},
    http::request::Parts,
};
use serde::de::DeserializeOwned;

use crate::Error;

/// A JSON request body deserialized as `T`.
#[derive(Debug)]
pub struct ValidatedJson<T>(pub T);

impl<T, S> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = Error;

    async fn from_request(request: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(request, state)
            .await
            .map_err(|rejection| {
                tracing::debug!("rejected JSON body: {rejection}");
                Error::InvalidRequest(rejection.body_text())
            })?;

        Ok(Self(value))
    }
}

/// A query string deserialized as `T`.
#[derive(Debug)]
pub struct ValidatedQuery<T>(pub T);

impl<T, S> FromRequestParts<S> for ValidatedQuery<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = Error;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(value) = Query::<T>::from_request_parts(parts, state)
            .await
            .map_err(|rejection| {
                tracing::debug!("rejected query string: {rejection}");
                Error::InvalidRequest(rejection.body_text())
            })?;

        Ok(Self(value))
    }
}
