//! Path parameter extractor with envelope rejections.

use crate::errors::AppError;
use axum::{
    extract::{FromRequestParts, Path},
    http::request::Parts,
    response::{IntoResponse, Response},
};
use serde::de::DeserializeOwned;

/// Drop-in replacement for [`Path`].
///
/// Undecodable segments (e.g. invalid percent-encoded UTF-8) are rejected
/// as `VALIDATION_ERROR` with `field = "path"`.
///
/// # Example
/// ```ignore
/// use axum::Router;
/// use axum::routing::get;
/// use axum_helpers::extractors::PathParam;
///
/// async fn get_product(PathParam(id): PathParam<String>) -> String {
///     format!("Product ID: {}", id)
/// }
///
/// let app = Router::new().route("/product/{id}", get(get_product));
/// ```
pub struct PathParam<T>(pub T);

impl<T, S> FromRequestParts<S> for PathParam<T>
where
    T: DeserializeOwned + Send,
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(value) = Path::<T>::from_request_parts(parts, state)
            .await
            .map_err(|e| AppError::from(e).into_response())?;

        Ok(PathParam(value))
    }
}
