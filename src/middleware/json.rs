//! JSON body extractor that reports malformed input as a validation error.

use axum::{
    extract::{FromRequest, Request},
    Json,
};
use serde::de::DeserializeOwned;

use crate::errors::AppError;

/// Drop-in replacement for [`axum::Json`] in handlers.
///
/// Any rejection (missing content type, unparsable body, wrong field types)
/// becomes [`AppError::Validation`], so clients always get a 400 with the
/// usual error envelope.
#[derive(Debug, Clone)]
pub struct JsonBody<T>(pub T);

impl<S, T> FromRequest<S> for JsonBody<T>
where
    S: Send + Sync,
    T: DeserializeOwned,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match Json::<T>::from_request(req, state).await {
            Ok(Json(value)) => Ok(Self(value)),
            Err(rejection) => {
                tracing::debug!(error = %rejection.body_text(), "Rejected request body");
                Err(AppError::Validation(format!(
                    "Body JSON tidak valid: {}",
                    rejection.body_text()
                )))
            }
        }
    }
}
