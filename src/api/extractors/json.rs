use axum::{
    extract::{rejection::JsonRejection, FromRequest, Request},
    Json,
};
use serde::de::DeserializeOwned;
use tracing::debug;
use crate::error::AppError;

/// `Json` whose rejections render as the API's error envelope.
pub struct JsonBody<T>(pub T);

impl<S, T> FromRequest<S> for JsonBody<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|rejection| {
                debug!(reason = %rejection.body_text(), "Rejected JSON body");
                match rejection {
                    JsonRejection::MissingJsonContentType(_) => {
                        AppError::BadRequest("Content-Type must be application/json".into())
                    }
                    _ => AppError::BadRequest("Request body is not valid JSON".into()),
                }
            })?;
        Ok(JsonBody(value))
    }
}
