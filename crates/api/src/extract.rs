//! Request extractors.

use axum::{
    Json,
    extract::{FromRequest, Request},
    response::{IntoResponse, Response},
};
use serde_json::Value;

use crate::db::Document;
use crate::error::AppError;
use crate::models::Schema;

/// JSON body projected onto the schema's allow-list before deserialization.
///
/// Syntax errors and non-JSON content types are rejected the way
/// [`axum::Json`] rejects them. A body that parses but does not fit the
/// schema (wrong or missing fields, invalid email) is a 422 with a
/// `{"detail": ...}` body.
#[derive(Debug, Clone)]
pub struct AllowListJson<T>(pub T);

impl<T, S> FromRequest<S> for AllowListJson<T>
where
    T: Schema + Send,
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<Value>::from_request(req, state)
            .await
            .map_err(IntoResponse::into_response)?;

        let Value::Object(document) = value else {
            return Err(
                AppError::Validation("request body must be a JSON object".to_string())
                    .into_response(),
            );
        };

        parse::<T>(document)
            .map(Self)
            .map_err(IntoResponse::into_response)
    }
}

fn parse<T: Schema>(document: Document) -> Result<T, AppError> {
    T::from_document(document).map_err(|e| AppError::Validation(e.to_string()))
}
