use axum::{
    async_trait,
    extract::{FromRequest, Request},
    Json,
};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::debug;

use crate::error::AppError;

/// `Json<T>` whose rejection is a field-keyed validation error on `body`.
pub struct ValidJson<T>(pub T);

#[async_trait]
impl<S, T> FromRequest<S> for ValidJson<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match Json::<T>::from_request(req, state).await {
            Ok(Json(value)) => Ok(Self(value)),
            Err(rejection) => {
                debug!(reason = %rejection.body_text(), "rejected request body");
                Err(AppError::validation("body", rejection.body_text()))
            }
        }
    }
}

/// Reads a loosely typed body field as text: strings as sent, numbers and
/// booleans in their JSON spelling. `null` is the same as leaving it out.
/// Arrays and objects are handed back so the caller can report the field.
pub fn loose_text(value: Option<Value>) -> Result<Option<String>, Value> {
    match value {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => Ok(Some(s)),
        Some(Value::Number(n)) => Ok(Some(n.to_string())),
        Some(Value::Bool(b)) => Ok(Some(b.to_string())),
        Some(other) => Err(other),
    }
}
