use crate::error::Error;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

pub(crate) struct APIError(anyhow::Error);

impl APIError {
    fn status(&self) -> StatusCode {
        if let Some(err) = self.0.downcast_ref::<Error>() {
            return match err {
                Error::Validation(_) => StatusCode::BAD_REQUEST,
                Error::DomainNotConfigured(_) => StatusCode::NOT_FOUND,
                Error::RecordConflict => StatusCode::UNPROCESSABLE_ENTITY,
                _ => StatusCode::INTERNAL_SERVER_ERROR,
            };
        }
        match self.0.downcast_ref::<JsonRejection>() {
            Some(
                JsonRejection::JsonDataError(_)
                | JsonRejection::JsonSyntaxError(_)
                | JsonRejection::BytesRejection(_),
            ) => StatusCode::BAD_REQUEST,
            Some(JsonRejection::MissingJsonContentType(_)) => StatusCode::UNSUPPORTED_MEDIA_TYPE,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for APIError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = Json(json!({
            "error": format!("{}", self.0),
        }));
        (status, body).into_response()
    }
}

impl<E> From<E> for APIError
where
    E: Into<anyhow::Error>,
{
    fn from(err: E) -> Self {
        Self(err.into())
    }
}
