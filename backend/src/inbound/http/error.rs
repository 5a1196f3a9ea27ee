//! HTTP adapter mapping for domain errors.
//!
//! Purpose: keep the domain error types HTTP-agnostic while allowing Actix
//! handlers to turn core failures into consistent JSON responses and status
//! codes.

use actix_web::{HttpResponse, ResponseError, http::StatusCode};
use serde_json::json;
use tracing::error;

use crate::domain::{Error, ErrorCode, SwapError, TRACE_ID_HEADER};

/// Convenient result alias for HTTP handlers.
pub type ApiResult<T> = Result<T, Error>;

fn status_for(code: ErrorCode) -> StatusCode {
    match code {
        ErrorCode::InvalidRequest => StatusCode::BAD_REQUEST,
        ErrorCode::Unauthorized => StatusCode::UNAUTHORIZED,
        ErrorCode::Forbidden => StatusCode::FORBIDDEN,
        ErrorCode::NotFound => StatusCode::NOT_FOUND,
        ErrorCode::Conflict => StatusCode::CONFLICT,
        ErrorCode::ServiceUnavailable => StatusCode::SERVICE_UNAVAILABLE,
        ErrorCode::InternalError => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

fn redact_if_internal(error: &Error) -> Error {
    if matches!(error.code(), ErrorCode::InternalError) {
        let mut redacted = Error::internal("Internal server error");
        if let Some(id) = error.trace_id() {
            redacted = redacted.with_trace_id(id.to_owned());
        }
        redacted
    } else {
        error.clone()
    }
}

impl ResponseError for Error {
    fn status_code(&self) -> StatusCode {
        status_for(self.code())
    }

    fn error_response(&self) -> HttpResponse {
        let mut builder = HttpResponse::build(self.status_code());
        if let Some(id) = self.trace_id() {
            builder.insert_header((TRACE_ID_HEADER, id.to_owned()));
        }

        builder.json(redact_if_internal(self))
    }
}

impl From<actix_web::Error> for Error {
    fn from(err: actix_web::Error) -> Self {
        // Do not leak implementation details to clients.
        error!(error = %err, "actix error promoted to domain error");
        Error::internal("Internal server error")
    }
}

impl From<SwapError> for Error {
    fn from(err: SwapError) -> Self {
        let kind = err.kind();
        let mapped = match &err {
            SwapError::NotFound { .. } | SwapError::UnknownUser { .. } => {
                Error::not_found(err.to_string())
            }
            SwapError::SkillMismatch { skill, .. } => Error::invalid_request(err.to_string())
                .with_details(json!({ "code": kind, "skill": skill })),
            SwapError::InvalidTransition { from, to } => Error::conflict(err.to_string())
                .with_details(json!({ "code": kind, "from": from, "to": to })),
            SwapError::Forbidden { reason } => Error::forbidden(reason.clone()),
            SwapError::Conflict { reason } => Error::conflict(reason.clone()),
            SwapError::InvalidInput { field, .. } => Error::invalid_request(err.to_string())
                .with_details(json!({ "code": kind, "field": field })),
            SwapError::Store(store) => {
                error!(error = %store, "store failure surfaced to HTTP");
                return Error::service_unavailable("storage is temporarily unavailable")
                    .with_details(json!({ "code": kind }));
            }
        };
        if mapped.details().is_some() {
            mapped
        } else {
            mapped.with_details(json!({ "code": kind }))
        }
    }
}
