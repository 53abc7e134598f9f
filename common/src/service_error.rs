use crate::protocol::{ErrorResponse, FieldError};
use axum::{
    extract::rejection::{JsonRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use serde_json::{Map, Value};
use std::{backtrace::Backtrace, fmt, sync::Arc};

// An error that carries its own HTTP status and a machine-readable body.
#[derive(Debug)]
pub struct DeclaredError {
    status: StatusCode,
    name: &'static str,
    message: String,
    body: ErrorResponse,
    trace: Backtrace,
}

impl DeclaredError {
    pub fn status(&self) -> StatusCode {
        self.status
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn body(&self) -> &ErrorResponse {
        &self.body
    }
}

// Anything that failed without declaring how it should be surfaced.
#[derive(Debug)]
pub struct UnexpectedError {
    message: String,
    trace: Backtrace,
}

/// Closed set of failures a request handler can raise.
///
/// Handlers return `Result<_, ServiceError>`. Converting the error into a
/// response does not render it; the error is parked in the response
/// extensions and rendered by [`crate::ExceptionFilter`], which is the single
/// place that logs and serializes failures.
#[derive(Debug)]
pub enum ServiceError {
    Declared(DeclaredError),
    Unexpected(UnexpectedError),
}

impl ServiceError {
    pub fn declared(status: StatusCode, body: ErrorResponse) -> Self {
        let message = summarize(&body).unwrap_or_else(|| {
            status
                .canonical_reason()
                .unwrap_or("Http Exception")
                .to_string()
        });
        ServiceError::Declared(DeclaredError {
            status,
            name: exception_name(status),
            message,
            body,
            trace: Backtrace::force_capture(),
        })
    }

    pub fn unexpected(message: impl Into<String>) -> Self {
        ServiceError::Unexpected(UnexpectedError {
            message: message.into(),
            trace: Backtrace::force_capture(),
        })
    }

    pub fn bad_request(body: ErrorResponse) -> Self {
        Self::declared(StatusCode::BAD_REQUEST, body)
    }

    pub fn unauthorized(body: ErrorResponse) -> Self {
        Self::declared(StatusCode::UNAUTHORIZED, body)
    }

    pub fn not_found(body: ErrorResponse) -> Self {
        Self::declared(StatusCode::NOT_FOUND, body)
    }

    pub fn conflict(body: ErrorResponse) -> Self {
        Self::declared(StatusCode::CONFLICT, body)
    }

    pub fn bad_gateway(body: ErrorResponse) -> Self {
        Self::declared(StatusCode::BAD_GATEWAY, body)
    }

    // Status the error declares for itself, if any.
    pub fn declared_status(&self) -> Option<StatusCode> {
        match self {
            ServiceError::Declared(error) => Some(error.status),
            ServiceError::Unexpected(_) => None,
        }
    }

    pub fn status(&self) -> StatusCode {
        self.declared_status()
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    }

    // Attached body for declared errors; an empty list otherwise.
    pub fn error_response(&self) -> ErrorResponse {
        match self {
            ServiceError::Declared(error) => error.body.clone(),
            ServiceError::Unexpected(_) => ErrorResponse::default(),
        }
    }

    pub fn message(&self) -> &str {
        match self {
            ServiceError::Declared(error) => &error.message,
            ServiceError::Unexpected(error) => &error.message,
        }
    }

    pub fn trace(&self) -> &Backtrace {
        match self {
            ServiceError::Declared(error) => &error.trace,
            ServiceError::Unexpected(error) => &error.trace,
        }
    }

    /// The error object as it is sent on the wire under the raw-error policy.
    ///
    /// Unexpected errors expose no public fields and serialize to `{}`.
    pub fn raw_body(&self) -> Value {
        match self {
            ServiceError::Declared(error) => serde_json::to_value(RawDeclaredError {
                response: &error.body,
                status: error.status.as_u16(),
                message: &error.message,
                name: error.name,
            })
            .unwrap_or_else(|_| Value::Object(Map::new())),
            ServiceError::Unexpected(_) => Value::Object(Map::new()),
        }
    }
}

#[derive(Serialize)]
struct RawDeclaredError<'a> {
    response: &'a ErrorResponse,
    status: u16,
    message: &'a str,
    name: &'a str,
}

impl fmt::Display for ServiceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ServiceError::Declared(error) => write!(f, "{} {}", error.status, error.message),
            ServiceError::Unexpected(error) => write!(f, "unexpected error: {}", error.message),
        }
    }
}

impl std::error::Error for ServiceError {}

// Marker carried in response extensions until the exception filter renders it.
#[derive(Clone)]
pub(crate) struct ParkedError(pub(crate) Arc<ServiceError>);

impl IntoResponse for ServiceError {
    fn into_response(self) -> Response {
        let mut response = self.status().into_response();
        response
            .extensions_mut()
            .insert(ParkedError(Arc::new(self)));
        response
    }
}

impl From<JsonRejection> for ServiceError {
    fn from(rejection: JsonRejection) -> Self {
        ServiceError::declared(
            rejection.status(),
            ErrorResponse::single(FieldError::new("request", "body", rejection.body_text())),
        )
    }
}

impl From<QueryRejection> for ServiceError {
    fn from(rejection: QueryRejection) -> Self {
        ServiceError::declared(
            rejection.status(),
            ErrorResponse::single(FieldError::new("request", "query", rejection.body_text())),
        )
    }
}

fn summarize(body: &ErrorResponse) -> Option<String> {
    body.first()
        .map(|error| format!("{}: {}", error.field, error.message))
}

fn exception_name(status: StatusCode) -> &'static str {
    match status {
        StatusCode::BAD_REQUEST => "BadRequestError",
        StatusCode::UNAUTHORIZED => "UnauthorizedError",
        StatusCode::FORBIDDEN => "ForbiddenError",
        StatusCode::NOT_FOUND => "NotFoundError",
        StatusCode::CONFLICT => "ConflictError",
        StatusCode::UNSUPPORTED_MEDIA_TYPE => "UnsupportedMediaTypeError",
        StatusCode::UNPROCESSABLE_ENTITY => "UnprocessableEntityError",
        StatusCode::BAD_GATEWAY => "BadGatewayError",
        _ => "HttpError",
    }
}
