use crate::protocol::{ErrorResponse, FieldError};
use crate::service_error::{ParkedError, ServiceError};
use axum::{
    Json, Router,
    extract::{Request, State},
    http::Uri,
    middleware::{self, Next},
    response::{IntoResponse, Response},
};
use std::any::Any;
use tower_http::catch_panic::CatchPanicLayer;

// Category label attached to every failure logged by the filter.
pub const GLOBAL_EXCEPTION: &str = "GLOBAL_EXCEPTION";

/// How a failed request's body is chosen.
///
/// `RawError` serializes the error object itself, which is what the
/// services have always sent and what the web client's auth gate reads
/// (`{"status": 401, ...}`). `Structured` sends only the extracted
/// [`ErrorResponse`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum BodyPolicy {
    #[default]
    RawError,
    Structured,
}

impl BodyPolicy {
    pub fn parse(value: Option<&str>) -> Self {
        match value {
            Some(value) if value.trim().eq_ignore_ascii_case("structured") => {
                BodyPolicy::Structured
            }
            _ => BodyPolicy::RawError,
        }
    }

    // Selected by `ERROR_BODY_POLICY`.
    pub fn from_env() -> Self {
        Self::parse(std::env::var("ERROR_BODY_POLICY").ok().as_deref())
    }
}

/// Terminal error boundary for a service router.
///
/// Built once at startup and installed with [`ExceptionFilter::install`];
/// every failed request passes through [`ExceptionFilter::catch`] exactly once.
#[derive(Debug, Clone, Default)]
pub struct ExceptionFilter {
    policy: BodyPolicy,
}

impl ExceptionFilter {
    pub fn new(policy: BodyPolicy) -> Self {
        Self { policy }
    }

    pub fn policy(&self) -> BodyPolicy {
        self.policy
    }

    // Log the failure, then render status and body under the configured policy.
    pub fn catch(&self, error: &ServiceError) -> Response {
        tracing::error!(
            context = GLOBAL_EXCEPTION,
            status = error.status().as_u16(),
            message = %error.message(),
            trace = %error.trace(),
            "request failed"
        );

        let status = error.status();
        match self.policy {
            BodyPolicy::RawError => (status, Json(error.raw_body())).into_response(),
            BodyPolicy::Structured => (status, Json(error.error_response())).into_response(),
        }
    }

    /// Wrap a router so that handler errors, unmatched routes and panics all
    /// end at this filter.
    pub fn install<S>(self, router: Router<S>) -> Router<S>
    where
        S: Clone + Send + Sync + 'static,
    {
        router
            .fallback(route_not_found)
            // Inner layer: a panic becomes a parked unexpected error.
            .layer(CatchPanicLayer::custom(panic_to_error))
            .layer(middleware::from_fn_with_state(self, catch_service_errors))
    }
}

async fn catch_service_errors(
    State(filter): State<ExceptionFilter>,
    request: Request,
    next: Next,
) -> Response {
    let mut response = next.run(request).await;
    match response.extensions_mut().remove::<ParkedError>() {
        Some(ParkedError(error)) => filter.catch(&error),
        None => response,
    }
}

async fn route_not_found(uri: Uri) -> ServiceError {
    ServiceError::not_found(ErrorResponse::single(FieldError::new(
        "route",
        "path",
        format!("Cannot resolve {}", uri.path()),
    )))
}

fn panic_to_error(payload: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(message) = payload.downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "unknown panic payload".to_string()
    };
    ServiceError::unexpected(format!("handler panicked: {detail}")).into_response()
}
