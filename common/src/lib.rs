// Shared boundary layer for every barbershop service process.

pub mod config;
pub mod exception_filter;
pub mod protocol;
pub mod service_error;
pub mod telemetry;

pub use exception_filter::{BodyPolicy, ExceptionFilter, GLOBAL_EXCEPTION};
pub use protocol::{BaseResponse, ErrorResponse, FieldError};
pub use service_error::{DeclaredError, ServiceError, UnexpectedError};
