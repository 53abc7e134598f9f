use crate::domain::errors::AuthError;
use crate::interface_adapters::protocol::{
    LoginData, LoginRequest, LogoutData, LogoutRequest, MeQuery, RegisterRequest,
    UserIdentityData,
};
use crate::interface_adapters::security::Argon2Hasher;
use crate::interface_adapters::state::{
    AppState, InMemoryAccountStore, InMemorySessionStore, SystemClock,
};
use crate::use_cases::current_user::CurrentUserUseCase;
use crate::use_cases::login::{LoginCommand, LoginUseCase};
use crate::use_cases::logout::LogoutUseCase;
use crate::use_cases::register::{RegisterCommand, RegisterUseCase};
use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Query, State,
    },
    Json,
};
use common::{BaseResponse, ErrorResponse, FieldError, ServiceError};
use tracing::info;

// Handler for creating an account.
pub async fn register(
    State(state): State<AppState>,
    payload: Result<Json<RegisterRequest>, JsonRejection>,
) -> Result<BaseResponse<UserIdentityData>, ServiceError> {
    let Json(payload) = payload?;

    let use_case = RegisterUseCase {
        accounts: InMemoryAccountStore {
            accounts: state.accounts.clone(),
        },
        hasher: Argon2Hasher,
    };

    let account = use_case
        .execute(RegisterCommand {
            email: payload.email,
            password: payload.password,
            full_name: payload.full_name,
        })
        .await
        .map_err(|err| map_auth_error(err, AuthErrorContext::Register))?;

    info!(user_id = account.id, "account registered");

    Ok(BaseResponse::created(UserIdentityData {
        id: account.id,
        email: account.email,
        full_name: account.full_name,
        role: account.role,
    }))
}

// Handler for issuing a session token.
pub async fn login(
    State(state): State<AppState>,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> Result<BaseResponse<LoginData>, ServiceError> {
    let Json(payload) = payload?;

    let use_case = LoginUseCase {
        clock: SystemClock,
        accounts: InMemoryAccountStore {
            accounts: state.accounts.clone(),
        },
        sessions: InMemorySessionStore {
            sessions: state.sessions.clone(),
        },
        hasher: Argon2Hasher,
        ttl_seconds: state.session_ttl_seconds,
    };

    let result = use_case
        .execute(LoginCommand {
            email: payload.email,
            password: payload.password,
        })
        .await
        .map_err(|err| map_auth_error(err, AuthErrorContext::Login))?;

    info!(user_id = result.user_id, "session issued");

    Ok(BaseResponse::ok(LoginData {
        token: result.token,
        expires_at: result.expires_at,
    }))
}

// Handler resolving the user behind `?token=`. This is what the web client's
// auth gate calls on every gated navigation.
pub async fn current_user(
    State(state): State<AppState>,
    query: Result<Query<MeQuery>, QueryRejection>,
) -> Result<BaseResponse<UserIdentityData>, ServiceError> {
    let Query(query) = query?;

    let use_case = CurrentUserUseCase {
        clock: SystemClock,
        store: InMemorySessionStore {
            sessions: state.sessions.clone(),
        },
    };

    let user = use_case
        .execute(&query.token)
        .await
        .map_err(|err| map_auth_error(err, AuthErrorContext::CurrentUser))?;

    Ok(BaseResponse::ok(UserIdentityData {
        id: user.user_id,
        email: user.email,
        full_name: user.full_name,
        role: user.role,
    }))
}

// Handler for revoking a session token.
pub async fn logout(
    State(state): State<AppState>,
    payload: Result<Json<LogoutRequest>, JsonRejection>,
) -> Result<BaseResponse<LogoutData>, ServiceError> {
    let Json(payload) = payload?;

    let use_case = LogoutUseCase {
        store: InMemorySessionStore {
            sessions: state.sessions.clone(),
        },
    };

    let result = use_case
        .execute(&payload.token)
        .await
        .map_err(|err| map_auth_error(err, AuthErrorContext::Logout))?;

    Ok(BaseResponse::ok(LogoutData {
        revoked: result.revoked,
    }))
}

// Maps domain errors to declared HTTP errors by endpoint context.
enum AuthErrorContext {
    Register,
    Login,
    CurrentUser,
    Logout,
}

fn single(resource: &str, field: &str, message: &str) -> ErrorResponse {
    ErrorResponse::single(FieldError::new(resource, field, message))
}

fn storage_error() -> ServiceError {
    ServiceError::bad_gateway(single("storage", "store", "storage error"))
}

fn map_auth_error(err: AuthError, context: AuthErrorContext) -> ServiceError {
    match context {
        AuthErrorContext::Register => match err {
            AuthError::InvalidRegistration(violations) => {
                let errors = violations
                    .into_iter()
                    .map(|violation| {
                        FieldError::new("RegisterRequest", violation.field, violation.message)
                    })
                    .collect();
                match ErrorResponse::from_errors(errors) {
                    Some(body) => ServiceError::bad_request(body),
                    None => ServiceError::unexpected("registration rejected without violations"),
                }
            }
            AuthError::EmailTaken => ServiceError::conflict(single(
                "RegisterRequest",
                "email",
                "Email is already registered",
            )),
            AuthError::StorageFailure
            | AuthError::InvalidCredentials
            | AuthError::InvalidToken
            | AuthError::SessionExpired => storage_error(),
        },
        AuthErrorContext::Login => match err {
            AuthError::InvalidCredentials => ServiceError::unauthorized(single(
                "LoginRequest",
                "email; password",
                "Email or password is incorrect",
            )),
            AuthError::StorageFailure
            | AuthError::InvalidRegistration(_)
            | AuthError::EmailTaken
            | AuthError::InvalidToken
            | AuthError::SessionExpired => storage_error(),
        },
        AuthErrorContext::CurrentUser => match err {
            AuthError::InvalidToken => {
                ServiceError::unauthorized(single("Session", "token", "invalid session token"))
            }
            AuthError::SessionExpired => {
                ServiceError::unauthorized(single("Session", "token", "session expired"))
            }
            AuthError::StorageFailure
            | AuthError::InvalidRegistration(_)
            | AuthError::EmailTaken
            | AuthError::InvalidCredentials => storage_error(),
        },
        AuthErrorContext::Logout => match err {
            AuthError::StorageFailure => storage_error(),
            AuthError::InvalidRegistration(_)
            | AuthError::EmailTaken
            | AuthError::InvalidCredentials
            | AuthError::InvalidToken
            | AuthError::SessionExpired => {
                ServiceError::bad_request(single("LogoutRequest", "token", "invalid token"))
            }
        },
    }
}
