use crate::domain::GateRequest;
use crate::interface_adapters::state::AppState;
use crate::use_cases::AuthGateUseCase;
use axum::{
    extract::{Request, State},
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};
use axum_extra::extract::CookieJar;

pub const TOKEN_COOKIE: &str = "token";
pub const PREVIOUS_PATH_COOKIE: &str = "prePath";

fn cookie_value(jar: &CookieJar, name: &str) -> String {
    jar.get(name)
        .map(|cookie| cookie.value().to_string())
        .unwrap_or_default()
}

// Runs before page handlers; redirects or lets the navigation through.
pub async fn auth_gate(
    State(state): State<AppState>,
    jar: CookieJar,
    request: Request,
    next: Next,
) -> Response {
    let gate = AuthGateUseCase {
        provider: state.identity.clone(),
        timeout: state.auth_verify_timeout,
    };
    let gate_request = GateRequest {
        token: cookie_value(&jar, TOKEN_COOKIE),
        current_path: request.uri().path().to_string(),
        previous_path: cookie_value(&jar, PREVIOUS_PATH_COOKIE),
    };

    let decision = gate.execute(gate_request).await;
    match decision.redirect_target() {
        Some(target) => {
            tracing::debug!(path = %request.uri().path(), %target, "navigation redirected");
            Redirect::temporary(target).into_response()
        }
        None => next.run(request).await,
    }
}
