use crate::interface_adapters::handlers::{current_user, login, logout, register};
use crate::interface_adapters::state::AppState;
use axum::{
    routing::{get, post},
    Router,
};
use common::ExceptionFilter;
use tower_http::trace::TraceLayer;

pub fn app(state: AppState, filter: ExceptionFilter) -> Router {
    let router = Router::new()
        .route("/users/authen/register", post(register))
        .route("/users/authen/login", post(login))
        .route("/users/authen/me", get(current_user))
        .route("/users/authen/logout", post(logout))
        .with_state(state);

    filter.install(router).layer(TraceLayer::new_for_http())
}
