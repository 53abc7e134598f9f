use crate::interface_adapters::handlers::hair_swap::swap_hair;
use crate::interface_adapters::handlers::pages::page_routes;
use crate::interface_adapters::middleware::auth_gate;
use crate::interface_adapters::state::AppState;
use axum::{Router, extract::DefaultBodyLimit, middleware, routing::post};
use common::ExceptionFilter;
use tower_http::trace::TraceLayer;

// Portraits larger than this are rejected before reaching the handler.
const HAIR_SWAP_BODY_LIMIT: usize = 10 * 1024 * 1024;

pub fn app(state: AppState, filter: ExceptionFilter) -> Router {
    // Wire the pages and the hair-swap proxy to their handlers.
    let router = page_routes()
        .route(
            "/api/hair-fast-gan/swap",
            post(swap_hair).layer(DefaultBodyLimit::max(HAIR_SWAP_BODY_LIMIT)),
        )
        .with_state(state.clone());

    // The gate wraps the fallback too, so unrouted gated paths are still checked.
    filter
        .install(router)
        .layer(middleware::from_fn_with_state(state, auth_gate))
        .layer(TraceLayer::new_for_http())
}
