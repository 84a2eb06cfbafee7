use crate::{AppState, handlers};
use axum::{
    Router,
    routing::{get, post, put},
};

/// Public Router Module
///
/// Endpoints reachable without a token: reading the menu, placing and
/// cancelling orders, and the account flow.
pub fn public_routes() -> Router<AppState> {
    Router::new()
        // GET /health
        // Liveness check for load balancers.
        .route("/health", get(|| async { "ok" }))
        // GET /pizza
        .route("/pizza", get(handlers::get_menu))
        // POST /order
        // Validates every item against the live menu before persisting.
        .route("/order", post(handlers::create_order))
        // GET /order/status/{id}
        .route("/order/status/{id}", get(handlers::check_order_status))
        // PUT /order/cancel/{id}
        // Customer cancel; the status guard lives in the service.
        .route("/order/cancel/{id}", put(handlers::cancel_order))
        // POST /user/register, POST /user/login
        .route("/user/register", post(handlers::register_user))
        .route("/user/login", post(handlers::login))
}
