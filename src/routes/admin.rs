use crate::{AppState, handlers};
use axum::{
    Router,
    routing::{delete, get, post, put},
};

/// Admin Router Module
///
/// Routes restricted to `ADMIN` tokens. The router returned here carries no
/// authorization of its own: `create_router` wraps it in the `require_admin`
/// route layer before merging it with the public routes.
pub fn admin_routes() -> Router<AppState> {
    Router::new()
        // POST /pizza
        .route("/pizza", post(handlers::add_pizza_to_menu))
        // DELETE /pizza/{name}
        .route("/pizza/{name}", delete(handlers::delete_pizza_from_menu))
        // GET /order/{id}, PUT /order/{id}
        // Full order view and the force-cancel that bypasses the status guard.
        .route(
            "/order/{id}",
            get(handlers::get_order).put(handlers::cancel_order_regardless_status),
        )
        // PUT /order/advance/{id}
        .route("/order/advance/{id}", put(handlers::advance_order_status))
}
